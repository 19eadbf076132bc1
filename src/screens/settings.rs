//! Company settings, restricted to administrators.

use super::form_screen::{FormScreen, Restricted};
use super::Route;
use crate::domain::AuthContext;
use crate::sheet::{FieldSpec, FormSpec, UploadPolicy};

const LOGO_POLICY: UploadPolicy = UploadPolicy {
    max_files: 1,
    max_size: 2 * 1024 * 1024,
};

pub const RESTRICTED: Restricted = Restricted {
    title: "Restricted access",
    message: "Only administrators can change company settings. You can still edit your own profile from Account.",
};

fn company() -> FormSpec {
    FormSpec::new("Company")
        .description("Company information shown on interventions")
        .field(FieldSpec::text("companyName", "Company name").required().default_value("ZenTask S.r.l."))
        .field(
            FieldSpec::text("interventionPrefix", "Intervention prefix")
                .required()
                .default_value("INT"),
        )
        .field(
            FieldSpec::multiline("description", "Description")
                .default_value("Azienda specializzata in servizi IT e assistenza tecnica"),
        )
        .field(FieldSpec::upload_with("logo", "Logo", LOGO_POLICY))
        .submit_label("Save Settings")
}

#[must_use]
pub fn screen(auth: &AuthContext) -> FormScreen {
    let screen = FormScreen::new(
        Route::Settings,
        "Settings",
        "Company configuration",
        vec![company()],
    );
    if auth.can_manage_company_settings() {
        screen
    } else {
        tracing::debug!(role = %auth.role, "settings restricted");
        screen.restricted_by(RESTRICTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn operators_see_restricted_notice() {
        let screen = screen(&AuthContext::new(Role::Operator, "Luigi Verdi"));
        assert_eq!(screen.restricted(), Some(&RESTRICTED));
    }

    #[test]
    fn admins_get_prefilled_form() {
        let mut screen = screen(&AuthContext::default());
        assert!(screen.session_mut().is_some());
        let data = screen.sections()[0].data();
        assert_eq!(data.get("interventionPrefix"), Some("INT"));
        assert_eq!(data.get("companyName"), Some("ZenTask S.r.l."));
    }
}
