//! The signed-in user's profile and password.

use super::form_screen::FormScreen;
use super::Route;
use crate::domain::AuthContext;
use crate::sheet::{FieldSpec, FormSpec, UploadPolicy};

const PHOTO_POLICY: UploadPolicy = UploadPolicy {
    max_files: 1,
    max_size: 1024 * 1024,
};

fn profile(auth: &AuthContext) -> FormSpec {
    let (first, last) = auth
        .display_name
        .split_once(' ')
        .unwrap_or((auth.display_name.as_str(), ""));
    let email = format!("{}.{}@zentask.it", first.to_lowercase(), last.to_lowercase());
    FormSpec::new("Profile")
        .description("Your personal information")
        .field(FieldSpec::text("firstName", "First name").required().default_value(first))
        .field(FieldSpec::text("lastName", "Last name").required().default_value(last))
        .field(FieldSpec::email("email", "Email").required().default_value(email))
        .field(FieldSpec::upload_with("photo", "Profile photo", PHOTO_POLICY))
        .submit_label("Save Changes")
}

fn password() -> FormSpec {
    FormSpec::new("Password")
        .description("Change your access password")
        .field(FieldSpec::password("currentPassword", "Current password").required())
        .field(FieldSpec::password("newPassword", "New password").required())
        .field(FieldSpec::password("confirmPassword", "Confirm new password").required())
        .submit_label("Change Password")
}

#[must_use]
pub fn screen(auth: &AuthContext) -> FormScreen {
    FormScreen::new(
        Route::Account,
        "Account",
        "Manage your profile and password",
        vec![profile(auth), password()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn profile_defaults_follow_signed_in_user() {
        let screen = screen(&AuthContext::new(Role::Operator, "Anna Bianchi"));
        let data = screen.sections()[0].data();
        assert_eq!(data.get("firstName"), Some("Anna"));
        assert_eq!(data.get("lastName"), Some("Bianchi"));
        assert_eq!(data.get("email"), Some("anna.bianchi@zentask.it"));
        assert!(screen.restricted().is_none());
    }
}
