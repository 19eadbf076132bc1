//! Authorization context resolved once per plugin session.

use super::records::Role;

/// The signed-in operator as seen by the screens.
///
/// Built from configuration at load time and handed to the screens that gate
/// content on it. Nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub role: Role,
    pub display_name: String,
}

impl AuthContext {
    #[must_use]
    pub fn new(role: Role, display_name: impl Into<String>) -> Self {
        Self {
            role,
            display_name: display_name.into(),
        }
    }

    /// Company settings are restricted to administrators.
    #[must_use]
    pub fn can_manage_company_settings(&self) -> bool {
        self.role >= Role::Admin
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new(Role::Admin, "Mario Rossi")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admins_manage_settings() {
        assert!(AuthContext::new(Role::SuperAdmin, "a").can_manage_company_settings());
        assert!(AuthContext::new(Role::Admin, "b").can_manage_company_settings());
        assert!(!AuthContext::new(Role::Operator, "c").can_manage_company_settings());
    }
}
