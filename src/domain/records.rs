//! Entity records shown by the admin screens.
//!
//! Records are plain data with an in-memory id and no relational integrity:
//! an intervention names its client, activity, status and employee as
//! strings rather than referencing other records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Common identity shared by every record type a table screen can list.
pub trait Record: Clone + 'static {
    /// Stable in-memory key.
    fn record_id(&self) -> &str;

    /// Short human label (code or name) used in confirmations and logs.
    fn record_label(&self) -> String;

    /// Optional secondary line shown under the label in confirmations.
    fn record_detail(&self) -> Option<String> {
        None
    }
}

/// A field-service job performed at a client site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intervention {
    pub id: String,
    /// Human-facing code such as `INT-00001`.
    pub code: String,
    pub description: String,
    pub client: String,
    pub activity: String,
    pub status: String,
    pub employee: String,
    pub urgent: bool,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Free text or `HH:MM`.
    pub duration: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Record for Intervention {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn record_label(&self) -> String {
        self.code.clone()
    }

    fn record_detail(&self) -> Option<String> {
        Some(self.description.clone())
    }
}

/// Whether a client is a private person or a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientKind {
    Private,
    Company,
}

impl ClientKind {
    /// Filter/facet value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Company => "company",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Private => "Private",
            Self::Company => "Company",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub kind: ClientKind,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Record for Client {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn record_label(&self) -> String {
        self.name.clone()
    }

    fn record_detail(&self) -> Option<String> {
        Some(format!("{} · {}", self.kind.label(), self.email))
    }
}

/// A kind of work an intervention can be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
}

impl Record for Activity {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn record_label(&self) -> String {
        self.name.clone()
    }
}

/// A workflow state with its badge colour (`#rrggbb`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Record for WorkflowState {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn record_label(&self) -> String {
        self.name.clone()
    }

    fn record_detail(&self) -> Option<String> {
        Some(self.color.clone())
    }
}

/// Access level of a staff member.
///
/// Ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "operatore")]
    Operator,
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "super_admin")]
    SuperAdmin,
}

impl Role {
    /// Wire and filter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Operator => "operatore",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Operator => "Operator",
            Self::Admin => "Admin",
            Self::SuperAdmin => "Super Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "operatore" | "operator" => Ok(Self::Operator),
            "admin" => Ok(Self::Admin),
            "super_admin" | "superadmin" => Ok(Self::SuperAdmin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Record for User {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn record_label(&self) -> String {
        self.full_name()
    }

    fn record_detail(&self) -> Option<String> {
        Some(self.email.clone())
    }
}

/// Every record list the worker hands to the plugin in one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    pub interventions: Vec<Intervention>,
    pub clients: Vec<Client>,
    pub activities: Vec<Activity>,
    pub states: Vec<WorkflowState>,
    pub users: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_wire_values() {
        assert_eq!("operatore".parse::<Role>(), Ok(Role::Operator));
        assert_eq!(" Admin ".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("super_admin".parse::<Role>(), Ok(Role::SuperAdmin));
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_with_legacy_names() {
        let json = serde_json::to_string(&Role::Operator).unwrap();
        assert_eq!(json, "\"operatore\"");
        let role: Role = serde_json::from_str("\"super_admin\"").unwrap();
        assert_eq!(role, Role::SuperAdmin);
    }

    #[test]
    fn user_label_is_full_name() {
        let user = User {
            id: "1".into(),
            first_name: "Anna".into(),
            last_name: "Bianchi".into(),
            email: "anna.bianchi@zentask.it".into(),
            role: Role::Operator,
        };
        assert_eq!(user.record_label(), "Anna Bianchi");
        assert_eq!(user.record_detail().as_deref(), Some("anna.bianchi@zentask.it"));
    }
}
