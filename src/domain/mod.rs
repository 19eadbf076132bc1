//! Domain layer for the ZenTask plugin.
//!
//! Record types, the authorization context and small value editors, free of
//! any Zellij or rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`records`]: Interventions, clients, activities, states and users
//! - [`auth`]: Authorization context for gated screens
//! - [`duration`]: `HH:MM` duration editor
//! - [`fixtures`]: Demo records served by the worker

pub mod auth;
pub mod duration;
pub mod error;
pub mod fixtures;
pub mod records;

pub use auth::AuthContext;
pub use error::{Result, ZenTaskError};
pub use records::{
    Activity, Client, ClientKind, Intervention, Record, RecordSet, Role, User, WorkflowState,
};
