//! Error types for the ZenTask plugin.
//!
//! [`ZenTaskError`] is the single error type crossing module boundaries and
//! [`Result`] is the matching alias. Expected UI outcomes such as a rejected
//! submit click are not errors and live next to the form sheet instead.

use thiserror::Error;

/// The main error type for ZenTask operations.
///
/// # Examples
///
/// ```
/// use zentask::ZenTaskError;
///
/// fn load_theme() -> Result<(), ZenTaskError> {
///     Err(ZenTaskError::Theme("missing colour table".to_string()))
/// }
///
/// assert!(load_theme().is_err());
/// ```
#[derive(Debug, Error)]
pub enum ZenTaskError {
    /// A form submission handler failed.
    ///
    /// Raised by the worker's submission sink. The sheet that issued the
    /// submission stays open so the operator can retry.
    #[error("Submission failed: {0}")]
    Submission(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// A configuration value is malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for ZenTask operations.
pub type Result<T> = std::result::Result<T, ZenTaskError>;
