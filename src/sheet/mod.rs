//! Form-sheet abstraction: field declarations, the submit lifecycle and the
//! side panel that hosts them.
//!
//! # Modules
//!
//! - [`fields`]: Field kinds, specs, live field state and submitted data
//! - [`session`]: Focus, editing and the single-flight submit state
//! - [`form`]: Open/close ownership (controlled vs. uncontrolled)
//! - [`upload`]: Attachment limits and size formatting

pub mod fields;
pub mod form;
pub mod session;
pub mod upload;

pub use fields::{FieldKind, FieldSpec, FieldState, FormData};
pub use form::{Controlled, FormSheet, OpenChange, OpenControl, Uncontrolled};
pub use session::{
    FormSession, FormSpec, SheetSize, SubmitOutcome, SubmitRejected, SubmitState, Submission,
};
pub use upload::{format_file_size, UploadPolicy, UploadQueue, UploadedFile};
