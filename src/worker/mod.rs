//! Background worker serving records and absorbing submissions.
//!
//! - `messages`: Request/response protocol with trace context propagation
//! - `handler`: Worker state, the submission sink and message dispatch

pub mod handler;
pub mod messages;

pub use handler::{JournalSink, SubmissionSink, ZenTaskWorker};
pub use messages::{SheetKind, TraceContext, WorkerMessage, WorkerResponse};
