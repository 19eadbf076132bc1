//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) stays free of host calls; it returns
//! a `Vec<Action>` and the plugin runtime executes them in order.
//!
//! # Example
//!
//! ```rust
//! use zentask::app::Action;
//! use zentask::worker::WorkerMessage;
//! use std::time::Duration;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load_records()),
//!     Action::ScheduleTimer(Duration::from_millis(300)),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::WorkerMessage;
use std::time::Duration;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Posts a message to the background worker.
    ///
    /// Loading records, form submissions and deletions all go this way.
    PostToWorker(WorkerMessage),

    /// Asks the host for a `Timer` event after the given delay.
    ///
    /// Used to settle the debounced search box.
    ScheduleTimer(Duration),
}
