//! Side-panel form sheet with controlled or uncontrolled open state.
//!
//! Who owns the open flag is decided at construction and encoded in the
//! type parameter:
//!
//! - [`FormSheet::uncontrolled`] keeps the flag inside the sheet and flips it
//!   directly.
//! - [`FormSheet::controlled`] only mirrors a flag owned by the parent; every
//!   open/close the sheet wants is returned as [`OpenChange::Requested`] and
//!   takes effect once the parent calls [`FormSheet::sync_open`].
//!
//! While a submission is pending, cancel and outside-click dismissal are
//! ignored.

use super::session::{FormSession, FormSpec, SheetSize, SubmitOutcome, SubmitRejected, Submission};

/// Effect of an attempt to open or close a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenChange {
    /// Nothing happened.
    Ignored,
    /// The sheet changed its own state.
    Changed,
    /// The parent must set its flag to this value.
    Requested(bool),
}

/// Storage strategy for the open flag.
pub trait OpenControl {
    fn is_open(&self) -> bool;

    /// Asks for the flag to become `open`.
    fn request(&mut self, open: bool) -> OpenChange;
}

/// Open flag owned by the sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uncontrolled {
    open: bool,
}

impl OpenControl for Uncontrolled {
    fn is_open(&self) -> bool {
        self.open
    }

    fn request(&mut self, open: bool) -> OpenChange {
        if self.open == open {
            return OpenChange::Ignored;
        }
        self.open = open;
        OpenChange::Changed
    }
}

/// Mirror of an open flag owned by the parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controlled {
    open: bool,
}

impl OpenControl for Controlled {
    fn is_open(&self) -> bool {
        self.open
    }

    fn request(&mut self, open: bool) -> OpenChange {
        if self.open == open {
            OpenChange::Ignored
        } else {
            OpenChange::Requested(open)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSheet<C> {
    session: FormSession,
    control: C,
}

impl FormSheet<Uncontrolled> {
    /// A closed sheet that manages its own visibility.
    #[must_use]
    pub fn uncontrolled(spec: FormSpec) -> Self {
        Self {
            session: FormSession::new(spec),
            control: Uncontrolled::default(),
        }
    }

    /// Opens with a fresh form.
    pub fn open(&mut self) -> OpenChange {
        if self.is_open() {
            return OpenChange::Ignored;
        }
        self.session.reset();
        self.control.request(true)
    }
}

impl FormSheet<Controlled> {
    /// A sheet whose visibility follows `open`, owned by the parent.
    #[must_use]
    pub fn controlled(spec: FormSpec, open: bool) -> Self {
        Self {
            session: FormSession::new(spec),
            control: Controlled { open },
        }
    }

    /// Applies the parent's flag.
    pub fn sync_open(&mut self, open: bool) {
        self.control.open = open;
    }
}

impl<C: OpenControl> FormSheet<C> {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.control.is_open()
    }

    #[must_use]
    pub const fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut FormSession {
        &mut self.session
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.session.spec().title
    }

    #[must_use]
    pub fn size(&self) -> SheetSize {
        self.session.spec().size
    }

    /// Label of the submit control, busy text while pending.
    #[must_use]
    pub fn submit_label(&self) -> &str {
        if self.session.is_pending() {
            "Saving..."
        } else {
            &self.session.spec().submit_label
        }
    }

    /// Starts a submission.
    ///
    /// # Errors
    ///
    /// Rejected when the sheet is closed, disabled, or already pending.
    pub fn submit(&mut self) -> Result<Submission, SubmitRejected> {
        if !self.is_open() {
            return Err(SubmitRejected::Closed);
        }
        let submission = self.session.begin_submit()?;
        tracing::debug!(sheet = %self.title(), ticket = submission.ticket, "form submitted");
        Ok(submission)
    }

    /// Absorbs a submission result.
    ///
    /// Success closes the sheet. Failure is logged and the sheet stays open
    /// for a retry.
    pub fn complete(&mut self, ticket: u64, result: Result<(), String>) -> (SubmitOutcome, OpenChange) {
        let outcome = self.session.finish_submit(ticket, result);
        let change = match &outcome {
            SubmitOutcome::Succeeded => self.control.request(false),
            SubmitOutcome::Failed(message) => {
                tracing::error!(sheet = %self.title(), ticket, error = %message, "form submission failed");
                OpenChange::Ignored
            }
            SubmitOutcome::Stale => {
                tracing::debug!(sheet = %self.title(), ticket, "ignoring stale submission result");
                OpenChange::Ignored
            }
        };
        (outcome, change)
    }

    /// Cancel button or Escape.
    pub fn cancel(&mut self) -> OpenChange {
        self.close_unless_pending("cancel")
    }

    /// Click outside the panel.
    pub fn dismiss_outside(&mut self) -> OpenChange {
        self.close_unless_pending("outside click")
    }

    fn close_unless_pending(&mut self, reason: &str) -> OpenChange {
        if self.session.is_pending() {
            tracing::debug!(sheet = %self.title(), reason, "close ignored while submitting");
            return OpenChange::Ignored;
        }
        self.control.request(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::fields::FieldSpec;

    fn spec() -> FormSpec {
        FormSpec::new("New State").field(FieldSpec::text("name", "Name"))
    }

    #[test]
    fn uncontrolled_closes_itself_on_success() {
        let mut sheet = FormSheet::uncontrolled(spec());
        assert_eq!(sheet.open(), OpenChange::Changed);
        let ticket = sheet.submit().unwrap().ticket;
        assert_eq!(sheet.submit_label(), "Saving...");
        let (outcome, change) = sheet.complete(ticket, Ok(()));
        assert_eq!(outcome, SubmitOutcome::Succeeded);
        assert_eq!(change, OpenChange::Changed);
        assert!(!sheet.is_open());
    }

    #[test]
    fn failed_submit_keeps_sheet_open_and_idle() {
        let mut sheet = FormSheet::uncontrolled(spec());
        sheet.open();
        let ticket = sheet.submit().unwrap().ticket;
        let (_, change) = sheet.complete(ticket, Err("boom".into()));
        assert_eq!(change, OpenChange::Ignored);
        assert!(sheet.is_open());
        assert!(!sheet.session().is_pending());
        assert_eq!(sheet.submit_label(), "Save");
    }

    #[test]
    fn cancel_and_outside_click_ignored_while_pending() {
        let mut sheet = FormSheet::uncontrolled(spec());
        sheet.open();
        sheet.submit().unwrap();
        assert_eq!(sheet.cancel(), OpenChange::Ignored);
        assert_eq!(sheet.dismiss_outside(), OpenChange::Ignored);
        assert!(sheet.is_open());
    }

    #[test]
    fn controlled_sheet_only_requests_changes() {
        let mut sheet = FormSheet::controlled(spec(), true);
        assert_eq!(sheet.cancel(), OpenChange::Requested(false));
        assert!(sheet.is_open(), "parent has not applied the change yet");
        sheet.sync_open(false);
        assert!(!sheet.is_open());
        assert_eq!(sheet.submit(), Err(SubmitRejected::Closed));
    }
}
