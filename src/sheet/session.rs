//! Form values, focus and the submit lifecycle of one form.
//!
//! A submission is asynchronous: [`FormSession::begin_submit`] hands out a
//! ticket and marks the form pending, and the outcome arrives later through
//! [`FormSession::finish_submit`]. At most one ticket is in flight; while it
//! is, edits and further submits are refused.

use super::fields::{FieldSpec, FieldState, FormData};
use thiserror::Error;

/// Side panel width class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetSize {
    Small,
    #[default]
    Default,
    Large,
    ExtraLarge,
    Full,
}

impl SheetSize {
    /// Panel width in columns for a viewport of `cols`.
    #[must_use]
    pub fn width(self, cols: usize) -> usize {
        let preferred = match self {
            Self::Small => 40,
            Self::Default => 56,
            Self::Large => 72,
            Self::ExtraLarge => 96,
            Self::Full => cols,
        };
        preferred.min(cols)
    }
}

/// Static description of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSpec {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FieldSpec>,
    pub size: SheetSize,
    pub submit_label: String,
    pub cancel_label: String,
}

impl FormSpec {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields: Vec::new(),
            size: SheetSize::Default,
            submit_label: "Save".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }

    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    #[must_use]
    pub const fn size(mut self, size: SheetSize) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Pending {
        ticket: u64,
    },
}

/// Why a submit attempt did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("sheet is closed")]
    Closed,
    #[error("form is disabled")]
    Disabled,
    #[error("a submission is already in flight")]
    AlreadyPending,
}

/// A started submission, to be forwarded to whatever handles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: u64,
    pub data: FormData,
}

/// How a completion report was absorbed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    Failed(String),
    /// Ticket does not match the pending submission.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSession {
    spec: FormSpec,
    fields: Vec<FieldState>,
    focus: usize,
    submit: SubmitState,
    next_ticket: u64,
    last_error: Option<String>,
    disabled: bool,
}

impl FormSession {
    #[must_use]
    pub fn new(spec: FormSpec) -> Self {
        let fields = spec.fields.iter().cloned().map(FieldState::new).collect();
        Self {
            spec,
            fields,
            focus: 0,
            submit: SubmitState::Idle,
            next_ticket: 1,
            last_error: None,
            disabled: false,
        }
    }

    #[must_use]
    pub const fn spec(&self) -> &FormSpec {
        &self.spec
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    #[must_use]
    pub const fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub const fn submit_state(&self) -> SubmitState {
        self.submit
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.submit, SubmitState::Pending { .. })
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Restores defaults and clears errors. Ignored while pending.
    pub fn reset(&mut self) {
        if self.is_pending() {
            return;
        }
        self.fields.iter_mut().for_each(FieldState::reset);
        self.focus = 0;
        self.last_error = None;
    }

    /// Prefills fields from stored values; unknown keys are ignored.
    pub fn load(&mut self, data: &FormData) {
        self.reset();
        for field in &mut self.fields {
            if let Some(value) = data.get(field.spec().key) {
                field.set_value(value);
            }
        }
    }

    #[must_use]
    pub fn data(&self) -> FormData {
        self.fields
            .iter()
            .map(|f| (f.spec().key, f.value()))
            .collect()
    }

    fn editable(&mut self) -> Option<&mut FieldState> {
        if self.is_pending() || self.disabled {
            return None;
        }
        self.fields.get_mut(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn input(&mut self, c: char) {
        if let Some(field) = self.editable() {
            field.input(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.editable() {
            field.backspace();
        }
    }

    pub fn cycle(&mut self, forward: bool) {
        if let Some(field) = self.editable() {
            field.cycle(forward);
        }
    }

    /// Enter: attaches an upload path, otherwise moves to the next field.
    pub fn confirm(&mut self) {
        let Some(field) = self.editable() else {
            return;
        };
        match field.confirm() {
            Ok(true) => self.last_error = None,
            Ok(false) => self.focus_next(),
            Err(e) => {
                tracing::warn!(error = %e, "could not attach file");
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Starts a submission and returns its ticket and data.
    ///
    /// # Errors
    ///
    /// Refuses while disabled or while another submission is pending.
    pub fn begin_submit(&mut self) -> Result<Submission, SubmitRejected> {
        if self.disabled {
            return Err(SubmitRejected::Disabled);
        }
        if self.is_pending() {
            return Err(SubmitRejected::AlreadyPending);
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.submit = SubmitState::Pending { ticket };
        self.last_error = None;
        Ok(Submission {
            ticket,
            data: self.data(),
        })
    }

    /// Absorbs the result of a submission.
    ///
    /// Success and failure both return the form to idle; a failure keeps its
    /// message for display.
    pub fn finish_submit(&mut self, ticket: u64, result: Result<(), String>) -> SubmitOutcome {
        if self.submit != (SubmitState::Pending { ticket }) {
            return SubmitOutcome::Stale;
        }
        self.submit = SubmitState::Idle;
        match result {
            Ok(()) => SubmitOutcome::Succeeded,
            Err(message) => {
                self.last_error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> FormSession {
        FormSession::new(
            FormSpec::new("New Activity")
                .field(FieldSpec::text("name", "Name").required())
                .field(FieldSpec::duration("duration", "Duration")),
        )
    }

    #[test]
    fn second_submit_while_pending_is_refused() {
        let mut form = session();
        let first = form.begin_submit().unwrap();
        assert_eq!(form.begin_submit(), Err(SubmitRejected::AlreadyPending));
        assert_eq!(form.finish_submit(first.ticket, Ok(())), SubmitOutcome::Succeeded);
        assert!(form.begin_submit().is_ok());
    }

    #[test]
    fn failure_returns_to_idle_with_message() {
        let mut form = session();
        let ticket = form.begin_submit().unwrap().ticket;
        let outcome = form.finish_submit(ticket, Err("backend offline".into()));
        assert_eq!(outcome, SubmitOutcome::Failed("backend offline".into()));
        assert!(!form.is_pending());
        assert_eq!(form.last_error(), Some("backend offline"));
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut form = session();
        let ticket = form.begin_submit().unwrap().ticket;
        assert_eq!(form.finish_submit(ticket + 7, Ok(())), SubmitOutcome::Stale);
        assert!(form.is_pending());
    }

    #[test]
    fn edits_are_frozen_while_pending() {
        let mut form = session();
        form.input('a');
        form.begin_submit().unwrap();
        form.input('b');
        assert_eq!(form.data().get("name"), Some("a"));
    }

    #[test]
    fn empty_required_fields_still_submit() {
        let mut form = session();
        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.data.get("name"), Some(""));
    }

    #[test]
    fn confirm_moves_focus_and_load_prefills() {
        let mut form = session();
        form.confirm();
        assert_eq!(form.focus(), 1);
        let data: FormData = [("name", "Installazione"), ("duration", "2:5")].into_iter().collect();
        form.load(&data);
        assert_eq!(form.focus(), 0);
        assert_eq!(form.data().get("duration"), Some("02:05"));
    }

    #[test]
    fn sheet_width_never_exceeds_viewport() {
        assert_eq!(SheetSize::Large.width(60), 60);
        assert_eq!(SheetSize::Small.width(200), 40);
        assert_eq!(SheetSize::Full.width(120), 120);
    }
}
