//! Full-page forms (Account, Settings).
//!
//! A screen holds one or more independent form sections. Only one section
//! may be submitting at a time; results come back through the worker with
//! [`SheetKind::Page`].

use super::Route;
use crate::sheet::{FormSession, FormSpec, SubmitOutcome, SubmitRejected};
use crate::worker::{SheetKind, WorkerMessage};

/// Notice shown instead of the form when the viewer lacks permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restricted {
    pub title: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone)]
pub struct FormScreen {
    route: Route,
    title: &'static str,
    description: &'static str,
    sections: Vec<FormSession>,
    focus: usize,
    restricted: Option<Restricted>,
}

impl FormScreen {
    #[must_use]
    pub fn new(
        route: Route,
        title: &'static str,
        description: &'static str,
        sections: Vec<FormSpec>,
    ) -> Self {
        Self {
            route,
            title,
            description,
            sections: sections.into_iter().map(FormSession::new).collect(),
            focus: 0,
            restricted: None,
        }
    }

    /// Locks every section behind `notice`.
    #[must_use]
    pub fn restricted_by(mut self, notice: Restricted) -> Self {
        for section in &mut self.sections {
            section.set_disabled(true);
        }
        self.restricted = Some(notice);
        self
    }

    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    #[must_use]
    pub const fn restricted(&self) -> Option<&Restricted> {
        self.restricted.as_ref()
    }

    #[must_use]
    pub fn sections(&self) -> &[FormSession] {
        &self.sections
    }

    /// Index of the section receiving input.
    #[must_use]
    pub const fn focus(&self) -> usize {
        self.focus
    }

    pub fn focus_section(&mut self, forward: bool) {
        let len = self.sections.len();
        if len > 0 {
            self.focus = if forward {
                (self.focus + 1) % len
            } else {
                (self.focus + len - 1) % len
            };
        }
    }

    /// Section under focus, unless the screen is restricted.
    pub fn session_mut(&mut self) -> Option<&mut FormSession> {
        if self.restricted.is_some() {
            return None;
        }
        self.sections.get_mut(self.focus)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.sections.iter().any(FormSession::is_pending)
    }

    /// Submit label of a section, busy text while it is pending.
    #[must_use]
    pub fn submit_label(&self, index: usize) -> &str {
        match self.sections.get(index) {
            Some(s) if s.is_pending() => "Saving...",
            Some(s) => &s.spec().submit_label,
            None => "",
        }
    }

    /// Submits the focused section.
    ///
    /// # Errors
    ///
    /// Rejected while restricted or while any section is pending.
    pub fn submit(&mut self) -> Result<WorkerMessage, SubmitRejected> {
        if self.is_pending() {
            return Err(SubmitRejected::AlreadyPending);
        }
        let route = self.route;
        let session = self
            .sections
            .get_mut(self.focus)
            .ok_or(SubmitRejected::Closed)?;
        let submission = session.begin_submit()?;
        tracing::debug!(
            screen = %route,
            section = %session.spec().title,
            ticket = submission.ticket,
            "page form submitted"
        );
        Ok(WorkerMessage::submit_form(
            route,
            SheetKind::Page,
            submission.ticket,
            None,
            submission.data,
        ))
    }

    /// Routes a result to the pending section. Values are kept on success.
    pub fn complete(&mut self, ticket: u64, result: Result<(), String>) -> SubmitOutcome {
        let route = self.route;
        let Some(session) = self.sections.iter_mut().find(|s| s.is_pending()) else {
            tracing::debug!(screen = %route, ticket, "ignoring stale page form result");
            return SubmitOutcome::Stale;
        };
        let outcome = session.finish_submit(ticket, result);
        match &outcome {
            SubmitOutcome::Succeeded => {
                tracing::info!(screen = %route, section = %session.spec().title, "page form saved");
            }
            SubmitOutcome::Failed(message) => {
                tracing::error!(screen = %route, error = %message, "page form submission failed");
            }
            SubmitOutcome::Stale => {}
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::FieldSpec;

    fn screen() -> FormScreen {
        FormScreen::new(
            Route::Account,
            "Account",
            "",
            vec![
                FormSpec::new("Profile").field(FieldSpec::text("name", "Name").default_value("Mario")),
                FormSpec::new("Password").field(FieldSpec::password("new", "New password")),
            ],
        )
    }

    fn ticket(message: WorkerMessage) -> u64 {
        match message {
            WorkerMessage::SubmitForm { ticket, sheet, .. } => {
                assert_eq!(sheet, SheetKind::Page);
                ticket
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn one_section_in_flight() {
        let mut screen = screen();
        let first = ticket(screen.submit().unwrap());
        screen.focus_section(true);
        assert_eq!(screen.submit(), Err(SubmitRejected::AlreadyPending));
        assert_eq!(screen.submit_label(0), "Saving...");

        assert_eq!(screen.complete(first, Ok(())), SubmitOutcome::Succeeded);
        assert_eq!(screen.sections()[0].data().get("name"), Some("Mario"));
        assert!(screen.submit().is_ok());
    }

    #[test]
    fn restricted_screen_refuses_input_and_submit() {
        let mut screen = screen().restricted_by(Restricted {
            title: "Restricted access",
            message: "nope",
        });
        assert!(screen.session_mut().is_none());
        assert_eq!(screen.submit(), Err(SubmitRejected::Disabled));
    }

    #[test]
    fn stale_result_is_ignored() {
        let mut screen = screen();
        assert_eq!(screen.complete(3, Ok(())), SubmitOutcome::Stale);
    }
}
