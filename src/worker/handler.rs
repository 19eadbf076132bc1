//! Worker-side state and message dispatch.
//!
//! The worker owns the record fixtures and a [`SubmissionSink`]. Records are
//! never mutated: submissions and deletions are only handed to the sink,
//! which by default journals them as tracing events.

use crate::domain::error::{Result, ZenTaskError};
use crate::domain::fixtures;
use crate::screens::Route;
use crate::sheet::FormData;
use crate::worker::{SheetKind, WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};

/// Receiver for accepted form data and confirmed deletions.
pub trait SubmissionSink: Send {
    /// # Errors
    ///
    /// Returns [`ZenTaskError::Submission`] when the submission is refused.
    fn record_submission(
        &mut self,
        route: Route,
        sheet: SheetKind,
        record_id: Option<&str>,
        data: &FormData,
    ) -> Result<()>;

    /// # Errors
    ///
    /// Returns [`ZenTaskError::Submission`] when the deletion is refused.
    fn record_deletion(&mut self, route: Route, id: &str, label: &str) -> Result<()>;
}

/// Sink that reports everything as `info` events and never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct JournalSink;

impl SubmissionSink for JournalSink {
    fn record_submission(
        &mut self,
        route: Route,
        sheet: SheetKind,
        record_id: Option<&str>,
        data: &FormData,
    ) -> Result<()> {
        let fields = serde_json::to_string(data)
            .map_err(|e| ZenTaskError::Submission(format!("cannot encode form data: {e}")))?;
        tracing::info!(
            screen = %route,
            sheet = ?sheet,
            record_id = record_id.unwrap_or("-"),
            fields = %fields,
            "form data received"
        );
        Ok(())
    }

    fn record_deletion(&mut self, route: Route, id: &str, label: &str) -> Result<()> {
        tracing::info!(screen = %route, record_id = id, label, "delete requested");
        Ok(())
    }
}

/// Worker thread state.
///
/// Zellij constructs the worker through `Default`; the sink is installed
/// lazily on the first message.
#[derive(Serialize, Deserialize, Default)]
pub struct ZenTaskWorker {
    #[serde(skip)]
    sink: Option<Box<dyn SubmissionSink>>,
}

impl ZenTaskWorker {
    #[must_use]
    pub fn with_sink(sink: Box<dyn SubmissionSink>) -> Self {
        Self { sink: Some(sink) }
    }

    fn sink(&mut self) -> &mut dyn SubmissionSink {
        &mut **self
            .sink
            .get_or_insert_with(|| Box::new(JournalSink) as Box<dyn SubmissionSink>)
    }

    fn handle_load_records() -> WorkerResponse {
        let records = fixtures::record_set();
        tracing::debug!(
            interventions = records.interventions.len(),
            clients = records.clients.len(),
            activities = records.activities.len(),
            states = records.states.len(),
            users = records.users.len(),
            "records loaded"
        );
        WorkerResponse::RecordsLoaded { records }
    }

    fn handle_submit_form(
        &mut self,
        route: Route,
        sheet: SheetKind,
        ticket: u64,
        record_id: Option<&str>,
        data: &FormData,
    ) -> WorkerResponse {
        match self.sink().record_submission(route, sheet, record_id, data) {
            Ok(()) => WorkerResponse::FormSubmitted { route, sheet, ticket },
            Err(e) => {
                tracing::error!(screen = %route, ticket, error = %e, "submission refused");
                WorkerResponse::SubmitFailed {
                    route,
                    sheet,
                    ticket,
                    message: e.to_string(),
                }
            }
        }
    }

    fn handle_delete_record(&mut self, route: Route, id: String, label: String) -> WorkerResponse {
        match self.sink().record_deletion(route, &id, &label) {
            Ok(()) => WorkerResponse::RecordDeleted { route, id, label },
            Err(e) => {
                tracing::error!(screen = %route, record_id = %id, error = %e, "deletion refused");
                WorkerResponse::Error {
                    message: format!("Could not delete {label}: {e}"),
                }
            }
        }
    }

    /// Re-attaches the sender's span as the remote parent of worker spans.
    ///
    /// The returned guard must be held while the message is handled.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Dispatches one request.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let span = tracing::debug_span!("worker_handle_message", message_type = message.kind());
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadRecords { .. } => Self::handle_load_records(),
            WorkerMessage::SubmitForm {
                route,
                sheet,
                ticket,
                record_id,
                data,
                ..
            } => self.handle_submit_form(route, sheet, ticket, record_id.as_deref(), &data),
            WorkerMessage::DeleteRecord { route, id, label, .. } => {
                self.handle_delete_record(route, id, label)
            }
        }
    }

    /// Decodes a JSON request, handles it and encodes the reply.
    ///
    /// # Errors
    ///
    /// Returns [`ZenTaskError::Worker`] if the payload cannot be decoded or
    /// the reply cannot be encoded.
    pub fn handle_payload(&mut self, payload: &str) -> Result<String> {
        let message: WorkerMessage = serde_json::from_str(payload)
            .map_err(|e| ZenTaskError::Worker(format!("bad worker message: {e}")))?;
        let response = self.handle_message(message);
        serde_json::to_string(&response)
            .map_err(|e| ZenTaskError::Worker(format!("cannot encode worker response: {e}")))
    }
}

#[cfg(target_family = "wasm")]
mod zellij {
    use super::ZenTaskWorker;
    use crate::worker::WorkerResponse;
    use std::sync::atomic::{AtomicBool, Ordering};
    use zellij_tile::prelude::{PluginMessage, ZellijWorker};
    use zellij_tile::shim::post_message_to_plugin;

    static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

    fn reply(name: String, payload: String) {
        post_message_to_plugin(PluginMessage {
            name,
            payload,
            worker_name: None,
        });
    }

    impl ZellijWorker<'_> for ZenTaskWorker {
        fn on_message(&mut self, message: String, payload: String) {
            if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
                crate::observability::init_tracing(&crate::Config::default());
            }

            match self.handle_payload(&payload) {
                Ok(response) => reply(message, response),
                Err(e) => {
                    tracing::warn!(error = %e, "worker message dropped");
                    let error = WorkerResponse::Error {
                        message: e.to_string(),
                    };
                    if let Ok(response) = serde_json::to_string(&error) {
                        reply(message, response);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RefusingSink;

    impl SubmissionSink for RefusingSink {
        fn record_submission(
            &mut self,
            _route: Route,
            _sheet: SheetKind,
            _record_id: Option<&str>,
            _data: &FormData,
        ) -> Result<()> {
            Err(ZenTaskError::Submission("backend offline".into()))
        }

        fn record_deletion(&mut self, _route: Route, _id: &str, _label: &str) -> Result<()> {
            Err(ZenTaskError::Submission("read only".into()))
        }
    }

    fn submit(ticket: u64) -> WorkerMessage {
        WorkerMessage::SubmitForm {
            route: Route::Activities,
            sheet: SheetKind::Create,
            ticket,
            record_id: None,
            data: [("name", "Collaudo")].into_iter().collect(),
            trace_context: None,
        }
    }

    #[test]
    fn load_returns_fixtures() {
        let mut worker = ZenTaskWorker::default();
        let WorkerResponse::RecordsLoaded { records } =
            worker.handle_message(WorkerMessage::LoadRecords { trace_context: None })
        else {
            panic!("expected records");
        };
        assert_eq!(records.interventions.len(), 5);
        assert_eq!(records.users.len(), 3);
    }

    #[test]
    fn journal_sink_accepts_submissions() {
        let mut worker = ZenTaskWorker::default();
        assert_eq!(
            worker.handle_message(submit(4)),
            WorkerResponse::FormSubmitted {
                route: Route::Activities,
                sheet: SheetKind::Create,
                ticket: 4
            }
        );
    }

    #[test]
    fn refused_submission_echoes_ticket() {
        let mut worker = ZenTaskWorker::with_sink(Box::new(RefusingSink));
        match worker.handle_message(submit(9)) {
            WorkerResponse::SubmitFailed { ticket, message, .. } => {
                assert_eq!(ticket, 9);
                assert!(message.contains("backend offline"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn payload_round_trip_and_garbage() {
        let mut worker = ZenTaskWorker::default();
        let request = serde_json::to_string(&submit(1)).unwrap();
        let reply: WorkerResponse =
            serde_json::from_str(&worker.handle_payload(&request).unwrap()).unwrap();
        assert!(matches!(reply, WorkerResponse::FormSubmitted { ticket: 1, .. }));
        assert!(worker.handle_payload("{not json").is_err());
    }
}
