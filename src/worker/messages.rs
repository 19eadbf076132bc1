//! Plugin ⇄ worker protocol.
//!
//! Messages travel as JSON through Zellij's worker channel. Each request
//! carries the caller's trace context so worker spans join the same trace.

use crate::domain::RecordSet;
use crate::screens::Route;
use crate::sheet::FormData;
use serde::{Deserialize, Serialize};

/// Trace and span id of the sender, hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    pub trace_id: String,
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry context of the current span.
    ///
    /// Returns `None` when no valid span is active, e.g. before tracing is
    /// initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Which sheet a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetKind {
    /// "New" sheet on a table screen.
    Create,
    /// Pre-filled edit sheet on a table screen.
    Edit,
    /// Inline form of the Account or Settings screen.
    Page,
}

macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Builds a `", stringify!($variant), "` message with the current trace context.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_records(LoadRecords {}),
    submit_form(SubmitForm {
        route: Route,
        sheet: SheetKind,
        ticket: u64,
        record_id: Option<String>,
        data: FormData,
    }),
    delete_record(DeleteRecord { route: Route, id: String, label: String }),
}

/// Requests from the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Produce every record list.
    LoadRecords {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Hand a submitted form to the submission sink.
    SubmitForm {
        route: Route,
        sheet: SheetKind,
        /// Echoed back so the sheet can drop stale results.
        ticket: u64,
        /// Present when editing an existing record.
        record_id: Option<String>,
        data: FormData,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Hand a confirmed deletion to the submission sink.
    DeleteRecord {
        route: Route,
        id: String,
        label: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadRecords { trace_context }
            | Self::SubmitForm { trace_context, .. }
            | Self::DeleteRecord { trace_context, .. } => trace_context.as_ref(),
        }
    }

    /// Short name used as the message name on the worker channel and in spans.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::LoadRecords { .. } => "load_records",
            Self::SubmitForm { .. } => "submit_form",
            Self::DeleteRecord { .. } => "delete_record",
        }
    }
}

/// Replies from the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    RecordsLoaded {
        records: RecordSet,
    },

    FormSubmitted {
        route: Route,
        sheet: SheetKind,
        ticket: u64,
    },

    /// The sink refused the submission; the sheet stays open.
    SubmitFailed {
        route: Route,
        sheet: SheetKind,
        ticket: u64,
        message: String,
    },

    RecordDeleted {
        route: Route,
        id: String,
        label: String,
    },

    /// Anything else that went wrong on the worker side.
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_round_trip_through_json_without_context() {
        let message = WorkerMessage::DeleteRecord {
            route: Route::Clients,
            id: "2".into(),
            label: "Tecnoservice S.r.l.".into(),
            trace_context: None,
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("trace_context"));
        assert_eq!(serde_json::from_str::<WorkerMessage>(&json).unwrap(), message);
    }

    #[test]
    fn builders_work_without_active_tracing() {
        let message = WorkerMessage::load_records();
        assert_eq!(message.kind(), "load_records");
        assert!(message.trace_context().is_none());
    }
}
