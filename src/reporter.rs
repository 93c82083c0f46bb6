//! Status Reporter
//!
//! Classifies a status code against a [`StatusRegistry`], resolves its
//! message, writes console output and builds the [`ResponseEnvelope`].
//!
//! ```
//! use status_logger::{ReportRequest, Severity, StatusRegistry, StatusReporter};
//!
//! let mut registry = StatusRegistry::new();
//! registry.update_status(Severity::Success, 201, "Created");
//!
//! let envelope = StatusReporter::new(&registry).report(&ReportRequest::new(201));
//! assert_eq!(envelope.status.message, "Created");
//! assert_eq!(envelope.data_value(), Some(&serde_json::json!({})));
//! ```

use std::sync::PoisonError;

use serde_json::Value;

use crate::envelope::{
    ReportedError, ResolvedStatus, ResponseEnvelope, StatusDescriptor, UNCLASSIFIED_ERROR,
};
use crate::registry::StatusRegistry;
use crate::severity::Severity;
use crate::sink::{LogLevel, StatusSink, TracingSink};

/// Message used for codes that match no class
pub const UNKNOWN_STATUS: &str = "Unknown status";

/// Arguments of a single report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub status: StatusDescriptor,
    /// Defaults to an empty object
    pub payload: Value,
    pub error: Option<ReportedError>,
    /// Overrides the registry's silent mode for this call only
    pub silent: Option<bool>,
}

impl ReportRequest {
    pub fn new(status: impl Into<StatusDescriptor>) -> Self {
        Self {
            status: status.into(),
            payload: Value::Object(Default::default()),
            error: None,
            silent: None,
        }
    }

    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn error(mut self, error: impl Into<ReportedError>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = Some(silent);
        self
    }
}

/// Reports statuses against a borrowed registry
pub struct StatusReporter<'a, S = TracingSink> {
    registry: &'a StatusRegistry,
    sink: S,
}

impl<'a> StatusReporter<'a, TracingSink> {
    /// Reporter that writes through `tracing`
    pub fn new(registry: &'a StatusRegistry) -> Self {
        Self::with_sink(registry, TracingSink)
    }
}

impl<'a, S: StatusSink> StatusReporter<'a, S> {
    pub fn with_sink(registry: &'a StatusRegistry, sink: S) -> Self {
        Self { registry, sink }
    }

    /// Report a bare code with an empty payload
    pub fn log_status(&self, code: i64) -> ResponseEnvelope {
        self.report(&ReportRequest::new(code))
    }

    /// Classify, log and build the envelope
    ///
    /// Never fails: codes that match no class produce an error envelope
    /// carrying [`UNCLASSIFIED_ERROR`].
    pub fn report(&self, request: &ReportRequest) -> ResponseEnvelope {
        let code = request.status.code;
        let severity = self.registry.classify(code);
        let message = self.resolve_message(&request.status, severity);
        let silent = request.silent.unwrap_or_else(|| self.registry.silent_mode());

        if !silent {
            self.emit(severity, code, &message, request);
        }

        let status = ResolvedStatus { code, message };
        match severity {
            Some(severity) if severity.carries_data() => {
                ResponseEnvelope::data(status, request.payload.clone())
            }
            Some(_) => {
                let error = match &request.error {
                    Some(error) => error.to_value(),
                    None => Value::String(status.message.clone()),
                };
                ResponseEnvelope::error(status, error)
            }
            None => ResponseEnvelope::error(status, Value::String(UNCLASSIFIED_ERROR.to_string())),
        }
    }

    fn resolve_message(&self, status: &StatusDescriptor, severity: Option<Severity>) -> String {
        if let Some(message) = &status.message {
            return message.clone();
        }

        match severity {
            Some(severity) => self
                .registry
                .status_message(severity, status.code)
                .unwrap_or_else(|| severity.fallback_message())
                .to_string(),
            None => UNKNOWN_STATUS.to_string(),
        }
    }

    fn emit(&self, severity: Option<Severity>, code: i64, message: &str, request: &ReportRequest) {
        let payload_line = format!("Data: {}", request.payload);

        match severity {
            Some(Severity::Success) => {
                self.sink.write_line(LogLevel::Info, code, message);
                self.sink.write_line(LogLevel::Info, code, &payload_line);
            }
            Some(Severity::Warn) => {
                self.sink.write_line(LogLevel::Warn, code, message);
                self.sink.write_line(LogLevel::Warn, code, &payload_line);
            }
            Some(Severity::Error) => {
                self.sink.write_line(LogLevel::Error, code, message);
                self.sink.write_line(LogLevel::Error, code, &payload_line);
                if let Some(error) = &request.error {
                    let error_line = format!("Error: {}", error.to_log_string());
                    self.sink.write_line(LogLevel::Error, code, &error_line);
                }
            }
            None => {
                let line = format!("Invalid status code: {}", code);
                self.sink.write_line(LogLevel::Error, code, &line);
            }
        }
    }
}

/// Report against the process-wide registry
pub fn report(request: &ReportRequest) -> ResponseEnvelope {
    let registry = StatusRegistry::global()
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    StatusReporter::new(&registry).report(request)
}
