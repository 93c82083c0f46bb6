//! Request and response value types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Literal carried by envelopes for codes that match no class
pub const UNCLASSIFIED_ERROR: &str = "Internal Server Error";

/// Status supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDescriptor {
    pub code: i64,
    /// Overrides the registered message when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusDescriptor {
    pub fn new(code: i64) -> Self {
        Self { code, message: None }
    }

    pub fn with_message(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }
}

impl From<i64> for StatusDescriptor {
    fn from(code: i64) -> Self {
        Self::new(code)
    }
}

impl From<i32> for StatusDescriptor {
    fn from(code: i32) -> Self {
        Self::new(code.into())
    }
}

/// Error value attached to a report
#[derive(Debug, Clone, PartialEq)]
pub enum ReportedError {
    /// Something that implemented `std::error::Error`; only its message survives
    ErrorLike(String),
    /// Any other value, kept as-is
    Other(Value),
}

impl ReportedError {
    pub fn from_error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        ReportedError::ErrorLike(error.to_string())
    }

    /// The value placed in the envelope's `error` field
    pub fn to_value(&self) -> Value {
        match self {
            ReportedError::ErrorLike(message) => Value::String(message.clone()),
            ReportedError::Other(value) => value.clone(),
        }
    }

    /// Text written to the console
    pub fn to_log_string(&self) -> String {
        match self {
            ReportedError::ErrorLike(message) => message.clone(),
            ReportedError::Other(Value::String(text)) => text.clone(),
            ReportedError::Other(value) => value.to_string(),
        }
    }
}

impl From<&str> for ReportedError {
    fn from(text: &str) -> Self {
        ReportedError::Other(Value::String(text.to_string()))
    }
}

impl From<String> for ReportedError {
    fn from(text: String) -> Self {
        ReportedError::Other(Value::String(text))
    }
}

impl From<Value> for ReportedError {
    fn from(value: Value) -> Self {
        ReportedError::Other(value)
    }
}

impl From<std::io::Error> for ReportedError {
    fn from(error: std::io::Error) -> Self {
        ReportedError::from_error(&error)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ReportedError {
    fn from(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        ReportedError::from_error(error.as_ref())
    }
}

/// Status after message resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedStatus {
    pub code: i64,
    pub message: String,
}

/// Either the payload or the error information, never both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeBody {
    Data(Value),
    Error(Value),
}

/// Normalized response returned by every report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub status: ResolvedStatus,
    #[serde(flatten)]
    pub body: EnvelopeBody,
}

impl ResponseEnvelope {
    pub fn data(status: ResolvedStatus, payload: Value) -> Self {
        Self {
            status,
            body: EnvelopeBody::Data(payload),
        }
    }

    pub fn error(status: ResolvedStatus, error: Value) -> Self {
        Self {
            status,
            body: EnvelopeBody::Error(error),
        }
    }

    pub fn data_value(&self) -> Option<&Value> {
        match &self.body {
            EnvelopeBody::Data(data) => Some(data),
            EnvelopeBody::Error(_) => None,
        }
    }

    pub fn error_value(&self) -> Option<&Value> {
        match &self.body {
            EnvelopeBody::Error(error) => Some(error),
            EnvelopeBody::Data(_) => None,
        }
    }
}
