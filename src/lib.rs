//! Status Logger
//!
//! Standardizes console logging and API response shaping around numeric
//! status codes.
//!
//! ## Features
//!
//! - **Status Registry**: severity class → code → message table, seeded with
//!   common HTTP-style codes and editable at runtime
//! - **Status Reporter**: classifies a code, resolves its message, logs it and
//!   returns a normalized envelope carrying either `data` or `error`
//! - **Silent Mode**: suppress console output globally or per call
//! - **Layered Config**: extra statuses and flags from `status.toml` or
//!   `STATUS__*` environment variables
//!
//! ## Layout
//!
//! ```text
//! SUCCESS  200 Success
//! WARN     300 Warning, 301 Redirect, 302 Found, 304 Not Modified
//! ERROR    400 Bad Request, 401 Unauthorized, 403 Forbidden,
//!          404 Not Found, 500 Internal Server Error
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod reporter;
pub mod schema;
pub mod severity;
pub mod sink;

pub use config::{OutputFormat, StatusConfig};
pub use envelope::{
    EnvelopeBody, ReportedError, ResolvedStatus, ResponseEnvelope, StatusDescriptor,
    UNCLASSIFIED_ERROR,
};
pub use error::{Result, SchemaError};
pub use registry::StatusRegistry;
pub use reporter::{report, ReportRequest, StatusReporter, UNKNOWN_STATUS};
pub use schema::{StatusBucket, StatusEntry, StatusSchema};
pub use severity::Severity;
pub use sink::{LogLevel, RecordingSink, StatusSink, TracingSink};
