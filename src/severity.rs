//! Severity classes for status codes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Outcome category a status code belongs to
///
/// The variant order is the classification scan order, so `Ord` and the
/// iteration order of `BTreeMap<Severity, _>` both follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Success,
    Warn,
    Error,
}

impl Severity {
    /// All classes, in scan order
    pub const ALL: [Severity; 3] = [Severity::Success, Severity::Warn, Severity::Error];

    /// Upper-case tag used in serialized schemas
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "SUCCESS",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    /// Message used when a code of this class has no registered message
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Severity::Success => "Success",
            Severity::Warn => "Warning",
            Severity::Error => "Error",
        }
    }

    /// Whether envelopes for this class carry `data` rather than `error`
    pub fn carries_data(&self) -> bool {
        !matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUCCESS" => Ok(Severity::Success),
            "WARN" | "WARNING" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            _ => Err(SchemaError::UnknownSeverity(s.to_string())),
        }
    }
}
