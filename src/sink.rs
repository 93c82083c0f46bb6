//! Console output for reports

use std::sync::Mutex;

/// Level a report line is written at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// Destination for report lines
pub trait StatusSink {
    fn write_line(&self, level: LogLevel, code: i64, line: &str);
}

impl<S: StatusSink + ?Sized> StatusSink for &S {
    fn write_line(&self, level: LogLevel, code: i64, line: &str) {
        (**self).write_line(level, code, line)
    }
}

/// Forwards lines to `tracing` under the `status` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn write_line(&self, level: LogLevel, code: i64, line: &str) {
        match level {
            LogLevel::Info => tracing::info!(target: "status", code, "{}", line),
            LogLevel::Warn => tracing::warn!(target: "status", code, "{}", line),
            LogLevel::Error => tracing::error!(target: "status", code, "{}", line),
        }
    }
}

/// Keeps lines in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }
}

impl StatusSink for RecordingSink {
    fn write_line(&self, level: LogLevel, _code: i64, line: &str) {
        let entry = (level, line.to_string());
        match self.lines.lock() {
            Ok(mut lines) => lines.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}
