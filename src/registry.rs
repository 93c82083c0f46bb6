//! Status Registry
//!
//! Holds the severity → code → message mapping and the silent-output flag.

use std::sync::RwLock;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::config::StatusConfig;
use crate::error::{Result, SchemaError};
use crate::schema::StatusSchema;
use crate::severity::Severity;

static GLOBAL: Lazy<RwLock<StatusRegistry>> = Lazy::new(|| RwLock::new(StatusRegistry::new()));

/// The status registry
///
/// Codes are unique within a class. The same code may sit in two classes
/// when inserted through [`StatusRegistry::update_status`]; classification
/// then takes the first match in `SUCCESS`, `WARN`, `ERROR` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRegistry {
    schema: StatusSchema,
    silent_mode: bool,
}

impl Default for StatusRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusRegistry {
    /// Create a registry seeded with the default statuses
    pub fn new() -> Self {
        Self::from_schema(StatusSchema::defaults())
    }

    /// Create a registry with no classes
    pub fn empty() -> Self {
        Self::from_schema(StatusSchema::empty())
    }

    /// Create a registry from an existing snapshot
    pub fn from_schema(schema: StatusSchema) -> Self {
        Self {
            schema,
            silent_mode: false,
        }
    }

    /// Build a registry from configuration
    ///
    /// Configured statuses are applied on top of the defaults (unless
    /// `seed_defaults` is off), class by class in scan order.
    pub fn from_config(config: &StatusConfig) -> Result<Self> {
        let mut registry = if config.registry.seed_defaults {
            Self::new()
        } else {
            Self::empty()
        };

        for (severity, code, message) in config.statuses.entries()? {
            if config.registry.unique_codes {
                registry.try_update_status(severity, code, message)?;
            } else {
                registry.update_status(severity, code, message);
            }
        }

        registry.set_silent_mode(config.registry.silent_mode);
        Ok(registry)
    }

    /// The process-wide default instance
    ///
    /// Prefer passing an explicit registry around; this exists for callers
    /// that want a single shared table.
    pub fn global() -> &'static RwLock<StatusRegistry> {
        &GLOBAL
    }

    /// Snapshot of the full mapping
    pub fn schema(&self) -> StatusSchema {
        self.schema.clone()
    }

    /// Get the message registered for (class, code)
    pub fn status_message(&self, severity: Severity, code: i64) -> Option<&str> {
        self.schema.message(severity, code)
    }

    /// Classify a code: first class, in scan order, that contains it
    pub fn classify(&self, code: i64) -> Option<Severity> {
        self.schema.classify(code)
    }

    /// Insert or overwrite the entry for (class, code)
    pub fn update_status(&mut self, severity: Severity, code: i64, message: impl Into<String>) {
        let message = message.into();
        debug!(target: "status", %severity, code, message = %message, "update status");
        self.schema.insert(severity, code, message);
    }

    /// Insert or overwrite, refusing codes registered under another class
    pub fn try_update_status(
        &mut self,
        severity: Severity,
        code: i64,
        message: impl Into<String>,
    ) -> Result<()> {
        if let Some(existing) = self
            .schema
            .classes_of(code)
            .into_iter()
            .find(|existing| *existing != severity)
        {
            return Err(SchemaError::CodeConflict {
                code,
                existing,
                requested: severity,
            });
        }

        self.update_status(severity, code, message);
        Ok(())
    }

    /// Delete the entry for (class, code); no-op when absent
    ///
    /// Removing the last code of a class removes the class as well.
    pub fn remove_status(&mut self, severity: Severity, code: i64) {
        if self.schema.remove(severity, code).is_some() {
            debug!(target: "status", %severity, code, "remove status");
        }
    }

    /// Set the suppression flag
    pub fn set_silent_mode(&mut self, silent: bool) {
        self.silent_mode = silent;
    }

    /// Read the suppression flag
    pub fn silent_mode(&self) -> bool {
        self.silent_mode
    }
}
