//! Status schema types and structures

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::severity::Severity;

/// Codes and messages registered under one severity class
pub type StatusBucket = BTreeMap<i64, String>;

/// A single registered status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// Severity class the code is registered under
    pub severity: Severity,
    /// Numeric status code
    pub code: i64,
    /// Human-readable message
    pub message: String,
}

impl StatusEntry {
    /// Create a new entry
    pub fn new(severity: Severity, code: i64, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
        }
    }
}

/// Point-in-time copy of a registry's mapping
///
/// Snapshots are detached from the registry that produced them: changing one
/// never changes the other. A class with no codes is never present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<Severity, StatusBucket>")]
pub struct StatusSchema {
    buckets: BTreeMap<Severity, StatusBucket>,
}

impl From<BTreeMap<Severity, StatusBucket>> for StatusSchema {
    fn from(mut buckets: BTreeMap<Severity, StatusBucket>) -> Self {
        buckets.retain(|_, bucket| !bucket.is_empty());
        Self { buckets }
    }
}

impl Serialize for StatusSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.buckets.serialize(serializer)
    }
}

impl StatusSchema {
    /// Schema with no classes at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// The seeded default schema
    pub fn defaults() -> Self {
        let entries = [
            (Severity::Success, 200, "Success"),
            (Severity::Warn, 300, "Warning"),
            (Severity::Warn, 301, "Redirect"),
            (Severity::Warn, 302, "Found"),
            (Severity::Warn, 304, "Not Modified"),
            (Severity::Error, 400, "Bad Request"),
            (Severity::Error, 401, "Unauthorized"),
            (Severity::Error, 403, "Forbidden"),
            (Severity::Error, 404, "Not Found"),
            (Severity::Error, 500, "Internal Server Error"),
        ];

        entries
            .into_iter()
            .map(|(severity, code, message)| StatusEntry::new(severity, code, message))
            .collect()
    }

    /// Get the bucket for a class, if the class is present
    pub fn bucket(&self, severity: Severity) -> Option<&StatusBucket> {
        self.buckets.get(&severity)
    }

    /// Whether the class has a bucket
    pub fn contains_class(&self, severity: Severity) -> bool {
        self.buckets.contains_key(&severity)
    }

    /// Get the message registered for (class, code)
    pub fn message(&self, severity: Severity, code: i64) -> Option<&str> {
        self.buckets
            .get(&severity)
            .and_then(|bucket| bucket.get(&code))
            .map(String::as_str)
    }

    /// First class, in scan order, whose bucket contains `code`
    pub fn classify(&self, code: i64) -> Option<Severity> {
        Severity::ALL
            .into_iter()
            .find(|severity| {
                self.buckets
                    .get(severity)
                    .is_some_and(|bucket| bucket.contains_key(&code))
            })
    }

    /// Classes that currently hold `code`
    pub fn classes_of(&self, code: i64) -> Vec<Severity> {
        self.buckets
            .iter()
            .filter(|(_, bucket)| bucket.contains_key(&code))
            .map(|(severity, _)| *severity)
            .collect()
    }

    /// Total number of registered entries
    pub fn len(&self) -> usize {
        self.buckets.values().map(BTreeMap::len).sum()
    }

    /// Whether no entries are registered
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Insert or overwrite an entry, creating the bucket if needed
    pub(crate) fn insert(&mut self, severity: Severity, code: i64, message: String) {
        self.buckets.entry(severity).or_default().insert(code, message);
    }

    /// Remove an entry, dropping the bucket once it is empty
    pub(crate) fn remove(&mut self, severity: Severity, code: i64) -> Option<String> {
        let bucket = self.buckets.get_mut(&severity)?;
        let removed = bucket.remove(&code);
        if bucket.is_empty() {
            self.buckets.remove(&severity);
        }
        removed
    }
}

impl FromIterator<StatusEntry> for StatusSchema {
    fn from_iter<I: IntoIterator<Item = StatusEntry>>(iter: I) -> Self {
        let mut schema = Self::empty();
        for entry in iter {
            schema.insert(entry.severity, entry.code, entry.message);
        }
        schema
    }
}
