//! Open record type for scraped data
//!
//! Scraped records have no fixed shape: each provider response defines its
//! own columns. Consumers derive the table layout from the first record of
//! a non-empty set and must tolerate an empty set.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single field value inside a scraped record
///
/// Values round-trip as natural JSON (string, number, boolean, or null).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Textual value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Flag(bool),
    /// Explicit null
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            FieldValue::Flag(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, ""),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl FieldValue {
    /// Returns the contained text, if this value is textual
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// One extracted record: an open mapping from field name to value
///
/// Backed by a `BTreeMap` so column order is deterministic across calls
/// and serializations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScrapingResult(BTreeMap<String, FieldValue>);

impl ScrapingResult {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, replacing any previous value under the same name
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Returns the value of a field, if present
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Column names of this record, in deterministic order
    pub fn columns(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// Number of fields in this record
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(field, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Derives the table columns for a result set
///
/// The schema is read from the first record; an empty set yields an empty
/// column list. Records past the first are not consulted.
pub fn table_columns(results: &[ScrapingResult]) -> Vec<String> {
    results
        .first()
        .map(|record| record.columns().into_iter().map(String::from).collect())
        .unwrap_or_default()
}

/// Serializes a result set as a pretty-printed JSON document
///
/// This backs the presentation layer's download/export affordance.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_json(results: &[ScrapingResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}
