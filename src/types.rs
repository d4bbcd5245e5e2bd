//! Type definitions for parsed records

use indexmap::IndexMap;
use std::fmt;

/// One emitted record
///
/// Without a header mapping a record is the plain list of field values.
/// With one it maps each header name to the value at the same position;
/// `None` marks a field the row was too short to supply, which is distinct
/// from a field that is present but empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Record {
    /// Ordered field values
    Fields(Vec<String>),
    /// Header name to field value, in header order
    Map(IndexMap<String, Option<String>>),
}

impl Record {
    /// Field list, if this record is not header-mapped
    pub fn as_fields(&self) -> Option<&[String]> {
        match self {
            Record::Fields(fields) => Some(fields),
            Record::Map(_) => None,
        }
    }

    /// Name/value mapping, if this record is header-mapped
    pub fn as_map(&self) -> Option<&IndexMap<String, Option<String>>> {
        match self {
            Record::Map(map) => Some(map),
            Record::Fields(_) => None,
        }
    }

    /// Value for a header name
    ///
    /// Returns `None` both for unknown names and for absent fields; use
    /// [`Record::as_map`] to tell them apart.
    pub fn get(&self, name: &str) -> Option<&str> {
        match self {
            Record::Map(map) => map.get(name).and_then(|v| v.as_deref()),
            Record::Fields(_) => None,
        }
    }

    /// Number of fields (or keys)
    pub fn len(&self) -> usize {
        match self {
            Record::Fields(fields) => fields.len(),
            Record::Map(map) => map.len(),
        }
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values in order; absent fields become empty strings
    pub fn into_fields(self) -> Vec<String> {
        match self {
            Record::Fields(fields) => fields,
            Record::Map(map) => map.into_values().map(Option::unwrap_or_default).collect(),
        }
    }
}

impl From<Vec<String>> for Record {
    fn from(fields: Vec<String>) -> Self {
        Record::Fields(fields)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Fields(fields) => write!(f, "{}", fields.join(", ")),
            Record::Map(map) => {
                for (i, (name, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match value {
                        Some(v) => write!(f, "{}={}", name, v)?,
                        None => write!(f, "{}=<absent>", name)?,
                    }
                }
                Ok(())
            }
        }
    }
}
