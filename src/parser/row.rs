//! Row assembly and header mapping

use crate::config::{HeaderMode, Strictness};
use crate::error::{Result, XsvError};
use crate::types::Record;
use std::mem;

/// Collects decoded fields into rows
pub(crate) struct RowAssembler {
    /// Raw bytes of the field being scanned
    pub(crate) field: Vec<u8>,
    row: Vec<String>,
    strictness: Strictness,
}

impl RowAssembler {
    pub(crate) fn new(strictness: Strictness) -> Self {
        RowAssembler {
            field: Vec::new(),
            row: Vec::new(),
            strictness,
        }
    }

    /// Decode the current field and append it to the row
    pub(crate) fn close_field(&mut self, line: u64) -> Result<()> {
        let bytes = mem::take(&mut self.field);
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                let position = self.row.len() + 1;
                if self.strictness == Strictness::Strict {
                    return Err(XsvError::InvalidUtf8 {
                        line,
                        field: position,
                    });
                }
                tracing::warn!(line, field = position, "invalid UTF-8 in field, decoding lossily");
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        self.row.push(text);
        Ok(())
    }

    /// Decoded bytes held for the unfinished row
    pub(crate) fn buffered_len(&self) -> usize {
        self.field.len() + self.row.iter().map(String::len).sum::<usize>()
    }

    /// Take the completed row; a blank line (one empty field) yields nothing
    pub(crate) fn close_row(&mut self) -> Option<Vec<String>> {
        let row = mem::take(&mut self.row);
        if row.len() == 1 && row[0].is_empty() {
            return None;
        }
        Some(row)
    }
}

/// Header names, resolved at most once
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HeaderState {
    /// Waiting for the first row to supply names
    Pending,
    /// No mapping; rows pass through
    Disabled,
    /// Rows are mapped onto these names
    Names(Vec<String>),
}

impl HeaderState {
    pub(crate) fn from_mode(mode: &HeaderMode) -> Self {
        match mode {
            HeaderMode::None => HeaderState::Disabled,
            HeaderMode::FirstRowIsHeader => HeaderState::Pending,
            HeaderMode::Fixed(names) => HeaderState::Names(names.clone()),
        }
    }

    pub(crate) fn names(&self) -> Option<&[String]> {
        match self {
            HeaderState::Names(names) => Some(names),
            _ => None,
        }
    }

    /// Turn a completed row into a record, or consume it as the header
    pub(crate) fn commit(&mut self, row: Vec<String>) -> Option<Record> {
        match self {
            HeaderState::Pending => {
                tracing::debug!(columns = row.len(), "resolved header row");
                *self = HeaderState::Names(row);
                None
            }
            HeaderState::Disabled => Some(Record::Fields(row)),
            HeaderState::Names(names) => {
                let mut values = row.into_iter();
                let map = names
                    .iter()
                    .map(|name| (name.clone(), values.next()))
                    .collect();
                Some(Record::Map(map))
            }
        }
    }
}
