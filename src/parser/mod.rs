//! Incremental parser for delimiter-separated text
//!
//! [`XsvParser`] accepts input in chunks of any size, split anywhere, and
//! emits each record as soon as its line terminator has been seen.
//!
//! **Memory Usage:**
//! - Each chunk is scanned completely before `feed` returns; only the decoded
//!   fields of the unfinished line survive between calls
//! - At most two bytes are held back unscanned, while a possible byte order
//!   mark at stream start is still undecided
//! - Memory tracks the longest line, not the input size
//! - Emitted records are handed to the caller and never kept

mod machine;
mod row;

use crate::config::{Config, Strictness, UTF8_BOM};
use crate::error::{Result, XsvError};
use crate::types::Record;
use machine::{EndOfInput, Scanner, Step};
use row::{HeaderState, RowAssembler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Active,
    Finished,
    Failed,
}

/// Streaming parser for one input stream
///
/// # Examples
///
/// ```
/// use xsvstream::{Config, XsvParser};
///
/// let mut parser = XsvParser::new(Config::csv())?;
///
/// // Chunks may split a line anywhere
/// assert!(parser.feed(b"name,ci")?.is_empty());
/// assert!(parser.feed(b"ty\nAlice,N")?.is_empty());
/// let records = parser.feed(b"YC\nBob,SF")?;
/// assert_eq!(records[0].get("city"), Some("NYC"));
///
/// // The last line has no terminator; finish flushes it
/// let last = parser.finish()?.unwrap();
/// assert_eq!(last.get("name"), Some("Bob"));
/// # Ok::<(), xsvstream::XsvError>(())
/// ```
pub struct XsvParser {
    scanner: Scanner,
    assembler: RowAssembler,
    header: HeaderState,
    strictness: Strictness,
    strip_bom: bool,
    bom_checked: bool,
    // Bytes received but not yet scanned
    pending: Vec<u8>,
    status: Status,
    lines: u64,
    records: u64,
}

impl XsvParser {
    /// Create a parser for a single stream
    ///
    /// Fails with [`XsvError::InvalidConfig`] if the configured markers collide.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        tracing::debug!(
            separator = config.separator,
            quote = ?config.quote,
            escape = ?config.escape,
            header = ?config.header,
            "created parser"
        );

        Ok(XsvParser {
            scanner: Scanner::new(&config),
            assembler: RowAssembler::new(config.strictness),
            header: HeaderState::from_mode(&config.header),
            strictness: config.strictness,
            strip_bom: config.strip_bom,
            bom_checked: false,
            pending: Vec::new(),
            status: Status::Active,
            lines: 0,
            records: 0,
        })
    }

    /// Feed a chunk and return the records it completed
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        self.feed_into(chunk, &mut records)?;
        Ok(records)
    }

    /// Feed a chunk, appending completed records to `out`
    ///
    /// Records completed before a data error are still appended to `out`.
    /// After an error the parser is unusable.
    pub fn feed_into(&mut self, chunk: &[u8], out: &mut Vec<Record>) -> Result<()> {
        self.ensure_active()?;
        self.pending.extend_from_slice(chunk);

        if !self.bom_checked {
            // Wait until a partial BOM can be told apart from data
            if self.strip_bom
                && self.pending.len() < UTF8_BOM.len()
                && UTF8_BOM.starts_with(&self.pending)
            {
                return Ok(());
            }
            self.check_bom();
        }

        if self.pending.is_empty() {
            return Ok(());
        }

        let result = self.scan(out);
        if result.is_err() {
            self.status = Status::Failed;
        }
        result
    }

    /// Signal end of input and flush an unterminated final line
    ///
    /// Returns the record for that line, if it produced one. The parser is
    /// finished afterwards.
    pub fn finish(&mut self) -> Result<Option<Record>> {
        self.ensure_active()?;
        self.status = Status::Finished;

        if !self.bom_checked {
            // Fewer than three bytes, all a BOM prefix: plain data, no terminator
            self.check_bom();
            self.scan(&mut Vec::new())?;
        }

        let line = self.lines + 1;
        let record = match self.scanner.end_of_input() {
            EndOfInput::Clean => None,
            end => {
                self.repair(end, line)?;
                self.assembler.close_field(line)?;
                self.lines += 1;
                match self.assembler.close_row() {
                    Some(row) => self.header.commit(row),
                    None => None,
                }
            }
        };

        if record.is_some() {
            self.records += 1;
        }
        tracing::debug!(lines = self.lines, records = self.records, "stream finished");
        Ok(record)
    }

    /// Header names, once known
    ///
    /// With [`HeaderMode::FirstRowIsHeader`](crate::HeaderMode::FirstRowIsHeader)
    /// this is `None` until the first non-blank row has been parsed.
    pub fn headers(&self) -> Option<&[String]> {
        self.header.names()
    }

    /// Physical lines consumed so far, skipped lines included
    pub fn line_count(&self) -> u64 {
        self.lines
    }

    /// Records emitted so far
    pub fn record_count(&self) -> u64 {
        self.records
    }

    /// Bytes currently retained for the unfinished line (for memory monitoring)
    pub fn buffered_len(&self) -> usize {
        self.pending.len() + self.assembler.buffered_len()
    }

    /// Check if `finish` was called or a data error occurred
    pub fn is_finished(&self) -> bool {
        self.status != Status::Active
    }

    fn ensure_active(&self) -> Result<()> {
        match self.status {
            Status::Active => Ok(()),
            Status::Finished => Err(XsvError::InvalidState(
                "parser already finished".to_string(),
            )),
            Status::Failed => Err(XsvError::InvalidState(
                "parser failed on earlier input".to_string(),
            )),
        }
    }

    fn check_bom(&mut self) {
        self.bom_checked = true;
        if self.strip_bom && self.pending.starts_with(&UTF8_BOM) {
            self.pending.drain(..UTF8_BOM.len());
            tracing::debug!("stripped UTF-8 byte order mark");
        }
    }

    /// Scan all pending bytes; they are folded into the field and row state
    fn scan(&mut self, out: &mut Vec<Record>) -> Result<()> {
        let mut pos = 0;

        while pos < self.pending.len() {
            let byte = self.pending[pos];
            match self.scanner.step(byte, &mut self.assembler.field) {
                Step::Next => {}
                Step::Again => continue,
                Step::FieldEnd => self.assembler.close_field(self.lines + 1)?,
                Step::RowEnd => {
                    self.assembler.close_field(self.lines + 1)?;
                    self.lines += 1;
                    if let Some(row) = self.assembler.close_row() {
                        if let Some(record) = self.header.commit(row) {
                            self.records += 1;
                            out.push(record);
                        }
                    }
                }
                Step::SkippedLineEnd => self.lines += 1,
            }
            pos += 1;
        }

        self.pending.clear();
        Ok(())
    }

    fn repair(&self, end: EndOfInput, line: u64) -> Result<()> {
        let strict = self.strictness == Strictness::Strict;
        match end {
            EndOfInput::OpenQuote if strict => Err(XsvError::UnterminatedQuote { line }),
            EndOfInput::DanglingEscape if strict => Err(XsvError::DanglingEscape { line }),
            EndOfInput::OpenQuote => {
                tracing::warn!(line, "closing unterminated quoted field at end of input");
                Ok(())
            }
            EndOfInput::DanglingEscape => {
                tracing::warn!(line, "dropping escape byte at end of input");
                Ok(())
            }
            EndOfInput::Clean | EndOfInput::OpenLine => Ok(()),
        }
    }
}

/// Parse a complete in-memory input
///
/// # Examples
///
/// ```
/// use xsvstream::{parse_slice, Config, HeaderMode, Record};
///
/// let records = parse_slice(Config::csv().header(HeaderMode::None), b"a,b\n1,2")?;
/// assert_eq!(records[1], Record::Fields(vec!["1".into(), "2".into()]));
/// # Ok::<(), xsvstream::XsvError>(())
/// ```
pub fn parse_slice(config: Config, input: &[u8]) -> Result<Vec<Record>> {
    let mut parser = XsvParser::new(config)?;
    let mut records = parser.feed(input)?;
    records.extend(parser.finish()?);
    Ok(records)
}
