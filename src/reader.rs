//! Pull-based reading from any `std::io::Read` source

use crate::config::Config;
use crate::error::{Result, XsvError};
use crate::parser::XsvParser;
use crate::types::Record;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Default number of bytes read from the source per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Record reader over a byte source
///
/// Reads the source in fixed-size chunks and hands records out one at a
/// time. Memory usage stays bounded by the chunk size plus the longest line.
///
/// # Examples
///
/// ```no_run
/// use xsvstream::{Config, XsvReader};
///
/// let mut reader = XsvReader::open("data.csv", Config::csv())?;
///
/// for record in reader.records() {
///     let record = record?;
///     println!("{}", record);
/// }
/// # Ok::<(), xsvstream::XsvError>(())
/// ```
///
/// # From memory
///
/// ```
/// use xsvstream::{Config, HeaderMode, XsvReader};
///
/// let data: &[u8] = b"id,name\n1,Alice\n2,Bob\n";
/// let mut reader = XsvReader::new(data, Config::csv())?.chunk_size(4);
///
/// let first = reader.read_record()?.unwrap();
/// assert_eq!(first.get("name"), Some("Alice"));
/// assert_eq!(reader.headers(), Some(&["id".to_string(), "name".to_string()][..]));
/// # Ok::<(), xsvstream::XsvError>(())
/// ```
pub struct XsvReader<R> {
    source: R,
    parser: XsvParser,
    chunk: Vec<u8>,
    ready: VecDeque<Record>,
    error: Option<XsvError>,
    eof: bool,
    row_count: u64,
}

impl XsvReader<File> {
    /// Open a file for streaming read
    pub fn open<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| XsvError::ReadError(format!("Failed to open file: {}", e)))?;
        Self::new(file, config)
    }
}

impl<R: Read> XsvReader<R> {
    /// Wrap a byte source
    pub fn new(source: R, config: Config) -> Result<Self> {
        Ok(XsvReader {
            source,
            parser: XsvParser::new(config)?,
            chunk: vec![0; DEFAULT_CHUNK_SIZE],
            ready: VecDeque::new(),
            error: None,
            eof: false,
            row_count: 0,
        })
    }

    /// Set the read chunk size in bytes (builder pattern, minimum 1)
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk = vec![0; size.max(1)];
        self
    }

    /// Header names, once the header row has been read
    pub fn headers(&self) -> Option<&[String]> {
        self.parser.headers()
    }

    /// Read the next record
    ///
    /// Returns `Ok(None)` at end of input. A data error is reported after
    /// every record completed before it has been returned.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        loop {
            if let Some(record) = self.ready.pop_front() {
                self.row_count += 1;
                return Ok(Some(record));
            }

            if let Some(err) = self.error.take() {
                self.eof = true;
                return Err(err);
            }

            if self.eof {
                return Ok(None);
            }

            self.fill()?;
        }
    }

    /// Get iterator over records
    pub fn records(&mut self) -> RecordIterator<'_, R> {
        RecordIterator { reader: self }
    }

    /// Get the number of records returned so far
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Unwrap the underlying source
    pub fn into_inner(self) -> R {
        self.source
    }

    fn fill(&mut self) -> Result<()> {
        let n = match self.source.read(&mut self.chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => return Ok(()),
            Err(e) => {
                self.eof = true;
                return Err(e.into());
            }
        };

        if n == 0 {
            self.eof = true;
            match self.parser.finish() {
                Ok(last) => self.ready.extend(last),
                Err(e) => self.error = Some(e),
            }
            return Ok(());
        }

        let mut records = Vec::new();
        if let Err(e) = self.parser.feed_into(&self.chunk[..n], &mut records) {
            self.error = Some(e);
        }
        self.ready.extend(records);
        Ok(())
    }
}

/// Iterator over records
pub struct RecordIterator<'a, R> {
    reader: &'a mut XsvReader<R>,
}

impl<'a, R: Read> Iterator for RecordIterator<'a, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
