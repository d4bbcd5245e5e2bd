//! # xsvstream
//!
//! Streaming parser for CSV, TSV and any other single-byte-separated text.
//!
//! Input arrives as byte chunks of any size, split at any position (even in
//! the middle of a `\r\n` pair, an escape sequence or a byte order mark).
//! Records come out as soon as their line is complete, either as plain field
//! lists or mapped onto header names.
//!
//! ## Features
//!
//! - Optional quoting and in-quote escaping, including RFC 4180 quote doubling
//! - Control-character unescaping (`\t \n \v \f \r`) inside quotes
//! - Comment lines and a leading skip count
//! - UTF-8 byte order mark stripping
//! - `\n`, `\r` and `\r\n` line endings
//! - Header row or fixed names mapped to [`Record::Map`]
//! - Bounded memory: only the current line is buffered
//!
//! ## Quick Start
//!
//! ```
//! use xsvstream::{Config, XsvParser};
//!
//! let mut parser = XsvParser::new(Config::csv())?;
//! let mut records = parser.feed(b"name,age\nAlice,30\nBob,")?;
//! records.extend(parser.finish()?);
//!
//! assert_eq!(records[0].get("age"), Some("30"));
//! assert_eq!(records[1].get("age"), Some(""));
//! # Ok::<(), xsvstream::XsvError>(())
//! ```
//!
//! For files and other `std::io::Read` sources see [`XsvReader`].

pub mod config;
pub mod error;
pub mod parser;
pub mod reader;
pub mod types;

pub use config::{Config, HeaderMode, Strictness};
pub use error::{Result, XsvError};
pub use parser::{parse_slice, XsvParser};
pub use reader::{RecordIterator, XsvReader};
pub use types::Record;
