//! Parser configuration
//!
//! A [`Config`] is the finalized, immutable input to a parser. All markers
//! are single bytes; turning user-facing strings or numbers into bytes is the
//! caller's job.

use crate::error::{Result, XsvError};

/// UTF-8 byte order mark
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// How positional fields map to named output keys
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeaderMode {
    /// Every row is emitted as a plain field list
    None,
    /// The first non-blank row supplies the names and is not emitted
    #[default]
    FirstRowIsHeader,
    /// Names are given up front; every row is mapped
    Fixed(Vec<String>),
}

/// What to do with malformed input the parser can repair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strictness {
    /// Repair silently: close open quotes at end of input, drop a trailing
    /// escape byte, decode invalid UTF-8 lossily.
    #[default]
    Permissive,
    /// Return a data error instead of repairing
    Strict,
}

/// Parser configuration
///
/// # Examples
///
/// ```
/// use xsvstream::{Config, HeaderMode};
///
/// let config = Config::csv()
///     .separator(b';')
///     .comment(Some(b'#'))
///     .header(HeaderMode::None);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Field separator. Default: `b','`
    pub separator: u8,

    /// Quote byte. Default: `Some(b'"')`. `None` disables quoting.
    pub quote: Option<u8>,

    /// Escape byte, meaningful inside quoted fields. Default: `Some(b'\\')`.
    /// Set equal to `quote` for RFC 4180 quote doubling.
    pub escape: Option<u8>,

    /// Lines starting with this byte are skipped. Default: `None`
    pub comment: Option<u8>,

    /// Header policy. Default: [`HeaderMode::FirstRowIsHeader`]
    pub header: HeaderMode,

    /// Number of leading physical lines discarded unconditionally
    pub skip_lines: usize,

    /// Decode escaped `t n v f r` inside quotes into control bytes
    pub unescape_controls: bool,

    /// Drop a leading UTF-8 byte order mark. Default: `true`
    pub strip_bom: bool,

    /// Malformed-input policy. Default: [`Strictness::Permissive`]
    pub strictness: Strictness,
}

impl Default for Config {
    fn default() -> Self {
        Self::csv()
    }
}

impl Config {
    /// Comma separated, double quotes, backslash escapes, first row is header
    pub fn csv() -> Self {
        Config {
            separator: b',',
            quote: Some(b'"'),
            escape: Some(b'\\'),
            comment: None,
            header: HeaderMode::FirstRowIsHeader,
            skip_lines: 0,
            unescape_controls: false,
            strip_bom: true,
            strictness: Strictness::Permissive,
        }
    }

    /// Tab separated, no quoting and no escaping
    pub fn tsv() -> Self {
        Config {
            separator: b'\t',
            quote: None,
            escape: None,
            ..Self::csv()
        }
    }

    /// RFC 4180: a doubled quote inside a quoted field is a literal quote
    pub fn rfc4180() -> Self {
        Config {
            escape: Some(b'"'),
            ..Self::csv()
        }
    }

    /// Set the field separator (builder pattern)
    pub fn separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Set or disable the quote byte (builder pattern)
    pub fn quote(mut self, quote: Option<u8>) -> Self {
        self.quote = quote;
        self
    }

    /// Set or disable the escape byte (builder pattern)
    pub fn escape(mut self, escape: Option<u8>) -> Self {
        self.escape = escape;
        self
    }

    /// Set or disable the comment byte (builder pattern)
    pub fn comment(mut self, comment: Option<u8>) -> Self {
        self.comment = comment;
        self
    }

    /// Set the header policy (builder pattern)
    pub fn header(mut self, header: HeaderMode) -> Self {
        self.header = header;
        self
    }

    /// Map rows onto the given names (builder pattern)
    pub fn fixed_header<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header(HeaderMode::Fixed(names.into_iter().map(Into::into).collect()))
    }

    /// Discard this many leading lines (builder pattern)
    pub fn skip_lines(mut self, lines: usize) -> Self {
        self.skip_lines = lines;
        self
    }

    /// Enable control-character unescaping (builder pattern)
    pub fn unescape_controls(mut self, enabled: bool) -> Self {
        self.unescape_controls = enabled;
        self
    }

    /// Enable or disable BOM stripping (builder pattern)
    pub fn strip_bom(mut self, enabled: bool) -> Self {
        self.strip_bom = enabled;
        self
    }

    /// Set the malformed-input policy (builder pattern)
    pub fn strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Whether quote and escape are the same byte (quote doubling)
    pub(crate) fn doubles_quotes(&self) -> bool {
        self.quote.is_some() && self.quote == self.escape
    }

    /// Check that the markers do not collide with each other
    pub fn validate(&self) -> Result<()> {
        let markers = [
            ("separator", Some(self.separator)),
            ("quote", self.quote),
            ("escape", self.escape),
            ("comment", self.comment),
        ];

        for (name, byte) in markers {
            if matches!(byte, Some(b'\r') | Some(b'\n')) {
                return Err(XsvError::InvalidConfig(format!(
                    "{} cannot be a line terminator",
                    name
                )));
            }
        }

        for (name, byte) in &markers[1..] {
            if *byte == Some(self.separator) {
                return Err(XsvError::InvalidConfig(format!(
                    "{} byte {:#04x} equals the separator",
                    name, self.separator
                )));
            }
        }

        if let Some(comment) = self.comment {
            if self.quote == Some(comment) || self.escape == Some(comment) {
                return Err(XsvError::InvalidConfig(format!(
                    "comment byte {:#04x} collides with quote or escape",
                    comment
                )));
            }
        }

        Ok(())
    }
}
