//! Byte-level scanner: line classification and the field state machine
//!
//! The scanner sees one byte at a time and never looks back. All context
//! that a lookahead or lookbehind would otherwise provide lives in [`Mode`],
//! which is why a chunk may end on any byte.

use crate::config::Config;

/// Scanner mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Next byte is the first of a physical line
    LineStart,
    /// A line just ended on `\r`; a directly following `\n` belongs to it
    AfterCarriageReturn,
    /// Discarding the rest of a skipped or comment line
    SkippingLine,
    /// Inside a field, outside quotes
    Unquoted,
    /// Outside quotes, right after an escape byte
    UnquotedEscape,
    /// Inside a quoted region
    Quoted,
    /// Inside a quoted region, right after an escape byte
    QuotedEscape,
}

/// Outcome of scanning one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Byte consumed
    Next,
    /// Byte not consumed; scan it again in the new mode
    Again,
    /// Separator consumed; the current field is complete
    FieldEnd,
    /// Line terminator consumed; the current field and row are complete
    RowEnd,
    /// Line terminator of a skipped line consumed
    SkippedLineEnd,
}

/// State of the scanner when input runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EndOfInput {
    /// No line is open
    Clean,
    /// A line is open and can be closed as-is
    OpenLine,
    /// Input ended inside a quoted region
    OpenQuote,
    /// Input ended inside a quoted region, right after an escape byte
    DanglingEscape,
}

pub(crate) struct Scanner {
    mode: Mode,
    separator: u8,
    quote: Option<u8>,
    escape: Option<u8>,
    comment: Option<u8>,
    doubled_quotes: bool,
    unescape_controls: bool,
    skip_remaining: usize,
}

impl Scanner {
    pub(crate) fn new(config: &Config) -> Self {
        Scanner {
            mode: Mode::LineStart,
            separator: config.separator,
            quote: config.quote,
            escape: config.escape,
            comment: config.comment,
            doubled_quotes: config.doubles_quotes(),
            unescape_controls: config.unescape_controls,
            skip_remaining: config.skip_lines,
        }
    }

    #[cfg(test)]
    pub(crate) fn mode(&self) -> Mode {
        self.mode
    }

    /// Scan one byte, appending decoded field bytes to `field`
    pub(crate) fn step(&mut self, byte: u8, field: &mut Vec<u8>) -> Step {
        match self.mode {
            Mode::LineStart => self.classify(byte),
            Mode::AfterCarriageReturn => {
                self.mode = Mode::LineStart;
                if byte == b'\n' {
                    Step::Next
                } else {
                    Step::Again
                }
            }
            Mode::SkippingLine => match byte {
                b'\n' => {
                    self.mode = Mode::LineStart;
                    Step::SkippedLineEnd
                }
                b'\r' => {
                    self.mode = Mode::AfterCarriageReturn;
                    Step::SkippedLineEnd
                }
                _ => Step::Next,
            },
            Mode::Unquoted => self.unquoted(byte, field),
            Mode::UnquotedEscape => {
                self.mode = Mode::Unquoted;
                if byte == self.separator {
                    field.push(byte);
                    Step::Next
                } else {
                    Step::Again
                }
            }
            Mode::Quoted => {
                // Escape is checked first so that quote == escape enters
                // QuotedEscape, where a doubled quote is told apart from a
                // closing one.
                if Some(byte) == self.escape {
                    self.mode = Mode::QuotedEscape;
                } else if Some(byte) == self.quote {
                    self.mode = Mode::Unquoted;
                } else {
                    field.push(byte);
                }
                Step::Next
            }
            Mode::QuotedEscape => self.quoted_escape(byte, field),
        }
    }

    fn classify(&mut self, byte: u8) -> Step {
        if self.skip_remaining > 0 {
            self.skip_remaining -= 1;
            self.mode = Mode::SkippingLine;
            tracing::trace!(remaining = self.skip_remaining, "skipping leading line");
            return Step::Again;
        }

        if Some(byte) == self.comment {
            self.mode = Mode::SkippingLine;
            tracing::trace!("skipping comment line");
            return Step::Next;
        }

        self.mode = Mode::Unquoted;
        Step::Again
    }

    fn unquoted(&mut self, byte: u8, field: &mut Vec<u8>) -> Step {
        if Some(byte) == self.quote {
            self.mode = Mode::Quoted;
            return Step::Next;
        }

        match byte {
            b if b == self.separator => Step::FieldEnd,
            b'\n' => {
                self.mode = Mode::LineStart;
                Step::RowEnd
            }
            b'\r' => {
                self.mode = Mode::AfterCarriageReturn;
                Step::RowEnd
            }
            _ => {
                // Outside quotes the escape byte stays in the field and only
                // shields a directly following separator.
                if Some(byte) == self.escape {
                    self.mode = Mode::UnquotedEscape;
                }
                field.push(byte);
                Step::Next
            }
        }
    }

    fn quoted_escape(&mut self, byte: u8, field: &mut Vec<u8>) -> Step {
        if self.doubled_quotes {
            if Some(byte) == self.escape {
                field.push(byte);
                self.mode = Mode::Quoted;
                return Step::Next;
            }
            // The previous quote closed the region.
            self.mode = Mode::Unquoted;
            return Step::Again;
        }

        self.mode = Mode::Quoted;
        let decoded = match byte {
            b't' if self.unescape_controls => 0x09,
            b'n' if self.unescape_controls => 0x0A,
            b'v' if self.unescape_controls => 0x0B,
            b'f' if self.unescape_controls => 0x0C,
            b'r' if self.unescape_controls => 0x0D,
            other => other,
        };
        field.push(decoded);
        Step::Next
    }

    /// Classify the open line, if any, once input is exhausted
    pub(crate) fn end_of_input(&self) -> EndOfInput {
        match self.mode {
            Mode::LineStart | Mode::AfterCarriageReturn | Mode::SkippingLine => EndOfInput::Clean,
            Mode::Unquoted | Mode::UnquotedEscape => EndOfInput::OpenLine,
            Mode::Quoted => EndOfInput::OpenQuote,
            Mode::QuotedEscape if self.doubled_quotes => EndOfInput::OpenLine,
            Mode::QuotedEscape => EndOfInput::DanglingEscape,
        }
    }
}
