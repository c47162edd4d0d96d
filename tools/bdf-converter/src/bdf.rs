//! Streaming extraction of glyph records from BDF font descriptions.
//!
//! Only the four fields the converter cares about are interpreted: `STARTCHAR`,
//! `ENCODING`, `DWIDTH`, and the `BITMAP`/`ENDCHAR` row block. Everything else in the
//! description is ignored.

use core::{error, fmt, mem};
use std::io::{self, BufRead};

use crate::range::CodepointRanges;

/// The advance width assumed for a record that carries no `DWIDTH` line.
pub const DEFAULT_ADVANCE_WIDTH: u32 = 16;

/// The packed bitmap size of a glyph whose advance width is at most 8 pixels.
pub const NARROW_BITMAP_SIZE: usize = 16;

/// The packed bitmap size of a glyph whose advance width is over 8 pixels.
pub const WIDE_BITMAP_SIZE: usize = 32;

/// A single glyph extracted from a BDF description.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct GlyphRecord {
    /// The Unicode codepoint the glyph maps to.
    pub codepoint: u32,
    /// The horizontal advance of the glyph in pixels.
    pub advance_width: u32,
    /// The packed bitmap rows: [`NARROW_BITMAP_SIZE`] bytes when `advance_width <= 8`,
    /// [`WIDE_BITMAP_SIZE`] bytes otherwise.
    pub bitmap: Vec<u8>,
}

impl GlyphRecord {
    /// Returns `true` if the glyph occupies two 8-pixel cells.
    pub fn is_wide(&self) -> bool {
        self.advance_width > 8
    }
}

/// A lazy [`Iterator`] over the glyph records of a BDF description.
///
/// Performs a single forward pass over the underlying stream. Iteration ends at the end
/// of the stream or at the first [`BdfError`].
#[derive(Debug)]
pub struct Glyphs<R> {
    /// The line source being scanned.
    reader: R,
    /// Optional inclusion predicate; `None` includes every codepoint.
    ranges: Option<CodepointRanges>,
    /// 1-based number of the line most recently read.
    line_number: u64,
    /// Candidate codepoint of the record currently being parsed.
    codepoint: Option<u32>,
    /// Advance width of the record currently being parsed.
    advance_width: u32,
    /// Whether subsequent lines are bitmap rows.
    in_bitmap: bool,
    /// Raw hexadecimal row lines collected since the last `BITMAP` marker.
    rows: Vec<String>,
    /// Whether iteration has finished.
    done: bool,
}

impl<R: BufRead> Glyphs<R> {
    /// Creates a new [`Glyphs`] iterator over `reader`, keeping only records whose
    /// codepoint `ranges` contains. A `ranges` of `None` keeps every record.
    pub fn new(reader: R, ranges: Option<CodepointRanges>) -> Self {
        Self {
            reader,
            ranges,
            line_number: 0,
            codepoint: None,
            advance_width: DEFAULT_ADVANCE_WIDTH,
            in_bitmap: false,
            rows: Vec::new(),
            done: false,
        }
    }

    /// Processes one trimmed line, returning a completed [`GlyphRecord`] when the line
    /// ends a record that the predicate accepts.
    fn process_line(&mut self, line: &str) -> Result<Option<GlyphRecord>, BdfError> {
        if line.starts_with("STARTCHAR ") {
            self.rows.clear();
            self.in_bitmap = false;
        } else if let Some(rest) = line.strip_prefix("ENCODING ") {
            self.codepoint = self.parse_encoding(rest)?;
        } else if let Some(rest) = line.strip_prefix("DWIDTH ") {
            let field = rest.split_whitespace().next().unwrap_or("");
            self.advance_width = self.parse_decimal(field, "DWIDTH")?;
        } else if line == "BITMAP" {
            self.in_bitmap = true;
        } else if line == "ENDCHAR" {
            return self.finish_record();
        } else if self.in_bitmap && !line.is_empty() {
            self.rows.push(line.to_owned());
        }

        Ok(None)
    }

    /// Completes the current record and resets the per-record state.
    ///
    /// Bitmap rows are only parsed for records that carry a codepoint the predicate
    /// accepts; rows of skipped records are discarded unexamined.
    fn finish_record(&mut self) -> Result<Option<GlyphRecord>, BdfError> {
        let codepoint = self.codepoint.take();
        let advance_width = mem::replace(&mut self.advance_width, DEFAULT_ADVANCE_WIDTH);
        let rows = mem::take(&mut self.rows);
        self.in_bitmap = false;

        let Some(codepoint) = codepoint else {
            return Ok(None);
        };
        if let Some(ranges) = &self.ranges {
            if !ranges.contains(codepoint) {
                return Ok(None);
            }
        }

        let size = if advance_width > 8 {
            WIDE_BITMAP_SIZE
        } else {
            NARROW_BITMAP_SIZE
        };

        let mut bitmap = Vec::with_capacity(size);
        for row in &rows {
            let value = u32::from_str_radix(row, 16)
                .map_err(|_| self.malformed("bitmap row", row))?;
            let bytes = value.to_be_bytes();
            if advance_width > 8 {
                // Two bytes per row, high byte first.
                bitmap.extend_from_slice(&bytes[2..4]);
            } else {
                bitmap.push(bytes[3]);
            }
        }
        // Pad short bitmaps with blank rows; drop rows past the fixed glyph height.
        bitmap.resize(size, 0);

        let record = GlyphRecord {
            codepoint,
            advance_width,
            bitmap,
        };
        Ok(Some(record))
    }

    /// Parses an `ENCODING` field. A negative value marks an unencoded glyph and
    /// leaves the record without a codepoint, so `ENDCHAR` skips it the same way it
    /// skips a record that carries no `ENCODING` line at all.
    fn parse_encoding(&self, text: &str) -> Result<Option<u32>, BdfError> {
        let value = text
            .trim()
            .parse::<i64>()
            .map_err(|_| self.malformed("ENCODING", text))?;
        if value < 0 {
            return Ok(None);
        }

        u32::try_from(value)
            .map(Some)
            .map_err(|_| self.malformed("ENCODING", text))
    }

    /// Parses `text` as a decimal integer field.
    fn parse_decimal(&self, text: &str, field: &'static str) -> Result<u32, BdfError> {
        text.trim().parse().map_err(|_| self.malformed(field, text))
    }

    /// Constructs a [`BdfError::Malformed`] for the line currently being processed.
    fn malformed(&self, field: &'static str, text: &str) -> BdfError {
        BdfError::Malformed {
            line: self.line_number,
            field,
            text: text.trim().to_owned(),
        }
    }
}

impl<R: BufRead> Iterator for Glyphs<R> {
    type Item = Result<GlyphRecord, BdfError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(error) => {
                    self.done = true;
                    return Some(Err(BdfError::Io(error)));
                }
            }
            self.line_number += 1;

            match self.process_line(line.trim()) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => {}
                Err(error) => {
                    self.done = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

/// Errors that can occur while extracting glyph records.
#[derive(Debug)]
pub enum BdfError {
    /// Reading the description stream failed.
    Io(io::Error),
    /// A field that must be numeric failed to parse.
    Malformed {
        /// The 1-based number of the offending line.
        line: u64,
        /// The name of the field that failed to parse.
        field: &'static str,
        /// The text that failed to parse.
        text: String,
    },
}

impl fmt::Display for BdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "error reading description: {error}"),
            Self::Malformed { line, field, text } => {
                write!(f, "line {line}: malformed {field} value {text:?}")
            }
        }
    }
}

impl error::Error for BdfError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::Malformed { .. } => None,
        }
    }
}
