//! Codepoint range selection used to filter extracted glyphs.

use core::{error, fmt};

/// A set of closed codepoint intervals; a codepoint is a member when it falls in at
/// least one interval.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct CodepointRanges {
    /// The closed `[start, end]` intervals making up the set.
    ranges: Vec<(u32, u32)>,
}

impl CodepointRanges {
    /// The ASCII block.
    pub const ASCII: (u32, u32) = (0x0000, 0x007F);

    /// The CJK Unified Ideographs block.
    pub const CJK: (u32, u32) = (0x4E00, 0x9FFF);

    /// The commonly used portion of the CJK Unified Ideographs block.
    ///
    /// This is a sub-range of [`Self::CJK`] rather than a frequency-curated character
    /// list.
    pub const CJK_COMMON: (u32, u32) = (0x4E00, 0x9FA5);

    /// Creates a new empty [`CodepointRanges`].
    pub const fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Adds the closed interval `range` to the set.
    pub fn push(&mut self, range: (u32, u32)) {
        self.ranges.push(range);
    }

    /// Returns `true` if the set contains no intervals.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns `true` if `codepoint` falls in at least one interval of the set.
    pub fn contains(&self, codepoint: u32) -> bool {
        self.ranges
            .iter()
            .any(|&(start, end)| start <= codepoint && codepoint <= end)
    }
}

/// Parses `text` as a `0xAAAA-0xBBBB` hexadecimal codepoint range.
///
/// # Errors
///
/// Returns a [`RangeParseError`] when `text` is not two `0x`-prefixed hexadecimal
/// integers separated by `-`.
pub fn parse_range(text: &str) -> Result<(u32, u32), RangeParseError> {
    let error = || RangeParseError {
        text: text.to_owned(),
    };

    let (start, end) = text.split_once('-').ok_or_else(error)?;
    let start = parse_hex(start).ok_or_else(error)?;
    let end = parse_hex(end).ok_or_else(error)?;
    Ok((start, end))
}

/// Parses `text` as a `0x`-prefixed hexadecimal integer.
fn parse_hex(text: &str) -> Option<u32> {
    let digits = text.trim().strip_prefix("0x")?;
    u32::from_str_radix(digits, 16).ok()
}

/// Error returned when a custom range argument is not of the form `0xAAAA-0xBBBB`.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct RangeParseError {
    /// The text that failed to parse.
    text: String,
}

impl fmt::Display for RangeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid codepoint range {:?}: expected the form 0x4E00-0x9FFF",
            self.text
        )
    }
}

impl error::Error for RangeParseError {}

#[cfg(test)]
mod test {
    use super::{CodepointRanges, parse_range};

    #[test]
    fn membership_is_or_across_intervals() {
        let mut ranges = CodepointRanges::new();
        ranges.push(CodepointRanges::ASCII);
        ranges.push(CodepointRanges::CJK);

        assert!(ranges.contains(0x00));
        assert!(ranges.contains(0x41));
        assert!(ranges.contains(0x7F));
        assert!(ranges.contains(0x4E00));
        assert!(ranges.contains(0x4E2D));
        assert!(ranges.contains(0x9FFF));

        assert!(!ranges.contains(0x80));
        assert!(!ranges.contains(0x4DFF));
        assert!(!ranges.contains(0xA000));
    }

    #[test]
    fn intervals_are_closed_on_both_ends() {
        let mut ranges = CodepointRanges::new();
        ranges.push((0x100, 0x1FF));

        assert!(!ranges.contains(0xFF));
        assert!(ranges.contains(0x100));
        assert!(ranges.contains(0x1FF));
        assert!(!ranges.contains(0x200));
    }

    #[test]
    fn overlapping_intervals_are_allowed() {
        let mut ranges = CodepointRanges::new();
        ranges.push(CodepointRanges::CJK);
        ranges.push(CodepointRanges::CJK_COMMON);

        assert!(ranges.contains(0x4E00));
        assert!(ranges.contains(0x9FA5));
        assert!(ranges.contains(0x9FFF));
    }

    #[test]
    fn empty_set_contains_nothing() {
        let ranges = CodepointRanges::new();
        assert!(ranges.is_empty());
        assert!(!ranges.contains(0x41));
    }

    #[test]
    fn parse_range_accepts_hex_pairs() {
        assert_eq!(parse_range("0x4E00-0x9FFF"), Ok((0x4E00, 0x9FFF)));
        assert_eq!(parse_range("0x0-0x7f"), Ok((0x00, 0x7F)));
    }

    #[test]
    fn parse_range_rejects_malformed_text() {
        assert!(parse_range("").is_err());
        assert!(parse_range("0x4E00").is_err());
        assert!(parse_range("4E00-9FFF").is_err());
        assert!(parse_range("0x4E00-0xZZZZ").is_err());
        assert!(parse_range("0x4E00..0x9FFF").is_err());
    }
}
