//! Interface for reading and building binary font resource files.
//!
//! A font resource is a 12-byte header followed by an ascending codepoint index and the
//! packed glyph bitmaps, all little-endian. Only fixed 16x16 glyphs are carried; narrow
//! glyphs are expected to be embedded directly in the consumer.

use core::{error, fmt};

#[cfg(feature = "std")]
use std::io::{self, Write};

use crate::glyph::Glyph;

/// Magic number identifying a font resource file (`"XFNT"` in little-endian byte order).
pub const MAGIC: u32 = 0x544E_4658;

/// Format version produced and understood by this crate.
pub const VERSION: u16 = 1;

/// Size of the font resource header in bytes.
pub const HEADER_SIZE: usize = 12;

/// Width in pixels of every glyph carried by a font resource.
pub const GLYPH_WIDTH: u8 = 16;

/// Height in pixels of every glyph carried by a font resource.
pub const GLYPH_HEIGHT: u8 = 16;

/// Size in bytes of one glyph bitmap: 16 rows of 2 bytes each.
pub const BYTES_PER_GLYPH: u8 = 32;

/// A parsed view over a font resource buffer.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct FontFile<'buffer> {
    /// The codepoint index: one little-endian `u32` per glyph, ascending.
    index: &'buffer [u8],
    /// The packed glyph bitmaps, in index order.
    glyphs: &'buffer [u8],
    /// The width of each glyph in pixels.
    glyph_width: u8,
    /// The height of each glyph in pixels.
    glyph_height: u8,
    /// The size of each glyph bitmap in bytes.
    bytes_per_glyph: u8,
}

impl<'buffer> FontFile<'buffer> {
    /// Parses `buffer` as a font resource, validating the header and that the buffer
    /// holds the entire index and glyph data.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the magic or version does not match or the buffer
    /// is too small for the contents the header describes.
    pub fn parse(buffer: &'buffer [u8]) -> Result<Self, ParseError> {
        if buffer.len() < HEADER_SIZE {
            return Err(ParseError::TruncatedHeader {
                actual_size: buffer.len(),
            });
        }

        let magic = parse_u32(buffer, 0).unwrap();
        if magic != MAGIC {
            return Err(ParseError::InvalidMagic(magic));
        }

        let version = parse_u16(buffer, 4).unwrap();
        if version != VERSION {
            return Err(ParseError::UnsupportedVersion(version));
        }

        let glyph_count = usize::from(parse_u16(buffer, 6).unwrap());
        let glyph_width = buffer[8];
        let glyph_height = buffer[9];
        let bytes_per_glyph = buffer[10];

        let index_size = glyph_count * size_of::<u32>();
        let glyphs_size = glyph_count * usize::from(bytes_per_glyph);
        let expected_size = HEADER_SIZE + index_size + glyphs_size;
        if buffer.len() < expected_size {
            return Err(ParseError::TruncatedData {
                actual_size: buffer.len(),
                expected_size,
            });
        }

        let index = &buffer[HEADER_SIZE..HEADER_SIZE + index_size];
        let glyphs = &buffer[HEADER_SIZE + index_size..expected_size];
        Ok(Self {
            index,
            glyphs,
            glyph_width,
            glyph_height,
            bytes_per_glyph,
        })
    }

    /// Returns the number of glyphs in this [`FontFile`].
    pub const fn glyph_count(&self) -> usize {
        self.index.len() / size_of::<u32>()
    }

    /// Returns the width of each glyph in pixels.
    pub const fn glyph_width(&self) -> u8 {
        self.glyph_width
    }

    /// Returns the height of each glyph in pixels.
    pub const fn glyph_height(&self) -> u8 {
        self.glyph_height
    }

    /// Returns the size of each glyph bitmap in bytes.
    pub const fn bytes_per_glyph(&self) -> u8 {
        self.bytes_per_glyph
    }

    /// Returns an [`Iterator`] over the codepoints in this [`FontFile`], in index order.
    pub const fn codepoints(&self) -> CodepointsIter<'buffer> {
        CodepointsIter { index: self.index }
    }

    /// Returns the [`Glyph`] mapped to `codepoint` or `None` if the font does not
    /// carry it.
    ///
    /// Performs a binary search over the codepoint index.
    pub fn glyph(&self, codepoint: u32) -> Option<Glyph<'buffer>> {
        let mut low = 0;
        let mut high = self.glyph_count();

        while low < high {
            let mid = low + (high - low) / 2;
            let entry = self.codepoint_at(mid);
            if entry < codepoint {
                low = mid + 1;
            } else if entry > codepoint {
                high = mid;
            } else {
                let size = usize::from(self.bytes_per_glyph);
                let start = mid * size;
                let glyph = Glyph::new(
                    &self.glyphs[start..start + size],
                    self.glyph_width,
                    self.glyph_height,
                );
                return Some(glyph);
            }
        }

        None
    }

    /// Returns the codepoint of the index entry at `index`.
    fn codepoint_at(&self, index: usize) -> u32 {
        parse_u32(self.index, index * size_of::<u32>()).unwrap()
    }
}

/// An [`Iterator`] over the codepoints carried by a [`FontFile`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct CodepointsIter<'buffer> {
    /// The remaining codepoint index entries.
    index: &'buffer [u8],
}

impl Iterator for CodepointsIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        let (chunk, remaining) = self.index.split_first_chunk()?;
        self.index = remaining;
        Some(u32::from_le_bytes(*chunk))
    }
}

/// Builder for a font resource holding 16x16 glyphs.
#[cfg(feature = "std")]
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct FontFileBuilder {
    /// The glyphs to serialize, kept sorted by ascending codepoint.
    glyphs: Vec<(u32, [u8; 32])>,
}

#[cfg(feature = "std")]
impl FontFileBuilder {
    /// Creates a new empty [`FontFileBuilder`].
    pub const fn new() -> Self {
        Self { glyphs: Vec::new() }
    }

    /// Inserts the provided `codepoint` to `bitmap` mapping. If the codepoint already
    /// exists in the builder, its bitmap is replaced.
    pub fn insert(&mut self, codepoint: u32, bitmap: [u8; 32]) {
        match self
            .glyphs
            .binary_search_by_key(&codepoint, |&(entry, _)| entry)
        {
            Ok(index) => self.glyphs[index].1 = bitmap,
            Err(index) => self.glyphs.insert(index, (codepoint, bitmap)),
        }
    }

    /// Returns the number of glyphs in this [`FontFileBuilder`].
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns `true` if this [`FontFileBuilder`] holds no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Returns the total size in bytes of the serialized font resource.
    pub fn byte_size(&self) -> usize {
        HEADER_SIZE + self.glyphs.len() * (size_of::<u32>() + usize::from(BYTES_PER_GLYPH))
    }

    /// Serializes the font resource into `writer`: header, codepoint index, glyph
    /// bitmaps.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] when writing fails or when the builder holds more than 65535
    /// glyphs, which the 16-bit header count cannot represent.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let glyph_count = u16::try_from(self.glyphs.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "glyph count exceeds 65535")
        })?;

        writer.write_all(&MAGIC.to_le_bytes())?;
        writer.write_all(&VERSION.to_le_bytes())?;
        writer.write_all(&glyph_count.to_le_bytes())?;
        writer.write_all(&[GLYPH_WIDTH, GLYPH_HEIGHT, BYTES_PER_GLYPH, 0])?;

        for &(codepoint, _) in &self.glyphs {
            writer.write_all(&codepoint.to_le_bytes())?;
        }

        for (_, bitmap) in &self.glyphs {
            writer.write_all(bitmap)?;
        }

        Ok(())
    }
}

/// Parses two bytes of `slice` at `offset` as a little-endian `u16`.
fn parse_u16(slice: &[u8], offset: usize) -> Option<u16> {
    let Some(bytes) = slice.split_at_checked(offset)?.1.first_chunk() else {
        return None;
    };

    Some(u16::from_le_bytes(*bytes))
}

/// Parses four bytes of `slice` at `offset` as a little-endian `u32`.
fn parse_u32(slice: &[u8], offset: usize) -> Option<u32> {
    let Some(bytes) = slice.split_at_checked(offset)?.1.first_chunk() else {
        return None;
    };

    Some(u32::from_le_bytes(*bytes))
}

/// Errors that can occur while parsing a font resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The buffer does not begin with [`MAGIC`].
    InvalidMagic(u32),
    /// The header carries a version other than [`VERSION`].
    UnsupportedVersion(u16),
    /// The buffer is smaller than the fixed header.
    TruncatedHeader {
        /// The size of the provided buffer.
        actual_size: usize,
    },
    /// The buffer is smaller than the contents the header describes.
    TruncatedData {
        /// The size of the provided buffer.
        actual_size: usize,
        /// The size the header requires.
        expected_size: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMagic(magic) => write!(f, "invalid magic: {magic:08X}"),
            Self::UnsupportedVersion(version) => write!(f, "unsupported version: {version}"),
            Self::TruncatedHeader { actual_size } => write!(
                f,
                "header is truncated: expected {HEADER_SIZE} bytes but got {actual_size} bytes"
            ),
            Self::TruncatedData {
                actual_size,
                expected_size,
            } => write!(
                f,
                "data is truncated: expected {expected_size} bytes but got {actual_size} bytes"
            ),
        }
    }
}

impl error::Error for ParseError {}

#[cfg(all(test, feature = "std"))]
mod test {
    use super::{
        BYTES_PER_GLYPH, FontFile, FontFileBuilder, GLYPH_HEIGHT, GLYPH_WIDTH, HEADER_SIZE, MAGIC,
        ParseError, VERSION,
    };

    /// Returns a bitmap with `fill` in every byte.
    fn filled(fill: u8) -> [u8; 32] {
        [fill; 32]
    }

    #[test]
    fn round_trip_preserves_codepoints_and_bitmaps() {
        let mut builder = FontFileBuilder::new();
        builder.insert(0x9FA0, filled(0xCC));
        builder.insert(0x4E2D, filled(0xAA));
        builder.insert(0x6587, filled(0xBB));

        let mut bytes = Vec::new();
        builder.write_to(&mut bytes).unwrap();
        assert_eq!(bytes.len(), builder.byte_size());

        let file = FontFile::parse(&bytes).unwrap();
        assert_eq!(file.glyph_count(), 3);
        assert_eq!(file.glyph_width(), GLYPH_WIDTH);
        assert_eq!(file.glyph_height(), GLYPH_HEIGHT);
        assert_eq!(file.bytes_per_glyph(), BYTES_PER_GLYPH);

        let codepoints = file.codepoints().collect::<Vec<u32>>();
        assert_eq!(codepoints, [0x4E2D, 0x6587, 0x9FA0]);

        assert_eq!(file.glyph(0x4E2D).unwrap().bytes(), filled(0xAA));
        assert_eq!(file.glyph(0x6587).unwrap().bytes(), filled(0xBB));
        assert_eq!(file.glyph(0x9FA0).unwrap().bytes(), filled(0xCC));
    }

    #[test]
    fn insert_replaces_existing_codepoint() {
        let mut builder = FontFileBuilder::new();
        builder.insert(0x4E2D, filled(0x11));
        builder.insert(0x4E2D, filled(0x22));

        assert_eq!(builder.glyph_count(), 1);

        let mut bytes = Vec::new();
        builder.write_to(&mut bytes).unwrap();
        let file = FontFile::parse(&bytes).unwrap();
        assert_eq!(file.glyph(0x4E2D).unwrap().bytes(), filled(0x22));
    }

    #[test]
    fn lookup_of_missing_codepoint_is_none() {
        let mut builder = FontFileBuilder::new();
        builder.insert(0x4E00, filled(0x01));
        builder.insert(0x4E02, filled(0x02));

        let mut bytes = Vec::new();
        builder.write_to(&mut bytes).unwrap();
        let file = FontFile::parse(&bytes).unwrap();

        assert!(file.glyph(0x4E01).is_none());
        assert!(file.glyph(0x0041).is_none());
        assert!(file.glyph(0xFFFF_FFFF).is_none());
    }

    #[test]
    fn single_glyph_resource_is_48_bytes() {
        let mut builder = FontFileBuilder::new();
        builder.insert(0x4E2D, filled(0x00));

        assert_eq!(builder.byte_size(), 48);

        let mut bytes = Vec::new();
        builder.write_to(&mut bytes).unwrap();
        assert_eq!(bytes.len(), 48);

        // Header fields at their fixed offsets.
        assert_eq!(bytes[0..4], MAGIC.to_le_bytes());
        assert_eq!(bytes[4..6], VERSION.to_le_bytes());
        assert_eq!(bytes[6..8], 1u16.to_le_bytes());
        assert_eq!(bytes[8..12], [16, 16, 32, 0]);
        assert_eq!(bytes[12..16], 0x4E2Du32.to_le_bytes());
    }

    #[test]
    fn parse_rejects_invalid_magic() {
        let mut bytes = [0; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());

        assert_eq!(
            FontFile::parse(&bytes),
            Err(ParseError::InvalidMagic(0xDEAD_BEEF))
        );
    }

    #[test]
    fn parse_rejects_unsupported_version() {
        let mut bytes = [0; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&MAGIC.to_le_bytes());
        bytes[4..6].copy_from_slice(&2u16.to_le_bytes());

        assert_eq!(
            FontFile::parse(&bytes),
            Err(ParseError::UnsupportedVersion(2))
        );
    }

    #[test]
    fn parse_rejects_truncated_buffers() {
        assert_eq!(
            FontFile::parse(&[0; 4]),
            Err(ParseError::TruncatedHeader { actual_size: 4 })
        );

        // Valid header claiming one glyph, but no index or bitmap follows.
        let mut bytes = [0; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&MAGIC.to_le_bytes());
        bytes[4..6].copy_from_slice(&VERSION.to_le_bytes());
        bytes[6..8].copy_from_slice(&1u16.to_le_bytes());
        bytes[8..12].copy_from_slice(&[16, 16, 32, 0]);

        assert_eq!(
            FontFile::parse(&bytes),
            Err(ParseError::TruncatedData {
                actual_size: HEADER_SIZE,
                expected_size: 48,
            })
        );
    }

    #[test]
    fn empty_resource_round_trips() {
        let builder = FontFileBuilder::new();
        assert!(builder.is_empty());

        let mut bytes = Vec::new();
        builder.write_to(&mut bytes).unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE);

        let file = FontFile::parse(&bytes).unwrap();
        assert_eq!(file.glyph_count(), 0);
        assert!(file.glyph(0x41).is_none());
    }
}
