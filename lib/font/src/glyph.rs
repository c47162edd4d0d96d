//! Interface for interacting with glyph bitmaps.

/// The 16x16 bitmap for U+FFFD, used by renderers as a fallback when a codepoint has no
/// glyph in the loaded font.
pub const REPLACEMENT_GLYPH: [u8; 32] = [
    0x00, 0x00, 0x00, 0x00, 0x07, 0xE0, 0x0C, 0x30, 0x10, 0x08, 0x20, 0x04, 0x23, 0xC4, 0x26, 0x64,
    0x26, 0x64, 0x23, 0xC4, 0x20, 0x04, 0x10, 0x08, 0x0C, 0x30, 0x07, 0xE0, 0x00, 0x00, 0x00, 0x00,
];

/// Stores the on/off layout of a specific glyph in a font.
///
/// Each row occupies one byte for widths up to 8 pixels and two bytes, high byte first,
/// for wider glyphs. The most significant bit of a row is the leftmost pixel.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Glyph<'buffer> {
    /// The buffer that contains the packed bitmap rows.
    buffer: &'buffer [u8],
    /// The width of the glyph in pixels.
    width: u8,
    /// The height of the glyph in pixels.
    height: u8,
}

impl<'buffer> Glyph<'buffer> {
    /// Creates a new [`Glyph`] over `buffer`.
    pub const fn new(buffer: &'buffer [u8], width: u8, height: u8) -> Self {
        Self {
            buffer,
            width,
            height,
        }
    }

    /// Returns the width of the [`Glyph`] in pixels.
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Returns the height of the [`Glyph`] in pixels.
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Returns the packed bitmap rows of the [`Glyph`].
    pub const fn bytes(&self) -> &'buffer [u8] {
        self.buffer
    }

    /// Returns an [`Iterator`] over the rows of the [`Glyph`], top to bottom.
    pub const fn rows(&self) -> GlyphRowsIter<'buffer> {
        GlyphRowsIter {
            buffer: self.buffer,
            width: self.width,
            height: self.height,
            index: 0,
        }
    }
}

impl<'buffer> IntoIterator for Glyph<'buffer> {
    type IntoIter = GlyphRowsIter<'buffer>;
    type Item = GlyphRow<'buffer>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows()
    }
}

/// An [`Iterator`] over the rows of a [`Glyph`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowsIter<'buffer> {
    /// The buffer that contains the packed bitmap rows.
    buffer: &'buffer [u8],
    /// The width of the glyph in pixels.
    width: u8,
    /// The height of the glyph in pixels.
    height: u8,
    /// The index of the row that will be returned next.
    index: u8,
}

impl<'buffer> Iterator for GlyphRowsIter<'buffer> {
    type Item = GlyphRow<'buffer>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.height {
            return None;
        }

        let row_byte_count = usize::from(self.width.div_ceil(8));
        let row_start = row_byte_count * usize::from(self.index);

        self.index += 1;
        let row = GlyphRow {
            buffer: &self.buffer[row_start..row_start + row_byte_count],
            width: self.width,
        };
        Some(row)
    }
}

/// A row in a [`Glyph`].
///
/// The buffer holds exactly `width.div_ceil(8)` bytes: one byte for the supported
/// narrow rows and two for wide rows.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRow<'buffer> {
    /// The buffer that contains the bytes of this row.
    buffer: &'buffer [u8],
    /// The width of the row in pixels.
    width: u8,
}

impl GlyphRow<'_> {
    /// Returns the width of the row in pixels.
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Returns the packed row value. The leftmost pixel is bit 7 for rows up to 8
    /// pixels wide and bit 15 otherwise.
    ///
    /// A row wider than 16 pixels reports its leftmost 16 pixels.
    pub fn bits(&self) -> u16 {
        match *self.buffer {
            [] => 0,
            [low] => u16::from(low),
            [high, low, ..] => u16::from_be_bytes([high, low]),
        }
    }
}

impl<'buffer> IntoIterator for GlyphRow<'buffer> {
    type Item = bool;
    type IntoIter = GlyphRowIter<'buffer>;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowIter {
            buffer: self.buffer,
            width: self.width,
            index: 0,
        }
    }
}

/// An [`Iterator`] over the pixels in a [`GlyphRow`], left to right.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowIter<'buffer> {
    /// The buffer that contains the bytes of the row.
    buffer: &'buffer [u8],
    /// The width of the row in pixels.
    width: u8,
    /// The index of the pixel value to be returned.
    index: u8,
}

impl Iterator for GlyphRowIter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.width {
            return None;
        }

        let byte_index = usize::from(self.index / 8);
        let bit_index = self.index % 8;
        let bit = (self.buffer[byte_index] >> (7 - bit_index)) & 0b1;

        self.index += 1;
        Some(bit == 1)
    }
}

#[cfg(all(test, feature = "std"))]
mod test {
    use super::{Glyph, REPLACEMENT_GLYPH};

    #[test]
    fn wide_rows_are_high_byte_first() {
        // Row 0 is 0x8001: leftmost and rightmost pixels set.
        let mut bitmap = [0; 32];
        bitmap[0] = 0x80;
        bitmap[1] = 0x01;

        let glyph = Glyph::new(&bitmap, 16, 16);
        let rows = glyph.rows().collect::<Vec<_>>();
        assert_eq!(rows.len(), 16);
        assert_eq!(rows[0].bits(), 0x8001);
        assert_eq!(rows[1].bits(), 0x0000);

        let pixels = rows[0].into_iter().collect::<Vec<bool>>();
        assert_eq!(pixels.len(), 16);
        assert!(pixels[0]);
        assert!(pixels[15]);
        assert!(pixels[1..15].iter().all(|&pixel| !pixel));
    }

    #[test]
    fn narrow_rows_are_one_byte() {
        let mut bitmap = [0; 16];
        bitmap[2] = 0x42;

        let glyph = Glyph::new(&bitmap, 8, 16);
        let rows = glyph.rows().collect::<Vec<_>>();
        assert_eq!(rows.len(), 16);
        assert_eq!(rows[2].bits(), 0x42);

        let pixels = rows[2].into_iter().collect::<Vec<bool>>();
        assert_eq!(pixels.len(), 8);
        assert_eq!(
            pixels,
            [false, true, false, false, false, false, true, false]
        );
    }

    #[test]
    fn overwide_rows_report_their_leading_pixels() {
        let bitmap = [0xAB, 0xCD, 0xEF];
        let glyph = Glyph::new(&bitmap, 24, 1);

        let rows = glyph.rows().collect::<Vec<_>>();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bits(), 0xABCD);
    }

    #[test]
    fn replacement_glyph_is_16x16() {
        let glyph = Glyph::new(&REPLACEMENT_GLYPH, 16, 16);
        assert_eq!(glyph.rows().count(), 16);
        // The outline of the replacement glyph is symmetric top to bottom.
        let bits = glyph.rows().map(|row| row.bits()).collect::<Vec<u16>>();
        assert_eq!(bits[2], 0x07E0);
        assert_eq!(bits[13], 0x07E0);
    }
}
