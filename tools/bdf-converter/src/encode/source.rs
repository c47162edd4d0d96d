//! Encoding of glyph records into C source array declarations.
//!
//! Narrow glyphs become a sparse table indexed directly by codepoint; wide glyphs
//! become a packed table with a parallel codepoint index, since direct indexing over
//! the 16-bit codepoint range would waste most of the table.

use std::io::{self, Write};

use crate::bdf::GlyphRecord;

/// Writes C array declarations for `glyphs` to `writer`, using `name` as the
/// identifier prefix.
///
/// # Errors
///
/// Returns [`Err`] when writing fails.
pub fn write_source<W: Write>(glyphs: &[GlyphRecord], name: &str, mut writer: W) -> io::Result<()> {
    let mut narrow = glyphs
        .iter()
        .filter(|glyph| !glyph.is_wide())
        .collect::<Vec<_>>();
    let mut wide = glyphs
        .iter()
        .filter(|glyph| glyph.is_wide())
        .collect::<Vec<_>>();
    narrow.sort_by_key(|glyph| glyph.codepoint);
    wide.sort_by_key(|glyph| glyph.codepoint);

    writeln!(writer, "/* Auto-generated font data */")?;
    writeln!(writer, "#include <stdint.h>")?;
    writeln!(writer)?;

    if !narrow.is_empty() {
        writeln!(writer, "/* {} narrow (8x16) glyphs */", narrow.len())?;
        writeln!(writer, "const uint8_t {name}_narrow[][16] = {{")?;
        for glyph in &narrow {
            write!(
                writer,
                "    [{}] = {{{}}},",
                glyph.codepoint,
                hex_bytes(&glyph.bitmap)
            )?;
            match printable_ascii(glyph.codepoint) {
                Some(c) => writeln!(writer, "  /* '{c}' */")?,
                None => writeln!(writer, "  /* U+{:04X} */", glyph.codepoint)?,
            }
        }
        writeln!(writer, "}};")?;
        writeln!(
            writer,
            "const uint32_t {name}_narrow_count = sizeof({name}_narrow) / sizeof({name}_narrow[0]);"
        )?;
        writeln!(writer)?;
    }

    if !wide.is_empty() {
        writeln!(writer, "/* {} wide (16x16) glyphs */", wide.len())?;
        writeln!(writer, "const uint8_t {name}_wide[][32] = {{")?;
        for (index, glyph) in wide.iter().enumerate() {
            writeln!(
                writer,
                "    {{{}}},  /* [{index}] U+{:04X} */",
                hex_bytes(&glyph.bitmap),
                glyph.codepoint
            )?;
        }
        writeln!(writer, "}};")?;
        writeln!(writer)?;

        writeln!(writer, "const uint32_t {name}_wide_index[] = {{")?;
        for glyph in &wide {
            writeln!(writer, "    0x{:04X},", glyph.codepoint)?;
        }
        writeln!(writer, "}};")?;
        writeln!(writer, "const uint32_t {name}_wide_count = {};", wide.len())?;
    }

    Ok(())
}

/// Formats `bitmap` as a comma-separated list of C hexadecimal byte literals.
fn hex_bytes(bitmap: &[u8]) -> String {
    bitmap
        .iter()
        .map(|byte| format!("0x{byte:02X}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Returns the printable ASCII character for `codepoint`, excluding space and control
/// characters.
fn printable_ascii(codepoint: u32) -> Option<char> {
    if (0x20..0x7F).contains(&codepoint) {
        char::from_u32(codepoint)
    } else {
        None
    }
}
