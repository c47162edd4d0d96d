//! Encoding of wide glyphs into the binary font resource format.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use font::file::FontFileBuilder;

use crate::bdf::GlyphRecord;

/// Collects the wide glyphs of `glyphs` into a [`FontFileBuilder`], sorted by ascending
/// codepoint. Narrow glyphs are dropped; the binary format only carries 16x16 glyphs.
///
/// # Errors
///
/// Returns [`Err`] when a wide glyph's bitmap is not exactly 32 bytes.
pub fn build(glyphs: &[GlyphRecord]) -> Result<FontFileBuilder> {
    let mut builder = FontFileBuilder::new();
    for glyph in glyphs.iter().filter(|glyph| glyph.is_wide()) {
        let bitmap = glyph.bitmap.as_slice().try_into().with_context(|| {
            format!(
                "glyph U+{:04X} has a {}-byte bitmap",
                glyph.codepoint,
                glyph.bitmap.len()
            )
        })?;
        builder.insert(glyph.codepoint, bitmap);
    }

    Ok(builder)
}

/// Writes the binary font resource for the wide glyphs of `glyphs` to `path`, printing
/// glyph and size diagnostics to stderr.
///
/// Returns `false` without creating the file when `glyphs` holds no wide glyph.
///
/// # Errors
///
/// Returns [`Err`] when serialization fails, when more than 65535 wide glyphs are
/// present, or when the file cannot be written.
pub fn write_font_file(glyphs: &[GlyphRecord], path: &Path) -> Result<bool> {
    let builder = build(glyphs)?;
    if builder.is_empty() {
        return Ok(false);
    }

    let mut bytes = Vec::with_capacity(builder.byte_size());
    builder
        .write_to(&mut bytes)
        .context("failed to serialize font resource")?;
    fs::write(path, &bytes)
        .with_context(|| format!("failed to write \"{}\"", path.display()))?;

    eprintln!("Generated binary font: {}", path.display());
    eprintln!("  Glyphs: {}", builder.glyph_count());
    eprintln!("  Size: {} bytes", bytes.len());
    Ok(true)
}
