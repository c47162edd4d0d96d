//! Tool for converting BDF bitmap font descriptions into C source arrays or the binary
//! font resource format read by [`font::file::FontFile`].

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
};

use anyhow::{Context, Result};

use bdf_converter::{bdf::Glyphs, encode};

mod cli;

fn main() -> Result<()> {
    let config = cli::get_config();

    let input = File::open(&config.input)
        .with_context(|| format!("failed to open \"{}\"", config.input.display()))?;

    eprintln!("Parsing {}...", config.input.display());
    let glyphs = Glyphs::new(BufReader::new(input), Some(config.ranges))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("failed to parse \"{}\"", config.input.display()))?;
    eprintln!("Found {} glyphs", glyphs.len());

    if config.binary {
        if !encode::binary::write_font_file(&glyphs, &config.output)? {
            eprintln!("No wide glyphs found!");
        }
    } else {
        let output = File::create(&config.output)
            .with_context(|| format!("failed to create \"{}\"", config.output.display()))?;
        let mut writer = BufWriter::new(output);
        encode::source::write_source(&glyphs, &config.name, &mut writer)
            .and_then(|()| writer.flush())
            .with_context(|| format!("failed to write \"{}\"", config.output.display()))?;
        eprintln!("Generated: {}", config.output.display());
    }

    Ok(())
}
