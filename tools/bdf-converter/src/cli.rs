//! Command line parsing and [`ConvertConfig`] construction.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, builder::PathBufValueParser};

use bdf_converter::range::{CodepointRanges, parse_range};

/// Description of a conversion run.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct ConvertConfig {
    /// The path of the BDF description to read.
    pub input: PathBuf,
    /// The path of the file to write.
    pub output: PathBuf,
    /// The identifier prefix for generated C arrays.
    pub name: String,
    /// The codepoint ranges to include.
    pub ranges: CodepointRanges,
    /// Whether to emit the binary font resource instead of C source.
    pub binary: bool,
}

/// Parses the tool's arguments to construct a [`ConvertConfig`].
pub fn get_config() -> ConvertConfig {
    parse_arguments(&command_parser().get_matches())
}

/// Extracts a [`ConvertConfig`] from parsed `matches`.
fn parse_arguments(matches: &ArgMatches) -> ConvertConfig {
    let input = matches
        .get_one::<PathBuf>("input")
        .cloned()
        .unwrap_or_else(|| unreachable!("`input` is a required argument"));

    let output = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| unreachable!("`output` is a required argument"));

    let name = matches
        .get_one::<String>("name")
        .cloned()
        .unwrap_or_else(|| unreachable!("`name` should have a default value"));

    let mut ranges = CodepointRanges::new();
    if matches.get_flag("ascii") {
        ranges.push(CodepointRanges::ASCII);
    }
    if matches.get_flag("cjk") {
        ranges.push(CodepointRanges::CJK);
    }
    if matches.get_flag("cjk-common") {
        ranges.push(CodepointRanges::CJK_COMMON);
    }
    if let Some(values) = matches.get_many::<(u32, u32)>("range") {
        for &range in values {
            ranges.push(range);
        }
    }
    if ranges.is_empty() {
        ranges.push(CodepointRanges::ASCII);
    }

    ConvertConfig {
        input,
        output,
        name,
        ranges,
        binary: matches.get_flag("binary"),
    }
}

/// Returns the command parser for the tool.
fn command_parser() -> Command {
    let input = Arg::new("input")
        .help("Input BDF font description")
        .value_parser(PathBufValueParser::new())
        .required(true);

    let output = Arg::new("output")
        .short('o')
        .long("output")
        .help("Output file")
        .value_parser(PathBufValueParser::new())
        .required(true);

    let name = Arg::new("name")
        .long("name")
        .help("C array name prefix")
        .default_value("font");

    let ascii = Arg::new("ascii")
        .long("ascii")
        .help("Include ASCII (0x00-0x7F)")
        .action(ArgAction::SetTrue);

    let cjk = Arg::new("cjk")
        .long("cjk")
        .help("Include CJK Unified Ideographs (U+4E00-U+9FFF)")
        .action(ArgAction::SetTrue);

    let cjk_common = Arg::new("cjk-common")
        .long("cjk-common")
        .help("Include the common CJK subset")
        .action(ArgAction::SetTrue);

    let range = Arg::new("range")
        .long("range")
        .help("Include a custom range (e.g., 0x4E00-0x9FFF)")
        .value_parser(parse_range)
        .action(ArgAction::Append);

    let binary = Arg::new("binary")
        .long("binary")
        .help("Output the binary font resource instead of C source")
        .action(ArgAction::SetTrue);

    Command::new("bdf-converter")
        .about("Converts BDF bitmap font descriptions to C arrays or a binary font resource")
        .arg(input)
        .arg(output)
        .arg(name)
        .arg(ascii)
        .arg(cjk)
        .arg(cjk_common)
        .arg(range)
        .arg(binary)
}

#[cfg(test)]
mod test {
    use bdf_converter::range::CodepointRanges;

    use super::{command_parser, parse_arguments};

    /// Parses `arguments` into a config, panicking on usage errors.
    fn config(arguments: &[&str]) -> super::ConvertConfig {
        let matches = command_parser()
            .try_get_matches_from(arguments)
            .unwrap();
        parse_arguments(&matches)
    }

    #[test]
    fn defaults_to_the_ascii_range() {
        let config = config(&["bdf-converter", "unifont.bdf", "-o", "out.c"]);

        assert_eq!(config.name, "font");
        assert!(!config.binary);
        assert!(config.ranges.contains(0x41));
        assert!(!config.ranges.contains(0x4E2D));
    }

    #[test]
    fn named_and_custom_ranges_combine() {
        let config = config(&[
            "bdf-converter",
            "unifont.bdf",
            "-o",
            "font_cjk.bin",
            "--ascii",
            "--cjk",
            "--range",
            "0x3000-0x303F",
            "--binary",
        ]);

        assert!(config.binary);
        assert!(config.ranges.contains(0x41));
        assert!(config.ranges.contains(0x4E2D));
        assert!(config.ranges.contains(0x3001));
        assert!(!config.ranges.contains(0x2000));
    }

    #[test]
    fn explicit_selection_suppresses_the_default() {
        let config = config(&[
            "bdf-converter",
            "unifont.bdf",
            "-o",
            "out.bin",
            "--cjk-common",
        ]);

        let mut expected = CodepointRanges::new();
        expected.push(CodepointRanges::CJK_COMMON);
        assert_eq!(config.ranges, expected);
        assert!(!config.ranges.contains(0x41));
    }

    #[test]
    fn malformed_range_is_a_usage_error() {
        let result = command_parser().try_get_matches_from([
            "bdf-converter",
            "unifont.bdf",
            "-o",
            "out.bin",
            "--range",
            "4E00-9FFF",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_output_is_a_usage_error() {
        let result = command_parser().try_get_matches_from(["bdf-converter", "unifont.bdf"]);
        assert!(result.is_err());
    }
}
