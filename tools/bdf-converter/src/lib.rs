//! Tool for converting BDF bitmap font descriptions into C source arrays or the binary
//! font resource format read by [`font::file::FontFile`].

pub mod bdf;
pub mod encode;
pub mod range;
