//! Output encoders for extracted glyph records.

pub mod binary;
pub mod source;
