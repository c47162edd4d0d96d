//! Implementation and interfaces of the binary font resource format shared by the
//! converter tool and text renderers.
//!
//! Includes both the read-only parsing interface and, with the `std` feature, a builder
//! that assembles and serializes new font resources.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod file;
pub mod glyph;
