//! Common utilities for SSPM decoding.
//!
//! This crate provides the foundational cursor used by the map decoder:
//!
//! - [`BinaryReader`] - Bounds-checked binary reading from byte slices
//! - [`Error`] - The out-of-bounds error every read can produce

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};
