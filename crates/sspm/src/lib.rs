//! SSPM - rhythm game map decoding library.
//!
//! This crate provides a unified interface to the SSPM crates.
//!
//! # Crates
//!
//! - [`sspm_common`] - Bounds-checked binary reading
//! - [`sspm_format`] - Map decoding, field values, and the rating interface
//!
//! # Example
//!
//! ```no_run
//! use sspm::prelude::*;
//!
//! let data = std::fs::read("map.sspm")?;
//! let map = ParsedMap::parse(&data)?;
//!
//! let notes = map.notes();
//! println!("{} notes, {} pp at SS for 4.5 stars", notes.len(), performance_points(4.5, 1.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use sspm_common as common;
pub use sspm_format as format;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use sspm_common::BinaryReader;
    pub use sspm_format::{
        performance_points, DataType, DecodeOptions, DefinitionLookup, DifficultyRater, Marker,
        MarkerDefinition, Note, ParsedMap, Position, Value,
    };
}

// Re-export commonly used types at the crate root
pub use sspm_format::{Error, ParsedMap, Result};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
