//! SSPM map decoder.
//!
//! SSPM is the binary map format of a rhythm game. A map file holds a fixed
//! header and metadata block, a pointer table locating the variable-size
//! sections, and the sections themselves.
//!
//! # File Format
//!
//! All integers are little-endian.
//! - 10 bytes: Header (signature `SS+m`, u16 version, 4 reserved bytes)
//! - 38 bytes: Static metadata (hash, marker statistics, flags)
//! - 80 bytes: Pointer table (offset/length of five sections)
//! - Strings: map id, map name, song name, mapper names
//! - Custom data (optional): typed key/value fields
//! - Audio and cover (optional): raw bytes
//! - Marker definitions: named lists of field type tags
//! - Markers: position, type, then fields per definition
//!
//! Markers are stored in no particular order. Use
//! [`ParsedMap::sorted_markers`] before relying on time order.
//!
//! # Example
//!
//! ```no_run
//! use sspm_format::ParsedMap;
//!
//! let data = std::fs::read("map.sspm")?;
//!
//! if ParsedMap::is_sspm(&data) {
//!     let map = ParsedMap::parse(&data)?;
//!     println!("{} by {:?}", map.strings.map_name, map.strings.mappers);
//!     for marker in map.sorted_markers() {
//!         println!("{} ms: {:?}", marker.position, marker.fields);
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod custom;
mod error;
mod field;
mod header;
mod marker;
mod options;
mod parser;
mod pointers;
pub mod rating;
mod strings;
mod types;
mod value;

#[cfg(test)]
mod testutil;

pub use custom::{CustomData, CustomField};
pub use error::{Error, Result};
pub use field::{read_fields, read_value};
pub use header::{Header, StaticMetadata};
pub use marker::{Marker, MarkerDefinition};
pub use options::{DecodeOptions, DefinitionLookup, DEFAULT_NOTE_DEFINITION};
pub use parser::ParsedMap;
pub use pointers::{Pointers, SectionPointer};
pub use rating::{performance_points, DifficultyRater, Note};
pub use strings::MapStrings;
pub use types::DataType;
pub use value::{Position, Value};
