//! SSPM header and static metadata blocks.
//!
//! Both blocks have a fixed layout and are read with zerocopy, then
//! converted into plain Rust types.

use sspm_common::BinaryReader;
use zerocopy::byteorder::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use crate::Result;

/// On-disk header layout.
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
struct RawHeader {
    signature: [u8; 4],
    version: U16,
    reserved: [u8; 4],
}

/// On-disk static metadata layout.
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
struct RawStaticMetadata {
    hash: [u8; 20],
    last_marker_position: U32,
    note_count: U32,
    marker_count: U32,
    difficulty: u8,
    rating: U16,
    has_audio: u8,
    has_cover: u8,
    requires_mod: u8,
}

/// SSPM file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Header {
    /// File signature, `SS+m` for valid maps.
    pub signature: [u8; 4],
    /// Format version.
    pub version: u16,
    /// Reserved bytes.
    pub reserved: [u8; 4],
}

impl Header {
    /// The signature at the start of an SSPM file.
    pub const SIGNATURE: &'static [u8; 4] = b"SS+m";

    /// Size of the header in bytes.
    pub const SIZE: usize = std::mem::size_of::<RawHeader>();

    /// Read the header from the current reader position.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let raw: RawHeader = reader.read_struct()?;
        Ok(Self {
            signature: raw.signature,
            version: raw.version.get(),
            reserved: raw.reserved,
        })
    }

    /// Check the signature against [`Header::SIGNATURE`].
    pub fn has_valid_signature(&self) -> bool {
        &self.signature == Self::SIGNATURE
    }
}

/// Fixed-size map statistics following the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StaticMetadata {
    /// 20-byte content hash.
    pub hash: [u8; 20],
    /// Position of the last marker, in milliseconds.
    pub last_marker_position: u32,
    /// Number of notes.
    pub note_count: u32,
    /// Number of markers.
    pub marker_count: u32,
    /// Difficulty category.
    pub difficulty: u8,
    /// Stored map rating.
    pub rating: u16,
    /// Whether the file embeds audio.
    pub has_audio: bool,
    /// Whether the file embeds a cover image.
    pub has_cover: bool,
    /// Whether the map requires a mod to play.
    pub requires_mod: bool,
}

impl StaticMetadata {
    /// Size of the metadata block in bytes.
    pub const SIZE: usize = std::mem::size_of::<RawStaticMetadata>();

    /// Read the metadata block from the current reader position.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let raw: RawStaticMetadata = reader.read_struct()?;
        Ok(Self {
            hash: raw.hash,
            last_marker_position: raw.last_marker_position.get(),
            note_count: raw.note_count.get(),
            marker_count: raw.marker_count.get(),
            difficulty: raw.difficulty,
            rating: raw.rating.get(),
            has_audio: raw.has_audio == 1,
            has_cover: raw.has_cover == 1,
            requires_mod: raw.requires_mod == 1,
        })
    }

    /// Format the content hash as lowercase hex.
    pub fn hash_hex(&self) -> String {
        self.hash.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
