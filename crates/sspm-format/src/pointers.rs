//! Section pointer table.
//!
//! Five (offset, length) pairs locate the variable-size sections. The
//! decoder uses them as seek targets only; each section's own length
//! prefixes decide how much is read, except for the markers stream whose
//! end is `offset + length`.

use sspm_common::BinaryReader;

use crate::{Error, Result};

/// Location of one variable-size section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SectionPointer {
    /// Absolute byte offset of the section.
    pub offset: u64,
    /// Advertised byte length of the section.
    pub length: u64,
}

impl SectionPointer {
    /// Read an (offset, length) pair.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            offset: reader.read_u64()?,
            length: reader.read_u64()?,
        })
    }

    /// Check if both offset and length are nonzero.
    #[inline]
    pub fn is_present(&self) -> bool {
        self.offset != 0 && self.length != 0
    }

    /// Offset as a buffer index.
    pub fn start(&self, section: &'static str) -> Result<usize> {
        usize::try_from(self.offset).map_err(|_| {
            Error::malformed(section, format!("offset {} exceeds address space", self.offset))
        })
    }

    /// Length as a byte count.
    pub fn byte_len(&self, section: &'static str) -> Result<usize> {
        usize::try_from(self.length).map_err(|_| {
            Error::malformed(section, format!("length {} exceeds address space", self.length))
        })
    }

    /// End offset, `offset + length`.
    pub fn end(&self, section: &'static str) -> Result<usize> {
        self.start(section)?
            .checked_add(self.byte_len(section)?)
            .ok_or_else(|| {
                Error::malformed(
                    section,
                    format!("offset {} + length {} overflows", self.offset, self.length),
                )
            })
    }
}

/// The pointer table, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pointers {
    /// Custom data section, optional.
    pub custom_data: SectionPointer,
    /// Embedded audio, read only when flagged.
    pub audio: SectionPointer,
    /// Embedded cover image, read only when flagged.
    pub cover: SectionPointer,
    /// Marker definitions section.
    pub marker_definitions: SectionPointer,
    /// Marker stream. Its end bounds the stream.
    pub markers: SectionPointer,
}

impl Pointers {
    /// Size of the pointer table in bytes (10 u64 values).
    pub const SIZE: usize = 80;

    /// Read the pointer table from the current reader position.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            custom_data: SectionPointer::read(reader)?,
            audio: SectionPointer::read(reader)?,
            cover: SectionPointer::read(reader)?,
            marker_definitions: SectionPointer::read(reader)?,
            markers: SectionPointer::read(reader)?,
        })
    }
}
