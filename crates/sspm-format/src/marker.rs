//! Marker definitions and the marker stream.

use sspm_common::BinaryReader;

use crate::field::read_fields;
use crate::{DataType, DefinitionLookup, Error, Result, SectionPointer, Value};

/// Declares the ordered field types of one marker kind.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarkerDefinition {
    /// Definition id, e.g. `ssp_note`.
    pub id: String,
    /// Field type tags, in field order.
    pub tags: Vec<u8>,
}

impl MarkerDefinition {
    /// Read one definition: string id, u8 field count, then that many tags.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let id = reader.read_string()?.into_owned();
        let field_count = reader.read_u8()? as usize;
        let tags = reader.read_bytes(field_count)?.to_vec();
        Ok(Self { id, tags })
    }

    /// Read the definitions section at `pointer`.
    ///
    /// The section is mandatory, so the seek happens even for a zero pointer.
    pub fn read_all(reader: &mut BinaryReader<'_>, pointer: &SectionPointer) -> Result<Vec<Self>> {
        reader.seek(pointer.start("marker definitions")?);

        let count = reader.read_u8()? as usize;
        let mut definitions = Vec::with_capacity(count);
        for _ in 0..count {
            definitions.push(Self::read(reader)?);
        }
        Ok(definitions)
    }

    /// Field types of this definition. Unknown tags yield `None`.
    pub fn data_types(&self) -> impl Iterator<Item = Option<DataType>> + '_ {
        self.tags.iter().map(|&tag| DataType::from_u8(tag))
    }
}

/// One timed event in the map.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Marker {
    /// Time in milliseconds.
    pub position: u32,
    /// Marker type discriminant. `0` is a note.
    pub marker_type: u8,
    /// Decoded field values, in definition order.
    pub fields: Vec<Value>,
}

impl Marker {
    /// Marker type of a note.
    pub const NOTE: u8 = 0;

    /// Get a field by position.
    #[inline]
    pub fn field(&self, index: usize) -> Option<&Value> {
        self.fields.get(index)
    }

    /// Check if this marker is a note.
    #[inline]
    pub fn is_note(&self) -> bool {
        self.marker_type == Self::NOTE
    }

    /// Read the marker stream at `pointer`.
    ///
    /// Markers are read until the cursor reaches `offset + length`. The stream
    /// has no count field, and the last marker may run past the advertised end.
    pub fn read_all(
        reader: &mut BinaryReader<'_>,
        pointer: &SectionPointer,
        definitions: &[MarkerDefinition],
        lookup: &DefinitionLookup,
    ) -> Result<Vec<Self>> {
        let start = pointer.start("markers")?;
        let end = pointer.end("markers")?;
        reader.seek(start);

        let fixed = match lookup {
            DefinitionLookup::Fixed(id) if start < end => Some(
                definitions
                    .iter()
                    .find(|d| &d.id == id)
                    .ok_or_else(|| {
                        Error::malformed("markers", format!("no marker definition named {:?}", id))
                    })?,
            ),
            _ => None,
        };

        let mut markers = Vec::new();
        while reader.position() < end {
            let position = reader.read_u32()?;
            let marker_type = reader.read_u8()?;

            let definition = match fixed {
                Some(definition) => definition,
                None => definitions.get(marker_type as usize).ok_or_else(|| {
                    Error::malformed(
                        "markers",
                        format!(
                            "marker type {} has no definition ({} defined)",
                            marker_type,
                            definitions.len()
                        ),
                    )
                })?,
            };

            let fields = read_fields(reader, &definition.tags)?;
            markers.push(Self {
                position,
                marker_type,
                fields,
            });
        }

        Ok(markers)
    }
}
