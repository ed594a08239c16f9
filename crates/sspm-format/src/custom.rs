//! Optional custom data section.
//!
//! Custom fields are typed key/value entries. Their values are kept as raw
//! bytes when the map is decoded; [`CustomField::decode_value`] interprets
//! them on request.

use sspm_common::BinaryReader;

use crate::field::{read_array, read_value};
use crate::{DataType, Error, Result, SectionPointer, Value};

const SECTION: &str = "custom data";

/// One entry of the custom data section.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CustomField {
    /// Field identifier.
    pub id: String,
    /// Type tag of the value.
    pub tag: u8,
    /// Element type tag, present only when `tag` is the array tag.
    pub array_tag: Option<u8>,
    /// Raw, undecoded value bytes.
    pub value: Vec<u8>,
}

impl CustomField {
    /// Get the declared data type, if the tag is known.
    pub fn data_type(&self) -> Option<DataType> {
        DataType::from_u8(self.tag)
    }

    /// Decode the raw value bytes according to the declared type.
    ///
    /// Arrays decode elements of `array_tag` back to back until the raw bytes
    /// run out. Scalars must consume the raw bytes exactly.
    pub fn decode_value(&self) -> Result<Value> {
        if self.tag == DataType::Array.as_u8() {
            let element_tag = self
                .array_tag
                .ok_or_else(|| Error::malformed(SECTION, format!("field {:?} has no array type", self.id)))?;
            return read_array(&self.value, element_tag).map(Value::Array);
        }

        let mut reader = BinaryReader::new(&self.value);
        let value = read_value(&mut reader, self.tag)?;
        if !reader.is_empty() {
            return Err(Error::malformed(
                SECTION,
                format!(
                    "field {:?} has {} trailing bytes",
                    self.id,
                    reader.remaining()
                ),
            ));
        }
        Ok(value)
    }
}

/// The custom data section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CustomData {
    pub fields: Vec<CustomField>,
}

impl CustomData {
    /// Read the section at `pointer`.
    ///
    /// Absent sections (zero offset or length) yield no fields.
    pub fn read(reader: &mut BinaryReader<'_>, pointer: &SectionPointer) -> Result<Self> {
        if !pointer.is_present() {
            return Ok(Self::default());
        }

        reader.seek(pointer.start(SECTION)?);
        let field_count = reader.read_u16()? as usize;

        let mut fields = Vec::with_capacity(field_count.min(reader.remaining()));
        for _ in 0..field_count {
            let id = reader.read_string()?.into_owned();
            let tag = reader.read_u8()?;
            let array_tag = if tag == DataType::Array.as_u8() {
                Some(reader.read_u8()?)
            } else {
                None
            };
            let length = reader.read_u32()? as usize;
            let value = reader.read_bytes(length)?.to_vec();

            fields.push(CustomField {
                id,
                tag,
                array_tag,
                value,
            });
        }

        Ok(Self { fields })
    }

    /// Read the section, substituting an empty field list on any failure.
    ///
    /// This is the only place where decode errors are absorbed.
    pub fn read_or_empty(reader: &mut BinaryReader<'_>, pointer: &SectionPointer) -> Self {
        Self::read(reader, pointer).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed custom data section: {}", e);
            Self::default()
        })
    }

    /// Find a field by id.
    pub fn get(&self, id: &str) -> Option<&CustomField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
