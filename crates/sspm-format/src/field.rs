//! Tagged field decoding.
//!
//! Given a type tag, these functions consume exactly the bytes of one value
//! from the reader. Marker fields and custom data values share this decoder.

use sspm_common::BinaryReader;

use crate::{DataType, Error, Position, Result, Value};

/// Decode one value of the given tag from the current reader position.
///
/// Tags `0x00` (end) and `0x0c` (array) are not field types and fail with
/// [`Error::UnsupportedTag`], as does any byte outside the defined set.
pub fn read_value(reader: &mut BinaryReader<'_>, tag: u8) -> Result<Value> {
    let offset = reader.position();
    let unsupported = Error::UnsupportedTag { tag, offset };
    let data_type = DataType::from_u8(tag).ok_or_else(|| unsupported.clone())?;

    let value = match data_type {
        DataType::Int8 => Value::Int8(reader.read_i8()?),
        DataType::UInt16 => Value::UInt16(reader.read_u16()?),
        DataType::UInt32 => Value::UInt32(reader.read_u32()?),
        DataType::UInt64 => Value::UInt64(reader.read_u64()?),
        DataType::Float => Value::Float(reader.read_f32()?),
        DataType::Double => Value::Double(reader.read_f64()?),
        DataType::Position => Value::Position(read_position(reader)?),
        DataType::Buffer | DataType::String => Value::String(reader.read_string()?.into_owned()),
        DataType::LongBuffer | DataType::LongString => {
            Value::String(reader.read_long_string()?.into_owned())
        }
        DataType::End | DataType::Array => return Err(unsupported),
    };

    Ok(value)
}

/// Decode one value per tag, in order.
///
/// The result is indexed positionally: element `0` is the marker's first field.
pub fn read_fields(reader: &mut BinaryReader<'_>, tags: &[u8]) -> Result<Vec<Value>> {
    tags.iter().map(|&tag| read_value(reader, tag)).collect()
}

/// Decode a position: a discriminant byte, then two u8 (zero) or two f32 (nonzero).
fn read_position(reader: &mut BinaryReader<'_>) -> Result<Position> {
    let start = reader.position();
    let result = read_position_body(reader);
    if result.is_err() {
        reader.seek(start);
    }
    result
}

fn read_position_body(reader: &mut BinaryReader<'_>) -> Result<Position> {
    let position = if reader.read_u8()? == 0x00 {
        reader.check_bounds(2)?;
        Position::Int {
            x: reader.read_u8()?,
            y: reader.read_u8()?,
        }
    } else {
        reader.check_bounds(8)?;
        Position::Quantum {
            x: reader.read_f32()?,
            y: reader.read_f32()?,
        }
    };
    Ok(position)
}

/// Decode values of `element_tag` back to back until `data` is exhausted.
pub(crate) fn read_array(data: &[u8], element_tag: u8) -> Result<Vec<Value>> {
    let mut reader = BinaryReader::new(data);
    let mut values = Vec::new();
    while !reader.is_empty() {
        values.push(read_value(&mut reader, element_tag)?);
    }
    Ok(values)
}
