//! Decoded field values.
//!
//! The `Value` enum is the single value model shared by marker fields and
//! decoded custom data.

use crate::DataType;

/// A decoded SSPM field value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// Signed 8-bit integer.
    Int8(i8),
    /// Unsigned 16-bit integer.
    UInt16(u16),
    /// Unsigned 32-bit integer.
    UInt32(u32),
    /// Unsigned 64-bit integer.
    UInt64(u64),
    /// 32-bit floating point.
    Float(f32),
    /// 64-bit floating point.
    Double(f64),
    /// 2D position.
    Position(Position),
    /// Text, or a binary blob read as text.
    String(String),
    /// Array of values of a single type (custom data only).
    Array(Vec<Value>),
}

/// A 2D position as stored in marker fields.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Position {
    /// Integer grid coordinates.
    Int { x: u8, y: u8 },
    /// Free float coordinates.
    Quantum { x: f32, y: f32 },
}

impl Position {
    /// Horizontal coordinate.
    #[inline]
    pub fn x(&self) -> f32 {
        match *self {
            Position::Int { x, .. } => f32::from(x),
            Position::Quantum { x, .. } => x,
        }
    }

    /// Vertical coordinate.
    #[inline]
    pub fn y(&self) -> f32 {
        match *self {
            Position::Int { y, .. } => f32::from(y),
            Position::Quantum { y, .. } => y,
        }
    }

    /// Check if this is a quantum (float) position.
    #[inline]
    pub fn is_quantum(&self) -> bool {
        matches!(self, Position::Quantum { .. })
    }

    /// Variant name: `"int"` or `"quantum"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Position::Int { .. } => "int",
            Position::Quantum { .. } => "quantum",
        }
    }
}

impl Value {
    /// Get the data type this value was decoded as.
    ///
    /// Strings report [`DataType::String`] regardless of which of the four
    /// text/blob tags produced them.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Int8(_) => DataType::Int8,
            Value::UInt16(_) => DataType::UInt16,
            Value::UInt32(_) => DataType::UInt32,
            Value::UInt64(_) => DataType::UInt64,
            Value::Float(_) => DataType::Float,
            Value::Double(_) => DataType::Double,
            Value::Position(_) => DataType::Position,
            Value::String(_) => DataType::String,
            Value::Array(_) => DataType::Array,
        }
    }

    /// Try to get this value as a position.
    #[inline]
    pub fn as_position(&self) -> Option<Position> {
        match self {
            Value::Position(p) => Some(*p),
            _ => None,
        }
    }

    /// Try to get this value as a u64, widening smaller unsigned integers.
    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::UInt16(v) => Some(u64::from(v)),
            Value::UInt32(v) => Some(u64::from(v)),
            Value::UInt64(v) => Some(v),
            Value::Int8(v) if v >= 0 => Some(v as u64),
            _ => None,
        }
    }

    /// Try to get this value as an f64, widening any numeric type.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int8(v) => Some(f64::from(v)),
            Value::UInt16(v) => Some(f64::from(v)),
            Value::UInt32(v) => Some(f64::from(v)),
            Value::UInt64(v) => Some(v as f64),
            Value::Float(v) => Some(f64::from(v)),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get this value as a string.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an array.
    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int8(v) => write!(f, "{}", v),
            Value::UInt16(v) => write!(f, "{}", v),
            Value::UInt32(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Position(p) => write!(f, "({}, {}) [{}]", p.x(), p.y(), p.kind()),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
        }
    }
}
