//! SSPM field data types.

/// Field type tags used by marker definitions and custom data.
///
/// The values are the actual tag bytes from the SSPM file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum DataType {
    /// End marker. Never valid as a field type.
    End = 0x00,
    /// Signed 8-bit integer.
    Int8 = 0x01,
    /// Unsigned 16-bit integer.
    UInt16 = 0x02,
    /// Unsigned 32-bit integer.
    UInt32 = 0x03,
    /// Unsigned 64-bit integer.
    UInt64 = 0x04,
    /// 32-bit floating point.
    Float = 0x05,
    /// 64-bit floating point.
    Double = 0x06,
    /// 2D position, either integer grid or "quantum" float coordinates.
    Position = 0x07,
    /// Binary blob with a u16 length.
    Buffer = 0x08,
    /// String with a u16 length.
    String = 0x09,
    /// Binary blob with a u32 length.
    LongBuffer = 0x0a,
    /// String with a u32 length.
    LongString = 0x0b,
    /// Array of another type. Custom data only.
    Array = 0x0c,
}

impl DataType {
    /// Parse from a tag byte.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::End),
            0x01 => Some(Self::Int8),
            0x02 => Some(Self::UInt16),
            0x03 => Some(Self::UInt32),
            0x04 => Some(Self::UInt64),
            0x05 => Some(Self::Float),
            0x06 => Some(Self::Double),
            0x07 => Some(Self::Position),
            0x08 => Some(Self::Buffer),
            0x09 => Some(Self::String),
            0x0a => Some(Self::LongBuffer),
            0x0b => Some(Self::LongString),
            0x0c => Some(Self::Array),
            _ => None,
        }
    }

    /// Get the tag byte.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get the string name for this data type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::End => "End",
            Self::Int8 => "Int8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Position => "Position",
            Self::Buffer => "Buffer",
            Self::String => "String",
            Self::LongBuffer => "LongBuffer",
            Self::LongString => "LongString",
            Self::Array => "Array",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
