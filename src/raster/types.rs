//! Sample types, byte orders and data scales of the Whitebox raster format.

use std::fmt::{Display, Formatter};

/// Numeric kind of a raster body: 4-byte floats or 2-byte signed integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Float,
    Integer,
}

impl DataType {
    /// Interpret a `Data Type` header string.
    ///
    /// Any string containing `float` (case-insensitive) selects [`DataType::Float`];
    /// everything else is treated as [`DataType::Integer`].
    pub fn from_type_str(s: &str) -> DataType {
        if s.to_lowercase().contains("float") {
            DataType::Float
        } else {
            DataType::Integer
        }
    }

    /// Sample width in bytes.
    pub fn bytes(&self) -> usize {
        match self {
            DataType::Float => 4,
            DataType::Integer => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Float => "float",
            DataType::Integer => "integer",
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte order of a raster body.
///
/// Bodies are always written little-endian; the header's `Byte Order` field
/// only matters when decoding files produced elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ByteOrder {
    #[default]
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// Parse the header literals `LITTLE_ENDIAN` / `BIG_ENDIAN`.
    pub fn from_header_str(s: &str) -> Option<ByteOrder> {
        match s {
            "LITTLE_ENDIAN" => Some(ByteOrder::LittleEndian),
            "BIG_ENDIAN" => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "LITTLE_ENDIAN",
            ByteOrder::BigEndian => "BIG_ENDIAN",
        }
    }
}

impl Display for ByteOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a raster's values, controlling downstream interpretation.
///
/// `Rgb` is recognized during normalization but rejected as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataScale {
    Continuous,
    Categorical,
    Boolean,
    Rgb,
}

impl DataScale {
    /// Case-insensitive lookup; returns `None` for values outside the allowed set.
    pub fn from_scale_str(s: &str) -> Option<DataScale> {
        match s.to_lowercase().as_str() {
            "continuous" => Some(DataScale::Continuous),
            "categorical" => Some(DataScale::Categorical),
            "boolean" => Some(DataScale::Boolean),
            "rgb" => Some(DataScale::Rgb),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataScale::Continuous => "continuous",
            DataScale::Categorical => "categorical",
            DataScale::Boolean => "boolean",
            DataScale::Rgb => "rgb",
        }
    }
}

impl Display for DataScale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-level constraint for the primitive sample types a body file can hold.
pub trait Sample: Copy {
    const DATA_TYPE: DataType;
    const WIDTH: usize;

    /// Append this sample to `out`, always little-endian.
    fn write_le(self, out: &mut Vec<u8>);

    /// Read one sample from the first `WIDTH` bytes of `bytes`.
    fn read(bytes: &[u8], order: ByteOrder) -> Self;
}

impl Sample for f32 {
    const DATA_TYPE: DataType = DataType::Float;
    const WIDTH: usize = 4;

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn read(bytes: &[u8], order: ByteOrder) -> Self {
        let raw: [u8; 4] = bytes[..4].try_into().unwrap();
        match order {
            ByteOrder::LittleEndian => f32::from_le_bytes(raw),
            ByteOrder::BigEndian => f32::from_be_bytes(raw),
        }
    }
}

impl Sample for i16 {
    const DATA_TYPE: DataType = DataType::Integer;
    const WIDTH: usize = 2;

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn read(bytes: &[u8], order: ByteOrder) -> Self {
        let raw: [u8; 2] = bytes[..2].try_into().unwrap();
        match order {
            ByteOrder::LittleEndian => i16::from_le_bytes(raw),
            ByteOrder::BigEndian => i16::from_be_bytes(raw),
        }
    }
}
