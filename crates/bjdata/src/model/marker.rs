//! One-byte type markers of the BJData / UBJSON format.

/// Byte order of multi-byte numeric payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// BJData Draft 2 and later.
    #[default]
    Little,
    /// UBJSON and BJData Draft 1.
    Big,
}

/// Type markers (BJData Draft 3, Section 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Marker {
    Null = b'Z',
    NoOp = b'N',
    True = b'T',
    False = b'F',
    Int8 = b'i',
    UInt8 = b'U',
    Int16 = b'I',
    UInt16 = b'u',
    Int32 = b'l',
    UInt32 = b'm',
    Int64 = b'L',
    UInt64 = b'M',
    Float16 = b'h',
    Float32 = b'd',
    Float64 = b'D',
    Char = b'C',
    Byte = b'B',
    String = b'S',
    HighPrec = b'H',
    ArrayStart = b'[',
    ArrayEnd = b']',
    ObjectStart = b'{',
    ObjectEnd = b'}',
    Type = b'$',
    Count = b'#',
}

impl Marker {
    /// Creates a Marker from its wire representation.
    pub fn from_u8(v: u8) -> Option<Marker> {
        match v {
            b'Z' => Some(Marker::Null),
            b'N' => Some(Marker::NoOp),
            b'T' => Some(Marker::True),
            b'F' => Some(Marker::False),
            b'i' => Some(Marker::Int8),
            b'U' => Some(Marker::UInt8),
            b'I' => Some(Marker::Int16),
            b'u' => Some(Marker::UInt16),
            b'l' => Some(Marker::Int32),
            b'm' => Some(Marker::UInt32),
            b'L' => Some(Marker::Int64),
            b'M' => Some(Marker::UInt64),
            b'h' => Some(Marker::Float16),
            b'd' => Some(Marker::Float32),
            b'D' => Some(Marker::Float64),
            b'C' => Some(Marker::Char),
            b'B' => Some(Marker::Byte),
            b'S' => Some(Marker::String),
            b'H' => Some(Marker::HighPrec),
            b'[' => Some(Marker::ArrayStart),
            b']' => Some(Marker::ArrayEnd),
            b'{' => Some(Marker::ObjectStart),
            b'}' => Some(Marker::ObjectEnd),
            b'$' => Some(Marker::Type),
            b'#' => Some(Marker::Count),
            _ => None,
        }
    }

    /// Returns the wire byte.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the lowercase type name used in previews (e.g. `uint8`).
    pub fn name(self) -> &'static str {
        match self {
            Marker::Null => "null",
            Marker::NoOp => "noop",
            Marker::True => "true",
            Marker::False => "false",
            Marker::Int8 => "int8",
            Marker::UInt8 => "uint8",
            Marker::Int16 => "int16",
            Marker::UInt16 => "uint16",
            Marker::Int32 => "int32",
            Marker::UInt32 => "uint32",
            Marker::Int64 => "int64",
            Marker::UInt64 => "uint64",
            Marker::Float16 => "float16",
            Marker::Float32 => "float32",
            Marker::Float64 => "float64",
            Marker::Char => "char",
            Marker::Byte => "byte",
            Marker::String => "string",
            Marker::HighPrec => "highprec",
            Marker::ArrayStart => "array",
            Marker::ArrayEnd => "array_end",
            Marker::ObjectStart => "object",
            Marker::ObjectEnd => "object_end",
            Marker::Type => "type",
            Marker::Count => "count",
        }
    }

    /// Returns true for the eight integer markers.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Marker::Int8
                | Marker::UInt8
                | Marker::Int16
                | Marker::UInt16
                | Marker::Int32
                | Marker::UInt32
                | Marker::Int64
                | Marker::UInt64
        )
    }

    /// Returns the unsigned integer marker whose width is `width` bytes.
    pub fn unsigned_of_width(width: usize) -> Option<Marker> {
        match width {
            1 => Some(Marker::UInt8),
            2 => Some(Marker::UInt16),
            4 => Some(Marker::UInt32),
            8 => Some(Marker::UInt64),
            _ => None,
        }
    }
}
