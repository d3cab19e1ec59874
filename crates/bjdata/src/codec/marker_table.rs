//! Lookup table from fixed-width markers to their byte width and decode rule.
//!
//! Variable-width markers (`S`, `H`, `[`, `{`) and the structural markers are
//! not in the table; callers recognize them by identity.

use lazy_static::lazy_static;

use crate::model::{ByteOrder, Marker, Value};

/// How the payload bytes of a fixed-width marker are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeRule {
    /// Two's-complement integer.
    Signed,
    Unsigned,
    /// IEEE-754 half, single or double, chosen by width.
    Float,
    /// One byte, ASCII with replacement.
    Char,
    Byte,
    /// Zero-width constant.
    Const(Constant),
}

/// Values carried by the marker itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Null,
    True,
    False,
}

/// Width and rule of one fixed-width marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarCodec {
    pub marker: Marker,
    pub width: usize,
    pub rule: DecodeRule,
}

impl ScalarCodec {
    /// Returns true for the integer markers.
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.marker.is_integer()
    }
}

const FIXED_MARKERS: [(Marker, usize, DecodeRule); 16] = [
    (Marker::Null, 0, DecodeRule::Const(Constant::Null)),
    (Marker::True, 0, DecodeRule::Const(Constant::True)),
    (Marker::False, 0, DecodeRule::Const(Constant::False)),
    (Marker::Int8, 1, DecodeRule::Signed),
    (Marker::UInt8, 1, DecodeRule::Unsigned),
    (Marker::Int16, 2, DecodeRule::Signed),
    (Marker::UInt16, 2, DecodeRule::Unsigned),
    (Marker::Int32, 4, DecodeRule::Signed),
    (Marker::UInt32, 4, DecodeRule::Unsigned),
    (Marker::Int64, 8, DecodeRule::Signed),
    (Marker::UInt64, 8, DecodeRule::Unsigned),
    (Marker::Float16, 2, DecodeRule::Float),
    (Marker::Float32, 4, DecodeRule::Float),
    (Marker::Float64, 8, DecodeRule::Float),
    (Marker::Char, 1, DecodeRule::Char),
    (Marker::Byte, 1, DecodeRule::Byte),
];

lazy_static! {
    static ref LITTLE_ENDIAN: MarkerTable = MarkerTable::build(ByteOrder::Little);
    static ref BIG_ENDIAN: MarkerTable = MarkerTable::build(ByteOrder::Big);
}

/// Marker lookup for one byte order.
#[derive(Debug)]
pub struct MarkerTable {
    order: ByteOrder,
    entries: [Option<ScalarCodec>; 256],
}

impl MarkerTable {
    /// Returns the shared table for `order`.
    pub fn for_order(order: ByteOrder) -> &'static MarkerTable {
        match order {
            ByteOrder::Little => &LITTLE_ENDIAN,
            ByteOrder::Big => &BIG_ENDIAN,
        }
    }

    fn build(order: ByteOrder) -> Self {
        let mut entries = [None; 256];
        for (marker, width, rule) in FIXED_MARKERS {
            entries[marker.as_u8() as usize] = Some(ScalarCodec { marker, width, rule });
        }
        Self { order, entries }
    }

    /// Looks up a fixed-width marker byte.
    #[inline]
    pub fn get(&self, byte: u8) -> Option<ScalarCodec> {
        self.entries[byte as usize]
    }

    /// Decodes exactly `codec.width` bytes.
    ///
    /// The caller guarantees `bytes.len() == codec.width`.
    pub fn decode(&self, codec: ScalarCodec, bytes: &[u8]) -> Value {
        debug_assert_eq!(bytes.len(), codec.width);
        match codec.rule {
            DecodeRule::Const(Constant::Null) => Value::Null,
            DecodeRule::Const(Constant::True) => Value::Bool(true),
            DecodeRule::Const(Constant::False) => Value::Bool(false),
            DecodeRule::Char => {
                let b = bytes[0];
                Value::Char(if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER })
            }
            DecodeRule::Byte => Value::Byte(bytes[0]),
            DecodeRule::Unsigned => Value::UInt(self.assemble(bytes)),
            DecodeRule::Signed => {
                let shift = 64 - 8 * bytes.len() as u32;
                Value::Int(((self.assemble(bytes) << shift) as i64) >> shift)
            }
            DecodeRule::Float => {
                let raw = self.assemble(bytes);
                Value::Float(match bytes.len() {
                    2 => f16_to_f64(raw as u16),
                    4 => f32::from_bits(raw as u32) as f64,
                    _ => f64::from_bits(raw),
                })
            }
        }
    }

    /// Decodes an integer marker's payload as a wide signed value.
    ///
    /// Returns `None` if `codec` is not an integer marker.
    pub fn decode_integer(&self, codec: ScalarCodec, bytes: &[u8]) -> Option<i128> {
        match self.decode(codec, bytes) {
            Value::Int(v) if codec.is_integer() => Some(v as i128),
            Value::UInt(v) if codec.is_integer() => Some(v as i128),
            _ => None,
        }
    }

    /// Packs up to eight bytes into a u64 in the table's byte order.
    #[inline]
    fn assemble(&self, bytes: &[u8]) -> u64 {
        match self.order {
            ByteOrder::Little => bytes.iter().rev().fold(0u64, |acc, &b| (acc << 8) | b as u64),
            ByteOrder::Big => bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64),
        }
    }
}

/// Converts IEEE-754 half-precision bits to f64 exactly.
pub fn f16_to_f64(bits: u16) -> f64 {
    let sign = if bits & 0x8000 != 0 { -1.0 } else { 1.0 };
    let exponent = ((bits >> 10) & 0x1f) as i32;
    let fraction = (bits & 0x03ff) as f64;
    match exponent {
        0 => sign * fraction * 2f64.powi(-24),
        0x1f if fraction == 0.0 => sign * f64::INFINITY,
        0x1f => f64::NAN,
        _ => sign * (1.0 + fraction / 1024.0) * 2f64.powi(exponent - 15),
    }
}
