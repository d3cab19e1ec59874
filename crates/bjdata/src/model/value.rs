//! The decoded value tree.

use rustc_hash::FxHashMap;

use crate::model::marker::Marker;
use crate::model::soa::SoaRecordSet;

/// A decoded BJData value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// Signed integer markers (`i`, `I`, `l`, `L`).
    Int(i64),
    /// Unsigned integer markers (`U`, `u`, `m`, `M`).
    UInt(u64),
    /// Float markers (`h`, `d`, `D`), widened to f64.
    Float(f64),
    Char(char),
    Byte(u8),
    String(String),
    /// High-precision number, kept as its decimal text.
    HighPrec(String),
    Array(Vec<Value>),
    Object(Object),
    /// Fully decoded N-dimensional array.
    NdArray(NdArray),
    /// Bounded stand-in for a typed array too large to keep.
    Preview(ArrayPreview),
    /// Structure-of-arrays record block.
    Soa(SoaRecordSet),
}

impl Value {
    /// Returns true for values that carry no children.
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Value::Array(_)
                | Value::Object(_)
                | Value::NdArray(_)
                | Value::Preview(_)
                | Value::Soa(_)
        )
    }
}

/// An order-preserving string-keyed map.
///
/// Inserting an existing key replaces its value in place, so the key keeps
/// the position of its first occurrence.
#[derive(Debug, Clone, Default)]
pub struct Object {
    entries: Vec<(String, Value)>,
    index: FxHashMap<String, usize>,
}

impl Object {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty object with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Inserts a key/value pair; the last write for a key wins.
    pub fn insert(&mut self, key: String, value: Value) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the object has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

/// Storage order of an N-dimensional array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MajorOrder {
    Row,
    Column,
}

impl MajorOrder {
    /// Short label used in rendered output.
    pub fn label(self) -> &'static str {
        match self {
            MajorOrder::Row => "row",
            MajorOrder::Column => "col",
        }
    }
}

/// Declared extent of a typed array: a flat count or an N-d shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Count(usize),
    Dims { dims: Vec<usize>, order: MajorOrder },
}

impl Shape {
    /// Total number of elements, saturating on overflow.
    pub fn total(&self) -> usize {
        match self {
            Shape::Count(n) => *n,
            Shape::Dims { dims, .. } => element_count(dims),
        }
    }
}

/// Product of `dims`, saturating at `usize::MAX`.
pub fn element_count(dims: &[usize]) -> usize {
    dims.iter().fold(1usize, |acc, &d| acc.saturating_mul(d))
}

/// A fully decoded N-dimensional array, elements in storage order.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    /// Declared element type; `None` for an untyped shaped array.
    pub elem: Option<Marker>,
    pub dims: Vec<usize>,
    pub order: MajorOrder,
    pub data: Vec<Value>,
}

/// Why a typed array was replaced by a preview.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewKind {
    /// The element count exceeded the item budget; the bytes were skipped.
    Oversized,
    /// The declared byte length ran past the end of the buffer.
    Truncated {
        /// Bytes that were actually left in the buffer.
        available: usize,
        /// Leading raw bytes, for a hex rendering.
        raw: Vec<u8>,
    },
}

/// Bounded stand-in for a typed array.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPreview {
    pub elem: Marker,
    pub shape: Shape,
    /// First few decoded values (empty when truncated).
    pub sample: Vec<Value>,
    /// Byte length the array declared.
    pub declared_bytes: usize,
    pub kind: PreviewKind,
}
