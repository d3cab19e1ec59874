//! Structure-of-arrays schema and record types.

use crate::model::marker::Marker;
use crate::model::value::Object;

/// Physical payload layout of an SOA block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoaLayout {
    /// One record after another (`[$ {schema} # n`).
    RowMajor,
    /// One field column after another (`{$ {schema} # n`).
    ColumnMajor,
}

impl SoaLayout {
    /// Label used in rendered output.
    pub fn label(self) -> &'static str {
        match self {
            SoaLayout::RowMajor => "row-major",
            SoaLayout::ColumnMajor => "column-major",
        }
    }
}

/// How a string field is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringEncoding {
    /// Each record holds `n` raw bytes, NUL padded.
    FixedWidth(usize),
    /// Each record holds an index into a table embedded in the schema.
    Dict { table: Vec<String>, index_width: usize },
    /// Each record holds an index into a shared offset table; the offsets
    /// delimit substrings of a shared buffer stored after the payload.
    Offset { index: Marker, index_width: usize },
}

impl StringEncoding {
    /// Bytes this field occupies in each record.
    pub fn width(&self) -> usize {
        match self {
            StringEncoding::FixedWidth(n) => *n,
            StringEncoding::Dict { index_width, .. } => *index_width,
            StringEncoding::Offset { index_width, .. } => *index_width,
        }
    }
}

/// The type of one SOA field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Fixed-width numeric, char or byte.
    Fixed { marker: Marker, width: usize },
    /// One byte per record.
    Bool,
    /// Zero bytes per record.
    Null,
    String(StringEncoding),
    /// Fixed-length array of heterogeneous fixed-width elements.
    FixedArray(Vec<FieldKind>),
    Struct(Vec<SoaField>),
}

impl FieldKind {
    /// Bytes this field occupies in each record.
    pub fn width(&self) -> usize {
        match self {
            FieldKind::Fixed { width, .. } => *width,
            FieldKind::Bool => 1,
            FieldKind::Null => 0,
            FieldKind::String(encoding) => encoding.width(),
            FieldKind::FixedArray(elems) => elems.iter().map(FieldKind::width).sum(),
            FieldKind::Struct(fields) => record_width(fields),
        }
    }

    /// Number of offset-encoded string columns at or below this field.
    pub fn offset_columns(&self) -> usize {
        match self {
            FieldKind::String(StringEncoding::Offset { .. }) => 1,
            FieldKind::Struct(fields) => fields.iter().map(|f| f.kind.offset_columns()).sum(),
            _ => 0,
        }
    }
}

/// A named SOA field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaField {
    pub name: String,
    pub kind: FieldKind,
}

/// Sum of field widths.
pub fn record_width(fields: &[SoaField]) -> usize {
    fields.iter().map(|f| f.kind.width()).sum()
}

/// A decoded SOA block, records in logical row order.
#[derive(Debug, Clone, PartialEq)]
pub struct SoaRecordSet {
    pub layout: SoaLayout,
    /// Declared shape; a flat count is kept as a single dimension.
    pub dims: Vec<usize>,
    pub schema: Vec<SoaField>,
    pub records: Vec<Object>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        let fields = vec![
            SoaField {
                name: "id".to_string(),
                kind: FieldKind::Fixed { marker: Marker::UInt32, width: 4 },
            },
            SoaField { name: "ok".to_string(), kind: FieldKind::Bool },
            SoaField { name: "none".to_string(), kind: FieldKind::Null },
            SoaField {
                name: "tag".to_string(),
                kind: FieldKind::String(StringEncoding::Dict {
                    table: vec!["a".to_string(), "b".to_string()],
                    index_width: 1,
                }),
            },
            SoaField {
                name: "pos".to_string(),
                kind: FieldKind::FixedArray(vec![
                    FieldKind::Fixed { marker: Marker::Float32, width: 4 },
                    FieldKind::Fixed { marker: Marker::Float64, width: 8 },
                ]),
            },
        ];
        assert_eq!(record_width(&fields), 4 + 1 + 0 + 1 + 12);

        let nested = FieldKind::Struct(fields);
        assert_eq!(nested.width(), 18);
        assert_eq!(nested.offset_columns(), 0);
    }

    #[test]
    fn test_offset_columns_nested() {
        let offset = FieldKind::String(StringEncoding::Offset { index: Marker::UInt8, index_width: 1 });
        let kind = FieldKind::Struct(vec![
            SoaField { name: "a".to_string(), kind: offset.clone() },
            SoaField {
                name: "b".to_string(),
                kind: FieldKind::Struct(vec![SoaField { name: "c".to_string(), kind: offset }]),
            },
        ]);
        assert_eq!(kind.offset_columns(), 2);
        assert_eq!(kind.width(), 2);
    }
}
