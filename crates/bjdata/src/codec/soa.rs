//! Structure-of-arrays (SOA) decoding.
//!
//! An SOA block is a container whose element type is a schema object
//! (`[${...}#n` row-major, `{${...}#n` column-major). The schema maps field
//! names to type markers; the payload that follows holds `n` fixed-width
//! records, optionally followed by offset tables and string buffers for
//! offset-encoded string columns.

use tracing::trace;

use crate::codec::marker_table::MarkerTable;
use crate::codec::primitives::{Reader, decode_text};
use crate::codec::value::{DecodeOptions, read_count};
use crate::error::DecodeError;
use crate::model::{
    FieldKind, Marker, Object, Shape, SoaField, SoaLayout, SoaRecordSet, StringEncoding, Value,
    element_count, record_width,
};

// =============================================================================
// SCHEMA
// =============================================================================

/// Reads an SOA schema object, including its opening `{`.
///
/// Nested struct fields count towards `options.max_depth`.
pub fn read_schema(
    reader: &mut Reader<'_>,
    options: &DecodeOptions,
) -> Result<Vec<SoaField>, DecodeError> {
    let at = reader.position();
    if reader.read_byte()? != Marker::ObjectStart.as_u8() {
        return Err(DecodeError::MalformedSchema {
            at,
            context: "schema must start with '{'",
        });
    }
    read_schema_fields(reader, options.max_depth)
}

/// Reads schema fields up to and including the closing `}`.
fn read_schema_fields(reader: &mut Reader<'_>, max_depth: usize) -> Result<Vec<SoaField>, DecodeError> {
    let mut fields = Vec::new();
    let mut width = 0usize;
    loop {
        let at = reader.position();
        match reader.peek() {
            Some(b'}') => {
                reader.read_byte()?;
                return Ok(fields);
            }
            None => {
                return Err(DecodeError::MalformedSchema {
                    at,
                    context: "schema is not terminated by '}'",
                });
            }
            Some(_) => {}
        }

        let name = reader.read_string()?;
        let kind = read_field_kind(reader, max_depth)?;
        width = width
            .checked_add(kind.width())
            .ok_or(DecodeError::MalformedSchema { at, context: "record width overflows" })?;
        trace!(offset = at, field = %name, width = kind.width(), "schema field");
        fields.push(SoaField { name, kind });
    }
}

fn read_field_kind(reader: &mut Reader<'_>, max_depth: usize) -> Result<FieldKind, DecodeError> {
    let at = reader.position();
    let marker = reader.read_byte()?;
    match marker {
        b'Z' => Ok(FieldKind::Null),
        b'T' | b'F' => Ok(FieldKind::Bool),
        b'S' | b'H' => Ok(FieldKind::String(StringEncoding::FixedWidth(reader.read_length()?))),
        b'[' => read_array_field(reader),
        b'{' => {
            reader.descend(max_depth)?;
            let fields = read_schema_fields(reader, max_depth)?;
            reader.ascend();
            Ok(FieldKind::Struct(fields))
        }
        _ => match reader.table().get(marker) {
            Some(codec) => Ok(FieldKind::Fixed { marker: codec.marker, width: codec.width }),
            None => Err(DecodeError::MalformedSchema {
                at,
                context: "unsupported field type marker",
            }),
        },
    }
}

/// Reads a field declared with `[`: a dictionary or offset string column,
/// or a fixed-length array of fixed-width elements.
fn read_array_field(reader: &mut Reader<'_>) -> Result<FieldKind, DecodeError> {
    if reader.peek() == Some(Marker::Type.as_u8()) {
        reader.read_byte()?;
        let at = reader.position();
        let elem = reader.read_byte()?;
        return match elem {
            b'S' | b'H' => read_dictionary(reader),
            _ => match reader.table().get(elem).filter(|codec| codec.is_integer()) {
                Some(codec) => {
                    if reader.peek() == Some(Marker::ArrayEnd.as_u8()) {
                        reader.read_byte()?;
                    }
                    Ok(FieldKind::String(StringEncoding::Offset {
                        index: codec.marker,
                        index_width: codec.width,
                    }))
                }
                None => Err(DecodeError::MalformedSchema {
                    at,
                    context: "string column index must be an integer type",
                }),
            },
        };
    }

    let mut elems = Vec::new();
    loop {
        let at = reader.position();
        let Some(marker) = reader.peek() else {
            return Err(DecodeError::MalformedSchema {
                at,
                context: "fixed-length array is not terminated by ']'",
            });
        };
        reader.read_byte()?;
        let kind = match marker {
            b']' => return Ok(FieldKind::FixedArray(elems)),
            b'Z' => FieldKind::Null,
            b'T' | b'F' => FieldKind::Bool,
            _ => match reader.table().get(marker) {
                Some(codec) => FieldKind::Fixed { marker: codec.marker, width: codec.width },
                None => {
                    return Err(DecodeError::MalformedSchema {
                        at,
                        context: "unsupported fixed-length array element",
                    });
                }
            },
        };
        elems.push(kind);
    }
}

/// Reads `#n` and `n` length-prefixed strings following `[$S`.
fn read_dictionary(reader: &mut Reader<'_>) -> Result<FieldKind, DecodeError> {
    let at = reader.position();
    if reader.read_byte()? != Marker::Count.as_u8() {
        return Err(DecodeError::MalformedSchema {
            at,
            context: "dictionary string column needs a '#' count",
        });
    }
    let n = reader.read_length()?;
    let mut table = Vec::with_capacity(n.min(reader.remaining_len()));
    for _ in 0..n {
        table.push(reader.read_string()?);
    }
    Ok(FieldKind::String(StringEncoding::Dict {
        index_width: dictionary_index_width(n),
        table,
    }))
}

/// Smallest unsigned integer width able to hold every index `0..=n`.
pub fn dictionary_index_width(n: usize) -> usize {
    if n <= u8::MAX as usize {
        1
    } else if n <= u16::MAX as usize {
        2
    } else if n as u64 <= u32::MAX as u64 {
        4
    } else {
        8
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// Reads an SOA block whose `$` and schema `{` have been consumed.
pub(crate) fn read_soa(
    reader: &mut Reader<'_>,
    layout: SoaLayout,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    let schema = read_schema_fields(reader, options.max_depth)?;
    let at = reader.position();
    let dims = match read_count(reader)? {
        Some(Shape::Count(n)) => vec![n],
        Some(Shape::Dims { dims, .. }) => dims,
        None => {
            return Err(DecodeError::MalformedSchema {
                at,
                context: "SOA block needs a '#' count",
            });
        }
    };
    let mut set = decode_records(reader, schema, element_count(&dims), layout)?;
    set.dims = dims;
    Ok(Value::Soa(set))
}

/// Offset table and string buffer of one offset-encoded column.
struct OffsetTable<'a> {
    offsets: Vec<u64>,
    buffer: &'a [u8],
    at: usize,
}

struct RecordContext<'t, 'a> {
    table: &'static MarkerTable,
    strings: &'t [OffsetTable<'a>],
}

/// Decodes `count` records laid out per `layout`.
///
/// Records come back in logical row order whichever layout was used.
pub fn decode_records(
    reader: &mut Reader<'_>,
    schema: Vec<SoaField>,
    count: usize,
    layout: SoaLayout,
) -> Result<SoaRecordSet, DecodeError> {
    let at = reader.position();
    let width = record_width(&schema);
    if width == 0 && count > 0 {
        return Err(DecodeError::MalformedSchema {
            at,
            context: "record schema has zero width",
        });
    }
    let payload_len = width.checked_mul(count).ok_or(DecodeError::UnexpectedEof {
        at,
        needed: usize::MAX,
        available: reader.remaining_len(),
    })?;
    let payload = reader.read_bytes(payload_len)?;
    trace!(offset = at, count, width, layout = layout.label(), "soa payload");

    let mut strings = Vec::new();
    read_offset_tables(reader, &schema, count, &mut strings)?;

    let ctx = RecordContext { table: reader.table(), strings: &strings };
    let records = match layout {
        SoaLayout::ColumnMajor => decode_column_major(&ctx, &schema, payload, count, at)?,
        SoaLayout::RowMajor => decode_row_major(&ctx, &schema, payload, count, at)?,
    };

    Ok(SoaRecordSet { layout, dims: vec![count], schema, records })
}

/// Reads the `count + 1` offsets and the string buffer of every offset
/// column, depth-first in schema order.
fn read_offset_tables<'a>(
    reader: &mut Reader<'a>,
    fields: &[SoaField],
    count: usize,
    out: &mut Vec<OffsetTable<'a>>,
) -> Result<(), DecodeError> {
    for field in fields {
        match &field.kind {
            FieldKind::String(StringEncoding::Offset { index, index_width }) => {
                let at = reader.position();
                let len = count
                    .checked_add(1)
                    .and_then(|n| n.checked_mul(*index_width))
                    .ok_or(DecodeError::UnexpectedEof {
                        at,
                        needed: usize::MAX,
                        available: reader.remaining_len(),
                    })?;
                let raw = reader.read_bytes(len)?;
                let mut offsets = Vec::with_capacity(count + 1);
                for (i, chunk) in raw.chunks_exact(*index_width).enumerate() {
                    let value = read_index(reader.table(), *index, chunk, at + i * index_width)?;
                    let offset = u64::try_from(value).map_err(|_| DecodeError::IndexOutOfRange {
                        at: at + i * index_width,
                        table: "string offsets",
                        index: value,
                        size: 0,
                    })?;
                    offsets.push(offset);
                }
                let end = offsets.last().copied().unwrap_or(0);
                let buf_len = usize::try_from(end).map_err(|_| DecodeError::InvalidLength {
                    value: end as i128,
                    at: at + count * index_width,
                })?;
                let buffer_at = reader.position();
                let buffer = reader.read_bytes(buf_len)?;
                trace!(offset = at, field = %field.name, strings = buf_len, "offset table");
                out.push(OffsetTable { offsets, buffer, at: buffer_at });
            }
            FieldKind::Struct(children) => read_offset_tables(reader, children, count, out)?,
            _ => {}
        }
    }
    Ok(())
}

fn decode_column_major(
    ctx: &RecordContext<'_, '_>,
    schema: &[SoaField],
    payload: &[u8],
    count: usize,
    base: usize,
) -> Result<Vec<Object>, DecodeError> {
    let mut columns = Vec::with_capacity(schema.len());
    let mut column_start = 0;
    let mut table_base = 0;
    for field in schema {
        let width = field.kind.width();
        let mut column = Vec::with_capacity(count);
        for i in 0..count {
            let start = column_start + i * width;
            let mut next_table = table_base;
            column.push(decode_field(
                ctx,
                &field.kind,
                &payload[start..start + width],
                base + start,
                &mut next_table,
            )?);
        }
        column_start += width * count;
        table_base += field.kind.offset_columns();
        columns.push(column.into_iter());
    }

    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        let mut record = Object::with_capacity(schema.len());
        for (field, column) in schema.iter().zip(columns.iter_mut()) {
            record.insert(field.name.clone(), column.next().unwrap_or(Value::Null));
        }
        records.push(record);
    }
    Ok(records)
}

fn decode_row_major(
    ctx: &RecordContext<'_, '_>,
    schema: &[SoaField],
    payload: &[u8],
    count: usize,
    base: usize,
) -> Result<Vec<Object>, DecodeError> {
    let width = record_width(schema);
    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let start = i * width;
        let mut next_table = 0;
        records.push(decode_struct(
            ctx,
            schema,
            &payload[start..start + width],
            base + start,
            &mut next_table,
        )?);
    }
    Ok(records)
}

/// Decodes one struct occupying exactly `bytes`, fields at offset 0 onward.
fn decode_struct(
    ctx: &RecordContext<'_, '_>,
    fields: &[SoaField],
    bytes: &[u8],
    at: usize,
    next_table: &mut usize,
) -> Result<Object, DecodeError> {
    let mut record = Object::with_capacity(fields.len());
    let mut offset = 0;
    for field in fields {
        let width = field.kind.width();
        let value = decode_field(
            ctx,
            &field.kind,
            &bytes[offset..offset + width],
            at + offset,
            next_table,
        )?;
        record.insert(field.name.clone(), value);
        offset += width;
    }
    Ok(record)
}

/// Decodes one field from exactly `kind.width()` bytes found at `at`.
fn decode_field(
    ctx: &RecordContext<'_, '_>,
    kind: &FieldKind,
    bytes: &[u8],
    at: usize,
    next_table: &mut usize,
) -> Result<Value, DecodeError> {
    match kind {
        FieldKind::Fixed { marker, .. } => match ctx.table.get(marker.as_u8()) {
            Some(codec) => Ok(ctx.table.decode(codec, bytes)),
            None => Err(DecodeError::MalformedSchema { at, context: "field marker is not fixed-width" }),
        },
        FieldKind::Bool => Ok(Value::Bool(!matches!(bytes[0], 0 | b'F'))),
        FieldKind::Null => Ok(Value::Null),
        FieldKind::String(StringEncoding::FixedWidth(_)) => {
            let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
            Ok(Value::String(decode_text(&bytes[..end])))
        }
        FieldKind::String(StringEncoding::Dict { table, index_width }) => {
            let marker = Marker::unsigned_of_width(*index_width).ok_or(DecodeError::MalformedSchema {
                at,
                context: "dictionary index width",
            })?;
            let index = read_index(ctx.table, marker, bytes, at)?;
            usize::try_from(index)
                .ok()
                .and_then(|i| table.get(i))
                .map(|s| Value::String(s.clone()))
                .ok_or(DecodeError::IndexOutOfRange {
                    at,
                    table: "dictionary",
                    index,
                    size: table.len(),
                })
        }
        FieldKind::String(StringEncoding::Offset { index, .. }) => {
            let strings = ctx.strings.get(*next_table).ok_or(DecodeError::MalformedSchema {
                at,
                context: "missing offset table",
            })?;
            *next_table += 1;
            let i = read_index(ctx.table, *index, bytes, at)?;
            Ok(Value::String(decode_text(offset_slice(strings, i, at)?)))
        }
        FieldKind::FixedArray(elems) => {
            let mut items = Vec::with_capacity(elems.len());
            let mut offset = 0;
            for elem in elems {
                let width = elem.width();
                items.push(decode_field(ctx, elem, &bytes[offset..offset + width], at + offset, next_table)?);
                offset += width;
            }
            Ok(Value::Array(items))
        }
        FieldKind::Struct(fields) => Ok(Value::Object(decode_struct(ctx, fields, bytes, at, next_table)?)),
    }
}

/// Returns the substring `offsets[i]..offsets[i + 1]` of the shared buffer.
fn offset_slice<'a>(strings: &OffsetTable<'a>, i: i128, at: usize) -> Result<&'a [u8], DecodeError> {
    let out_of_range = |index: i128| DecodeError::IndexOutOfRange {
        at,
        table: "string offsets",
        index,
        size: strings.offsets.len().saturating_sub(1),
    };
    let idx = usize::try_from(i).map_err(|_| out_of_range(i))?;
    let next = idx.checked_add(1).and_then(|j| strings.offsets.get(j));
    let (Some(&start), Some(&end)) = (strings.offsets.get(idx), next) else {
        return Err(out_of_range(i));
    };
    if start > end || end > strings.buffer.len() as u64 {
        return Err(DecodeError::IndexOutOfRange {
            at: strings.at,
            table: "string buffer",
            index: end as i128,
            size: strings.buffer.len(),
        });
    }
    Ok(&strings.buffer[start as usize..end as usize])
}

fn read_index(table: &MarkerTable, marker: Marker, bytes: &[u8], at: usize) -> Result<i128, DecodeError> {
    table
        .get(marker.as_u8())
        .and_then(|codec| table.decode_integer(codec, bytes))
        .ok_or(DecodeError::ExpectedInteger { marker: marker.as_u8(), at })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::value::{DecodeOptions, decode};

    fn decode_le(bytes: &[u8]) -> Result<Value, DecodeError> {
        decode(bytes, &DecodeOptions::default())
    }

    fn soa(value: Value) -> SoaRecordSet {
        match value {
            Value::Soa(set) => set,
            other => panic!("expected Soa, got {:?}", other),
        }
    }

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    #[test]
    fn test_read_schema_kinds() {
        let data = b"{U\x02idmU\x02okTU\x04nameSU\x04U\x03tag[$S#U\x02U\x01aU\x01bU\x04note[$U]U\x03pos[ddd]U\x04meta{U\x01kI}}";
        let mut reader = Reader::new(data);
        let schema = read_schema(&mut reader, &DecodeOptions::default()).unwrap();
        assert!(reader.is_empty());

        let kinds: Vec<&FieldKind> = schema.iter().map(|f| &f.kind).collect();
        assert_eq!(kinds[0], &FieldKind::Fixed { marker: Marker::UInt32, width: 4 });
        assert_eq!(kinds[1], &FieldKind::Bool);
        assert_eq!(kinds[2], &FieldKind::String(StringEncoding::FixedWidth(4)));
        assert_eq!(
            kinds[3],
            &FieldKind::String(StringEncoding::Dict {
                table: vec!["a".to_string(), "b".to_string()],
                index_width: 1,
            })
        );
        assert_eq!(
            kinds[4],
            &FieldKind::String(StringEncoding::Offset { index: Marker::UInt8, index_width: 1 })
        );
        assert_eq!(kinds[5].width(), 12);
        assert_eq!(kinds[6].width(), 2);
        assert_eq!(record_width(&schema), 4 + 1 + 4 + 1 + 1 + 12 + 2);
    }

    #[test]
    fn test_schema_errors() {
        let mut reader = Reader::new(b"{U\x01aS");
        assert!(matches!(read_schema(&mut reader, &DecodeOptions::default()), Err(DecodeError::UnexpectedEof { .. })));

        let mut reader = Reader::new(b"{U\x01aU");
        assert!(matches!(
            read_schema(&mut reader, &DecodeOptions::default()),
            Err(DecodeError::MalformedSchema { at: 5, .. })
        ));

        let mut reader = Reader::new(b"{U\x01a[dd");
        assert!(matches!(read_schema(&mut reader, &DecodeOptions::default()), Err(DecodeError::MalformedSchema { .. })));

        let mut reader = Reader::new(b"{U\x01aN}");
        assert!(matches!(
            read_schema(&mut reader, &DecodeOptions::default()),
            Err(DecodeError::MalformedSchema { at: 4, .. })
        ));

        let mut reader = Reader::new(b"[U\x01aU]");
        assert!(matches!(
            read_schema(&mut reader, &DecodeOptions::default()),
            Err(DecodeError::MalformedSchema { at: 0, .. })
        ));
    }

    #[test]
    fn test_dictionary_index_width() {
        assert_eq!(dictionary_index_width(3), 1);
        assert_eq!(dictionary_index_width(255), 1);
        assert_eq!(dictionary_index_width(256), 2);
        assert_eq!(dictionary_index_width(65_535), 2);
        assert_eq!(dictionary_index_width(65_536), 4);
    }

    #[test]
    fn test_fixed_width_string_field() {
        let set = soa(decode_le(b"[${U\x01sSU\x04}#U\x02testab\x00\x00").unwrap());
        assert_eq!(set.records[0].get("s"), Some(&s("test")));
        assert_eq!(set.records[1].get("s"), Some(&s("ab")));
    }

    #[test]
    fn test_dictionary_string_field() {
        let data = b"[${U\x01c[$S#U\x03U\x03redU\x05greenU\x04blue}#U\x01\x01";
        let set = soa(decode_le(data).unwrap());
        assert_eq!(set.records[0].get("c"), Some(&s("green")));
    }

    #[test]
    fn test_dictionary_index_out_of_range() {
        let data = b"[${U\x01c[$S#U\x01U\x01x}#U\x01\x05";
        assert_eq!(
            decode_le(data),
            Err(DecodeError::IndexOutOfRange { at: 19, table: "dictionary", index: 5, size: 1 })
        );
    }

    #[test]
    fn test_offset_string_field() {
        // two records, indices 1 and 0; offsets [0, 2, 5]; buffer "hiyou"
        let data = b"[${U\x01t[$U]}#U\x02\x01\x00\x00\x02\x05hiyouZ";
        let mut reader = Reader::new(data);
        let set = soa(crate::codec::value::decode_value(&mut reader, &DecodeOptions::default()).unwrap());
        assert_eq!(set.records[0].get("t"), Some(&s("you")));
        assert_eq!(set.records[1].get("t"), Some(&s("hi")));
        assert_eq!(reader.remaining(), b"Z");
    }

    #[test]
    fn test_offset_index_out_of_range() {
        let data = b"[${U\x01t[$U]}#U\x01\x01\x00\x02hi";
        assert!(matches!(
            decode_le(data),
            Err(DecodeError::IndexOutOfRange { table: "string offsets", index: 1, .. })
        ));
    }

    #[test]
    fn test_non_monotonic_offsets_fail() {
        let data = b"[${U\x01t[$U]}#U\x02\x00\x01\x00\x03\x01abc";
        assert!(matches!(
            decode_le(data),
            Err(DecodeError::IndexOutOfRange { table: "string buffer", .. })
        ));
    }

    #[test]
    fn test_row_and_column_major_agree() {
        let row = b"[${U\x01xUU\x01yI}#U\x02\x01\x0a\x00\x02\x14\x00";
        let col = b"{${U\x01xUU\x01yI}#U\x02\x01\x02\x0a\x00\x14\x00";
        let row = soa(decode_le(row).unwrap());
        let col = soa(decode_le(col).unwrap());
        assert_eq!(row.layout, SoaLayout::RowMajor);
        assert_eq!(col.layout, SoaLayout::ColumnMajor);
        assert_eq!(row.records, col.records);
        assert_eq!(row.records[1].get("y"), Some(&Value::Int(20)));
    }

    #[test]
    fn test_nested_struct_and_fixed_array() {
        let data = b"[${U\x01p{U\x01aUU\x01bT}U\x01v[UiF]}#U\x01\x07T\x09\xff\x00";
        let set = soa(decode_le(data).unwrap());
        let record = &set.records[0];
        let inner: Object = vec![
            ("a".to_string(), Value::UInt(7)),
            ("b".to_string(), Value::Bool(true)),
        ]
        .into_iter()
        .collect();
        assert_eq!(record.get("p"), Some(&Value::Object(inner)));
        assert_eq!(
            record.get("v"),
            Some(&Value::Array(vec![Value::UInt(9), Value::Int(-1), Value::Bool(false)]))
        );
    }

    #[test]
    fn test_shaped_count() {
        let data = b"[${U\x01xU}#[U\x02U\x02]\x01\x02\x03\x04";
        let set = soa(decode_le(data).unwrap());
        assert_eq!(set.dims, vec![2, 2]);
        assert_eq!(set.records.len(), 4);
    }

    #[test]
    fn test_missing_count_and_short_payload() {
        assert!(matches!(
            decode_le(b"[${U\x01xU}\x01"),
            Err(DecodeError::MalformedSchema { at: 8, .. })
        ));
        assert!(matches!(
            decode_le(b"[${U\x01xI}#U\x03\x01\x00"),
            Err(DecodeError::UnexpectedEof { at: 11, needed: 6, available: 2 })
        ));
    }

    #[test]
    fn test_zero_width_schema_rejected() {
        assert!(matches!(
            decode_le(b"[${U\x01xZ}#M\xff\xff\xff\xff\xff\xff\xff\x7f"),
            Err(DecodeError::MalformedSchema { .. })
        ));
        let set = soa(decode_le(b"[${U\x01xZ}#U\x00").unwrap());
        assert!(set.records.is_empty());
    }

    #[test]
    fn test_nested_schema_respects_max_depth() {
        let data = b"[${U\x01a{U\x01b{U\x01cU}}}#U\x01\x05";
        let set = soa(decode_le(data).unwrap());
        let c: Object = vec![("c".to_string(), Value::UInt(5))].into_iter().collect();
        let b: Object = vec![("b".to_string(), Value::Object(c))].into_iter().collect();
        assert_eq!(set.records[0].get("a"), Some(&Value::Object(b)));

        let shallow = DecodeOptions { max_depth: 2, ..DecodeOptions::default() };
        assert!(matches!(
            decode(data, &shallow),
            Err(DecodeError::DepthLimitExceeded { max: 2, .. })
        ));

        let mut reader = Reader::new(b"{U\x01a{U\x01bU}}");
        let one_level = DecodeOptions { max_depth: 1, ..DecodeOptions::default() };
        assert!(read_schema(&mut reader, &one_level).is_ok());
        let mut reader = Reader::new(b"{U\x01a{U\x01b{U\x01cU}}}");
        assert!(matches!(
            read_schema(&mut reader, &one_level),
            Err(DecodeError::DepthLimitExceeded { max: 1, .. })
        ));
    }
}
