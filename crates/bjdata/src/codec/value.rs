//! Value decoding for BJData.
//!
//! Recursive descent over a [`Reader`]. Typed arrays take a batch path and
//! degrade to an [`ArrayPreview`] when they are larger than the item budget
//! or longer than the bytes left in the buffer.

use tracing::{debug, trace};

use crate::codec::primitives::{Reader, decode_text};
use crate::codec::soa::read_soa;
use crate::error::DecodeError;
use crate::limits::{DEFAULT_MAX_ITEMS, MAX_DEPTH, PREVIEW_SAMPLE_LEN, TRUNCATED_RAW_LEN};
use crate::model::{
    ArrayPreview, ByteOrder, MajorOrder, Marker, NdArray, Object, PreviewKind, Shape, SoaLayout,
    Value,
};

/// Options for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Byte order of numeric payloads.
    pub byte_order: ByteOrder,
    /// Typed arrays with more elements than this become previews.
    pub max_items: usize,
    /// Maximum container nesting.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::Little,
            max_items: DEFAULT_MAX_ITEMS,
            max_depth: MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Creates default options (little-endian, default item budget).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the byte order.
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    /// Sets the typed-array item budget.
    pub fn max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Decodes the first value in `input`.
///
/// Trailing bytes are ignored; use a [`Reader`] with [`decode_value`] to find
/// out how much was consumed.
pub fn decode(input: &[u8], options: &DecodeOptions) -> Result<Value, DecodeError> {
    let mut reader = Reader::with_byte_order(input, options.byte_order);
    decode_value(&mut reader, options)
}

/// Decodes one value at the reader's position.
///
/// On success the reader sits on the first byte after the value.
pub fn decode_value(reader: &mut Reader<'_>, options: &DecodeOptions) -> Result<Value, DecodeError> {
    loop {
        let at = reader.position();
        let marker = reader.read_byte()?;
        trace!(offset = at, marker = ?(marker as char), depth = reader.depth(), "marker");
        if marker == Marker::NoOp.as_u8() {
            continue;
        }
        return decode_payload(reader, marker, at, options);
    }
}

/// Decodes the payload that follows `marker`, which was read at `at`.
pub(crate) fn decode_payload(
    reader: &mut Reader<'_>,
    marker: u8,
    at: usize,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    if let Some(codec) = reader.table().get(marker) {
        return reader.read_fixed(codec);
    }
    match Marker::from_u8(marker) {
        Some(Marker::String) => Ok(Value::String(reader.read_string()?)),
        Some(Marker::HighPrec) => Ok(Value::HighPrec(reader.read_string()?)),
        Some(Marker::ArrayStart) => {
            reader.descend(options.max_depth)?;
            let value = read_array(reader, options)?;
            reader.ascend();
            Ok(value)
        }
        Some(Marker::ObjectStart) => {
            reader.descend(options.max_depth)?;
            let value = read_object(reader, options)?;
            reader.ascend();
            Ok(value)
        }
        _ => Err(DecodeError::UnknownMarker { byte: marker, at }),
    }
}

// =============================================================================
// CONTAINER HEADERS
// =============================================================================

/// Element type declared by `$`, with the offset of the type byte.
#[derive(Debug, Clone, Copy)]
struct ElementType {
    marker: u8,
    at: usize,
}

fn read_element_type(reader: &mut Reader<'_>) -> Result<Option<ElementType>, DecodeError> {
    if reader.peek() != Some(Marker::Type.as_u8()) {
        return Ok(None);
    }
    reader.read_byte()?;
    let at = reader.position();
    let marker = reader.read_byte()?;
    trace!(offset = at, elem = ?(marker as char), "type");
    Ok(Some(ElementType { marker, at }))
}

/// Reads an optional `#` annotation: a flat count or an N-d shape.
///
/// `#[dims]` is row-major; `#[[dims]]` is column-major.
pub(crate) fn read_count(reader: &mut Reader<'_>) -> Result<Option<Shape>, DecodeError> {
    if reader.peek() != Some(Marker::Count.as_u8()) {
        return Ok(None);
    }
    reader.read_byte()?;
    if reader.peek() != Some(Marker::ArrayStart.as_u8()) {
        let count = reader.read_length()?;
        trace!(count, "count");
        return Ok(Some(Shape::Count(count)));
    }
    reader.read_byte()?;
    let order = if reader.peek() == Some(Marker::ArrayStart.as_u8()) {
        reader.read_byte()?;
        MajorOrder::Column
    } else {
        MajorOrder::Row
    };
    let dims = read_dims(reader)?;
    if order == MajorOrder::Column && reader.peek() == Some(Marker::ArrayEnd.as_u8()) {
        reader.read_byte()?;
    }
    trace!(?dims, order = order.label(), "dims");
    Ok(Some(Shape::Dims { dims, order }))
}

/// Reads the body of a dimension vector (the opening `[` is consumed).
fn read_dims(reader: &mut Reader<'_>) -> Result<Vec<usize>, DecodeError> {
    let elem = read_element_type(reader)?;
    let count = match reader.peek() {
        Some(b'#') => {
            reader.read_byte()?;
            Some(reader.read_length()?)
        }
        _ => None,
    };

    match (elem, count) {
        (Some(elem), Some(n)) => {
            let mut dims = Vec::with_capacity(n.min(reader.remaining_len()));
            for _ in 0..n {
                dims.push(reader.read_length_payload(elem.marker, elem.at)?);
            }
            Ok(dims)
        }
        (None, Some(n)) => {
            let mut dims = Vec::with_capacity(n.min(reader.remaining_len()));
            for _ in 0..n {
                dims.push(reader.read_length()?);
            }
            Ok(dims)
        }
        (_, None) => {
            let mut dims = Vec::new();
            while reader.peek() != Some(Marker::ArrayEnd.as_u8()) {
                dims.push(reader.read_length()?);
            }
            reader.read_byte()?;
            Ok(dims)
        }
    }
}

// =============================================================================
// ARRAYS
// =============================================================================

fn read_array(reader: &mut Reader<'_>, options: &DecodeOptions) -> Result<Value, DecodeError> {
    let elem = read_element_type(reader)?;
    if let Some(ElementType { marker: b'{', .. }) = elem {
        return read_soa(reader, SoaLayout::RowMajor, options);
    }

    match (elem, read_count(reader)?) {
        (Some(elem), Some(shape)) => read_typed_array(reader, elem, shape, options),
        (None, Some(shape)) => {
            let total = shape.total();
            let mut items = Vec::with_capacity(total.min(reader.remaining_len()));
            for _ in 0..total {
                items.push(decode_value(reader, options)?);
            }
            Ok(wrap_shaped(None, shape, items))
        }
        (_, None) => {
            let mut items = Vec::new();
            loop {
                match reader.peek() {
                    Some(b']') => {
                        reader.read_byte()?;
                        break;
                    }
                    Some(b'N') => {
                        reader.read_byte()?;
                    }
                    _ => items.push(decode_value(reader, options)?),
                }
            }
            trace!(offset = reader.position(), len = items.len(), "array end");
            Ok(Value::Array(items))
        }
    }
}

/// Reads `shape.total()` elements of one declared type.
fn read_typed_array(
    reader: &mut Reader<'_>,
    elem: ElementType,
    shape: Shape,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    let Some(codec) = reader.table().get(elem.marker) else {
        // Variable-width element type: each element is a marker-less payload.
        let total = shape.total();
        let mut items = Vec::with_capacity(total.min(reader.remaining_len()));
        for _ in 0..total {
            items.push(decode_payload(reader, elem.marker, elem.at, options)?);
        }
        return Ok(wrap_shaped(Marker::from_u8(elem.marker), shape, items));
    };

    let total = shape.total();
    let declared_bytes = total.saturating_mul(codec.width);
    let available = reader.remaining_len();

    if declared_bytes > available {
        let rest = reader.read_rest();
        debug!(
            elem = codec.marker.name(),
            declared_bytes, available, "typed array runs past end of buffer"
        );
        return Ok(Value::Preview(ArrayPreview {
            elem: codec.marker,
            shape,
            sample: Vec::new(),
            declared_bytes,
            kind: PreviewKind::Truncated {
                available,
                raw: rest[..rest.len().min(TRUNCATED_RAW_LEN)].to_vec(),
            },
        }));
    }

    if total > options.max_items {
        let n = total.min(PREVIEW_SAMPLE_LEN);
        let mut sample = Vec::with_capacity(n);
        for _ in 0..n {
            sample.push(reader.read_fixed(codec)?);
        }
        reader.skip((total - n) * codec.width)?;
        debug!(elem = codec.marker.name(), total, "typed array over item budget");
        return Ok(Value::Preview(ArrayPreview {
            elem: codec.marker,
            shape,
            sample,
            declared_bytes,
            kind: PreviewKind::Oversized,
        }));
    }

    // Zero-width elements (`$Z`, `$T`, `$F`) take no payload bytes, so their
    // count is bounded by the buffer length instead.
    let budget = available.max(DEFAULT_MAX_ITEMS);
    if codec.width == 0 && total > budget {
        return Err(DecodeError::InvalidLength { value: total as i128, at: elem.at });
    }

    let mut items = Vec::with_capacity(total.min(budget));
    for _ in 0..total {
        items.push(reader.read_fixed(codec)?);
    }
    Ok(wrap_shaped(Some(codec.marker), shape, items))
}

fn wrap_shaped(elem: Option<Marker>, shape: Shape, data: Vec<Value>) -> Value {
    match shape {
        Shape::Count(_) => Value::Array(data),
        Shape::Dims { dims, order } => Value::NdArray(NdArray { elem, dims, order, data }),
    }
}

// =============================================================================
// OBJECTS
// =============================================================================

fn read_object(reader: &mut Reader<'_>, options: &DecodeOptions) -> Result<Value, DecodeError> {
    let elem = read_element_type(reader)?;
    if let Some(ElementType { marker: b'{', .. }) = elem {
        return read_soa(reader, SoaLayout::ColumnMajor, options);
    }

    let count = read_count(reader)?.map(|shape| shape.total());
    let mut object = Object::with_capacity(count.unwrap_or(0).min(reader.remaining_len()));
    match count {
        Some(n) => {
            for _ in 0..n {
                read_entry(reader, &mut object, elem, options)?;
            }
        }
        None => {
            while reader.peek() != Some(Marker::ObjectEnd.as_u8()) {
                read_entry(reader, &mut object, elem, options)?;
            }
            reader.read_byte()?;
            trace!(offset = reader.position(), len = object.len(), "object end");
        }
    }
    Ok(Value::Object(object))
}

fn read_entry(
    reader: &mut Reader<'_>,
    object: &mut Object,
    elem: Option<ElementType>,
    options: &DecodeOptions,
) -> Result<(), DecodeError> {
    let key_len = reader.read_length()?;
    let key = decode_text(reader.read_bytes(key_len)?);
    trace!(offset = reader.position(), key = %key, "key");
    let value = match elem {
        Some(elem) => match reader.table().get(elem.marker) {
            Some(codec) => reader.read_fixed(codec)?,
            None => decode_payload(reader, elem.marker, elem.at, options)?,
        },
        None => decode_value(reader, options)?,
    };
    object.insert(key, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SoaRecordSet;

    fn decode_le(bytes: &[u8]) -> Result<Value, DecodeError> {
        decode(bytes, &DecodeOptions::default())
    }

    fn obj(entries: Vec<(&str, Value)>) -> Object {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_null_advances_one_byte() {
        let data = [b'Z', b'T'];
        let mut reader = Reader::new(&data);
        let opts = DecodeOptions::default();
        assert_eq!(decode_value(&mut reader, &opts).unwrap(), Value::Null);
        assert_eq!(reader.position(), 1);
        assert_eq!(decode_value(&mut reader, &opts).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_noop_is_skipped() {
        assert_eq!(decode_le(b"NNF").unwrap(), Value::Bool(false));
        assert_eq!(
            decode_le(b"[NU\x01NU\x02N]").unwrap(),
            Value::Array(vec![Value::UInt(1), Value::UInt(2)])
        );
    }

    #[test]
    fn test_uint8_typed_array() {
        let data = [0x5b, 0x24, 0x55, 0x23, 0x55, 0x03, 0x01, 0x02, 0x03];
        assert_eq!(
            decode_le(&data).unwrap(),
            Value::Array(vec![Value::UInt(1), Value::UInt(2), Value::UInt(3)])
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(decode_le(b"SU\x04test").unwrap(), Value::String("test".to_string()));
        assert_eq!(decode_le(b"SU\x00").unwrap(), Value::String(String::new()));
        assert_eq!(decode_le(b"HU\x041.25").unwrap(), Value::HighPrec("1.25".to_string()));
        assert_eq!(decode_le(b"SU\x02\xff\xfe").unwrap(), Value::String("\u{ff}\u{fe}".to_string()));
        assert_eq!(decode_le(b"CA").unwrap(), Value::Char('A'));
        assert_eq!(decode_le(b"B\x80").unwrap(), Value::Byte(0x80));
    }

    #[test]
    fn test_counted_heterogeneous_array() {
        assert_eq!(
            decode_le(b"[#U\x03ZTSU\x01a").unwrap(),
            Value::Array(vec![Value::Null, Value::Bool(true), Value::String("a".to_string())])
        );
    }

    #[test]
    fn test_typed_string_array() {
        assert_eq!(
            decode_le(b"[$S#U\x02U\x01aU\x02bc").unwrap(),
            Value::Array(vec![Value::String("a".to_string()), Value::String("bc".to_string())])
        );
    }

    #[test]
    fn test_object_order_and_duplicates() {
        let data = b"{U\x01bU\x01U\x01aU\x02U\x01bU\x03}";
        let expected = obj(vec![("b", Value::UInt(3)), ("a", Value::UInt(2))]);
        assert_eq!(decode_le(data).unwrap(), Value::Object(expected));
    }

    #[test]
    fn test_typed_counted_object() {
        let data = b"{$i#U\x02U\x01x\xffU\x01y\x05";
        let expected = obj(vec![("x", Value::Int(-1)), ("y", Value::Int(5))]);
        assert_eq!(decode_le(data).unwrap(), Value::Object(expected));
    }

    #[test]
    fn test_nd_array_row_and_column_major() {
        let row = b"[$U#[U\x02U\x03]\x01\x02\x03\x04\x05\x06";
        match decode_le(row).unwrap() {
            Value::NdArray(nd) => {
                assert_eq!(nd.dims, vec![2, 3]);
                assert_eq!(nd.order, MajorOrder::Row);
                assert_eq!(nd.elem, Some(Marker::UInt8));
                assert_eq!(nd.data.len(), 6);
            }
            other => panic!("expected NdArray, got {:?}", other),
        }

        let col = b"[$U#[[U\x02U\x02]]\x01\x02\x03\x04Z";
        let mut reader = Reader::new(col);
        match decode_value(&mut reader, &DecodeOptions::default()).unwrap() {
            Value::NdArray(nd) => {
                assert_eq!(nd.dims, vec![2, 2]);
                assert_eq!(nd.order, MajorOrder::Column);
            }
            other => panic!("expected NdArray, got {:?}", other),
        }
        assert_eq!(reader.remaining(), b"Z");
    }

    #[test]
    fn test_typed_dims() {
        let data = b"[$U#[$U#U\x02\x02\x02\x01\x02\x03\x04";
        match decode_le(data).unwrap() {
            Value::NdArray(nd) => {
                assert_eq!(nd.dims, vec![2, 2]);
                assert_eq!(nd.data, vec![Value::UInt(1), Value::UInt(2), Value::UInt(3), Value::UInt(4)]);
            }
            other => panic!("expected NdArray, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_typed_array_is_previewed_and_skipped() {
        let mut data = b"[$U#U\x0a".to_vec();
        data.extend(0u8..10);
        data.push(b'T');
        let opts = DecodeOptions::default().max_items(4);
        let mut reader = Reader::new(&data);
        match decode_value(&mut reader, &opts).unwrap() {
            Value::Preview(preview) => {
                assert_eq!(preview.kind, PreviewKind::Oversized);
                assert_eq!(preview.shape, Shape::Count(10));
                assert_eq!(preview.declared_bytes, 10);
                assert_eq!(preview.sample.len(), PREVIEW_SAMPLE_LEN);
                assert_eq!(preview.sample[7], Value::UInt(7));
            }
            other => panic!("expected Preview, got {:?}", other),
        }
        assert_eq!(decode_value(&mut reader, &opts).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_item_budget_boundary() {
        let opts = DecodeOptions::default().max_items(3);
        let full = decode(b"[$U#U\x03\x01\x02\x03", &opts).unwrap();
        assert!(matches!(full, Value::Array(ref v) if v.len() == 3));
        let preview = decode(b"[$U#U\x04\x01\x02\x03\x04", &opts).unwrap();
        assert!(matches!(preview, Value::Preview(_)));
    }

    #[test]
    fn test_truncated_typed_array_is_previewed() {
        let data = b"[$d#U\x0a\x00\x00\x80\x3f";
        match decode_le(data).unwrap() {
            Value::Preview(preview) => {
                assert_eq!(preview.declared_bytes, 40);
                assert_eq!(
                    preview.kind,
                    PreviewKind::Truncated { available: 4, raw: vec![0x00, 0x00, 0x80, 0x3f] }
                );
            }
            other => panic!("expected Preview, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_marker_offset() {
        assert_eq!(
            decode_le(b"[U\x01x]"),
            Err(DecodeError::UnknownMarker { byte: b'x', at: 3 })
        );
    }

    #[test]
    fn test_eof_mid_scalar() {
        assert_eq!(
            decode_le(b"l\x01\x02"),
            Err(DecodeError::UnexpectedEof { at: 1, needed: 4, available: 2 })
        );
    }

    #[test]
    fn test_unterminated_array() {
        assert!(matches!(
            decode_le(b"[U\x01"),
            Err(DecodeError::UnexpectedEof { at: 3, .. })
        ));
    }

    #[test]
    fn test_huge_count_does_not_preallocate() {
        let data = b"[#M\xff\xff\xff\xff\xff\xff\xff\x7fZ";
        assert!(matches!(decode_le(data), Err(DecodeError::UnexpectedEof { .. })));
    }

    #[test]
    fn test_zero_width_typed_array_is_bounded() {
        let count = u64::MAX / 2;
        let mut data = b"[$Z#M".to_vec();
        data.extend_from_slice(&count.to_le_bytes());

        let unbounded = DecodeOptions::default().max_items(usize::MAX);
        assert_eq!(
            decode(&data, &unbounded),
            Err(DecodeError::InvalidLength { value: count as i128, at: 2 })
        );
        assert!(matches!(
            decode_le(&data).unwrap(),
            Value::Preview(ArrayPreview { kind: PreviewKind::Oversized, .. })
        ));
        assert_eq!(
            decode(b"[$T#U\x03", &unbounded).unwrap(),
            Value::Array(vec![Value::Bool(true); 3])
        );
    }

    #[test]
    fn test_depth_limit() {
        let data = vec![b'['; 64];
        let opts = DecodeOptions { max_depth: 16, ..DecodeOptions::default() };
        assert!(matches!(
            decode(&data, &opts),
            Err(DecodeError::DepthLimitExceeded { max: 16, .. })
        ));
    }

    #[test]
    fn test_big_endian_mode() {
        let opts = DecodeOptions::default().byte_order(ByteOrder::Big);
        assert_eq!(decode(b"I\x01\x00", &opts).unwrap(), Value::Int(256));
    }

    #[test]
    fn test_soa_dispatch_from_object() {
        let data = b"{${U\x01xU}#U\x02\x07\x08";
        match decode_le(data).unwrap() {
            Value::Soa(SoaRecordSet { layout, records, .. }) => {
                assert_eq!(layout, SoaLayout::ColumnMajor);
                assert_eq!(records.len(), 2);
                assert_eq!(records[1].get("x"), Some(&Value::UInt(8)));
            }
            other => panic!("expected Soa, got {:?}", other),
        }
    }
}
