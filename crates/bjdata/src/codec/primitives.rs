//! Byte cursor over a BJData buffer.
//!
//! The cursor only moves forward; `peek` is the only look-ahead.

use crate::codec::marker_table::{MarkerTable, ScalarCodec};
use crate::error::DecodeError;
use crate::model::{ByteOrder, Value};

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides bounds-checked reads of markers,
/// fixed-width payloads and length-prefixed strings.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    table: &'static MarkerTable,
    depth: usize,
}

impl<'a> Reader<'a> {
    /// Creates a little-endian reader.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_byte_order(data, ByteOrder::Little)
    }

    /// Creates a reader for the given byte order.
    pub fn with_byte_order(data: &'a [u8], order: ByteOrder) -> Self {
        Self {
            data,
            pos: 0,
            table: MarkerTable::for_order(order),
            depth: 0,
        }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the marker table in use.
    pub fn table(&self) -> &'static MarkerTable {
        self.table
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Returns the next byte without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = self.peek().ok_or(DecodeError::UnexpectedEof {
            at: self.pos,
            needed: 1,
            available: 0,
        })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(DecodeError::UnexpectedEof {
                at: self.pos,
                needed: n,
                available: self.remaining_len(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Advances past n bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.read_bytes(n).map(|_| ())
    }

    /// Consumes and returns everything that is left.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = self.remaining();
        self.pos = self.data.len();
        rest
    }

    /// Reads the payload of a fixed-width marker.
    #[inline]
    pub fn read_fixed(&mut self, codec: ScalarCodec) -> Result<Value, DecodeError> {
        let bytes = self.read_bytes(codec.width)?;
        Ok(self.table.decode(codec, bytes))
    }

    /// Reads an integer: marker byte followed by its payload.
    pub fn read_int(&mut self) -> Result<i128, DecodeError> {
        let at = self.pos;
        let marker = self.read_byte()?;
        self.read_int_payload(marker, at)
    }

    /// Reads the payload of integer marker `marker` found at `at`.
    pub fn read_int_payload(&mut self, marker: u8, at: usize) -> Result<i128, DecodeError> {
        let codec = self
            .table
            .get(marker)
            .filter(ScalarCodec::is_integer)
            .ok_or(DecodeError::ExpectedInteger { marker, at })?;
        let bytes = self.read_bytes(codec.width)?;
        self.table
            .decode_integer(codec, bytes)
            .ok_or(DecodeError::ExpectedInteger { marker, at })
    }

    /// Reads a non-negative integer usable as a length or count.
    pub fn read_length(&mut self) -> Result<usize, DecodeError> {
        let at = self.pos;
        let marker = self.read_byte()?;
        self.read_length_payload(marker, at)
    }

    /// Reads the payload of integer marker `marker` as a length.
    pub fn read_length_payload(&mut self, marker: u8, at: usize) -> Result<usize, DecodeError> {
        let value = self.read_int_payload(marker, at)?;
        usize::try_from(value).map_err(|_| DecodeError::InvalidLength { value, at })
    }

    /// Reads a length-prefixed string (integer marker, length, raw bytes).
    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        let len = self.read_length()?;
        let bytes = self.read_bytes(len)?;
        Ok(decode_text(bytes))
    }

    /// Enters a nested container, failing past `max` levels.
    pub fn descend(&mut self, max: usize) -> Result<(), DecodeError> {
        if self.depth >= max {
            return Err(DecodeError::DepthLimitExceeded { at: self.pos, max });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leaves a nested container.
    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Current container nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Decodes text as UTF-8, falling back to Latin-1 for invalid sequences.
///
/// Never fails: every byte maps to some character.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
