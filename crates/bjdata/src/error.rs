//! Error types for BJData decoding.

use thiserror::Error;

/// Coarse classification of a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A read ran past the end of the buffer.
    UnexpectedEof,
    /// A type marker byte is not part of the format.
    UnknownMarker,
    /// A length, count or dimension is not a usable integer.
    InvalidLength,
    /// An SOA schema uses an unsupported marker or is not terminated.
    MalformedSchema,
    /// A dictionary or offset index points outside its table.
    IndexOutOfRange,
    /// Containers are nested deeper than the configured maximum.
    DepthLimit,
}

impl ErrorKind {
    /// Returns a short stable name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::UnexpectedEof => "unexpected-eof",
            ErrorKind::UnknownMarker => "unknown-marker",
            ErrorKind::InvalidLength => "invalid-length",
            ErrorKind::MalformedSchema => "malformed-schema",
            ErrorKind::IndexOutOfRange => "index-out-of-range",
            ErrorKind::DepthLimit => "depth-limit",
        }
    }
}

/// Error during binary decoding.
///
/// Every variant records the absolute byte offset at which the failing read
/// began, so callers can show the bytes around it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("EOF at {at}, need {needed}, have {available}")]
    UnexpectedEof {
        at: usize,
        needed: usize,
        available: usize,
    },

    #[error("unknown marker {} at {at}", describe_byte(.byte))]
    UnknownMarker { byte: u8, at: usize },

    #[error("expected int marker, got {} at {at}", describe_byte(.marker))]
    ExpectedInteger { marker: u8, at: usize },

    #[error("invalid length {value} at {at}")]
    InvalidLength { value: i128, at: usize },

    #[error("malformed SOA schema at {at}: {context}")]
    MalformedSchema { at: usize, context: &'static str },

    #[error("{table} index {index} out of range (size: {size}) at {at}")]
    IndexOutOfRange {
        at: usize,
        table: &'static str,
        index: i128,
        size: usize,
    },

    #[error("nesting depth exceeds {max} at {at}")]
    DepthLimitExceeded { at: usize, max: usize },
}

impl DecodeError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::UnexpectedEof { .. } => ErrorKind::UnexpectedEof,
            DecodeError::UnknownMarker { .. } => ErrorKind::UnknownMarker,
            DecodeError::ExpectedInteger { .. } | DecodeError::InvalidLength { .. } => {
                ErrorKind::InvalidLength
            }
            DecodeError::MalformedSchema { .. } => ErrorKind::MalformedSchema,
            DecodeError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            DecodeError::DepthLimitExceeded { .. } => ErrorKind::DepthLimit,
        }
    }

    /// Returns the byte offset at which the failing read began.
    pub fn offset(&self) -> usize {
        match *self {
            DecodeError::UnexpectedEof { at, .. }
            | DecodeError::UnknownMarker { at, .. }
            | DecodeError::ExpectedInteger { at, .. }
            | DecodeError::InvalidLength { at, .. }
            | DecodeError::MalformedSchema { at, .. }
            | DecodeError::IndexOutOfRange { at, .. }
            | DecodeError::DepthLimitExceeded { at, .. } => at,
        }
    }
}

/// Printable form of a marker byte: the character if it is visible ASCII,
/// otherwise its hex value.
fn describe_byte(byte: &u8) -> String {
    let byte = *byte;
    if byte.is_ascii_graphic() {
        format!("'{}'", byte as char)
    } else {
        format!("0x{:02x}", byte)
    }
}
