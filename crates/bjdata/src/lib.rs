//! BJData / UBJSON: bounded decoding and text projection of binary JSON.
//!
//! This crate decodes BJData (Draft 3, little-endian) and UBJSON / BJData
//! Draft 1 (big-endian) buffers into a [`Value`] tree, including typed and
//! N-dimensional arrays and the structure-of-arrays (SOA) extension, and
//! renders that tree as bounded text.
//!
//! # Quick Start
//!
//! ```rust
//! use bjdata::{decode, render, DecodeOptions, RenderOptions, Value};
//!
//! // [$U#U3 1 2 3]
//! let bytes = [b'[', b'$', b'U', b'#', b'U', 3, 1, 2, 3];
//! let value = decode(&bytes, &DecodeOptions::default()).unwrap();
//! assert_eq!(value, Value::Array(vec![Value::UInt(1), Value::UInt(2), Value::UInt(3)]));
//! assert_eq!(render(&value, &RenderOptions::default()), "[1, 2, 3]");
//! ```
//!
//! # Modules
//!
//! - [`model`]: Markers, the value tree and SOA schema types
//! - [`codec`]: Marker tables, the byte cursor, value and SOA decoding
//! - [`render`]: Bounded text rendering
//! - [`error`]: Error types
//! - [`limits`]: Default budgets and nesting limits
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Declared lengths are checked against the remaining buffer before allocating
//! - Typed arrays over the item budget are skipped, keeping only a small sample
//! - Container nesting is bounded
//! - Out-of-range dictionary and offset indices are errors, never panics

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod render;

// Re-export commonly used types at crate root
pub use codec::{decode, decode_records, decode_value, read_schema, DecodeOptions, Reader};
pub use error::{DecodeError, ErrorKind};
pub use model::{
    ArrayPreview, ByteOrder, FieldKind, MajorOrder, Marker, NdArray, Object, PreviewKind, Shape,
    SoaField, SoaLayout, SoaRecordSet, StringEncoding, Value,
};
pub use render::{render, render_at, RenderOptions};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
