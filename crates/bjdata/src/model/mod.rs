//! Data model types for BJData.
//!
//! - Markers and byte order
//! - Values (the decoded tree)
//! - SOA schemas and record sets

pub mod marker;
pub mod soa;
pub mod value;

pub use marker::{ByteOrder, Marker};
pub use soa::{record_width, FieldKind, SoaField, SoaLayout, SoaRecordSet, StringEncoding};
pub use value::{element_count, ArrayPreview, MajorOrder, NdArray, Object, PreviewKind, Shape, Value};
