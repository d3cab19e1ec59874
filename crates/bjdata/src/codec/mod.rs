//! Binary decoding for BJData / UBJSON.
//!
//! - [`marker_table`]: fixed-width marker widths and decode rules
//! - [`primitives`]: the byte cursor
//! - [`value`]: the recursive value decoder
//! - [`soa`]: structure-of-arrays schemas and records

pub mod marker_table;
pub mod primitives;
pub mod soa;
pub mod value;

pub use marker_table::{f16_to_f64, MarkerTable, ScalarCodec};
pub use primitives::{decode_text, Reader};
pub use soa::{decode_records, dictionary_index_width, read_schema};
pub use value::{decode, decode_value, DecodeOptions};
