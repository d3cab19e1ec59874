//! Default limits for decoding and rendering.
//!
//! The decoder reads untrusted input, so every size it acts on is either
//! checked against the remaining buffer or bounded by one of these values.

/// Containers with more items than this are previewed instead of shown in full.
pub const DEFAULT_MAX_ITEMS: usize = 100;

/// Strings longer than this (in characters) are collapsed when rendered.
pub const DEFAULT_MAX_STRING_LEN: usize = 200;

/// Number of values decoded into the sample of an oversized typed array.
pub const PREVIEW_SAMPLE_LEN: usize = 8;

/// Number of items shown when a preview is rendered.
pub const PREVIEW_SHOWN_LEN: usize = 4;

/// Raw bytes kept for the hex rendering of a truncated typed array.
pub const TRUNCATED_RAW_LEN: usize = 32;

/// Arrays with at most this many scalar items may be rendered on one line.
pub const INLINE_MAX_ITEMS: usize = 10;

/// An inline array must be narrower than this many columns.
pub const INLINE_MAX_WIDTH: usize = 80;

/// Maximum container nesting accepted by the decoder.
pub const MAX_DEPTH: usize = 512;
