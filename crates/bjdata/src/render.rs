//! Bounded text rendering of decoded values.
//!
//! Output size is bounded by [`RenderOptions`]: long strings collapse to a
//! prefix and suffix, and containers over the item budget collapse to a
//! short preview annotated with their full size.

use std::fmt::Write;

use crate::limits::{
    DEFAULT_MAX_ITEMS, DEFAULT_MAX_STRING_LEN, INLINE_MAX_ITEMS, INLINE_MAX_WIDTH,
    PREVIEW_SHOWN_LEN,
};
use crate::model::{ArrayPreview, NdArray, Object, PreviewKind, Shape, SoaRecordSet, Value};

/// Limits applied while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Arrays, objects and record sets with more entries are previewed.
    pub max_items: usize,
    /// Strings with more characters are collapsed.
    pub max_string_len: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            max_string_len: DEFAULT_MAX_STRING_LEN,
        }
    }
}

/// Renders a value as text, starting at indent level 0.
pub fn render(value: &Value, options: &RenderOptions) -> String {
    render_at(value, options, 0)
}

/// Renders a value whose first line sits at `indent` levels (two spaces each).
///
/// Nested lines and closing brackets are indented relative to `indent`.
pub fn render_at(value: &Value, options: &RenderOptions, indent: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(v) => v.to_string(),
        Value::UInt(v) => v.to_string(),
        Value::Float(v) => format_float(*v),
        Value::Byte(v) => v.to_string(),
        Value::Char(c) => quote(&c.to_string(), options.max_string_len),
        Value::String(s) => quote(s, options.max_string_len),
        Value::HighPrec(s) => quote(&format!("HighPrec({})", s), options.max_string_len),
        Value::Array(items) => render_array(items, options, indent),
        Value::Object(object) => render_object(object, options, indent),
        Value::NdArray(nd) => render_nd(nd, options),
        Value::Preview(preview) => render_preview(preview, options),
        Value::Soa(set) => render_soa(set, options, indent),
    }
}

fn render_array(items: &[Value], options: &RenderOptions, indent: usize) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }
    if items.len() > options.max_items {
        return format!(
            "<array[{}]: [{}, ...]>",
            items.len(),
            join(&items[..PREVIEW_SHOWN_LEN.min(items.len())], options)
        );
    }
    if items.len() <= INLINE_MAX_ITEMS && items.iter().all(Value::is_scalar) {
        let line = format!("[{}]", join(items, options));
        if line.chars().count() < INLINE_MAX_WIDTH {
            return line;
        }
    }

    let pad = "  ".repeat(indent);
    let mut out = String::from("[\n");
    for item in items {
        let _ = writeln!(out, "{}  {},", pad, render_at(item, options, indent + 1));
    }
    out.push_str(&pad);
    out.push(']');
    out
}

fn render_object(object: &Object, options: &RenderOptions, indent: usize) -> String {
    if object.is_empty() {
        return "{}".to_string();
    }
    if object.len() > options.max_items {
        let shown: Vec<String> = object
            .iter()
            .take(PREVIEW_SHOWN_LEN)
            .map(|(k, v)| format!("\"{}\": {}", escape(k), render_at(v, options, 0)))
            .collect();
        return format!("<object[{} keys]: {{ {}, ... }}>", object.len(), shown.join(", "));
    }

    let pad = "  ".repeat(indent);
    let mut out = String::from("{\n");
    for (key, value) in object.iter() {
        let _ = writeln!(
            out,
            "{}  \"{}\": {},",
            pad,
            escape(key),
            render_at(value, options, indent + 1)
        );
    }
    out.push_str(&pad);
    out.push('}');
    out
}

fn render_nd(nd: &NdArray, options: &RenderOptions) -> String {
    let head = format!(
        "{}{} {}",
        nd.elem.map_or("any", |m| m.name()),
        format_dims(&nd.dims),
        nd.order.label()
    );
    if nd.data.len() > options.max_items {
        let shown = &nd.data[..PREVIEW_SHOWN_LEN.min(nd.data.len())];
        return format!("<{}: [{}, ...] ({} items)>", head, join(shown, options), nd.data.len());
    }
    format!("<{}: [{}]>", head, join(&nd.data, options))
}

fn render_preview(preview: &ArrayPreview, options: &RenderOptions) -> String {
    let head = match &preview.shape {
        Shape::Count(n) => format!("{}[{}]", preview.elem.name(), n),
        Shape::Dims { dims, order } => {
            format!("{}{} {}", preview.elem.name(), format_dims(dims), order.label())
        }
    };
    match &preview.kind {
        PreviewKind::Oversized => {
            let shown = &preview.sample[..PREVIEW_SHOWN_LEN.min(preview.sample.len())];
            format!(
                "<{}: [{}]... ({}B)>",
                head,
                join(shown, options),
                preview.declared_bytes
            )
        }
        PreviewKind::Truncated { available, raw } => format!(
            "<{}: {}... (truncated: {}B of {}B)>",
            head,
            hex(raw),
            available,
            preview.declared_bytes
        ),
    }
}

fn render_soa(set: &SoaRecordSet, options: &RenderOptions, indent: usize) -> String {
    let header = format!(
        "<soa {} dims={} records={}>",
        set.layout.label(),
        format_dims(&set.dims),
        set.records.len()
    );
    if set.records.is_empty() {
        return format!("{} []", header);
    }

    let truncated = set.records.len() > options.max_items;
    let shown = if truncated { PREVIEW_SHOWN_LEN.min(set.records.len()) } else { set.records.len() };
    let pad = "  ".repeat(indent);
    let mut out = format!("{} [\n", header);
    for record in &set.records[..shown] {
        let _ = writeln!(out, "{}  {},", pad, render_object(record, options, indent + 1));
    }
    if truncated {
        let _ = writeln!(out, "{}  ... ({} more)", pad, set.records.len() - shown);
    }
    out.push_str(&pad);
    out.push(']');
    out
}

fn join(items: &[Value], options: &RenderOptions) -> String {
    items
        .iter()
        .map(|v| render_at(v, options, 0))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_dims(dims: &[usize]) -> String {
    let parts: Vec<String> = dims.iter().map(usize::to_string).collect();
    format!("[{}]", parts.join(", "))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{:02x}", b);
        out
    })
}

/// Formats a float the way a scripting `repr` does: integral values keep a
/// trailing `.0`, non-finite values are `inf`, `-inf` and `nan`.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v.is_infinite() {
        (if v > 0.0 { "inf" } else { "-inf" }).to_string()
    } else if v != 0.0 && (v.abs() >= 1e16 || v.abs() < 1e-4) {
        let sci = format!("{:e}", v);
        match sci.split_once('e') {
            Some((mantissa, exp)) => match exp.strip_prefix('-') {
                Some(digits) => format!("{}e-{:0>2}", mantissa, digits),
                None => format!("{}e+{:0>2}", mantissa, exp),
            },
            None => sci,
        }
    } else if v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}

/// Collapses `s` to `prefix...suffix (N chars)` when it exceeds `max` chars.
pub fn truncate_str(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        return s.to_string();
    }
    let half = max / 2;
    let prefix: String = s.chars().take(half).collect();
    let suffix: String = s.chars().skip(len - half).collect();
    format!("{}...{} ({} chars)", prefix, suffix, len)
}

fn quote(s: &str, max: usize) -> String {
    format!("\"{}\"", escape(&truncate_str(s, max)))
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:04x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
