//! Hex dumps for `--debug` and for the context around a decode error.

use std::fmt::Write;

const BYTES_PER_LINE: usize = 16;

/// Bytes shown before an error offset.
pub const WINDOW_BEFORE: usize = 32;
/// Bytes shown from an error offset onward.
pub const WINDOW_AFTER: usize = 64;

/// Formats `data[start..end]` as `  0016: 5b2455...  [$U..` lines.
pub fn lines(data: &[u8], start: usize, end: usize) -> Vec<String> {
    let end = end.min(data.len());
    if start >= end {
        return Vec::new();
    }
    data[start..end]
        .chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(i, chunk)| {
            let mut line = format!("  {:04}: ", start + i * BYTES_PER_LINE);
            for b in chunk {
                let _ = write!(line, "{:02x}", b);
            }
            line.push_str("  ");
            line.extend(chunk.iter().map(|&b| printable(b)));
            line
        })
        .collect()
}

/// Byte range `[offset - 32, offset + 64)` clamped to a buffer of `len` bytes.
pub fn window(len: usize, offset: usize) -> (usize, usize) {
    let start = offset.saturating_sub(WINDOW_BEFORE).min(len);
    let end = offset.saturating_add(WINDOW_AFTER).min(len);
    (start, end)
}

fn printable(b: u8) -> char {
    if (32..127).contains(&b) { b as char } else { '.' }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        let data: Vec<u8> = (0x41..0x41 + 20).collect();
        let out = lines(&data, 0, data.len());
        assert_eq!(out.len(), 2);
        assert_eq!(
            out[0],
            "  0000: 4142434445464748494a4b4c4d4e4f50  ABCDEFGHIJKLMNOP"
        );
        assert_eq!(out[1], "  0016: 51525354  QRST");
    }

    #[test]
    fn test_lines_non_printable() {
        let out = lines(&[b'[', 0, 0xff, b'$'], 0, 4);
        assert_eq!(out, vec!["  0000: 5b00ff24  [..$".to_string()]);
    }

    #[test]
    fn test_lines_clamped() {
        assert!(lines(&[1, 2, 3], 3, 10).is_empty());
        assert_eq!(lines(&[1, 2, 3], 1, 10), vec!["  0001: 0203  ..".to_string()]);
    }

    #[test]
    fn test_window() {
        assert_eq!(window(1000, 10), (0, 74));
        assert_eq!(window(1000, 500), (468, 564));
        assert_eq!(window(40, 38), (6, 40));
        assert_eq!(window(40, 100), (40, 40));
    }
}
