//! Wire encoding and fixed-column text helpers
//!
//! The receipt stream is a `String` whose every char stands for one byte:
//! printable ASCII for text, and control bytes for ESC/POS directives.
//! Transports turn it into bytes by keeping the low 8 bits of each code
//! point. This is NOT UTF-8 encoding; a UTF-8 encoder would split
//! anything above 0x7F into several bytes the printer would misread.
//!
//! Column helpers count chars, not display cells: thermal printers in
//! the default code page print one cell per byte.

use tracing::instrument;

/// Convert a receipt stream to printer bytes (code point & 0xFF per char)
#[instrument(skip(stream), fields(chars = stream.len()))]
pub fn to_wire_bytes(stream: &str) -> Vec<u8> {
    stream.chars().map(|c| (c as u32 & 0xFF) as u8).collect()
}

/// Char count of a string
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to at most `max_width` chars
pub fn truncate(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad a string to exactly `width` chars
///
/// If the string is longer than the width, it will be truncated.
pub fn pad(s: &str, width: usize, align_right: bool) -> String {
    let current_width = text_width(s);
    if current_width >= width {
        return truncate(s, width);
    }
    let spaces = width - current_width;
    if align_right {
        format!("{}{}", " ".repeat(spaces), s)
    } else {
        format!("{}{}", s, " ".repeat(spaces))
    }
}

/// Hard-wrap a string into chunks of `width` chars
///
/// Pure slicing: words are split mid-way at the column boundary.
/// An empty string yields one empty chunk so that a row is still printed.
pub fn wrap_chars(s: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() || width == 0 {
        return vec![s.to_string()];
    }
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}
