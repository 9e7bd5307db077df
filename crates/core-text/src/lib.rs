//! Pure text helpers over a flat `&str` buffer addressed by byte offsets.
//!
//! The host widget owns the text; everything in this crate is a function of
//! `(text, offset)` and never mutates. Offsets handed in from the host may be
//! stale or land inside a multi-byte character, so every entry point clamps
//! through [`clamp_offset`] first.

pub mod block;
pub mod motion;

pub use block::{BlockCorner, block_corner, block_rows};
pub use motion::YankMotion;

/// Clamp `offset` to `text.len()` and snap it back onto a UTF-8 char boundary.
pub fn clamp_offset(text: &str, offset: usize) -> usize {
    let mut off = offset.min(text.len());
    while off > 0 && !text.is_char_boundary(off) {
        off -= 1;
    }
    off
}

/// Start of the line containing `offset` (byte after the previous `\n`, or 0).
pub fn line_start(text: &str, offset: usize) -> usize {
    let off = clamp_offset(text, offset);
    text[..off].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// End of the line containing `offset`, excluding the newline (index of the
/// next `\n`, or `text.len()` on the last line).
pub fn line_end(text: &str, offset: usize) -> usize {
    let off = clamp_offset(text, offset);
    text[off..].find('\n').map(|i| off + i).unwrap_or(text.len())
}

/// Full line span `[start, end)` containing `offset`, including its trailing
/// newline when one is present.
pub fn line_span(text: &str, offset: usize) -> (usize, usize) {
    let start = line_start(text, offset);
    let end = line_end(text, offset);
    if end < text.len() {
        (start, end + 1)
    } else {
        (start, end)
    }
}

/// Vim `iskeyword` default restricted to ASCII: `[A-Za-z0-9_]`.
pub fn is_word_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Grapheme cluster helpers shared by paste placement and block columns.
pub mod grapheme {
    use unicode_segmentation::UnicodeSegmentation;

    /// Next grapheme boundary after `byte` (returns `text.len()` at or beyond end).
    pub fn next_boundary(text: &str, byte: usize) -> usize {
        if byte >= text.len() {
            return text.len();
        }
        for (idx, _) in text.grapheme_indices(true) {
            if idx > byte {
                return idx;
            }
        }
        text.len()
    }

    /// Display column (terminal cells) of `byte` within `line`.
    pub fn visual_col(line: &str, byte: usize) -> usize {
        let mut col = 0;
        for (idx, g) in line.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            col += cluster_width(g);
        }
        col
    }

    /// Width in cells of one grapheme cluster. Zero-width clusters still occupy
    /// a column so they stay addressable.
    pub fn cluster_width(g: &str) -> usize {
        unicode_width::UnicodeWidthStr::width(g).max(1)
    }
}
