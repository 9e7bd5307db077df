//! Rectangular (visual-block) extraction from two absolute offsets.
//!
//! Offsets map to `(line, column)` corners; the rectangle spans every line
//! between the two corners and the display columns `[min_col, max_col)`.
//! Columns count terminal cells per grapheme cluster, which for plain ASCII
//! is the same as the character offset within the line.

use unicode_segmentation::UnicodeSegmentation;

use crate::{clamp_offset, grapheme, line_start};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCorner {
    pub line: usize,
    pub col: usize,
}

/// Map an absolute offset to its line index and display column.
pub fn block_corner(text: &str, offset: usize) -> BlockCorner {
    let off = clamp_offset(text, offset);
    let start = line_start(text, off);
    let line = text[..start].matches('\n').count();
    let line_text = text[start..].split('\n').next().unwrap_or("");
    BlockCorner {
        line,
        col: grapheme::visual_col(line_text, off - start),
    }
}

/// Extract the block between offsets `a` and `b` (in either order), one
/// string per spanned line. Lines shorter than the left edge yield `""`.
pub fn block_rows(text: &str, a: usize, b: usize) -> Vec<String> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let first = block_corner(text, lo);
    let last = block_corner(text, hi);
    let min_col = first.col.min(last.col);
    let max_col = first.col.max(last.col);
    text.split('\n')
        .skip(first.line)
        .take(last.line - first.line + 1)
        .map(|line| slice_columns(line, min_col, max_col))
        .collect()
}

/// Clusters whose starting column falls in `[min_col, max_col)`.
fn slice_columns(line: &str, min_col: usize, max_col: usize) -> String {
    let mut col = 0;
    let mut out = String::new();
    for g in line.graphemes(true) {
        if col >= max_col {
            break;
        }
        if col >= min_col {
            out.push_str(g);
        }
        col += grapheme::cluster_width(g);
    }
    out
}
