//! Boundary resolution for the yank motions.
//!
//! Every function here operates purely on `(text, cursor)` and returns the
//! byte range the motion covers. Ranges are always ordered (`start <= end`),
//! lie on char boundaries and never exceed `text.len()`. A motion that covers
//! nothing yields an empty range rather than an error.
//!
//! Word characters are `[A-Za-z0-9_]`; a WORD is any maximal run of
//! non-whitespace. Whitespace follows `char::is_whitespace`, so `\n` counts
//! as whitespace for the word scans but line motions stop at it.

use std::ops::Range;

use crate::{clamp_offset, is_word_char, line_end, line_span, line_start};

/// The recognized yank motions, keyed by the keys following `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YankMotion {
    /// `yy`
    Line,
    /// `yw`
    Word,
    /// `yiw`
    InnerWord,
    /// `y$`
    LineEnd,
    /// `y0`
    LineStart,
    /// `yb`
    WordBackward,
    /// `ye`
    WordEnd,
    /// `yW`
    BigWordForward,
    /// `yB`
    BigWordBackward,
    /// `y^`
    FirstNonBlank,
}

impl YankMotion {
    pub const ALL: [YankMotion; 10] = [
        YankMotion::Line,
        YankMotion::Word,
        YankMotion::InnerWord,
        YankMotion::LineEnd,
        YankMotion::LineStart,
        YankMotion::WordBackward,
        YankMotion::WordEnd,
        YankMotion::BigWordForward,
        YankMotion::BigWordBackward,
        YankMotion::FirstNonBlank,
    ];

    /// The full key sequence (including the leading `y`) that names this motion.
    pub fn keys(self) -> &'static str {
        match self {
            YankMotion::Line => "yy",
            YankMotion::Word => "yw",
            YankMotion::InnerWord => "yiw",
            YankMotion::LineEnd => "y$",
            YankMotion::LineStart => "y0",
            YankMotion::WordBackward => "yb",
            YankMotion::WordEnd => "ye",
            YankMotion::BigWordForward => "yW",
            YankMotion::BigWordBackward => "yB",
            YankMotion::FirstNonBlank => "y^",
        }
    }

    pub fn from_keys(keys: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.keys() == keys)
    }

    /// Only `yy` produces a linewise register entry.
    pub fn is_linewise(self) -> bool {
        matches!(self, YankMotion::Line)
    }

    /// Resolve the byte range this motion covers from `cursor`.
    pub fn resolve(self, text: &str, cursor: usize) -> Range<usize> {
        let cursor = clamp_offset(text, cursor);
        match self {
            YankMotion::Line => {
                let (start, end) = line_span(text, cursor);
                start..end
            }
            YankMotion::Word => cursor..word_run(text, cursor).end,
            YankMotion::InnerWord => inner_word(text, cursor),
            YankMotion::LineEnd => cursor..line_end(text, cursor),
            YankMotion::LineStart => line_start(text, cursor)..cursor,
            YankMotion::WordBackward => word_backward(text, cursor, is_word_char)..cursor,
            YankMotion::WordEnd => cursor..skip_forward(text, cursor, is_word_char),
            YankMotion::BigWordForward => cursor..skip_forward(text, cursor, is_non_blank),
            YankMotion::BigWordBackward => word_backward(text, cursor, is_non_blank)..cursor,
            YankMotion::FirstNonBlank => {
                let first = first_non_blank(text, cursor);
                first.min(cursor)..first.max(cursor)
            }
        }
    }
}

fn is_non_blank(c: char) -> bool {
    !c.is_whitespace()
}

fn is_inline_blank(c: char) -> bool {
    c.is_whitespace() && c != '\n'
}

/// Walk backward from `pos` while the preceding char satisfies `pred`.
fn skip_backward(text: &str, mut pos: usize, pred: impl Fn(char) -> bool) -> usize {
    while let Some(c) = text[..pos].chars().next_back() {
        if !pred(c) {
            break;
        }
        pos -= c.len_utf8();
    }
    pos
}

/// Walk forward from `pos` while the char at `pos` satisfies `pred`.
fn skip_forward(text: &str, mut pos: usize, pred: impl Fn(char) -> bool) -> usize {
    while let Some(c) = text[pos..].chars().next() {
        if !pred(c) {
            break;
        }
        pos += c.len_utf8();
    }
    pos
}

/// The run of word chars containing `cursor`, or touching it from either side.
/// Empty (`cursor..cursor`) when neither neighbour is a word char.
pub fn word_run(text: &str, cursor: usize) -> Range<usize> {
    let cursor = clamp_offset(text, cursor);
    skip_backward(text, cursor, is_word_char)..skip_forward(text, cursor, is_word_char)
}

/// Word run widened backward over the whitespace immediately before it.
pub fn inner_word(text: &str, cursor: usize) -> Range<usize> {
    let run = word_run(text, cursor);
    skip_backward(text, run.start, char::is_whitespace)..run.end
}

/// Backward word scan: skip the current run, the gap, then the previous run.
/// `in_word` decides what counts as "word" (word chars for `b`, non-blank for `B`).
fn word_backward(text: &str, cursor: usize, in_word: fn(char) -> bool) -> usize {
    let pos = skip_backward(text, cursor, in_word);
    let pos = skip_backward(text, pos, char::is_whitespace);
    skip_backward(text, pos, in_word)
}

/// First non-blank column of the line containing `cursor` (never crosses `\n`).
pub fn first_non_blank(text: &str, cursor: usize) -> usize {
    skip_forward(text, line_start(text, cursor), is_inline_blank)
}
