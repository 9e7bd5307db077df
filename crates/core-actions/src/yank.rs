//! Yank engine: one entry point for char, line and block extraction.

use core_state::{EditorState, Register, RegisterRef, YankType};
use core_text::clamp_offset;
use tracing::{info, warn};

use crate::dispatcher::SideEffects;

/// What to copy. Char and line ranges are byte offsets in either order;
/// a block arrives already cut into rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YankRequest {
    CharRange(usize, usize),
    LineRange(usize, usize),
    Block(Vec<String>),
}

impl YankRequest {
    pub fn kind(&self) -> YankType {
        match self {
            YankRequest::CharRange(..) => YankType::Char,
            YankRequest::LineRange(..) => YankType::Line,
            YankRequest::Block(_) => YankType::Block,
        }
    }

    /// The text this request copies out of `text`.
    pub fn extract(&self, text: &str) -> String {
        match self {
            YankRequest::CharRange(a, b) | YankRequest::LineRange(a, b) => {
                let lo = clamp_offset(text, *a.min(b));
                let hi = clamp_offset(text, *a.max(b));
                text[lo..hi].to_string()
            }
            YankRequest::Block(rows) => rows.join("\n"),
        }
    }
}

/// Copy `request` out of `text`: register store first, then the informational
/// mirror on `state`, then observers, then the clipboard. A clipboard failure
/// is logged and leaves the earlier steps in place. Returns the register that
/// received the text.
pub fn yank(
    request: &YankRequest,
    text: &str,
    state: &mut EditorState,
    fx: &SideEffects<'_>,
) -> RegisterRef {
    let kind = request.kind();
    let payload = request.extract(text);
    let target = state.commit_yank(Register::new(payload, kind));
    info!(
        target: "actions.yank",
        register = %target,
        kind = %kind,
        len = state.yanked_text.len(),
        "yank_committed"
    );
    for obs in fx.observers {
        obs.on_yank(&state.yanked_text, kind);
    }
    if fx.clipboard_enabled
        && let Err(e) = fx.clipboard.write_text(&state.yanked_text)
    {
        warn!(target: "clipboard", error = %e, "clipboard_write_failed");
    }
    target
}
