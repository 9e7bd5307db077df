//! Visual selection tracking and the yank request each visual mode produces.
//!
//! Characterwise and linewise bounds follow the host selection as it moves;
//! blockwise bounds are captured once when the mode is entered.

use core_host::BufferView;
use core_state::{EditorState, Mode, VisualBounds};
use core_text::{block_rows, line_end, line_start};
use tracing::trace;

use crate::YankRequest;

/// Bounds recorded when entering `mode` from `view`.
pub fn entry_bounds(mode: Mode, view: Option<BufferView<'_>>) -> VisualBounds {
    let Some(view) = view else {
        return VisualBounds::new(0, 0);
    };
    let sel = view.selection;
    match mode {
        Mode::VisualLine => VisualBounds::new(
            line_start(view.text, sel.start),
            line_end(view.text, sel.start),
        ),
        _ => VisualBounds::new(sel.start, sel.end),
    }
}

/// Follow the moving end of the host selection. Returns `true` when the
/// bounds changed. No-op in visual-block mode and outside visual modes.
pub fn track_selection(state: &mut EditorState, view: BufferView<'_>) -> bool {
    if !matches!(state.mode, Mode::Visual | Mode::VisualLine) {
        return false;
    }
    let Some(bounds) = state.visual.as_mut() else {
        return false;
    };
    let extent = view.selection.extent_from(bounds.start);
    if extent == bounds.end {
        return false;
    }
    bounds.end = extent;
    trace!(target: "engine.mode", start = bounds.start, end = extent, "visual_extent");
    true
}

/// Translate the current visual bounds into a yank request.
pub fn request_for(mode: Mode, bounds: VisualBounds, text: &str) -> Option<YankRequest> {
    let (lo, hi) = bounds.ordered();
    match mode {
        Mode::Visual => Some(YankRequest::CharRange(lo, hi)),
        Mode::VisualLine => Some(YankRequest::LineRange(
            line_start(text, lo),
            line_end(text, hi),
        )),
        Mode::VisualBlock => Some(YankRequest::Block(block_rows(text, lo, hi))),
        _ => None,
    }
}
