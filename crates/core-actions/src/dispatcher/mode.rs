//! Mode transitions.
//!
//! Every transition drops pending command keys. Leaving to Normal also drops
//! the visual bounds and a pending `"x` register; entering a visual mode
//! records fresh bounds from the host selection.

use core_host::BufferView;
use core_state::{EditorState, Mode};
use tracing::debug;

use crate::ModeChange;
use crate::visual::entry_bounds;

/// Apply `mc`. Returns the new mode when it differs from the old one.
pub(crate) fn handle_mode_change(
    mc: ModeChange,
    state: &mut EditorState,
    view: Option<BufferView<'_>>,
) -> Option<Mode> {
    let changed = match mc {
        ModeChange::EnterInsert => state.set_mode(Mode::Insert),
        ModeChange::EnterVisual => enter_visual(state, Mode::Visual, view),
        ModeChange::EnterVisualLine => enter_visual(state, Mode::VisualLine, view),
        ModeChange::EnterVisualBlock => enter_visual(state, Mode::VisualBlock, view),
        ModeChange::LeaveToNormal => {
            state.command.clear();
            state.active_register = None;
            state.set_mode(Mode::Normal)
        }
    };
    if let Some(view) = view {
        state.cursor = view.selection.start;
    }
    changed.then_some(state.mode)
}

fn enter_visual(state: &mut EditorState, mode: Mode, view: Option<BufferView<'_>>) -> bool {
    let bounds = entry_bounds(mode, view);
    debug!(
        target: "engine.mode",
        mode = %mode,
        start = bounds.start,
        end = bounds.end,
        "visual_entered"
    );
    state.enter_visual(mode, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_host::Selection;
    use core_state::{RegisterRef, VisualBounds};
    use std::time::Instant;

    #[test]
    fn esc_clears_everything_pending() {
        let mut st = EditorState::default();
        st.enter_visual(Mode::Visual, VisualBounds::new(1, 4));
        st.active_register = RegisterRef::selectable('a');
        st.command.push('y', Instant::now(), None);
        let changed = handle_mode_change(ModeChange::LeaveToNormal, &mut st, None);
        assert_eq!(changed, Some(Mode::Normal));
        assert!(st.visual.is_none());
        assert!(st.active_register.is_none());
        assert!(st.command.is_empty());
        assert_eq!(st.command.deadline(), None);
    }

    #[test]
    fn esc_in_normal_reports_no_change() {
        let mut st = EditorState::default();
        assert_eq!(handle_mode_change(ModeChange::LeaveToNormal, &mut st, None), None);
    }

    #[test]
    fn visual_entry_without_host_uses_empty_bounds() {
        let mut st = EditorState::default();
        handle_mode_change(ModeChange::EnterVisualBlock, &mut st, None);
        assert_eq!(st.mode, Mode::VisualBlock);
        assert_eq!(st.visual, Some(VisualBounds::new(0, 0)));
    }

    #[test]
    fn visual_entry_captures_selection() {
        let mut st = EditorState::default();
        let view = BufferView::new("Hello world", Selection::new(2, 7));
        handle_mode_change(ModeChange::EnterVisual, &mut st, Some(view));
        assert_eq!(st.visual, Some(VisualBounds::new(2, 7)));
        assert_eq!(st.cursor, 2);
    }
}
