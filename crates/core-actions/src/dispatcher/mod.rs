//! Dispatcher applying an `Action` to editor state.
//!
//! Sub-modules:
//! * `command_parser` - classification of pending Normal-mode keys
//! * `mode`           - mode transitions
//!
//! Yank, paste and visual extraction live in their own top-level modules;
//! this file only sequences them and assembles the [`KeyOutcome`].

use core_host::BufferView;
use core_state::{EditorState, Mode};
use tracing::info;

use crate::clipboard::ClipboardSink;
use crate::span_resolver::resolve_yank;
use crate::{Action, EngineObserver, KeyOutcome, ModeChange, paste, visual, yank};

pub mod command_parser;
mod mode;

/// Collaborators a dispatch may call out to.
pub struct SideEffects<'a> {
    pub clipboard: &'a dyn ClipboardSink,
    pub clipboard_enabled: bool,
    pub observers: &'a [Box<dyn EngineObserver>],
}

/// Apply `action` against `state` and the host snapshot `view`.
pub fn dispatch(
    action: Action,
    state: &mut EditorState,
    view: Option<BufferView<'_>>,
    fx: &SideEffects<'_>,
) -> KeyOutcome {
    if let Some(view) = view {
        state.cursor = view.selection.start;
    }
    match action {
        Action::ModeChange(mc) => {
            let mut out = KeyOutcome::consumed();
            out.mode_change = change_mode(mc, state, view, fx);
            out
        }
        Action::SelectRegister(reg) => {
            state.active_register = Some(reg);
            KeyOutcome::consumed()
        }
        Action::Yank(motion) => {
            match view {
                Some(view) => {
                    let request = resolve_yank(motion, view.text, view.selection.start);
                    yank::yank(&request, view.text, state, fx);
                }
                None => state.command.clear(),
            }
            KeyOutcome::consumed()
        }
        Action::VisualYank => {
            if let Some(view) = view {
                visual::track_selection(state, view);
                if let Some(request) = state
                    .visual
                    .and_then(|bounds| visual::request_for(state.mode, bounds, view.text))
                {
                    yank::yank(&request, view.text, state, fx);
                }
            }
            let mut out = KeyOutcome::consumed();
            out.mode_change = change_mode(ModeChange::LeaveToNormal, state, view, fx);
            out
        }
        Action::Paste(placement) => KeyOutcome {
            prevent_default: true,
            edit: paste::paste(state, view, placement),
            mode_change: None,
        },
        Action::Pending | Action::Swallow => KeyOutcome::consumed(),
        Action::Passthrough => KeyOutcome::passthrough(),
    }
}

fn change_mode(
    mc: ModeChange,
    state: &mut EditorState,
    view: Option<BufferView<'_>>,
    fx: &SideEffects<'_>,
) -> Option<Mode> {
    let from = state.mode;
    let changed = mode::handle_mode_change(mc, state, view)?;
    info!(target: "engine.mode", from = %from, to = %changed, "mode_changed");
    for obs in fx.observers {
        obs.on_mode_change(changed);
    }
    Some(changed)
}
