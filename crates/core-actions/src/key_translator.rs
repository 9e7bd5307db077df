//! KeyTranslator: stateful key -> `Action` translation.
//!
//! Mode-dependent interpretation:
//! * `Esc` in any mode leaves to Normal.
//! * Insert / Command: every other key passes through to the host.
//! * Visual modes: `y` yanks the selection; other printable keys are
//!   swallowed so they do not type over the selection; navigation keys pass
//!   through so the host can move the selection.
//! * Normal: a register designator right after `"` wins; otherwise mode
//!   switches (`i`, `v`, `V`, `<C-v>`) come first, then `p`/`P`. The one
//!   exception is `i` after a pending `y`, which continues `yiw`. Everything
//!   else printable is appended to the command buffer and classified by
//!   [`CommandParser`].
//!
//! The idle timeout lives on the state's command buffer as a deadline. Each
//! buffered key re-arms it; [`KeyTranslator::expire`] clears the buffer and
//! any pending register once it has passed.

use std::time::{Duration, Instant};

use core_events::{KeyCode, KeyEvent};
use core_state::{EditorState, Mode, RegisterRef};
use tracing::{debug, trace};

use crate::dispatcher::command_parser::{CommandParser, ParsedCommand};
use crate::{Action, ModeChange, PastePlacement};

#[derive(Debug, Clone, Default)]
pub struct KeyTranslator {
    /// Idle time before pending keys are dropped; `None` disables the reset.
    timeout: Option<Duration>,
}

impl KeyTranslator {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Clear pending keys and the pending register if the deadline passed.
    /// Returns `true` when something was dropped.
    pub fn expire(&self, state: &mut EditorState, now: Instant) -> bool {
        if !state.command.is_expired(now) {
            return false;
        }
        debug!(
            target: "input.command",
            dropped = state.command.as_str(),
            register = ?state.active_register.map(RegisterRef::as_char),
            "command_timeout"
        );
        state.command.clear();
        state.active_register = None;
        true
    }

    /// Core translation entrypoint.
    pub fn translate(&self, state: &mut EditorState, key: &KeyEvent, now: Instant) -> Action {
        self.expire(state, now);
        if key.code == KeyCode::Esc {
            return Action::ModeChange(ModeChange::LeaveToNormal);
        }
        match state.mode {
            Mode::Insert | Mode::Command => Action::Passthrough,
            Mode::Visual | Mode::VisualLine | Mode::VisualBlock => match key.plain_char() {
                Some('y') => Action::VisualYank,
                Some(_) => Action::Swallow,
                None => Action::Passthrough,
            },
            Mode::Normal => self.translate_normal(state, key, now),
        }
    }

    fn translate_normal(&self, state: &mut EditorState, key: &KeyEvent, now: Instant) -> Action {
        if key.is_ctrl() {
            return match key.code {
                KeyCode::Char('v') => Action::ModeChange(ModeChange::EnterVisualBlock),
                _ => Action::Passthrough,
            };
        }
        let Some(c) = key.plain_char() else {
            return Action::Passthrough;
        };
        let pending = state.command.as_str();
        if pending != "\"" {
            match c {
                // `yi` is the only pending prefix an `i` can continue (`yiw`).
                'i' if pending != "y" => return Action::ModeChange(ModeChange::EnterInsert),
                'v' => return Action::ModeChange(ModeChange::EnterVisual),
                'V' => return Action::ModeChange(ModeChange::EnterVisualLine),
                'p' => return Action::Paste(PastePlacement::After),
                'P' => return Action::Paste(PastePlacement::Before),
                _ => {}
            }
        }
        state.command.push(c, now, self.timeout);
        match CommandParser::parse(state.command.as_str()) {
            ParsedCommand::SelectRegister(reg) => {
                state.command.reset_keys();
                debug!(target: "input.command", register = %reg, "register_selected");
                Action::SelectRegister(reg)
            }
            ParsedCommand::Yank(motion) => {
                debug!(target: "input.command", keys = motion.keys(), "command_matched");
                Action::Yank(motion)
            }
            ParsedCommand::Pending => {
                trace!(
                    target: "input.command",
                    keys = state.command.as_str(),
                    viable = CommandParser::is_viable_prefix(state.command.as_str()),
                    "command_pending"
                );
                Action::Pending
            }
        }
    }
}
