//! Modal command interpretation: key translation, the mode state machine,
//! and the yank/paste/visual engines layered over the register store.
//!
//! Flow for one key press:
//! 1. [`KeyTranslator`] expires a stale command buffer, then maps the key to
//!    an [`Action`] (mode change, register selection, yank motion, paste, or
//!    "keep waiting"). Normal-mode printable keys accumulate in the state's
//!    command buffer until [`CommandParser`] recognizes them.
//! 2. [`dispatcher::dispatch`] applies the action against the host's
//!    [`BufferView`](core_host::BufferView) and returns a [`KeyOutcome`]. Any
//!    text change comes back as a [`BufferEdit`](core_host::BufferEdit); the
//!    engine never mutates host text itself.
//!
//! [`ModalEngine`] bundles the state, translator, clipboard and observers for
//! hosts that want a single entry point.

use core_host::BufferEdit;
use core_state::{Mode, RegisterRef, YankType};
use core_text::YankMotion;

pub mod clipboard;
pub mod dispatcher;
pub mod engine;
pub mod key_translator;
pub mod paste;
pub mod span_resolver;
pub mod visual;
pub mod yank;

pub use clipboard::{ClipboardError, ClipboardSink, ClipboardWorker, NoopClipboard};
#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use dispatcher::command_parser::{CommandParser, ParsedCommand};
pub use dispatcher::{SideEffects, dispatch};
pub use engine::ModalEngine;
pub use key_translator::KeyTranslator;
pub use paste::PastePlacement;
pub use yank::YankRequest;

/// Semantic result of translating one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ModeChange(ModeChange),
    /// `"x` completed: the next yank or paste uses register `x`.
    SelectRegister(RegisterRef),
    /// A complete yank command such as `yw` or `y$`.
    Yank(YankMotion),
    /// `y` in a visual mode.
    VisualYank,
    Paste(PastePlacement),
    /// Key was buffered; waiting for more keys.
    Pending,
    /// Consumed without effect (printable keys in visual modes).
    Swallow,
    /// Not ours; the host should handle the key natively.
    Passthrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    EnterInsert,
    EnterVisual,
    EnterVisualLine,
    EnterVisualBlock,
    /// `Esc` from any mode, or the tail of a visual yank.
    LeaveToNormal,
}

/// What the host should do after a key press.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Suppress the host's native handling of the key.
    pub prevent_default: bool,
    /// Replacement text/selection to apply (and announce as a change).
    pub edit: Option<BufferEdit>,
    /// New mode, when this key switched modes.
    pub mode_change: Option<Mode>,
}

impl KeyOutcome {
    pub fn passthrough() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            prevent_default: true,
            ..Self::default()
        }
    }
}

/// Engine-to-host callbacks. Both default to no-ops.
pub trait EngineObserver {
    fn on_mode_change(&self, _mode: Mode) {}
    fn on_yank(&self, _text: &str, _kind: YankType) {}
}
