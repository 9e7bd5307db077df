//! Editor state for one attached widget: mode, pending command keys, the
//! mirrored caret, visual bounds and the register store.
//!
//! Everything here is plain data plus small invariant-preserving helpers.
//! Interpretation of keys and all side effects live in `core-actions`.
//!
//! Invariants:
//! - Exactly one `Mode` is active.
//! - `visual` is `Some` only while a visual mode is active; both bounds are
//!   set together by construction (`VisualBounds` holds both).
//! - `active_register` is consumed by exactly one yank or paste.
//! - The numbered ring never exceeds `NUMBERED_CAPACITY` entries.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod registers;

pub use registers::{
    NUMBERED_CAPACITY, NamedRegister, NumberedRegister, Register, RegisterMetrics, RegisterRef,
    Registers, YankType,
};

/// Current editor mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Keys are interpreted as commands; nothing is typed into the buffer.
    #[default]
    Normal,
    /// Keys pass through to native text entry.
    Insert,
    /// Characterwise selection between an anchor and a moving extent.
    Visual,
    /// Linewise selection.
    VisualLine,
    /// Rectangular selection; bounds are captured once at entry.
    VisualBlock,
    /// Placeholder for ex-commands; no key enters it.
    Command,
}

impl Mode {
    pub fn is_visual(self) -> bool {
        matches!(self, Mode::Visual | Mode::VisualLine | Mode::VisualBlock)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Insert => "insert",
            Mode::Visual => "visual",
            Mode::VisualLine => "visual-line",
            Mode::VisualBlock => "visual-block",
            Mode::Command => "command",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anchor (`start`) and extent (`end`) of a visual selection. Not ordered;
/// consumers take `min`/`max` via [`VisualBounds::ordered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualBounds {
    pub start: usize,
    pub end: usize,
}

impl VisualBounds {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// `(lo, hi)` with `lo <= hi`.
    pub fn ordered(&self) -> (usize, usize) {
        (self.start.min(self.end), self.start.max(self.end))
    }
}

/// Pending Normal-mode keys awaiting a complete command.
///
/// The idle timeout is modelled as a deadline rather than a timer handle:
/// every push re-arms `expires_at`, and callers check [`is_expired`] against
/// their own clock (on the next key, or from a single host-scheduled wakeup
/// at [`deadline`]).
///
/// [`is_expired`]: CommandBuffer::is_expired
/// [`deadline`]: CommandBuffer::deadline
#[derive(Debug, Default, Clone)]
pub struct CommandBuffer {
    keys: String,
    expires_at: Option<Instant>,
}

impl CommandBuffer {
    /// Append a key and re-arm the idle deadline (`None` timeout disables it).
    pub fn push(&mut self, key: char, now: Instant, timeout: Option<Duration>) {
        self.keys.push(key);
        self.expires_at = timeout.map(|t| now + t);
    }

    pub fn as_str(&self) -> &str {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Drop pending keys but leave the deadline armed. A register selected
    /// with `"x` stays pending until that deadline passes.
    pub fn reset_keys(&mut self) {
        self.keys.clear();
    }

    /// Drop pending keys and cancel the deadline.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.expires_at = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.expires_at
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|t| now >= t)
    }
}

/// Per-widget editor state.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub mode: Mode,
    pub command: CommandBuffer,
    /// Mirror of the host caret (selection start), in bytes.
    pub cursor: usize,
    /// Most recent yank payload, whichever register it targeted.
    pub yanked_text: String,
    pub last_yank_type: YankType,
    pub visual: Option<VisualBounds>,
    pub registers: Registers,
    /// Register selected with a `"x` prefix, awaiting its one consuming operation.
    pub active_register: Option<RegisterRef>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Mode::Normal)
    }
}

impl EditorState {
    pub fn new(initial_mode: Mode) -> Self {
        Self {
            mode: initial_mode,
            command: CommandBuffer::default(),
            cursor: 0,
            yanked_text: String::new(),
            last_yank_type: YankType::Char,
            visual: None,
            registers: Registers::new(),
            active_register: None,
        }
    }

    /// Switch mode, clearing pending keys. The idle deadline is cancelled too
    /// unless a `"x` register is still waiting on it. Leaving a visual mode
    /// drops the bounds; callers entering one set them afterwards. Returns
    /// `true` when the mode actually changed.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.active_register.is_some() {
            self.command.reset_keys();
        } else {
            self.command.clear();
        }
        if !mode.is_visual() {
            self.visual = None;
        }
        if self.mode == mode {
            return false;
        }
        debug!(target: "state.mode", from = %self.mode, to = %mode, "mode_transition");
        self.mode = mode;
        true
    }

    /// Enter a visual mode with bounds captured at entry.
    pub fn enter_visual(&mut self, mode: Mode, bounds: VisualBounds) -> bool {
        debug_assert!(mode.is_visual());
        let changed = self.set_mode(mode);
        self.visual = Some(bounds);
        changed
    }

    /// Commit a yank payload: register write rule plus the informational
    /// `yanked_text`/`last_yank_type` mirror. Consumes the active register and
    /// clears pending keys. Returns the register that was written.
    pub fn commit_yank(&mut self, register: Register) -> RegisterRef {
        let target = self.active_register.take().unwrap_or(RegisterRef::Default);
        let (text, kind) = (register.text.clone(), register.kind);
        self.registers.write(target, register);
        self.yanked_text = text;
        self.last_yank_type = kind;
        self.command.clear();
        target
    }

    /// Resolve and consume the paste source (active register or default).
    pub fn take_paste_source(&mut self) -> Register {
        let source = self.active_register.take().unwrap_or(RegisterRef::Default);
        self.registers.read(source)
    }
}
