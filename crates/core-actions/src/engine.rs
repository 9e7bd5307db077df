//! `ModalEngine`: one attached widget's modal state plus its collaborators.

use std::time::Instant;

use core_config::Config;
use core_events::{InputEvent, KeyEvent};
use core_host::{BufferView, HostBuffer, Selection};
use core_state::{EditorState, Mode, Registers};
use tracing::trace;

use crate::clipboard::{ClipboardSink, NoopClipboard};
use crate::dispatcher::{SideEffects, dispatch};
use crate::{EngineObserver, KeyOutcome, KeyTranslator, visual};

pub struct ModalEngine {
    state: EditorState,
    translator: KeyTranslator,
    clipboard: Box<dyn ClipboardSink>,
    clipboard_enabled: bool,
    observers: Vec<Box<dyn EngineObserver>>,
}

impl Default for ModalEngine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl ModalEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            state: EditorState::new(config.initial_mode()),
            translator: KeyTranslator::new(config.command_timeout()),
            clipboard: Box::new(NoopClipboard),
            clipboard_enabled: config.clipboard_enabled(),
            observers: Vec::new(),
        }
    }

    pub fn with_clipboard(mut self, sink: impl ClipboardSink + 'static) -> Self {
        self.clipboard = Box::new(sink);
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn EngineObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn registers(&self) -> &Registers {
        &self.state.registers
    }

    /// Handle one key press. `view` is the host's text and selection at the
    /// moment of the key, or `None` when no buffer is attached.
    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        view: Option<BufferView<'_>>,
        now: Instant,
    ) -> KeyOutcome {
        let action = self.translator.translate(&mut self.state, key, now);
        trace!(
            target: "input.command",
            key = %key,
            ?action,
            mode = %self.state.mode,
            "key_translated"
        );
        let fx = SideEffects {
            clipboard: &*self.clipboard,
            clipboard_enabled: self.clipboard_enabled,
            observers: &self.observers,
        };
        dispatch(action, &mut self.state, view, &fx)
    }

    /// Host selection moved. Keeps the cursor mirror current and lets
    /// characterwise/linewise visual bounds follow the selection.
    pub fn handle_selection_change(&mut self, view: Option<BufferView<'_>>) -> bool {
        let Some(view) = view else {
            return false;
        };
        self.state.cursor = view.selection.start;
        visual::track_selection(&mut self.state, view)
    }

    /// When pending keys (or a pending `"x` register) will expire. A host
    /// schedules one wakeup for this instant and calls [`expire_pending`].
    ///
    /// [`expire_pending`]: ModalEngine::expire_pending
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.state.command.deadline()
    }

    pub fn expire_pending(&mut self, now: Instant) -> bool {
        self.translator.expire(&mut self.state, now)
    }

    /// Drive the engine from an [`InputEvent`] against a [`HostBuffer`],
    /// applying any resulting edit to it.
    pub fn handle_input<H: HostBuffer>(
        &mut self,
        host: &mut H,
        event: InputEvent,
        now: Instant,
    ) -> KeyOutcome {
        match event {
            InputEvent::Key(key) => {
                let outcome = self.handle_key(&key, Some(host.view()), now);
                if let Some(edit) = outcome.edit.clone() {
                    host.apply(edit);
                }
                outcome
            }
            InputEvent::SelectionChanged { start, end } => {
                host.set_selection(Selection::new(start, end));
                self.handle_selection_change(Some(host.view()));
                KeyOutcome::passthrough()
            }
        }
    }
}
