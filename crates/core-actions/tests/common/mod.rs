#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{ClipboardError, ClipboardSink, EngineObserver, KeyOutcome, ModalEngine};
use core_config::Config;
use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
use core_host::{HostBuffer, StringHost};
use core_state::{EditorState, Mode, YankType};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

pub const TEXT: &str = "Hello world\nThis is a test\nVim mode rocks";

/// Clipboard that remembers every write.
#[derive(Default)]
pub struct RecordingClipboard {
    writes: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl ClipboardSink for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub struct FailingClipboard;

impl ClipboardSink for FailingClipboard {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("no display".into()))
    }
}

/// Observer recording mode changes and yanks.
#[derive(Default, Clone)]
pub struct EventLog {
    pub modes: Arc<Mutex<Vec<Mode>>>,
    pub yanks: Arc<Mutex<Vec<(String, YankType)>>>,
}

impl EngineObserver for EventLog {
    fn on_mode_change(&self, mode: Mode) {
        self.modes.lock().unwrap().push(mode);
    }

    fn on_yank(&self, text: &str, kind: YankType) {
        self.yanks.lock().unwrap().push((text.to_string(), kind));
    }
}

/// An engine attached to an in-memory host with a virtual clock.
pub struct Harness {
    pub engine: ModalEngine,
    pub host: StringHost,
    pub clipboard: Arc<RecordingClipboard>,
    pub events: EventLog,
    pub now: Instant,
}

impl Harness {
    pub fn new(text: &str, caret: usize) -> Self {
        Self::with_config(text, caret, &Config::default())
    }

    pub fn with_config(text: &str, caret: usize, config: &Config) -> Self {
        let clipboard = Arc::new(RecordingClipboard::default());
        let events = EventLog::default();
        let mut engine = ModalEngine::new(config).with_clipboard(clipboard.clone());
        engine.add_observer(Box::new(events.clone()));
        Self {
            engine,
            host: StringHost::with_caret(text, caret),
            clipboard,
            events,
            now: Instant::now(),
        }
    }

    /// Type literal characters; returns the outcome of the last one.
    pub fn keys(&mut self, seq: &str) -> KeyOutcome {
        let mut last = KeyOutcome::passthrough();
        for c in seq.chars() {
            last = self.key(KeyEvent::char(c));
        }
        last
    }

    pub fn key(&mut self, key: KeyEvent) -> KeyOutcome {
        self.engine
            .handle_input(&mut self.host, InputEvent::Key(key), self.now)
    }

    pub fn esc(&mut self) -> KeyOutcome {
        self.key(KeyEvent::esc())
    }

    pub fn ctrl(&mut self, c: char) -> KeyOutcome {
        self.key(KeyEvent::ctrl(c))
    }

    pub fn arrow_right(&mut self) -> KeyOutcome {
        self.key(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT))
    }

    /// Host selection moved to `[start, end)`.
    pub fn select(&mut self, start: usize, end: usize) {
        self.engine.handle_input(
            &mut self.host,
            InputEvent::SelectionChanged { start, end },
            self.now,
        );
    }

    pub fn caret(&mut self, offset: usize) {
        self.select(offset, offset);
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += Duration::from_millis(ms);
    }

    pub fn text(&self) -> &str {
        self.host.text()
    }

    pub fn state(&self) -> &EditorState {
        self.engine.state()
    }

    pub fn modes(&self) -> Vec<Mode> {
        self.events.modes.lock().unwrap().clone()
    }
}

/// Log capture for `tracing_subscriber::fmt().with_writer(..)`.
#[derive(Clone)]
pub struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl BufferWriter {
    pub fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        (Self { inner: buf.clone() }, buf)
    }
}

pub struct LockedWriter<'a> {
    guard: MutexGuard<'a, Vec<u8>>,
}

impl<'a> Write for LockedWriter<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for BufferWriter {
    type Writer = LockedWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LockedWriter {
            guard: self.inner.lock().expect("log buffer poisoned"),
        }
    }
}
