//! Host buffer adapter.
//!
//! The engine never owns or mutates the widget's text. The host hands it a
//! read-only [`BufferView`] per event and receives back an optional
//! [`BufferEdit`] (the complete new text plus caret). Applying the edit and
//! firing the host's own change notification is the host's job; the
//! [`HostBuffer`] trait captures that contract and [`StringHost`] is the
//! in-memory implementation used by tests and the CLI.

use tracing::trace;

/// Half-open selection `[start, end)` in byte offsets. A caret is an empty
/// selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// The endpoint that is not `anchor`; used to follow the moving side of a
    /// selection the host reports as an ordered pair.
    pub fn extent_from(&self, anchor: usize) -> usize {
        if self.end == anchor && self.start != anchor {
            self.start
        } else {
            self.end
        }
    }
}

/// Borrowed snapshot of the host's current text and selection.
#[derive(Debug, Clone, Copy)]
pub struct BufferView<'a> {
    pub text: &'a str,
    pub selection: Selection,
}

impl<'a> BufferView<'a> {
    pub fn new(text: &'a str, selection: Selection) -> Self {
        Self { text, selection }
    }

    pub fn with_caret(text: &'a str, offset: usize) -> Self {
        Self::new(text, Selection::caret(offset))
    }
}

/// Replacement text and selection produced by a mutating command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferEdit {
    pub text: String,
    pub selection: Selection,
}

/// What the engine needs from a widget: read access to text and selection,
/// and a way to apply an edit and notify the widget's observers.
pub trait HostBuffer {
    fn text(&self) -> &str;
    fn selection(&self) -> Selection;
    fn set_selection(&mut self, selection: Selection);
    /// Replace text and selection, then raise the widget's change
    /// notification (equivalent of a native input event).
    fn apply(&mut self, edit: BufferEdit);

    fn view(&self) -> BufferView<'_> {
        BufferView::new(self.text(), self.selection())
    }
}

/// In-memory host: a `String` plus selection, counting change notifications.
#[derive(Debug, Clone, Default)]
pub struct StringHost {
    text: String,
    selection: Selection,
    change_notifications: usize,
}

impl StringHost {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_caret(text: impl Into<String>, offset: usize) -> Self {
        let mut host = Self::new(text);
        host.selection = Selection::caret(offset);
        host
    }

    /// Number of change notifications raised by [`HostBuffer::apply`].
    pub fn change_notifications(&self) -> usize {
        self.change_notifications
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl HostBuffer for StringHost {
    fn text(&self) -> &str {
        &self.text
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        let len = self.text.len();
        self.selection = Selection::new(selection.start.min(len), selection.end.min(len));
    }

    fn apply(&mut self, edit: BufferEdit) {
        self.text = edit.text;
        self.selection = edit.selection;
        self.change_notifications += 1;
        trace!(
            target: "host",
            len = self.text.len(),
            caret = self.selection.start,
            "host_change_notified"
        );
    }
}
