//! Paste engine (`p` / `P`).
//!
//! Produces a [`BufferEdit`] rather than touching host text. Linewise
//! payloads land on line boundaries; char and block payloads are spliced in
//! flat at the caret. The caret of the returned edit sits at the insertion
//! point, not after the pasted text.

use core_host::{BufferEdit, BufferView, Selection};
use core_state::{EditorState, Mode, Register, YankType};
use core_text::{clamp_offset, grapheme, line_start};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PastePlacement {
    /// `p`
    After,
    /// `P`
    Before,
}

/// Byte offset where `kind` text is inserted relative to `cursor`.
pub fn insertion_offset(
    text: &str,
    cursor: usize,
    kind: YankType,
    placement: PastePlacement,
) -> usize {
    let cursor = clamp_offset(text, cursor);
    match (kind, placement) {
        (YankType::Line, PastePlacement::After) => text[cursor..]
            .find('\n')
            .map(|i| cursor + i + 1)
            .unwrap_or(text.len()),
        (YankType::Line, PastePlacement::Before) => line_start(text, cursor),
        (YankType::Char | YankType::Block, PastePlacement::After) => {
            grapheme::next_boundary(text, cursor)
        }
        (YankType::Char | YankType::Block, PastePlacement::Before) => cursor,
    }
}

/// Splice `register` into `view` and return the edit.
pub fn paste_register(
    register: &Register,
    view: BufferView<'_>,
    placement: PastePlacement,
) -> Option<BufferEdit> {
    if register.is_empty() {
        return None;
    }
    let at = insertion_offset(view.text, view.selection.start, register.kind, placement);
    let mut text = String::with_capacity(view.text.len() + register.text.len());
    text.push_str(&view.text[..at]);
    text.push_str(&register.text);
    text.push_str(&view.text[at..]);
    Some(BufferEdit {
        text,
        selection: Selection::caret(at),
    })
}

/// `p`/`P` from Normal mode: consumes the active register (or reads the
/// default) and builds the edit. Other modes, a missing host and an empty
/// source register all yield `None`.
pub fn paste(
    state: &mut EditorState,
    view: Option<BufferView<'_>>,
    placement: PastePlacement,
) -> Option<BufferEdit> {
    if state.mode != Mode::Normal {
        return None;
    }
    let view = view?;
    let source = state.active_register;
    let register = state.take_paste_source();
    let edit = paste_register(&register, view, placement);
    match &edit {
        Some(edit) => {
            state.cursor = edit.selection.start;
            info!(
                target: "actions.paste",
                register = %source.map(|r| r.as_char()).unwrap_or('"'),
                kind = %register.kind,
                at = edit.selection.start,
                "paste_applied"
            );
        }
        None => debug!(target: "actions.paste", "paste_empty_register"),
    }
    edit
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::RegisterRef;

    const TEXT: &str = "Hello world\nThis is a test\nVim mode rocks";

    #[test]
    fn linewise_after_goes_below_current_line() {
        assert_eq!(insertion_offset(TEXT, 3, YankType::Line, PastePlacement::After), 12);
        assert_eq!(insertion_offset(TEXT, 35, YankType::Line, PastePlacement::After), TEXT.len());
    }

    #[test]
    fn linewise_before_goes_to_line_start() {
        assert_eq!(insertion_offset(TEXT, 20, YankType::Line, PastePlacement::Before), 12);
    }

    #[test]
    fn charwise_after_steps_one_grapheme() {
        assert_eq!(insertion_offset("Hello world", 5, YankType::Char, PastePlacement::After), 6);
        assert_eq!(insertion_offset("Hello", 5, YankType::Char, PastePlacement::After), 5);
        // "é" as e + combining acute occupies bytes 1..4
        let text = "ae\u{301}b";
        assert_eq!(insertion_offset(text, 1, YankType::Char, PastePlacement::After), 4);
    }

    fn at_caret(text: &str, caret: usize) -> Option<BufferView<'_>> {
        Some(BufferView::with_caret(text, caret))
    }

    #[test]
    fn paste_after_space_register() {
        let reg = Register::new(" test", YankType::Char);
        let view = BufferView::with_caret("Hello world", 4);
        let edit = paste_register(&reg, view, PastePlacement::After).unwrap();
        assert_eq!(edit.text, "Hello test world");
        assert_eq!(edit.selection, Selection::caret(5));
    }

    #[test]
    fn empty_register_is_noop() {
        let mut st = EditorState::default();
        assert!(paste(&mut st, at_caret(TEXT, 0), PastePlacement::After).is_none());
    }

    #[test]
    fn paste_outside_normal_is_noop() {
        let mut st = EditorState::new(Mode::Insert);
        st.registers.write(RegisterRef::Default, Register::new("x", YankType::Char));
        assert!(paste(&mut st, at_caret(TEXT, 0), PastePlacement::Before).is_none());
    }

    #[test]
    fn paste_reads_and_consumes_active_register() {
        let mut st = EditorState::default();
        let a = RegisterRef::selectable('a').unwrap();
        st.registers.write(a, Register::new("AA", YankType::Char));
        st.registers.write(RegisterRef::Default, Register::new("dd", YankType::Char));
        st.active_register = Some(a);
        let edit = paste(&mut st, at_caret("xy", 1), PastePlacement::Before).unwrap();
        assert_eq!(edit.text, "xAAy");
        assert!(st.active_register.is_none());
        let edit = paste(&mut st, at_caret("xy", 1), PastePlacement::Before).unwrap();
        assert_eq!(edit.text, "xddy");
    }

    #[test]
    fn missing_numbered_register_is_noop() {
        let mut st = EditorState::default();
        st.active_register = RegisterRef::selectable('7');
        assert!(paste(&mut st, at_caret(TEXT, 0), PastePlacement::After).is_none());
        assert!(st.active_register.is_none());
    }
}
