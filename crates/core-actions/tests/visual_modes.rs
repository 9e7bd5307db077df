mod common;
use common::*;

use core_state::{Mode, VisualBounds, YankType};
use pretty_assertions::assert_eq;

#[test]
fn visual_selection_yanks_exact_substring() {
    let mut h = Harness::new(TEXT, 6);
    let out = h.keys("v");
    assert_eq!(out.mode_change, Some(Mode::Visual));
    h.select(6, 11);
    assert_eq!(h.state().visual, Some(VisualBounds::new(6, 11)));
    let out = h.keys("y");
    assert_eq!(out.mode_change, Some(Mode::Normal));
    assert_eq!(h.state().yanked_text, &TEXT[6..11]);
    assert_eq!(h.state().last_yank_type, YankType::Char);
    assert_eq!(h.state().mode, Mode::Normal);
    assert!(h.state().visual.is_none());
    assert_eq!(h.modes(), vec![Mode::Visual, Mode::Normal]);
    assert_eq!(h.clipboard.writes(), vec!["world".to_string()]);
}

#[test]
fn backward_selection_is_ordered() {
    let mut h = Harness::new(TEXT, 11);
    h.keys("v");
    h.select(6, 11);
    assert_eq!(h.state().visual, Some(VisualBounds::new(11, 6)));
    h.keys("y");
    assert_eq!(h.state().yanked_text, "world");
}

#[test]
fn selection_spanning_lines() {
    let mut h = Harness::new(TEXT, 6);
    h.keys("v");
    h.select(6, 16);
    h.keys("y");
    assert_eq!(h.state().yanked_text, "world\nThis");
}

#[test]
fn visual_line_widens_to_whole_lines() {
    let mut h = Harness::new(TEXT, 15);
    let out = h.keys("V");
    assert_eq!(out.mode_change, Some(Mode::VisualLine));
    assert_eq!(h.state().visual, Some(VisualBounds::new(12, 26)));
    h.select(15, 30);
    h.keys("y");
    assert_eq!(h.state().yanked_text, "This is a test\nVim mode rocks");
    assert_eq!(h.state().last_yank_type, YankType::Line);
}

#[test]
fn visual_line_single_line_excludes_newline() {
    let mut h = Harness::new(TEXT, 3);
    h.keys("V");
    assert_eq!(h.state().visual, Some(VisualBounds::new(0, 11)));
    h.keys("y");
    assert_eq!(h.state().yanked_text, "Hello world");
    assert_eq!(h.state().last_yank_type, YankType::Line);
}

#[test]
fn visual_block_takes_column_rectangle() {
    let mut h = Harness::new(TEXT, 1);
    h.select(1, 31);
    let out = h.ctrl('v');
    assert_eq!(out.mode_change, Some(Mode::VisualBlock));
    h.keys("y");
    assert_eq!(h.state().yanked_text, "ell\nhis\nim ");
    assert_eq!(h.state().last_yank_type, YankType::Block);
    assert_eq!(h.state().mode, Mode::Normal);
}

#[test]
fn visual_block_short_rows_yield_empty_segments() {
    let text = "abcdef\nx\nabcdef";
    let mut h = Harness::new(text, 2);
    h.select(2, 13);
    h.ctrl('v');
    h.keys("y");
    assert_eq!(h.state().yanked_text, "cd\n\ncd");
}

#[test]
fn visual_block_bounds_fixed_at_entry() {
    let mut h = Harness::new(TEXT, 1);
    h.select(1, 4);
    h.ctrl('v');
    h.select(1, 31);
    assert_eq!(h.state().visual, Some(VisualBounds::new(1, 4)));
    h.keys("y");
    assert_eq!(h.state().yanked_text, "ell");
}

#[test]
fn printable_keys_swallowed_navigation_passes() {
    let mut h = Harness::new(TEXT, 0);
    h.keys("v");
    let out = h.keys("x");
    assert!(out.prevent_default);
    assert!(out.edit.is_none());
    let out = h.keys("p");
    assert!(out.edit.is_none(), "paste is normal-mode only");
    let out = h.arrow_right();
    assert!(!out.prevent_default);
    assert_eq!(h.text(), TEXT);
    assert_eq!(h.state().mode, Mode::Visual);
}

#[test]
fn esc_leaves_visual_without_yanking() {
    let mut h = Harness::new(TEXT, 0);
    h.keys("V");
    let out = h.esc();
    assert_eq!(out.mode_change, Some(Mode::Normal));
    assert!(h.state().visual.is_none());
    assert!(h.engine.registers().default_register().is_empty());
    assert!(h.clipboard.writes().is_empty());
}

#[test]
fn observers_see_visual_yank() {
    let mut h = Harness::new(TEXT, 0);
    h.keys("v");
    h.select(0, 5);
    h.keys("y");
    assert_eq!(
        *h.events.yanks.lock().unwrap(),
        vec![("Hello".to_string(), YankType::Char)]
    );
}
