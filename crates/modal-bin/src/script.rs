//! Key script notation for replaying input.
//!
//! Literal characters are typed as-is. Angle-bracket tokens name special
//! keys (`<Esc>`, `<CR>`, `<Tab>`, `<BS>`, arrows, `<C-x>`, `<lt>` for a
//! literal `<`) or script directives: `<sel:S-E>` moves the host selection
//! to `[S, E)` and `<wait:MS>` advances the virtual clock. Names are matched
//! case-insensitively.

use std::time::Duration;

use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Input(InputEvent),
    Wait(Duration),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unterminated `<` at byte {0}")]
    Unterminated(usize),
    #[error("unknown key `<{0}>`")]
    UnknownKey(String),
    #[error("invalid selection `{0}` (expected START-END)")]
    BadSelection(String),
    #[error("invalid wait `{0}` (expected milliseconds)")]
    BadWait(String),
}

pub fn parse(script: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    let mut rest = script;
    let mut consumed = 0;
    while let Some(c) = rest.chars().next() {
        if c != '<' {
            steps.push(Step::Input(InputEvent::Key(KeyEvent::char(c))));
            consumed += c.len_utf8();
            rest = &rest[c.len_utf8()..];
            continue;
        }
        let close = rest.find('>').ok_or(ScriptError::Unterminated(consumed))?;
        steps.push(parse_token(&rest[1..close])?);
        consumed += close + 1;
        rest = &rest[close + 1..];
    }
    Ok(steps)
}

fn parse_token(token: &str) -> Result<Step, ScriptError> {
    if let Some((name, arg)) = token.split_once(':') {
        return match name.to_ascii_lowercase().as_str() {
            "sel" => parse_selection(arg),
            "wait" => arg
                .trim()
                .parse::<u64>()
                .map(|ms| Step::Wait(Duration::from_millis(ms)))
                .map_err(|_| ScriptError::BadWait(arg.to_string())),
            _ => Err(ScriptError::UnknownKey(token.to_string())),
        };
    }
    let mut chars = token.chars();
    if let (Some(prefix), Some('-'), Some(c), None) =
        (chars.next(), chars.next(), chars.next(), chars.next())
        && prefix.eq_ignore_ascii_case(&'c')
    {
        return Ok(Step::Input(InputEvent::Key(KeyEvent::ctrl(c))));
    }
    match token.to_ascii_lowercase().as_str() {
        "esc" => key(KeyCode::Esc),
        "cr" | "enter" => key(KeyCode::Enter),
        "tab" => key(KeyCode::Tab),
        "bs" => key(KeyCode::Backspace),
        "left" => key(KeyCode::Left),
        "right" => key(KeyCode::Right),
        "up" => key(KeyCode::Up),
        "down" => key(KeyCode::Down),
        "lt" => key(KeyCode::Char('<')),
        _ => Err(ScriptError::UnknownKey(token.to_string())),
    }
}

fn key(code: KeyCode) -> Result<Step, ScriptError> {
    Ok(Step::Input(InputEvent::Key(KeyEvent::new(
        code,
        KeyModifiers::empty(),
    ))))
}

fn parse_selection(arg: &str) -> Result<Step, ScriptError> {
    let bad = || ScriptError::BadSelection(arg.to_string());
    let (start, end) = arg.split_once('-').ok_or_else(bad)?;
    let start = start.trim().parse().map_err(|_| bad())?;
    let end = end.trim().parse().map_err(|_| bad())?;
    Ok(Step::Input(InputEvent::SelectionChanged { start, end }))
}
