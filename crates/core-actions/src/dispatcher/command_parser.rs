//! Classification of pending Normal-mode keys.
//!
//! Pure: takes the accumulated key string and says whether it is a register
//! selection, a recognized yank command, or still incomplete. Sequences that
//! can never complete are not rejected here; they keep accumulating until the
//! idle deadline clears them.

use core_state::RegisterRef;
use core_text::YankMotion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedCommand {
    /// `"` followed by `a`-`z` or `0`-`9`.
    SelectRegister(RegisterRef),
    /// One of `yy yw yiw y$ y0 yb ye yW yB y^`.
    Yank(YankMotion),
    Pending,
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(keys: &str) -> ParsedCommand {
        if let Some(rest) = keys.strip_prefix('"') {
            let mut chars = rest.chars();
            if let (Some(c), None) = (chars.next(), chars.next())
                && let Some(reg) = RegisterRef::selectable(c)
            {
                return ParsedCommand::SelectRegister(reg);
            }
            return ParsedCommand::Pending;
        }
        YankMotion::from_keys(keys)
            .map(ParsedCommand::Yank)
            .unwrap_or(ParsedCommand::Pending)
    }

    /// True while `keys` is still a strict prefix of some recognized command.
    /// Only used for diagnostics.
    pub fn is_viable_prefix(keys: &str) -> bool {
        keys == "\""
            || YankMotion::ALL
                .iter()
                .any(|m| m.keys().len() > keys.len() && m.keys().starts_with(keys))
    }
}
