//! Register store: the default slot, 26 named slots and the numbered ring.
//!
//! Register names are a closed set. `RegisterRef` can only be built from a
//! valid designator, so "write to an unknown register" is not representable.
//!
//! Write semantics (every yank):
//! - the target slot is written (`Default` when no register was selected);
//! - a named target is mirrored into the default slot;
//! - the payload is pushed onto the front of the numbered ring, which keeps
//!   at most [`NUMBERED_CAPACITY`] entries and drops the oldest.
//!
//! Numbered registers are a positional read-only view of the ring: `"3` reads
//! the fourth most recent yank. Selecting a numbered register as a yank target
//! therefore only affects the default slot and the ring.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Maximum entries kept in the numbered ring (`"0`..`"9`).
pub const NUMBERED_CAPACITY: usize = 10;

/// How a register's payload was captured and how it pastes back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YankType {
    #[default]
    Char,
    Line,
    Block,
}

impl fmt::Display for YankType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            YankType::Char => "char",
            YankType::Line => "line",
            YankType::Block => "block",
        })
    }
}

/// A register payload. The empty register is `{ text: "", kind: Char }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: YankType,
}

impl Register {
    pub fn new(text: impl Into<String>, kind: YankType) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A named slot `a`..`z`, stored as its alphabet index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamedRegister(u8);

impl NamedRegister {
    pub fn new(c: char) -> Option<Self> {
        c.is_ascii_lowercase().then(|| Self(c as u8 - b'a'))
    }
    pub fn as_char(self) -> char {
        (b'a' + self.0) as char
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A position `0`..`9` in the numbered ring (`0` is the most recent yank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NumberedRegister(u8);

impl NumberedRegister {
    pub fn new(c: char) -> Option<Self> {
        c.is_ascii_digit().then(|| Self(c as u8 - b'0'))
    }
    pub fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterRef {
    /// `""`, the unnamed register.
    Default,
    Named(NamedRegister),
    Numbered(NumberedRegister),
}

impl RegisterRef {
    /// Parse any register designator, including `"` for the default slot.
    pub fn from_char(c: char) -> Option<Self> {
        if c == '"' {
            return Some(RegisterRef::Default);
        }
        Self::selectable(c)
    }

    /// Designators accepted after a `"` prefix: `a`..`z` and `0`..`9`.
    pub fn selectable(c: char) -> Option<Self> {
        NamedRegister::new(c)
            .map(RegisterRef::Named)
            .or_else(|| NumberedRegister::new(c).map(RegisterRef::Numbered))
    }

    pub fn as_char(self) -> char {
        match self {
            RegisterRef::Default => '"',
            RegisterRef::Named(n) => n.as_char(),
            RegisterRef::Numbered(n) => n.as_char(),
        }
    }
}

impl fmt::Display for RegisterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}", self.as_char())
    }
}

/// Counters surfaced by the register dump.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegisterMetrics {
    pub writes: u64,
    pub ring_rotations: u64,
}

#[derive(Debug, Clone)]
pub struct Registers {
    default: Register,
    named: [Option<Register>; 26],
    numbered: VecDeque<Register>, // newest at index 0
    metrics: RegisterMetrics,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    pub fn new() -> Self {
        Self {
            default: Register::default(),
            named: std::array::from_fn(|_| None),
            numbered: VecDeque::with_capacity(NUMBERED_CAPACITY),
            metrics: RegisterMetrics::default(),
        }
    }

    /// Record a yank into `target` following the write rules in the module docs.
    pub fn write(&mut self, target: RegisterRef, register: Register) {
        match target {
            RegisterRef::Named(slot) => {
                self.named[slot.index()] = Some(register.clone());
                self.default = register.clone();
            }
            RegisterRef::Default | RegisterRef::Numbered(_) => {
                self.default = register.clone();
            }
        }
        let rotated = self.unshift_numbered(register);
        self.metrics.writes += 1;
        if rotated {
            self.metrics.ring_rotations += 1;
        }
        trace!(
            target: "registers",
            register = %target,
            ring_len = self.numbered.len(),
            rotated,
            "register_write"
        );
    }

    /// Payload of `source`; unset named slots and ring positions past the end
    /// resolve to the empty register.
    pub fn read(&self, source: RegisterRef) -> Register {
        self.get(source).cloned().unwrap_or_default()
    }

    /// Borrowing lookup; `None` for unset named slots or missing ring entries.
    pub fn get(&self, source: RegisterRef) -> Option<&Register> {
        match source {
            RegisterRef::Default => Some(&self.default),
            RegisterRef::Named(slot) => self.named[slot.index()].as_ref(),
            RegisterRef::Numbered(slot) => self.numbered.get(slot.index()),
        }
    }

    pub fn default_register(&self) -> &Register {
        &self.default
    }

    /// The numbered ring, most recent first.
    pub fn numbered(&self) -> &VecDeque<Register> {
        &self.numbered
    }

    pub fn metrics(&self) -> RegisterMetrics {
        self.metrics
    }

    /// Non-empty registers in display order: `"`, `0`-`9`, then `a`-`z`.
    pub fn snapshot(&self) -> Vec<(RegisterRef, &Register)> {
        let mut out = Vec::new();
        if !self.default.is_empty() {
            out.push((RegisterRef::Default, &self.default));
        }
        for (i, reg) in self.numbered.iter().enumerate() {
            if let Some(slot) = char::from_digit(i as u32, 10).and_then(NumberedRegister::new) {
                out.push((RegisterRef::Numbered(slot), reg));
            }
        }
        for (i, reg) in self.named.iter().enumerate() {
            if let Some(reg) = reg
                && let Some(slot) = NamedRegister::new((b'a' + i as u8) as char)
            {
                out.push((RegisterRef::Named(slot), reg));
            }
        }
        out
    }

    fn unshift_numbered(&mut self, register: Register) -> bool {
        let rotated = self.numbered.len() == NUMBERED_CAPACITY;
        if rotated {
            self.numbered.pop_back();
        }
        self.numbered.push_front(register);
        rotated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(c: char) -> RegisterRef {
        RegisterRef::Named(NamedRegister::new(c).unwrap())
    }

    fn numbered(c: char) -> RegisterRef {
        RegisterRef::Numbered(NumberedRegister::new(c).unwrap())
    }

    #[test]
    fn designators_are_closed() {
        assert_eq!(RegisterRef::from_char('"'), Some(RegisterRef::Default));
        assert_eq!(RegisterRef::selectable('"'), None);
        assert_eq!(RegisterRef::selectable('A'), None);
        assert_eq!(RegisterRef::selectable('+'), None);
        assert_eq!(RegisterRef::selectable('q').map(RegisterRef::as_char), Some('q'));
        assert_eq!(RegisterRef::selectable('7').map(RegisterRef::as_char), Some('7'));
        assert_eq!(named('a').to_string(), "\"a");
    }

    #[test]
    fn default_write_pushes_ring() {
        let mut regs = Registers::new();
        regs.write(RegisterRef::Default, Register::new("one", YankType::Char));
        assert_eq!(regs.default_register().text, "one");
        assert_eq!(regs.numbered().len(), 1);
        assert_eq!(regs.read(numbered('0')).text, "one");
    }

    #[test]
    fn named_write_mirrors_default_and_leaves_other_slots() {
        let mut regs = Registers::new();
        regs.write(named('b'), Register::new("bee", YankType::Char));
        regs.write(named('a'), Register::new("ay\n", YankType::Line));
        assert_eq!(regs.read(named('a')), Register::new("ay\n", YankType::Line));
        assert_eq!(regs.read(named('b')).text, "bee");
        assert_eq!(regs.default_register(), &Register::new("ay\n", YankType::Line));
    }

    #[test]
    fn numbered_target_only_touches_default_and_ring() {
        let mut regs = Registers::new();
        regs.write(RegisterRef::Default, Register::new("first", YankType::Char));
        regs.write(numbered('5'), Register::new("second", YankType::Char));
        assert_eq!(regs.default_register().text, "second");
        assert_eq!(regs.read(numbered('0')).text, "second");
        assert_eq!(regs.read(numbered('1')).text, "first");
        assert!(regs.get(numbered('5')).is_none());
    }

    #[test]
    fn ring_caps_at_ten_most_recent_first() {
        let mut regs = Registers::new();
        for i in 0..13 {
            regs.write(RegisterRef::Default, Register::new(format!("y{i}"), YankType::Char));
        }
        assert_eq!(regs.numbered().len(), NUMBERED_CAPACITY);
        let texts: Vec<_> = regs.numbered().iter().map(|r| r.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["y12", "y11", "y10", "y9", "y8", "y7", "y6", "y5", "y4", "y3"]
        );
        assert_eq!(regs.metrics().writes, 13);
        assert_eq!(regs.metrics().ring_rotations, 3);
    }

    #[test]
    fn missing_registers_read_as_empty_char() {
        let regs = Registers::new();
        assert_eq!(regs.read(named('z')), Register::default());
        assert_eq!(regs.read(numbered('9')), Register::default());
        assert_eq!(regs.read(RegisterRef::Default).kind, YankType::Char);
    }

    #[test]
    fn snapshot_orders_default_numbered_named() {
        let mut regs = Registers::new();
        regs.write(named('c'), Register::new("x", YankType::Block));
        let snap: Vec<char> = regs.snapshot().iter().map(|(r, _)| r.as_char()).collect();
        assert_eq!(snap, vec!['"', '0', 'c']);
    }

    #[test]
    fn register_serializes_type_field() {
        let json = serde_json::to_string(&Register::new("a\n", YankType::Line)).unwrap();
        assert_eq!(json, r#"{"text":"a\n","type":"line"}"#);
    }
}
