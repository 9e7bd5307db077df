//! Register dump printed after a replay.

use anyhow::Result;
use core_state::{EditorState, Mode, Register, RegisterMetrics};
use serde::Serialize;

#[derive(Serialize)]
struct RegisterDump<'a> {
    mode: Mode,
    registers: Vec<RegisterEntry<'a>>,
    metrics: RegisterMetrics,
}

#[derive(Serialize)]
struct RegisterEntry<'a> {
    name: char,
    #[serde(flatten)]
    register: &'a Register,
}

/// `:registers`-style listing, or pretty JSON when `json` is set.
pub fn render_registers(state: &EditorState, json: bool) -> Result<String> {
    let snapshot = state.registers.snapshot();
    if json {
        let dump = RegisterDump {
            mode: state.mode,
            registers: snapshot
                .into_iter()
                .map(|(name, register)| RegisterEntry {
                    name: name.as_char(),
                    register,
                })
                .collect(),
            metrics: state.registers.metrics(),
        };
        return Ok(serde_json::to_string_pretty(&dump)?);
    }
    let mut out = String::from("Type Name Content\n");
    for (name, register) in snapshot {
        let kind = match register.kind {
            core_state::YankType::Char => 'c',
            core_state::YankType::Line => 'l',
            core_state::YankType::Block => 'b',
        };
        out.push_str(&format!(
            "  {kind}  {name}   {}\n",
            register.text.escape_debug()
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::{RegisterRef, YankType};
    use pretty_assertions::assert_eq;

    fn state_with_yanks() -> EditorState {
        let mut st = EditorState::default();
        st.active_register = RegisterRef::selectable('a');
        st.commit_yank(Register::new("Hello world\n", YankType::Line));
        st
    }

    #[test]
    fn text_listing() {
        let out = render_registers(&state_with_yanks(), false).unwrap();
        assert_eq!(
            out,
            concat!(
                "Type Name Content\n",
                "  l  \"\"   Hello world\\n\n",
                "  l  \"0   Hello world\\n\n",
                "  l  \"a   Hello world\\n\n",
            )
        );
    }

    #[test]
    fn json_dump_uses_type_field() {
        let out = render_registers(&state_with_yanks(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["mode"], "normal");
        assert_eq!(value["registers"][0]["name"], "\"");
        assert_eq!(value["registers"][0]["type"], "line");
        assert_eq!(value["registers"][2]["name"], "a");
        assert_eq!(value["metrics"]["writes"], 1);
    }
}
