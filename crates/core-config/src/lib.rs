//! Configuration loading and parsing.
//!
//! Parses `modal.toml` (or an override path supplied by the binary):
//!
//! ```toml
//! [engine]
//! initial_mode = "normal"
//!
//! [input]
//! timeout = true
//! timeoutlen = 1000
//!
//! [clipboard]
//! enabled = true
//! ```
//!
//! Every field is optional. Unknown fields are ignored so the file can grow
//! without breaking older builds. A missing file yields defaults silently; a
//! file that fails to parse yields defaults and a warning.

use anyhow::Result;
use core_state::Mode;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "modal.toml";

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EngineConfig {
    /// Mode a freshly attached widget starts in.
    #[serde(default)]
    pub initial_mode: Mode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    /// When false, pending command keys never expire.
    #[serde(default = "InputConfig::default_timeout")] // Vim default: enabled
    pub timeout: bool,
    /// Idle time in milliseconds before pending command keys are dropped.
    #[serde(default = "InputConfig::default_timeoutlen")]
    pub timeoutlen: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            timeout: Self::default_timeout(),
            timeoutlen: Self::default_timeoutlen(),
        }
    }
}

impl InputConfig {
    const fn default_timeout() -> bool {
        true
    }
    const fn default_timeoutlen() -> u32 {
        1000
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClipboardConfig {
    /// Mirror every yank to the system clipboard (best effort).
    #[serde(default = "ClipboardConfig::default_enabled")]
    pub enabled: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
        }
    }
}

impl ClipboardConfig {
    const fn default_enabled() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,      // original file string (optional)
    pub source: Option<PathBuf>,  // path the file was read from
    pub file: ConfigFile,         // parsed (or default) data
}

impl Config {
    /// Idle timeout for pending command keys; `None` when disabled.
    pub fn command_timeout(&self) -> Option<Duration> {
        let input = &self.file.input;
        input
            .timeout
            .then(|| Duration::from_millis(u64::from(input.timeoutlen)))
    }

    pub fn initial_mode(&self) -> Mode {
        self.file.engine.initial_mode
    }

    pub fn clipboard_enabled(&self) -> bool {
        self.file.clipboard.enabled
    }
}

/// Best-effort config path: working directory first, then the platform
/// config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("modal").join(CONFIG_FILE_NAME);
    }
    // Final fallback relative filename.
    local
}

/// Parse configuration text. Exposed separately so hosts embedding the
/// engine can supply config from their own storage.
pub fn parse(content: &str) -> Result<ConfigFile> {
    Ok(toml::from_str::<ConfigFile>(content)?)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match parse(&content) {
        Ok(file) => {
            info!(
                target: "config",
                path = %path.display(),
                initial_mode = %file.engine.initial_mode,
                timeout = file.input.timeout,
                timeoutlen = file.input.timeoutlen,
                clipboard = file.clipboard.enabled,
                "config_loaded"
            );
            Ok(Config {
                raw: Some(content),
                source: Some(path),
                file,
            })
        }
        Err(e) => {
            // Fall back to defaults; a bad config must not keep the editor from starting.
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}
