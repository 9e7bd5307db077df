//! `modal`: replay a key script against a text file through the modal engine.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{ClipboardSink, ModalEngine};
use core_config::Config;
use core_host::{HostBuffer, StringHost};
use core_text::clamp_offset;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

mod report;
mod script;

use script::Step;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "modal", version, about = "Replay Vim-style keys against a text buffer")]
struct Args {
    /// File to edit (UTF-8 text). Reads stdin when omitted.
    pub path: Option<PathBuf>,
    /// Key script, e.g. `"ayy<sel:0-5>p<Esc>`.
    #[arg(long)]
    pub keys: String,
    /// Initial caret byte offset.
    #[arg(long, default_value_t = 0)]
    pub cursor: usize,
    /// Configuration file path (overrides discovery of `modal.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Print the register listing after the buffer.
    #[arg(long)]
    pub registers: bool,
    /// Print the register listing as JSON.
    #[arg(long, requires = "registers")]
    pub json: bool,
    /// Mirror yanks to the OS clipboard.
    #[arg(long = "system-clipboard")]
    pub system_clipboard: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = core_config::load_from(args.config.clone())?;
    let text = read_input(args.path.as_deref())?;
    let steps = script::parse(&args.keys).context("invalid --keys script")?;

    let mut engine = attach_clipboard(ModalEngine::new(&config), &args, &config);
    let cursor = clamp_offset(&text, args.cursor);
    let mut host = StringHost::with_caret(text, cursor);
    replay(&mut engine, &mut host, &steps, Instant::now());

    print!("{}", host.text());
    if args.registers {
        if !host.text().ends_with('\n') {
            println!();
        }
        print!("{}", report::render_registers(engine.state(), args.json)?);
        if args.json {
            println!();
        }
    }
    info!(
        target: "runtime",
        changes = host.change_notifications(),
        mode = %engine.mode(),
        "replay_complete"
    );
    Ok(())
}

/// Feed `steps` to the engine. `<wait>` steps advance a virtual clock so
/// timeout behaviour is reproducible.
fn replay(engine: &mut ModalEngine, host: &mut StringHost, steps: &[Step], start: Instant) {
    let mut now = start;
    for step in steps {
        match *step {
            Step::Input(event) => {
                let outcome = engine.handle_input(host, event, now);
                debug!(
                    target: "runtime",
                    ?event,
                    prevented = outcome.prevent_default,
                    edited = outcome.edit.is_some(),
                    "step"
                );
            }
            Step::Wait(delay) => {
                now += delay;
                engine.expire_pending(now);
            }
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    let normalized = content.replace("\r\n", "\n");
    debug!(
        target: "io",
        size_bytes = content.len(),
        crlf_normalized = normalized.len() != content.len(),
        "input_read_ok"
    );
    Ok(normalized)
}

fn attach_clipboard(engine: ModalEngine, args: &Args, config: &Config) -> ModalEngine {
    if !args.system_clipboard || !config.clipboard_enabled() {
        return engine;
    }
    match system_clipboard() {
        Ok(sink) => engine.with_clipboard(sink),
        Err(e) => {
            warn!(target: "clipboard", error = %e, "system_clipboard_unavailable");
            eprintln!("modal: {e}");
            engine
        }
    }
}

#[cfg(feature = "system-clipboard")]
fn system_clipboard() -> Result<Box<dyn ClipboardSink>> {
    let worker = core_actions::ClipboardWorker::spawn_with(core_actions::SystemClipboard::new)?;
    Ok(Box::new(worker))
}

#[cfg(not(feature = "system-clipboard"))]
fn system_clipboard() -> Result<Box<dyn ClipboardSink>> {
    anyhow::bail!("built without the `system-clipboard` feature")
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("modal.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "modal.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}
