//! ossim terminal entry point.
//!
//! Reads lines from stdin and feeds them to a [`Shell`]. A line ending in a
//! tab character requests completion instead of submitting; the completed
//! text stays on the input line and whatever is typed next is appended.
//! Set `RUST_LOG=debug` to see dispatch and device logs on stderr.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use ossim_terminal::Shell;
use ossim_types::config::ShellConfig;
use ossim_types::input::InputEvent;
use ossim_types::sink::OutputSink;

/// Writes shell output to stdout, emphasizing markup lines in bold.
struct StdoutSink {
    out: io::Stdout,
    color: bool,
}

impl StdoutSink {
    fn new() -> Self {
        Self {
            out: io::stdout(),
            color: std::env::var_os("NO_COLOR").is_none(),
        }
    }
}

impl OutputSink for StdoutSink {
    fn display(&mut self, text: &str, markup: bool) {
        let mut out = self.out.lock();
        let written = if markup && self.color {
            writeln!(out, "\x1b[1m{text}\x1b[0m")
        } else {
            writeln!(out, "{text}")
        };
        if let Err(e) = written {
            log::error!("stdout write failed: {e}");
        }
    }

    fn clear(&mut self) {
        let mut out = self.out.lock();
        if let Err(e) = write!(out, "\x1b[2J\x1b[H").and_then(|()| out.flush()) {
            log::error!("stdout write failed: {e}");
        }
    }
}

/// Resolve the session config from an explicit path, else defaults.
fn load_config(path: Option<String>) -> Result<ShellConfig> {
    match path {
        Some(p) => ShellConfig::load(Path::new(&p))
            .with_context(|| format!("loading config from {p}")),
        None => Ok(ShellConfig::default()),
    }
}

/// Feed one stdin line to the shell.
fn feed_line<S: OutputSink>(shell: &mut Shell<S>, raw: &str) {
    let (text, complete) = match raw.strip_suffix('\t') {
        Some(text) => (text, true),
        None => (raw, false),
    };
    for ch in text.chars() {
        shell.handle_input(InputEvent::TextInput(ch));
    }
    shell.handle_input(if complete {
        InputEvent::Complete
    } else {
        InputEvent::Submit
    });
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Config path from CLI arg, else OSSIM_CONFIG env var, else defaults.
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("OSSIM_CONFIG").ok());
    let config = load_config(config_path)?;

    let mut shell = Shell::new(config, StdoutSink::new());
    shell.boot()?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while shell.is_running() {
        shell.poll_devices(Instant::now());
        {
            let mut out = io::stdout().lock();
            write!(out, "{} {}", shell.prompt(), shell.line())?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("reading stdin")?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        feed_line(&mut shell, line);
    }

    log::info!("Session ended");
    Ok(())
}
