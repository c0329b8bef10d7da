//! Interactive shell session.
//!
//! A [`Shell`] owns the filesystem, the collaborators, the history buffer and
//! the line being edited. Front-ends feed it [`InputEvent`]s and it writes
//! everything visible through its [`OutputSink`].

use std::time::Instant;

use ossim_platform::{DesktopClock, DiskDevice, ProcessTable, SimDisk, SimProcessTable, TimeService};
use ossim_types::config::ShellConfig;
use ossim_types::error::Result;
use ossim_types::input::InputEvent;
use ossim_types::sink::OutputSink;
use ossim_vfs::MemoryVfs;

use crate::completion::{self, Completion};
use crate::history::{History, Recall, RecallState};
use crate::interpreter::{self, CommandOutput, Environment, format_table};

const BANNER: &str = "OS Simulation v1.0";
const WELCOME_TEXT: &str = "Welcome to OS Simulation!\nType \"help\" to see available commands.";

/// One interactive session.
pub struct Shell<S: OutputSink> {
    vfs: MemoryVfs,
    processes: Box<dyn ProcessTable>,
    disk: Box<dyn DiskDevice>,
    time: Option<Box<dyn TimeService>>,
    sink: S,
    config: ShellConfig,
    history: History,
    recall: Recall,
    line: String,
    running: bool,
}

impl<S: OutputSink> Shell<S> {
    /// Create a session backed by the simulated process table, disk and
    /// system clock.
    pub fn new(config: ShellConfig, sink: S) -> Self {
        let processes = Box::new(SimProcessTable::from_config(&config));
        let disk = Box::new(SimDisk::from_config(&config));
        Self::with_services(config, sink, processes, disk, Some(Box::new(DesktopClock::new())))
    }

    /// Create a session with injected collaborators.
    pub fn with_services(
        config: ShellConfig,
        sink: S,
        processes: Box<dyn ProcessTable>,
        disk: Box<dyn DiskDevice>,
        time: Option<Box<dyn TimeService>>,
    ) -> Self {
        Self {
            vfs: MemoryVfs::new(),
            processes,
            disk,
            time,
            sink,
            history: History::new(config.history_limit),
            recall: Recall::new(),
            line: String::new(),
            running: true,
            config,
        }
    }

    /// Seed the demo tree (when configured) and show the banner.
    pub fn boot(&mut self) -> Result<()> {
        if self.config.seed_demo_files {
            self.vfs.create_directory("/", "home")?;
            self.vfs.create_directory("/home", "user")?;
            self.vfs.create_file("/home/user", "welcome.txt", WELCOME_TEXT)?;
        }
        log::info!(
            "Session started for {}@{}",
            self.config.user,
            self.config.hostname
        );
        self.sink.display(BANNER, true);
        self.sink.display("Type 'help' for available commands.", false);
        Ok(())
    }

    /// Prompt prefix for the current directory.
    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}$",
            self.config.user,
            self.config.hostname,
            self.vfs.current_dir()
        )
    }

    /// React to one editing event. Events after shutdown are ignored.
    pub fn handle_input(&mut self, event: InputEvent) {
        if !self.running {
            return;
        }
        match event {
            InputEvent::TextInput(ch) => self.line.push(ch),
            InputEvent::Backspace => {
                self.line.pop();
            },
            InputEvent::HistoryUp => {
                if let Some(line) = self.recall.up(&self.history, &self.line) {
                    self.line = line;
                }
            },
            InputEvent::HistoryDown => {
                if let Some(line) = self.recall.down(&self.history) {
                    self.line = line;
                }
            },
            InputEvent::Complete => self.complete(),
            InputEvent::Submit => {
                let line = std::mem::take(&mut self.line);
                self.submit(&line);
            },
        }
    }

    /// Run a complete line as if it had been typed and submitted.
    pub fn submit(&mut self, line: &str) {
        if !self.running {
            return;
        }
        let echo = format!("{} {line}", self.prompt());
        self.sink.display(&echo, false);
        self.history.push(line);
        self.recall.reset();
        self.line.clear();

        let mut env = Environment {
            vfs: &mut self.vfs,
            processes: self.processes.as_mut(),
            disk: self.disk.as_mut(),
            time: self.time.as_deref(),
            config: &self.config,
            now: Instant::now(),
        };
        let result = interpreter::execute(line, &mut env);
        self.render(result);
    }

    /// Complete the line being edited.
    pub fn complete(&mut self) {
        match completion::complete(&self.line, &self.vfs) {
            Completion::None => {},
            Completion::Single(line) => self.line = line,
            Completion::Ambiguous { candidates, line } => {
                self.sink.display(&candidates.join("  "), false);
                if let Some(line) = line {
                    self.line = line;
                }
            },
        }
    }

    /// Collect finished disk transfers and report them, then drop every
    /// terminated process from the table.
    pub fn poll_devices(&mut self, now: Instant) {
        let finished = self.disk.poll(now);
        for request in &finished {
            if let Err(e) = self.processes.exit_process(request.pid) {
                log::debug!("Transfer process {} already gone: {e}", request.pid);
            }
            self.sink.display(
                &format!(
                    "Disk: Completed {} {}MB of data.",
                    request.op.verb(),
                    request.size_mb
                ),
                false,
            );
        }
        let reaped = self.processes.reap();
        if reaped > 0 {
            log::debug!("{} transfers finished, {reaped} processes reaped", finished.len());
        }
    }

    fn render(&mut self, result: Result<CommandOutput>) {
        match result {
            Ok(CommandOutput::Text(text)) => {
                for l in text.lines() {
                    self.sink.display(l, false);
                }
            },
            Ok(CommandOutput::Lines(lines)) => {
                for l in &lines {
                    self.sink.display(&l.text, l.markup);
                }
            },
            Ok(CommandOutput::Table {
                title,
                headers,
                rows,
            }) => {
                if let Some(title) = title {
                    self.sink.display(&title, true);
                }
                let lines = format_table(&headers, &rows);
                for (i, l) in lines.iter().enumerate() {
                    self.sink.display(l, i == 0);
                }
            },
            Ok(CommandOutput::None) => {},
            Ok(CommandOutput::Clear) => self.sink.clear(),
            Ok(CommandOutput::Shutdown) => self.shutdown(),
            Err(e) => {
                log::debug!("Command failed ({:?}): {e}", e.kind());
                self.sink.display(&e.to_string(), false);
            },
        }
    }

    fn shutdown(&mut self) {
        self.sink.display("Initiating system shutdown...", false);
        let killed = self.processes.kill_user_processes();
        self.processes.reap();
        log::info!("Shutting down, stopped {killed} user processes");
        self.sink.display("System shutting down...", false);
        self.running = false;
    }

    // -- accessors ----------------------------------------------------------

    /// The line being edited.
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn vfs(&self) -> &MemoryVfs {
        &self.vfs
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn recall_state(&self) -> RecallState {
        self.recall.state()
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
