//! Command trait, command tags, and dispatch logic.
//!
//! The command set is closed: every command has a [`CommandTag`], and the tag
//! maps to its handler through an exhaustive `match`. Lines are split on
//! whitespace only; there is no quoting.

use std::time::Instant;

use ossim_platform::{DiskDevice, ProcessTable, TimeService};
use ossim_types::config::ShellConfig;
use ossim_types::error::{OssimError, Result};
use ossim_vfs::MemoryVfs;

use crate::commands::{CatCmd, CdCmd, EchoCmd, FindCmd, LsCmd, MkdirCmd, RenameCmd, RmCmd, TouchCmd};
use crate::system_commands::{
    ClearCmd, DateCmd, DiskCmd, HelpCmd, KillCmd, MemCmd, PsCmd, RunCmd, ShutdownCmd, WhoamiCmd,
};

/// One line of command output with its emphasis flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    /// Headings and other emphasized lines.
    pub markup: bool,
}

impl OutputLine {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: false,
        }
    }

    pub fn markup(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: true,
        }
    }
}

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text; each `\n`-separated line is displayed separately.
    Text(String),
    /// Lines with individual emphasis.
    Lines(Vec<OutputLine>),
    /// Tabular data (optional heading, header row, data rows).
    Table {
        title: Option<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Command produced no visible output.
    None,
    /// Signal to clear the output sink.
    Clear,
    /// Signal to tear the session down.
    Shutdown,
}

/// Everything a command may touch while it runs.
pub struct Environment<'a> {
    /// The virtual file system, including the current directory.
    pub vfs: &'a mut MemoryVfs,
    /// Process table collaborator.
    pub processes: &'a mut dyn ProcessTable,
    /// Disk collaborator.
    pub disk: &'a mut dyn DiskDevice,
    /// Time service for `date`.
    pub time: Option<&'a dyn TimeService>,
    /// Session configuration.
    pub config: &'a ShellConfig,
    /// Monotonic instant the command was submitted at.
    pub now: Instant,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "ls \[path\]").
    fn usage(&self) -> &str;

    /// Command category for grouping in `help` output.
    fn category(&self) -> &str {
        "system"
    }

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

// ---------------------------------------------------------------------------
// Command tags
// ---------------------------------------------------------------------------

/// Every command the interpreter knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandTag {
    Help,
    Ls,
    Cd,
    Cat,
    Mkdir,
    Touch,
    Rm,
    Echo,
    Find,
    Rename,
    Ps,
    Kill,
    Run,
    Clear,
    Shutdown,
    Mem,
    Disk,
    Whoami,
    Date,
}

impl CommandTag {
    /// All tags, in `help` order.
    pub const ALL: [CommandTag; 19] = [
        CommandTag::Ls,
        CommandTag::Cd,
        CommandTag::Cat,
        CommandTag::Mkdir,
        CommandTag::Touch,
        CommandTag::Rm,
        CommandTag::Echo,
        CommandTag::Find,
        CommandTag::Rename,
        CommandTag::Ps,
        CommandTag::Kill,
        CommandTag::Run,
        CommandTag::Help,
        CommandTag::Clear,
        CommandTag::Mem,
        CommandTag::Disk,
        CommandTag::Whoami,
        CommandTag::Date,
        CommandTag::Shutdown,
    ];

    /// The name the user types.
    pub fn name(self) -> &'static str {
        match self {
            CommandTag::Help => "help",
            CommandTag::Ls => "ls",
            CommandTag::Cd => "cd",
            CommandTag::Cat => "cat",
            CommandTag::Mkdir => "mkdir",
            CommandTag::Touch => "touch",
            CommandTag::Rm => "rm",
            CommandTag::Echo => "echo",
            CommandTag::Find => "find",
            CommandTag::Rename => "rename",
            CommandTag::Ps => "ps",
            CommandTag::Kill => "kill",
            CommandTag::Run => "run",
            CommandTag::Clear => "clear",
            CommandTag::Shutdown => "shutdown",
            CommandTag::Mem => "mem",
            CommandTag::Disk => "disk",
            CommandTag::Whoami => "whoami",
            CommandTag::Date => "date",
        }
    }

    /// Look up a (lower-case) command name. `exit` is an alias of `shutdown`.
    pub fn parse(name: &str) -> Option<Self> {
        let tag = match name {
            "help" => CommandTag::Help,
            "ls" => CommandTag::Ls,
            "cd" => CommandTag::Cd,
            "cat" => CommandTag::Cat,
            "mkdir" => CommandTag::Mkdir,
            "touch" => CommandTag::Touch,
            "rm" => CommandTag::Rm,
            "echo" => CommandTag::Echo,
            "find" => CommandTag::Find,
            "rename" => CommandTag::Rename,
            "ps" => CommandTag::Ps,
            "kill" => CommandTag::Kill,
            "run" => CommandTag::Run,
            "clear" => CommandTag::Clear,
            "shutdown" | "exit" => CommandTag::Shutdown,
            "mem" => CommandTag::Mem,
            "disk" => CommandTag::Disk,
            "whoami" => CommandTag::Whoami,
            "date" => CommandTag::Date,
            _ => return None,
        };
        Some(tag)
    }

    /// The handler implementing this command.
    pub fn handler(self) -> &'static dyn Command {
        match self {
            CommandTag::Help => &HelpCmd,
            CommandTag::Ls => &LsCmd,
            CommandTag::Cd => &CdCmd,
            CommandTag::Cat => &CatCmd,
            CommandTag::Mkdir => &MkdirCmd,
            CommandTag::Touch => &TouchCmd,
            CommandTag::Rm => &RmCmd,
            CommandTag::Echo => &EchoCmd,
            CommandTag::Find => &FindCmd,
            CommandTag::Rename => &RenameCmd,
            CommandTag::Ps => &PsCmd,
            CommandTag::Kill => &KillCmd,
            CommandTag::Run => &RunCmd,
            CommandTag::Clear => &ClearCmd,
            CommandTag::Shutdown => &ShutdownCmd,
            CommandTag::Mem => &MemCmd,
            CommandTag::Disk => &DiskCmd,
            CommandTag::Whoami => &WhoamiCmd,
            CommandTag::Date => &DateCmd,
        }
    }

    /// Whether tab completion should offer paths for this command's
    /// arguments.
    pub fn takes_path(self) -> bool {
        matches!(
            self,
            CommandTag::Cd | CommandTag::Ls | CommandTag::Cat | CommandTag::Rm | CommandTag::Rename
        )
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Split a line on runs of whitespace.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Parse and execute one command line.
///
/// Blank lines yield [`CommandOutput::None`]. The command name is matched
/// case-insensitively; arguments are passed through untouched.
pub fn execute(line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
    let tokens = tokenize(line);
    let Some((&first, args)) = tokens.split_first() else {
        return Ok(CommandOutput::None);
    };
    let name = first.to_lowercase();
    let tag = CommandTag::parse(&name).ok_or_else(|| {
        OssimError::NotFound(format!(
            "Command not found: {name}. Type 'help' for available commands."
        ))
    })?;
    log::debug!("Dispatching {} with {} args", tag.name(), args.len());
    tag.handler().execute(args, env)
}

// ---------------------------------------------------------------------------
// Redirection
// ---------------------------------------------------------------------------

/// Why a `>` redirection could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectError {
    /// Nothing after `>`.
    MissingTarget,
    /// More than one token after `>`; carries the first extra token.
    ExtraOperand(String),
}

/// Split arguments at the first literal `>` token.
///
/// Returns the text tokens and, when a redirection is present, its single
/// target token.
pub fn split_redirect<'a, 'b>(
    args: &'a [&'b str],
) -> std::result::Result<(&'a [&'b str], Option<&'b str>), RedirectError> {
    let Some(pos) = args.iter().position(|&a| a == ">") else {
        return Ok((args, None));
    };
    match &args[pos + 1..] {
        [] => Err(RedirectError::MissingTarget),
        [target] => Ok((&args[..pos], Some(*target))),
        [_, extra, ..] => Err(RedirectError::ExtraOperand((*extra).to_string())),
    }
}

// ---------------------------------------------------------------------------
// Table layout
// ---------------------------------------------------------------------------

/// Lay out a table as padded text lines: header, rule, then rows.
pub fn format_table(headers: &[String], rows: &[Vec<String>]) -> Vec<String> {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().take(columns).enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    let render = |cells: &[String]| -> String {
        let mut line = String::new();
        for (i, cell) in cells.iter().take(columns).enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(cell);
            let pad = widths[i].saturating_sub(cell.chars().count());
            line.extend(std::iter::repeat_n(' ', pad));
        }
        line.trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render(headers));
    let rule_width = widths.iter().sum::<usize>() + 2 * columns.saturating_sub(1);
    lines.push("-".repeat(rule_width));
    for row in rows {
        lines.push(render(row));
    }
    lines
}
