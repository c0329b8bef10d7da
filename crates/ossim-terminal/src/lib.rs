//! Command interpreter and shell session.
//!
//! The interpreter tokenizes a line, maps the command name to a
//! [`CommandTag`] and dispatches to its handler. [`Shell`] wraps the
//! interpreter with an editable input line, history recall and tab
//! completion, and renders results through an output sink.

mod commands;
pub mod completion;
pub mod history;
mod interpreter;
mod shell;
mod system_commands;

/// Tab-completion outcome and entry point.
pub use completion::{Completion, common_prefix, complete};
/// Bounded history and recall cursor.
pub use history::{History, Recall, RecallState};
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command (text, table, signals).
pub use interpreter::CommandOutput;
/// Closed set of command names.
pub use interpreter::CommandTag;
/// Mutable environment passed to every command.
pub use interpreter::Environment;
/// One emphasized or plain output line.
pub use interpreter::OutputLine;
pub use interpreter::{RedirectError, execute, format_table, split_redirect, tokenize};
/// Interactive session.
pub use shell::Shell;
