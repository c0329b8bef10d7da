//! Filesystem commands.

use ossim_types::error::{ErrorKind, OssimError, Result};
use ossim_vfs::{EntryKind, Node, path};

use crate::interpreter::{
    Command, CommandOutput, Environment, OutputLine, RedirectError, split_redirect,
};

/// Resolve a user path argument to its (parent directory, base name) pair.
fn split_target(env: &Environment<'_>, raw: &str) -> (String, String) {
    let full = env.vfs.resolve(raw);
    let name = path::base_name(&full).to_string();
    (path::parent_of(&full), name)
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

pub(crate) struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn description(&self) -> &str {
        "List directory contents"
    }
    fn usage(&self) -> &str {
        "ls [path]"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let target = match args.first() {
            Some(raw) => env.vfs.resolve(raw),
            None => env.vfs.current_dir().to_string(),
        };
        let entries = env.vfs.list_children(&target).ok_or_else(|| {
            OssimError::NotFound(format!(
                "ls: cannot access '{}': No such directory",
                args.first().copied().unwrap_or(target.as_str())
            ))
        })?;
        if entries.is_empty() {
            return Ok(CommandOutput::Text("No files or directories".to_string()));
        }
        let rows = entries
            .into_iter()
            .map(|e| {
                let (kind, size) = match e.kind {
                    EntryKind::Directory => ("directory", "-".to_string()),
                    EntryKind::File => ("file", format!("{} bytes", e.size.unwrap_or(0))),
                };
                vec![e.name, kind.to_string(), size, e.modified.to_string()]
            })
            .collect();
        Ok(CommandOutput::Table {
            title: Some(format!("Contents of {target}:")),
            headers: vec![
                "Name".to_string(),
                "Type".to_string(),
                "Size".to_string(),
                "Modified".to_string(),
            ],
            rows,
        })
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

pub(crate) struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn description(&self) -> &str {
        "Change directory"
    }
    fn usage(&self) -> &str {
        "cd <path>"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(&raw) = args.first() else {
            return Ok(CommandOutput::Text(format!(
                "Current directory: {}",
                env.vfs.current_dir()
            )));
        };
        // `..` is only understood as a whole argument.
        let target = if raw == ".." {
            path::parent_of(env.vfs.current_dir())
        } else {
            raw.to_string()
        };
        env.vfs.change_directory(&target).map_err(|_| {
            OssimError::NotFound(format!("cd: cannot change to '{raw}': No such directory"))
        })?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// cat
// ---------------------------------------------------------------------------

pub(crate) struct CatCmd;
impl Command for CatCmd {
    fn name(&self) -> &str {
        "cat"
    }
    fn description(&self) -> &str {
        "Display file contents"
    }
    fn usage(&self) -> &str {
        "cat <file>"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let raw = args
            .first()
            .ok_or_else(|| OssimError::InvalidArgument("cat: missing file operand".to_string()))?;
        let full = env.vfs.resolve(raw);
        let content = env
            .vfs
            .read_file(&full)
            .ok_or_else(|| OssimError::NotFound(format!("cat: {raw}: No such file")))?;
        Ok(CommandOutput::Text(content.to_string()))
    }
}

// ---------------------------------------------------------------------------
// mkdir
// ---------------------------------------------------------------------------

pub(crate) struct MkdirCmd;
impl Command for MkdirCmd {
    fn name(&self) -> &str {
        "mkdir"
    }
    fn description(&self) -> &str {
        "Create a directory"
    }
    fn usage(&self) -> &str {
        "mkdir <name>"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let raw = args
            .first()
            .ok_or_else(|| OssimError::InvalidArgument("mkdir: missing operand".to_string()))?;
        let (parent, name) = split_target(env, raw);
        if name.is_empty() {
            return Err(OssimError::AlreadyExists(format!(
                "mkdir: cannot create directory '{raw}': Already exists"
            )));
        }
        env.vfs
            .create_directory(&parent, &name)
            .map_err(|e| create_error("mkdir: cannot create directory", raw, e))?;
        Ok(CommandOutput::None)
    }
}

/// Rewrite a vfs create failure as one user-facing line.
fn create_error(prefix: &str, raw: &str, err: OssimError) -> OssimError {
    match err.kind() {
        ErrorKind::AlreadyExists => {
            OssimError::AlreadyExists(format!("{prefix} '{raw}': Already exists"))
        },
        ErrorKind::NotFound => OssimError::NotFound(format!("{prefix} '{raw}': No such directory")),
        ErrorKind::InvalidArgument => {
            OssimError::InvalidArgument(format!("{prefix} '{raw}': Invalid name"))
        },
        _ => err,
    }
}

// ---------------------------------------------------------------------------
// touch
// ---------------------------------------------------------------------------

pub(crate) struct TouchCmd;
impl Command for TouchCmd {
    fn name(&self) -> &str {
        "touch"
    }
    fn description(&self) -> &str {
        "Create a file"
    }
    fn usage(&self) -> &str {
        "touch <name>"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let raw = args
            .first()
            .ok_or_else(|| OssimError::InvalidArgument("touch: missing operand".to_string()))?;
        let (parent, name) = split_target(env, raw);
        if name.is_empty() {
            return Err(OssimError::AlreadyExists(format!(
                "touch: cannot create file '{raw}': Already exists"
            )));
        }
        env.vfs
            .create_file(&parent, &name, "")
            .map_err(|e| create_error("touch: cannot create file", raw, e))?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// rm
// ---------------------------------------------------------------------------

pub(crate) struct RmCmd;
impl Command for RmCmd {
    fn name(&self) -> &str {
        "rm"
    }
    fn description(&self) -> &str {
        "Remove a file or directory"
    }
    fn usage(&self) -> &str {
        "rm <name>"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let raw = args
            .first()
            .ok_or_else(|| OssimError::InvalidArgument("rm: missing operand".to_string()))?;
        let full = env.vfs.resolve(raw);
        match env.vfs.delete_node(&full) {
            Ok(kind) => {
                log::debug!("Removed {kind:?} {full}");
                Ok(CommandOutput::None)
            },
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(
                OssimError::PermissionDenied(format!("rm: cannot remove '{raw}': Permission denied")),
            ),
            Err(_) => Err(OssimError::NotFound(format!(
                "rm: cannot remove '{raw}': No such file or directory"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

pub(crate) struct EchoCmd;
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Print text or write it to a file"
    }
    fn usage(&self) -> &str {
        "echo <text> [> <file>]"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let (words, target) = split_redirect(args).map_err(|e| match e {
            RedirectError::MissingTarget => {
                OssimError::InvalidArgument("echo: missing file operand after '>'".to_string())
            },
            RedirectError::ExtraOperand(extra) => {
                OssimError::InvalidArgument(format!("echo: extra operand '{extra}' after '>'"))
            },
        })?;
        let text = words.join(" ");
        let Some(raw) = target else {
            return Ok(CommandOutput::Text(text));
        };

        let full = env.vfs.resolve(raw);
        match env.vfs.node(&full).map(Node::kind) {
            Some(EntryKind::File) => env.vfs.write_file(&full, &text)?,
            Some(EntryKind::Directory) => {
                return Err(OssimError::InvalidArgument(format!(
                    "echo: '{raw}': Is a directory"
                )));
            },
            None => {
                let (parent, name) = split_target(env, raw);
                if name.is_empty() {
                    return Err(OssimError::InvalidArgument(format!(
                        "echo: '{raw}': Is a directory"
                    )));
                }
                env.vfs
                    .create_file(&parent, &name, &text)
                    .map_err(|e| create_error("echo: cannot create", raw, e))?;
            },
        }
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// find
// ---------------------------------------------------------------------------

pub(crate) struct FindCmd;
impl Command for FindCmd {
    fn name(&self) -> &str {
        "find"
    }
    fn description(&self) -> &str {
        "Search for files"
    }
    fn usage(&self) -> &str {
        "find <pattern> [path]"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let pattern = args.first().ok_or_else(|| {
            OssimError::InvalidArgument(
                "find: missing pattern. Usage: find <pattern> [path]".to_string(),
            )
        })?;
        let start = match args.get(1) {
            Some(raw) => env.vfs.resolve(raw),
            None => env.vfs.current_dir().to_string(),
        };
        let matches = env.vfs.find(&start, pattern).ok_or_else(|| {
            OssimError::NotFound(format!("find: '{start}': No such directory"))
        })?;

        let mut lines = vec![OutputLine::plain(format!(
            "Searching for \"{pattern}\" in {start}..."
        ))];
        if matches.is_empty() {
            lines.push(OutputLine::plain("No matching files found."));
        } else {
            lines.push(OutputLine::markup(format!("Found {} results:", matches.len())));
            for m in matches {
                let text = if m.content_match {
                    format!("{} (content match)", m.path)
                } else {
                    m.path
                };
                lines.push(OutputLine::plain(text));
            }
        }
        Ok(CommandOutput::Lines(lines))
    }
}

// ---------------------------------------------------------------------------
// rename
// ---------------------------------------------------------------------------

pub(crate) struct RenameCmd;
impl Command for RenameCmd {
    fn name(&self) -> &str {
        "rename"
    }
    fn description(&self) -> &str {
        "Rename a file or directory"
    }
    fn usage(&self) -> &str {
        "rename <path> <new-name>"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let [raw, new_name, ..] = args else {
            return Err(OssimError::InvalidArgument(
                "rename: missing operand. Usage: rename <path> <new-name>".to_string(),
            ));
        };
        let full = env.vfs.resolve(raw);
        env.vfs
            .rename_node(&full, new_name)
            .map_err(|e| match e.kind() {
                ErrorKind::PermissionDenied => OssimError::PermissionDenied(format!(
                    "rename: cannot rename '{raw}': Permission denied"
                )),
                ErrorKind::AlreadyExists => OssimError::AlreadyExists(format!(
                    "rename: cannot rename '{raw}': '{new_name}' already exists"
                )),
                ErrorKind::InvalidArgument => OssimError::InvalidArgument(format!(
                    "rename: invalid name '{new_name}'"
                )),
                _ => OssimError::NotFound(format!(
                    "rename: cannot rename '{raw}': No such file or directory"
                )),
            })?;
        Ok(CommandOutput::None)
    }
}
