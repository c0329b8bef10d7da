//! Tab completion for command names and path arguments.
//!
//! The first token completes against the command set. For path-taking
//! commands the last token completes against the children of the directory
//! it names. A single match completes outright; several matches are reported
//! and the line only advances to their longest common prefix.
//!
//! Trailing whitespace is read as the start of a new, empty argument, so
//! `cd <TAB>` lists the current directory instead of re-completing `cd`.

use ossim_vfs::{MemoryVfs, Node};

use crate::interpreter::CommandTag;

/// Outcome of a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing matched; the line is left alone and nothing is shown.
    None,
    /// Exactly one match; the full replacement line.
    Single(String),
    /// Several matches. `line` is the advanced line when the common prefix
    /// is strictly longer than what was typed.
    Ambiguous {
        candidates: Vec<String>,
        line: Option<String>,
    },
}

/// Longest string that prefixes every candidate, compared char by char.
/// Empty when there are no candidates.
pub fn common_prefix<S: AsRef<str>>(candidates: &[S]) -> String {
    let Some((first, rest)) = candidates.split_first() else {
        return String::new();
    };
    let mut prefix: &str = first.as_ref();
    for candidate in rest {
        let candidate = candidate.as_ref();
        let shared: usize = prefix
            .char_indices()
            .zip(candidate.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((i, c), _)| i + c.len_utf8())
            .unwrap_or(0);
        prefix = &prefix[..shared];
        if prefix.is_empty() {
            break;
        }
    }
    prefix.to_string()
}

/// Complete `line` against the command set and the filesystem.
pub fn complete(line: &str, vfs: &MemoryVfs) -> Completion {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&first) = tokens.first() else {
        return Completion::None;
    };
    // Trailing whitespace starts a new, empty token.
    let new_token = line.ends_with(char::is_whitespace);

    if tokens.len() == 1 && !new_token {
        return complete_command(first);
    }

    let takes_path = CommandTag::parse(&first.to_lowercase()).is_some_and(|t| t.takes_path());
    if !takes_path {
        return Completion::None;
    }
    let (head, partial) = match tokens.split_last() {
        Some((last, rest)) if !new_token => (rest, *last),
        _ => (&tokens[..], ""),
    };
    complete_path(head, partial, vfs)
}

fn complete_command(partial: &str) -> Completion {
    let partial_lower = partial.to_lowercase();
    let matches: Vec<String> = CommandTag::ALL
        .iter()
        .map(|t| t.name())
        .filter(|name| name.starts_with(&partial_lower))
        .map(str::to_string)
        .collect();
    log::debug!("Command completion for {partial:?}: {} matches", matches.len());

    match matches.len() {
        0 => Completion::None,
        1 => Completion::Single(format!("{} ", matches[0])),
        _ => {
            let common = common_prefix(&matches);
            let line = (common.len() > partial.len()).then_some(common);
            Completion::Ambiguous {
                candidates: matches,
                line,
            }
        },
    }
}

/// Split point of a partial path argument.
struct ParsedPath<'a> {
    /// Everything up to and including the last `/` (may be empty).
    dir_part: &'a str,
    /// The bare name being completed.
    name_part: &'a str,
}

impl<'a> ParsedPath<'a> {
    fn parse(partial: &'a str) -> Self {
        match partial.rfind('/') {
            Some(idx) => Self {
                dir_part: &partial[..=idx],
                name_part: &partial[idx + 1..],
            },
            None => Self {
                dir_part: "",
                name_part: partial,
            },
        }
    }

    /// Absolute path of the directory to search.
    fn search_dir(&self, vfs: &MemoryVfs) -> String {
        vfs.resolve(self.dir_part)
    }
}

fn complete_path(head: &[&str], partial: &str, vfs: &MemoryVfs) -> Completion {
    let parsed = ParsedPath::parse(partial);
    let search_dir = parsed.search_dir(vfs);
    let Some(dir) = vfs.navigate(&search_dir) else {
        return Completion::None;
    };
    let matches: Vec<(&str, bool)> = dir
        .children()
        .filter(|(name, _)| name.starts_with(parsed.name_part))
        .map(|(name, node)| (name, matches!(node, Node::Directory(_))))
        .collect();
    log::debug!(
        "Path completion for {partial:?} in {search_dir}: {} matches",
        matches.len()
    );

    let rebuild = |last: &str| -> String {
        let mut line = head.join(" ");
        line.push(' ');
        line.push_str(last);
        line
    };

    match matches.as_slice() {
        [] => Completion::None,
        [(name, is_dir)] => {
            let suffix = if *is_dir { "/" } else { "" };
            Completion::Single(rebuild(&format!("{}{name}{suffix}", parsed.dir_part)))
        },
        _ => {
            let candidates: Vec<String> = matches.iter().map(|(n, _)| n.to_string()).collect();
            let common = common_prefix(&candidates);
            let line = (common.len() > parsed.name_part.len())
                .then(|| rebuild(&format!("{}{common}", parsed.dir_part)));
            Completion::Ambiguous { candidates, line }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit_vfs() -> MemoryVfs {
        let mut vfs = MemoryVfs::new();
        vfs.create_file("/", "apple", "").unwrap();
        vfs.create_file("/", "apply", "").unwrap();
        vfs.create_directory("/", "banana").unwrap();
        vfs
    }

    #[test]
    fn common_prefix_cases() {
        assert_eq!(common_prefix::<&str>(&[]), "");
        assert_eq!(common_prefix(&["only"]), "only");
        assert_eq!(common_prefix(&["apple", "apply"]), "appl");
        assert_eq!(common_prefix(&["abc", "xyz"]), "");
        assert_eq!(common_prefix(&["ab", "abc", "abd"]), "ab");
    }

    #[test]
    fn common_prefix_multibyte() {
        assert_eq!(common_prefix(&["caf\u{e9}s", "caf\u{e9}"]), "caf\u{e9}");
        assert_eq!(common_prefix(&["\u{e9}a", "\u{e8}a"]), "");
    }

    #[test]
    fn empty_line_completes_nothing() {
        let vfs = MemoryVfs::new();
        assert_eq!(complete("", &vfs), Completion::None);
        assert_eq!(complete("   ", &vfs), Completion::None);
    }

    #[test]
    fn unique_command() {
        let vfs = MemoryVfs::new();
        assert_eq!(complete("wh", &vfs), Completion::Single("whoami ".to_string()));
        assert_eq!(complete("PS", &vfs), Completion::Single("ps ".to_string()));
    }

    #[test]
    fn ambiguous_command_without_progress() {
        let vfs = MemoryVfs::new();
        match complete("c", &vfs) {
            Completion::Ambiguous { candidates, line } => {
                assert_eq!(candidates, vec!["cd", "cat", "clear"]);
                assert_eq!(line, None);
            },
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn ambiguous_command_keeps_candidate_order() {
        let vfs = MemoryVfs::new();
        match complete("r", &vfs) {
            Completion::Ambiguous { candidates, line } => {
                assert_eq!(candidates, vec!["rm", "rename", "run"]);
                assert_eq!(line, None);
            },
            other => panic!("expected ambiguous, got {other:?}"),
        }
        match complete("M", &vfs) {
            Completion::Ambiguous { candidates, .. } => {
                assert_eq!(candidates, vec!["mkdir", "mem"]);
            },
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn unknown_command_prefix() {
        let vfs = MemoryVfs::new();
        assert_eq!(complete("zz", &vfs), Completion::None);
    }

    #[test]
    fn path_ambiguous_advances() {
        let vfs = fruit_vfs();
        assert_eq!(
            complete("cat app", &vfs),
            Completion::Ambiguous {
                candidates: vec!["apple".to_string(), "apply".to_string()],
                line: Some("cat appl".to_string()),
            }
        );
    }

    #[test]
    fn path_ambiguous_no_progress() {
        let vfs = fruit_vfs();
        assert_eq!(
            complete("cat appl", &vfs),
            Completion::Ambiguous {
                candidates: vec!["apple".to_string(), "apply".to_string()],
                line: None,
            }
        );
    }

    #[test]
    fn path_single_directory_gets_slash() {
        let vfs = fruit_vfs();
        assert_eq!(
            complete("cd b", &vfs),
            Completion::Single("cd banana/".to_string())
        );
    }

    #[test]
    fn path_single_file_no_slash() {
        let mut vfs = fruit_vfs();
        vfs.create_file("/banana", "peel.txt", "").unwrap();
        assert_eq!(
            complete("cat banana/p", &vfs),
            Completion::Single("cat banana/peel.txt".to_string())
        );
        assert_eq!(
            complete("cat /banana/p", &vfs),
            Completion::Single("cat /banana/peel.txt".to_string())
        );
    }

    #[test]
    fn path_relative_to_cwd() {
        let mut vfs = fruit_vfs();
        vfs.create_file("/banana", "seed", "").unwrap();
        vfs.change_directory("/banana").unwrap();
        assert_eq!(complete("rm se", &vfs), Completion::Single("rm seed".to_string()));
    }

    #[test]
    fn trailing_space_lists_directory() {
        let vfs = fruit_vfs();
        match complete("ls ", &vfs) {
            Completion::Ambiguous { candidates, line } => {
                assert_eq!(candidates, vec!["apple", "apply", "banana"]);
                assert_eq!(line, None);
            },
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn non_path_command_is_silent() {
        let vfs = fruit_vfs();
        assert_eq!(complete("echo app", &vfs), Completion::None);
        assert_eq!(complete("bogus app", &vfs), Completion::None);
    }

    #[test]
    fn missing_directory_is_silent() {
        let vfs = fruit_vfs();
        assert_eq!(complete("cat nope/x", &vfs), Completion::None);
        assert_eq!(complete("cat apple/x", &vfs), Completion::None);
        assert_eq!(complete("cat zzz", &vfs), Completion::None);
    }

    #[test]
    fn completes_last_argument_only() {
        let vfs = fruit_vfs();
        assert_eq!(
            complete("rename apple b", &vfs),
            Completion::Single("rename apple banana/".to_string())
        );
    }

    #[test]
    fn name_match_is_case_sensitive() {
        let vfs = fruit_vfs();
        assert_eq!(complete("cat APP", &vfs), Completion::None);
    }
}
