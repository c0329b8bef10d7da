//! Bounded command history and the up/down recall cursor.

use std::collections::VecDeque;

/// Submitted lines, most recent first.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    limit: usize,
}

impl History {
    /// Create an empty history holding at most `limit` entries (minimum 1).
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Record a submitted line. Blank lines and exact repeats of the most
    /// recent entry are skipped. Returns whether the line was stored.
    pub fn push(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            return false;
        }
        if self.entries.front().is_some_and(|last| last == line) {
            return false;
        }
        self.entries.push_front(line.to_string());
        self.entries.truncate(self.limit);
        true
    }

    /// Entry `index` steps back (0 is the most recent).
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

/// Where the input line currently comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecallState {
    /// Editing the in-progress line.
    #[default]
    Idle,
    /// Showing the history entry at this index.
    Recalling(usize),
}

/// Recall cursor over a [`History`], remembering the in-progress line.
#[derive(Debug, Clone, Default)]
pub struct Recall {
    state: RecallState,
    draft: String,
}

impl Recall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RecallState {
        self.state
    }

    /// Step to an older entry, saturating at the oldest. `current` is the
    /// line being edited; it is saved the first time recall starts.
    /// Returns the line to show, or `None` when history is empty.
    pub fn up(&mut self, history: &History, current: &str) -> Option<String> {
        if history.is_empty() {
            return None;
        }
        let index = match self.state {
            RecallState::Idle => {
                self.draft = current.to_string();
                0
            },
            RecallState::Recalling(i) => (i + 1).min(history.len() - 1),
        };
        self.state = RecallState::Recalling(index);
        history.get(index).map(str::to_string)
    }

    /// Step to a newer entry; past the newest, restore the saved draft and
    /// go idle. Returns `None` (no change) when already idle.
    pub fn down(&mut self, history: &History) -> Option<String> {
        match self.state {
            RecallState::Idle => None,
            RecallState::Recalling(0) => {
                self.state = RecallState::Idle;
                Some(std::mem::take(&mut self.draft))
            },
            RecallState::Recalling(i) => {
                let index = (i - 1).min(history.len().saturating_sub(1));
                self.state = RecallState::Recalling(index);
                history.get(index).map(str::to_string)
            },
        }
    }

    /// Forget any recall in progress (called on submit).
    pub fn reset(&mut self) {
        self.state = RecallState::Idle;
        self.draft.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(lines: &[&str]) -> History {
        let mut h = History::new(50);
        for l in lines {
            h.push(l);
        }
        h
    }

    #[test]
    fn most_recent_first() {
        let h = history_of(&["ls", "cd /", "pwd"]);
        let all: Vec<&str> = h.iter().collect();
        assert_eq!(all, vec!["pwd", "cd /", "ls"]);
    }

    #[test]
    fn skips_blank_and_repeat() {
        let mut h = History::new(50);
        assert!(h.push("ls"));
        assert!(!h.push("ls"));
        assert!(!h.push("   "));
        assert!(!h.push(""));
        assert!(h.push("cd"));
        assert!(h.push("ls"));
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn bounded_to_limit() {
        let mut h = History::new(50);
        for i in 0..60 {
            h.push(&format!("cmd{i}"));
        }
        assert_eq!(h.len(), 50);
        assert_eq!(h.get(0), Some("cmd59"));
        assert_eq!(h.get(49), Some("cmd10"));
        assert!(h.iter().all(|e| e != "cmd9"));
    }

    #[test]
    fn zero_limit_clamped() {
        let mut h = History::new(0);
        h.push("a");
        h.push("b");
        assert_eq!(h.limit(), 1);
        assert_eq!(h.iter().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn up_on_empty_history_is_noop() {
        let h = History::new(5);
        let mut r = Recall::new();
        assert_eq!(r.up(&h, "draft"), None);
        assert_eq!(r.state(), RecallState::Idle);
    }

    #[test]
    fn up_saturates_at_oldest() {
        let h = history_of(&["one", "two"]);
        let mut r = Recall::new();
        assert_eq!(r.up(&h, "").as_deref(), Some("two"));
        assert_eq!(r.up(&h, "").as_deref(), Some("one"));
        assert_eq!(r.up(&h, "").as_deref(), Some("one"));
        assert_eq!(r.state(), RecallState::Recalling(1));
    }

    #[test]
    fn down_restores_draft_then_stays() {
        let h = history_of(&["one", "two"]);
        let mut r = Recall::new();
        r.up(&h, "half typed");
        r.up(&h, "ignored");
        assert_eq!(r.down(&h).as_deref(), Some("two"));
        assert_eq!(r.down(&h).as_deref(), Some("half typed"));
        assert_eq!(r.state(), RecallState::Idle);
        assert_eq!(r.down(&h), None);
    }

    #[test]
    fn down_when_idle_is_noop() {
        let h = history_of(&["one"]);
        let mut r = Recall::new();
        assert_eq!(r.down(&h), None);
    }

    #[test]
    fn reset_returns_to_idle() {
        let h = history_of(&["one"]);
        let mut r = Recall::new();
        r.up(&h, "x");
        r.reset();
        assert_eq!(r.state(), RecallState::Idle);
        assert_eq!(r.up(&h, "y").as_deref(), Some("one"));
        assert_eq!(r.down(&h).as_deref(), Some("y"));
    }
}
