//! Input events the shell reacts to.
//!
//! Front-ends translate their native key handling into these events; the
//! shell never sees raw platform input.

/// A discrete editing event on the shell's input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Character typed.
    TextInput(char),
    /// Backspace / delete-left.
    Backspace,
    /// Recall an older history entry.
    HistoryUp,
    /// Recall a newer history entry (or the in-progress line).
    HistoryDown,
    /// Request completion of the current line.
    Complete,
    /// Submit the current line.
    Submit,
}
