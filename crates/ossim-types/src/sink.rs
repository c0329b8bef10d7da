//! Output sink: the only path by which the shell produces visible output.

/// Append-only destination for shell output, oldest line first.
pub trait OutputSink {
    /// Append one line. `markup` marks emphasized lines (headings, table
    /// headers); renderers are free to ignore it.
    fn display(&mut self, text: &str, markup: bool);

    /// Forget everything displayed so far.
    fn clear(&mut self) {}
}

/// A sink that keeps every line in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    lines: Vec<(String, bool)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines without their markup flag.
    pub fn lines(&self) -> Vec<&str> {
        self.lines.iter().map(|(text, _)| text.as_str()).collect()
    }

    /// All recorded lines with their markup flag.
    pub fn entries(&self) -> &[(String, bool)] {
        &self.lines
    }

    /// Remove and return the recorded lines.
    pub fn take(&mut self) -> Vec<String> {
        self.lines.drain(..).map(|(text, _)| text).collect()
    }
}

impl OutputSink for RecordingSink {
    fn display(&mut self, text: &str, markup: bool) {
        self.lines.push((text.to_string(), markup));
    }

    fn clear(&mut self) {
        self.lines.clear();
    }
}
