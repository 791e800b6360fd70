//! In-memory text buffer with a single selection

use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Text of one editor view plus its selection, as byte offsets.
///
/// An empty selection is a cursor. Edits move the selection onto the
/// inserted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    path: Option<PathBuf>,
    text: String,
    selection: Range<usize>,
    modified: bool,
}

impl Buffer {
    /// Create a buffer with the cursor at the start
    pub fn new(path: Option<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path,
            text: text.into(),
            selection: 0..0,
            modified: false,
        }
    }

    /// Select whole lines `start..=end` (1-based), including the last line's terminator
    pub fn select_lines(mut self, start: usize, end: usize) -> Option<Self> {
        debug!(start, end, "Buffer::select_lines: called");
        let starts = self.line_starts();
        if start == 0 || end < start || end > starts.len() {
            debug!(line_count = starts.len(), "Buffer::select_lines: out of range");
            return None;
        }
        let from = starts[start - 1];
        let to = starts.get(end).copied().unwrap_or(self.text.len());
        self.selection = from..to;
        Some(self)
    }

    /// Place the cursor at the start of a line (1-based)
    pub fn cursor_at_line(mut self, line: usize) -> Option<Self> {
        debug!(line, "Buffer::cursor_at_line: called");
        let starts = self.line_starts();
        if line == 0 || line > starts.len().max(1) {
            return None;
        }
        let at = starts.get(line - 1).copied().unwrap_or(0);
        self.selection = at..at;
        Some(self)
    }

    /// Select a byte range, clamped to the text and to character boundaries
    pub fn with_selection(mut self, range: Range<usize>) -> Self {
        let end = self.char_floor(range.end);
        let start = self.char_floor(range.start.min(end));
        self.selection = start..end;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn selected_text(&self) -> &str {
        &self.text[self.selection.clone()]
    }

    /// Line holding the start of the selection, without its terminator
    pub fn current_line(&self) -> &str {
        let range = self.current_line_range();
        &self.text[range]
    }

    /// Replace the selected text; the selection then covers the new text
    pub fn replace_selection(&mut self, replacement: &str) {
        debug!(selection = ?self.selection, len = replacement.len(), "Buffer::replace_selection: called");
        let start = self.selection.start;
        self.text.replace_range(self.selection.clone(), replacement);
        self.selection = start..start + replacement.len();
        self.modified = true;
    }

    /// Replace the current line (not its terminator) with `replacement`
    pub fn replace_current_line(&mut self, replacement: &str) {
        let range = self.current_line_range();
        debug!(?range, len = replacement.len(), "Buffer::replace_current_line: called");
        let start = range.start;
        self.text.replace_range(range, replacement);
        self.selection = start..start + replacement.len();
        self.modified = true;
    }

    fn current_line_range(&self) -> Range<usize> {
        let at = self.selection.start;
        let start = self.text[..at].rfind('\n').map_or(0, |i| i + 1);
        let mut end = self.text[at..].find('\n').map_or(self.text.len(), |i| at + i);
        if end > start && self.text.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        start..end
    }

    fn char_floor(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    fn line_starts(&self) -> Vec<usize> {
        let mut starts = Vec::new();
        let mut offset = 0;
        for line in self.text.split_inclusive('\n') {
            starts.push(offset);
            offset += line.len();
        }
        starts
    }
}
