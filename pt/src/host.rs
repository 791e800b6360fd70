//! Host capabilities - what the surrounding editor provides
//!
//! The partial commands never talk to a UI directly. Buffer access, prompts
//! and opening files go through `Host`, so the same commands run inside an
//! editor integration, the `pt` terminal front end, or a test.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::buffer::Buffer;
use crate::error::PartialError;

/// Editor capabilities needed by the partial commands
pub trait Host {
    /// Path of the file being edited
    fn current_file(&self) -> Option<PathBuf>;

    /// Selected text; empty when there is only a cursor
    fn selection(&self) -> String;

    /// Line holding the cursor, without its terminator
    fn current_line(&self) -> String;

    fn replace_selection(&mut self, text: &str) -> Result<(), PartialError>;

    fn replace_current_line(&mut self, text: &str) -> Result<(), PartialError>;

    /// Ask for a partial name; `None` when the user cancels
    fn prompt_for_name(&mut self, default: &str) -> Option<String>;

    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> bool;

    fn open_file(&mut self, path: &Path) -> Result<(), PartialError>;

    fn show_message(&mut self, message: &str);

    fn show_error(&mut self, message: &str);

    /// Preferred maximum line width for generated statements
    fn wrap_width(&self) -> Option<usize> {
        None
    }
}

/// Scripted host over an in-memory buffer.
///
/// Prompts are answered from the queued values and everything shown to the
/// user is recorded, which makes it suitable for tests and for embedding
/// without a UI.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    pub buffer: Buffer,
    /// Answer to the name prompt (`None` cancels)
    pub name: Option<String>,
    /// Answers to confirmations, in order; exhausted means "no"
    pub answers: VecDeque<bool>,
    pub width: Option<usize>,
    pub questions: Vec<String>,
    pub name_defaults: Vec<String>,
    pub opened: Vec<PathBuf>,
    pub messages: Vec<String>,
    pub errors: Vec<String>,
}

impl MemoryHost {
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            name: None,
            answers: VecDeque::new(),
            width: None,
            questions: Vec::new(),
            name_defaults: Vec::new(),
            opened: Vec::new(),
            messages: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_answers(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.answers = answers.into_iter().collect();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }
}

impl Host for MemoryHost {
    fn current_file(&self) -> Option<PathBuf> {
        self.buffer.path().map(Path::to_path_buf)
    }

    fn selection(&self) -> String {
        self.buffer.selected_text().to_string()
    }

    fn current_line(&self) -> String {
        self.buffer.current_line().to_string()
    }

    fn replace_selection(&mut self, text: &str) -> Result<(), PartialError> {
        self.buffer.replace_selection(text);
        Ok(())
    }

    fn replace_current_line(&mut self, text: &str) -> Result<(), PartialError> {
        self.buffer.replace_current_line(text);
        Ok(())
    }

    fn prompt_for_name(&mut self, default: &str) -> Option<String> {
        debug!(%default, "MemoryHost::prompt_for_name: called");
        self.name_defaults.push(default.to_string());
        self.name.take()
    }

    fn confirm(&mut self, message: &str) -> bool {
        debug!(%message, "MemoryHost::confirm: called");
        self.questions.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }

    fn open_file(&mut self, path: &Path) -> Result<(), PartialError> {
        self.opened.push(path.to_path_buf());
        Ok(())
    }

    fn show_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn wrap_width(&self) -> Option<usize> {
        self.width
    }
}
