//! Terminal host - a file on disk as the buffer, prompts on the terminal

use colored::*;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::buffer::Buffer;
use crate::error::PartialError;
use crate::host::Host;
use crate::resolver::display_path;

/// Host used by the `pt` binary
pub struct TerminalHost {
    buffer: Buffer,
    name: Option<String>,
    answer: Option<bool>,
    editor: Option<DefaultEditor>,
}

impl TerminalHost {
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            name: None,
            answer: None,
            editor: None,
        }
    }

    /// Use `name` instead of prompting for one
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Answer every confirmation with `answer` instead of prompting
    pub fn with_answer(mut self, answer: Option<bool>) -> Self {
        self.answer = answer;
        self
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Write the buffer back to its file if a command edited it
    pub fn finish(self) -> Result<bool, PartialError> {
        match self.buffer.path() {
            Some(path) if self.buffer.is_modified() => {
                fs::write(path, self.buffer.text())?;
                info!(path = %display_path(path), "Saved buffer");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn readline(&mut self, prompt: &str, initial: &str) -> Option<String> {
        if self.editor.is_none() {
            match DefaultEditor::new() {
                Ok(editor) => self.editor = Some(editor),
                Err(e) => {
                    warn!(%e, "Failed to initialize readline");
                    return None;
                }
            }
        }
        let editor = self.editor.as_mut()?;

        match editor.readline_with_initial(prompt, (initial, "")) {
            Ok(line) => Some(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(e) => {
                warn!(%e, "Readline error");
                None
            }
        }
    }
}

impl Host for TerminalHost {
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
        debug!(%default, "TerminalHost::prompt_for_name: called");
        if let Some(name) = self.name.take() {
            return Some(name);
        }
        let prompt = format!("{} ", "Partial name:".cyan());
        let name = self.readline(&prompt, default)?;
        let name = name.trim();
        if name.is_empty() { None } else { Some(name.to_string()) }
    }

    fn confirm(&mut self, message: &str) -> bool {
        debug!(%message, "TerminalHost::confirm: called");
        if let Some(answer) = self.answer {
            return answer;
        }
        let prompt = format!("{} {} ", message.yellow(), "[y/N]".dimmed());
        self.readline(&prompt, "")
            .map(|reply| matches!(reply.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }

    fn open_file(&mut self, path: &Path) -> Result<(), PartialError> {
        println!("{}", display_path(path));
        Ok(())
    }

    fn show_message(&mut self, message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }
}
