//! Command entry points - dispatch and user-facing reporting

use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::PartialError;
use crate::extract::Extraction;
use crate::host::Host;
use crate::locate::Inlining;
use crate::partials::Partials;
use crate::resolver::{PathResolver, display_path};

/// The two editor commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Extract the selection, or open the partial under the cursor when nothing is selected
    ExtractOrNavigate,
    /// Inline the partial referenced on the current line
    Dispose,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExtractOrNavigate => write!(f, "extract-or-navigate"),
            Self::Dispose => write!(f, "dispose"),
        }
    }
}

impl std::str::FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extract-or-navigate" | "extract" | "navigate" => Ok(Self::ExtractOrNavigate),
            "dispose" | "inline" => Ok(Self::Dispose),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

/// What a command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Extracted(Extraction),
    Opened(PathBuf),
    Inlined(Inlining),
    /// The user cancelled a prompt; nothing changed
    Cancelled,
}

impl Outcome {
    /// Status line for the user, if the outcome warrants one
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Extracted(extraction) => Some(format!("{} created successfully", extraction.include_name)),
            Self::Inlined(inlining) if inlining.deleted => {
                Some(format!("Inlined and deleted {}", display_path(&inlining.partial)))
            }
            Self::Inlined(inlining) => Some(format!("Inlined {}", display_path(&inlining.partial))),
            Self::Opened(_) | Self::Cancelled => None,
        }
    }
}

/// Run an action against the host's current buffer.
///
/// Errors are returned unreported; see `run` for the reporting wrapper.
pub fn dispatch(partials: &Partials, host: &mut dyn Host, action: Action) -> Result<Outcome, PartialError> {
    debug!(%action, "dispatch: called");
    let current_file = host.current_file().ok_or(PartialError::NoCurrentFile)?;

    match action {
        Action::ExtractOrNavigate => {
            let selection = host.selection();
            if selection.is_empty() {
                debug!("dispatch: empty selection, navigating");
                let line = host.current_line();
                let path = partials.navigate(host, &current_file, &line)?;
                return Ok(Outcome::Opened(path));
            }

            // Unsupported files fail before the user is asked for a name
            partials.registry().rule_for_path(&current_file)?;

            let default = PathResolver::default_reference(&current_file);
            let Some(name) = host.prompt_for_name(&default) else {
                debug!("dispatch: name prompt cancelled");
                return Ok(Outcome::Cancelled);
            };

            let Some(extraction) = partials.extract(host, &selection, &current_file, &name)? else {
                return Ok(Outcome::Cancelled);
            };

            host.replace_selection(&extraction.replacement)?;
            if partials.settings().open_after_extract
                && let Err(e) = host.open_file(&extraction.written_path)
            {
                warn!(error = %e, "dispatch: failed to open extracted partial");
                host.show_error(&format!("Could not open {}: {}", display_path(&extraction.written_path), e));
            }
            Ok(Outcome::Extracted(extraction))
        }
        Action::Dispose => {
            let line = host.current_line();
            partials.dispose(host, &current_file, &line).map(Outcome::Inlined)
        }
    }
}

/// Run an action and report the result through the host
pub fn run(partials: &Partials, host: &mut dyn Host, action: Action) -> Result<Outcome, PartialError> {
    match dispatch(partials, host, action) {
        Ok(outcome) => {
            if let Some(message) = outcome.message() {
                host.show_message(&message);
            }
            Ok(outcome)
        }
        Err(e) => {
            warn!(%action, error = %e, "Command failed");
            host.show_error(&e.to_string());
            Err(e)
        }
    }
}
