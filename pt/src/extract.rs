//! Extractor - moves a selection into a partial file

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::PartialError;
use crate::host::Host;
use crate::partials::Partials;
use crate::resolver::{PathResolver, display_path, underscored};
use crate::text::{dedent, fill, leading_indent, line_ending};

/// Result of a successful extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// File the selection was written to
    pub written_path: PathBuf,
    /// Logical name used in the include statement
    pub include_name: String,
    /// Include statement that replaces the selection
    pub replacement: String,
    /// Whether an existing partial was overwritten
    pub overwritten: bool,
}

impl Partials {
    /// Write `selected` to the partial named by `reference` and build the
    /// include statement that replaces it.
    ///
    /// Returns `Ok(None)` when the user declines to overwrite an existing
    /// partial; nothing is written in that case. The caller edits the buffer.
    pub fn extract(
        &self,
        host: &mut dyn Host,
        selected: &str,
        current_file: &Path,
        reference: &str,
    ) -> Result<Option<Extraction>, PartialError> {
        debug!(?current_file, %reference, len = selected.len(), "Partials::extract: called");
        let (rule, extension) = self.registry().rule_for_path(current_file)?;

        if selected.trim().is_empty() {
            debug!("Partials::extract: empty selection");
            return Err(PartialError::EmptySelection);
        }

        let reference = PathResolver::normalize_reference(reference)?;
        let candidate = self.resolver().to_file_path(current_file, &reference, &extension)?;

        let (target, overwritten) = match self.resolver().find_on_disk(self.fs(), &candidate) {
            Some(existing) => {
                debug!(?existing, "Partials::extract: partial already exists");
                if !self.settings().confirm_overwrite {
                    return Err(PartialError::FileAlreadyExists { path: existing });
                }
                let question = format!("{} already exists. Overwrite it?", display_path(&existing));
                if !host.confirm(&question) {
                    info!(path = %display_path(&existing), "Overwrite declined");
                    return Ok(None);
                }
                (existing, true)
            }
            None if self.settings().underscore_partials => {
                let target = underscored(&candidate).unwrap_or_else(|| candidate.clone());
                (target, false)
            }
            None => (candidate, false),
        };

        if let Some(folder) = target.parent()
            && !folder.as_os_str().is_empty()
        {
            debug!(?folder, "Partials::extract: creating folder");
            self.fs().create_dir_all(folder)?;
        }

        self.fs().write(&target, &dedent(selected))?;

        let current_dir = current_file.parent().unwrap_or_else(|| Path::new(""));
        let include_name = self.resolver().to_include_name(&target, current_dir, &extension);
        let statement = rule.format(&include_name);

        let width = host.wrap_width().or(self.settings().wrap_width);
        let mut replacement = fill(&statement, leading_indent(selected), width);
        replacement.push_str(line_ending(selected));

        info!(path = %display_path(&target), %include_name, "Extracted partial");
        Ok(Some(Extraction {
            written_path: target,
            include_name,
            replacement,
            overwritten,
        }))
    }
}
