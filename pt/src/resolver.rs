//! Path resolver - maps partial references to files on disk and back
//!
//! A partial reference such as `shared/card` is resolved against the current
//! file's directory, or against a root-convention directory (`templates`,
//! `views`) that contains it. On disk the partial may be named `card.ext` or
//! `_card.ext`; include names never carry the underscore.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::error::PartialError;
use crate::fs::FileSystem;

/// Default directory names that root template references
pub const DEFAULT_ROOTS: &[&str] = &["templates", "views"];

/// Directory names that shorten include references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootConventions {
    names: Vec<String>,
}

impl Default for RootConventions {
    fn default() -> Self {
        Self::new(DEFAULT_ROOTS.iter().copied())
    }
}

impl RootConventions {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    fn matches(&self, component: &Component<'_>) -> bool {
        match component {
            Component::Normal(name) => self.names.iter().any(|root| OsStr::new(root) == *name),
            _ => false,
        }
    }

    /// Index of the deepest component naming a root
    fn deepest(&self, components: &[Component<'_>]) -> Option<usize> {
        components.iter().rposition(|c| self.matches(c))
    }
}

/// Bidirectional translation between partial references and file paths
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    roots: RootConventions,
}

impl PathResolver {
    pub fn new(roots: RootConventions) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &RootConventions {
        &self.roots
    }

    /// Clean up a partial name typed by the user.
    ///
    /// Backslashes become `/`, and a leading underscore or a trailing
    /// extension on the leaf are dropped: `shared\_card.scss` becomes
    /// `shared/card`.
    pub fn normalize_reference(input: &str) -> Result<String, PartialError> {
        debug!(%input, "PathResolver::normalize_reference: called");
        let unified = input.trim().replace('\\', "/");
        let (folder, leaf) = match unified.rsplit_once('/') {
            Some((folder, leaf)) => (Some(folder), leaf),
            None => (None, unified.as_str()),
        };

        let leaf = leaf.strip_prefix('_').unwrap_or(leaf);
        let leaf = leaf.split('.').next().unwrap_or(leaf);

        let normalized = match folder {
            Some(folder) => format!("{}/{}", folder, leaf),
            None => leaf.to_string(),
        };

        let (folders, leaf) = split_reference(&normalized)?;
        let mut segments = folders;
        segments.push(leaf);
        let reference = segments.join("/");
        debug!(%reference, "PathResolver::normalize_reference: returning");
        Ok(reference)
    }

    /// Candidate path of a reference relative to the current file's directory
    pub fn to_file_path(&self, current_file: &Path, reference: &str, extension: &str) -> Result<PathBuf, PartialError> {
        let base = current_file.parent().unwrap_or_else(|| Path::new(""));
        self.join_reference(base, reference, extension)
    }

    /// Candidate path of a reference relative to `base`: `base/sub/leaf.ext`
    pub fn join_reference(&self, base: &Path, reference: &str, extension: &str) -> Result<PathBuf, PartialError> {
        debug!(?base, %reference, %extension, "PathResolver::join_reference: called");
        let (folders, leaf) = split_reference(reference)?;
        let mut path = base.to_path_buf();
        for folder in folders {
            path.push(folder);
        }
        path.push(format!("{}{}", leaf, extension));
        Ok(path)
    }

    /// Include name for a partial file, as seen from `current_dir`.
    ///
    /// When a root convention directory is `current_dir` or one of its
    /// parents, the name is taken from that root; otherwise it is relative to
    /// `current_dir`. Root names deeper than `current_dir` are ordinary
    /// folders. The extension and a leading underscore on the leaf are dropped.
    pub fn to_include_name(&self, file: &Path, current_dir: &Path, extension: &str) -> String {
        debug!(?file, ?current_dir, %extension, "PathResolver::to_include_name: called");
        let file_name = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let stem = file_name
            .strip_suffix(extension)
            .filter(|s| !s.is_empty())
            .or_else(|| file_name.split('.').next())
            .unwrap_or(file_name.as_str())
            .to_string();
        let stripped = file.with_file_name(&stem);

        let base = match self.root_above(current_dir) {
            Some(root) if stripped.starts_with(&root) => {
                debug!(?root, "PathResolver::to_include_name: shortening from root");
                root
            }
            _ => current_dir.to_path_buf(),
        };

        let segments: Vec<String> = match stripped.strip_prefix(&base) {
            Ok(relative) => relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect(),
            Err(_) => vec![display_path(&stripped)],
        };

        let mut name = segments.join("/");
        let leaf_start = name.rfind('/').map_or(0, |i| i + 1);
        if name[leaf_start..].starts_with('_') {
            name.remove(leaf_start);
        }
        debug!(%name, "PathResolver::to_include_name: returning");
        name
    }

    /// First existing file among `candidate` and its underscored form
    pub fn find_on_disk(&self, fs: &dyn FileSystem, candidate: &Path) -> Option<PathBuf> {
        debug!(?candidate, "PathResolver::find_on_disk: called");
        if fs.exists(candidate) {
            debug!("PathResolver::find_on_disk: exact path exists");
            return Some(candidate.to_path_buf());
        }

        let underscored = underscored(candidate)?;
        if fs.exists(&underscored) {
            debug!(?underscored, "PathResolver::find_on_disk: underscored path exists");
            return Some(underscored);
        }

        debug!("PathResolver::find_on_disk: not found");
        None
    }

    /// Directories a reference written in `current_file` may be relative to.
    ///
    /// The deepest root convention directory above the file comes first,
    /// followed by the file's own directory.
    pub fn reference_bases(&self, current_file: &Path) -> Vec<PathBuf> {
        let dir = current_file.parent().unwrap_or_else(|| Path::new(""));

        let mut bases = Vec::with_capacity(2);
        if let Some(root) = self.root_above(dir) {
            bases.push(root);
        }
        if !bases.iter().any(|b| b == dir) {
            bases.push(dir.to_path_buf());
        }
        debug!(?bases, "PathResolver::reference_bases: returning");
        bases
    }

    /// Deepest root convention directory that is `dir` or one of its parents
    fn root_above(&self, dir: &Path) -> Option<PathBuf> {
        let components: Vec<Component<'_>> = dir.components().collect();
        let index = self.roots.deepest(&components)?;
        Some(components[..=index].iter().collect())
    }

    /// Name offered when prompting for a new partial: `index.html.erb` gives `index/`
    pub fn default_reference(current_file: &Path) -> String {
        let name = current_file.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        let base = name.split('.').next().unwrap_or_default();
        format!("{}/", base)
    }
}

/// `dir/_leaf.ext` for `dir/leaf.ext`
pub fn underscored(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_string_lossy();
    Some(path.with_file_name(format!("_{}", name)))
}

/// Render a path with `/` separators
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Split a reference into its folder segments and leaf, rejecting anything
/// that could leave the base directory.
fn split_reference(reference: &str) -> Result<(Vec<&str>, &str), PartialError> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return Err(PartialError::invalid_reference(reference, "name is empty"));
    }
    if trimmed.starts_with('/') || trimmed.starts_with('\\') || trimmed.chars().nth(1) == Some(':') {
        return Err(PartialError::invalid_reference(reference, "name must be relative"));
    }

    let mut segments: Vec<&str> = trimmed
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    if segments.contains(&"..") {
        return Err(PartialError::invalid_reference(
            reference,
            "name must not leave the current directory",
        ));
    }
    if trimmed.ends_with(['/', '\\']) {
        return Err(PartialError::invalid_reference(reference, "name has no file part"));
    }

    let leaf = segments
        .pop()
        .ok_or_else(|| PartialError::invalid_reference(reference, "name has no file part"))?;
    Ok((segments, leaf))
}
