//! Configuration for partials

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::resolver::DEFAULT_ROOTS;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extra or replacement include templates, keyed by extension
    pub syntaxes: BTreeMap<String, String>,

    /// Directory names that root include references
    pub roots: Vec<String>,

    /// Name new partial files with a leading underscore
    #[serde(rename = "underscore-partials")]
    pub underscore_partials: bool,

    /// Ask before overwriting an existing partial (otherwise refuse)
    #[serde(rename = "confirm-overwrite")]
    pub confirm_overwrite: bool,

    /// Open a partial right after extracting it
    #[serde(rename = "open-after-extract")]
    pub open_after_extract: bool,

    /// Wrap generated include statements at this width when the host has no preference
    #[serde(rename = "wrap-width")]
    pub wrap_width: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            syntaxes: BTreeMap::new(),
            roots: DEFAULT_ROOTS.iter().map(|r| (*r).to_string()).collect(),
            underscore_partials: true,
            confirm_overwrite: true,
            open_after_extract: true,
            wrap_width: None,
        }
    }
}

impl Config {
    /// Load the configuration for a `pt` invocation.
    ///
    /// An explicit `--config` path must load. Otherwise the first readable
    /// file among `./.partials.yml` and `<config_dir>/partials/partials.yml`
    /// wins; a broken file is logged and skipped. Missing keys keep their
    /// defaults, so a file holding only `syntaxes:` still gets the built-in
    /// roots.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::search_paths() {
            if !candidate.is_file() {
                continue;
            }
            match Self::load_from_file(&candidate) {
                Ok(config) => return Ok(config),
                Err(e) => tracing::warn!(path = %candidate.display(), error = %e, "Skipping unreadable config"),
            }
        }

        tracing::info!("No config file found, using built-in syntaxes and roots");
        Ok(Self::default())
    }

    /// Project file first, then the per-user file
    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".partials.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("partials").join("partials.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!(path = %path.as_ref().display(), roots = ?config.roots, overrides = config.syntaxes.len(), "Loaded config");
        Ok(config)
    }
}
