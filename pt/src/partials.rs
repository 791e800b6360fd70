//! Partials - the immutable toolkit shared by every command

use std::fmt;
use tracing::debug;

use crate::config::Config;
use crate::error::PartialError;
use crate::fs::{FileSystem, LocalFs};
use crate::resolver::{PathResolver, RootConventions};
use crate::syntax::SyntaxRegistry;

/// Behaviour switches taken from the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub underscore_partials: bool,
    pub confirm_overwrite: bool,
    pub open_after_extract: bool,
    pub wrap_width: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            underscore_partials: true,
            confirm_overwrite: true,
            open_after_extract: true,
            wrap_width: None,
        }
    }
}

/// Syntax registry, path resolver and file system, built once at startup
/// and passed to every extract, navigate and dispose call.
pub struct Partials {
    registry: SyntaxRegistry,
    resolver: PathResolver,
    settings: Settings,
    fs: Box<dyn FileSystem>,
}

impl Default for Partials {
    fn default() -> Self {
        Self::new(SyntaxRegistry::builtin(), PathResolver::default(), Settings::default())
    }
}

impl Partials {
    pub fn new(registry: SyntaxRegistry, resolver: PathResolver, settings: Settings) -> Self {
        Self {
            registry,
            resolver,
            settings,
            fs: Box::new(LocalFs),
        }
    }

    /// Build from configuration, validating any template overrides
    pub fn from_config(config: &Config) -> Result<Self, PartialError> {
        debug!(?config, "Partials::from_config: called");
        let registry = SyntaxRegistry::with_overrides(&config.syntaxes)?;
        let resolver = PathResolver::new(RootConventions::new(config.roots.iter().cloned()));
        let settings = Settings {
            underscore_partials: config.underscore_partials,
            confirm_overwrite: config.confirm_overwrite,
            open_after_extract: config.open_after_extract,
            wrap_width: config.wrap_width,
        };
        Ok(Self::new(registry, resolver, settings))
    }

    /// Replace the file system (editor buffers, tests)
    pub fn with_fs(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    pub fn registry(&self) -> &SyntaxRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }
}

impl fmt::Debug for Partials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partials")
            .field("registry", &self.registry)
            .field("resolver", &self.resolver)
            .field("settings", &self.settings)
            .finish()
    }
}
