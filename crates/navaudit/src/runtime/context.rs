//! Shared command context passed into command families.

use crate::runtime::config::{ConfigLoader, NavauditConfig, DEFAULT_CONFIG_FILE};
use crate::runtime::error::{NavauditError, NavauditResult};
use std::path::{Path, PathBuf};

/// Shared execution context for navaudit commands.
#[derive(Clone, Debug)]
pub struct CommandContext {
    root: PathBuf,
    config: NavauditConfig,
    config_source: Option<PathBuf>,
}

impl CommandContext {
    /// Resolve the corpus root and load its configuration.
    ///
    /// An explicit `config_path` must exist. Without one, `<root>/navaudit.toml` is used when
    /// present and built-in defaults apply otherwise.
    pub fn new(root: &Path, config_path: Option<&Path>) -> NavauditResult<Self> {
        if !root.is_dir() {
            return Err(NavauditError::validation("corpus root is not a directory")
                .with_path(root)
                .with_hint("pass `--root <dir>` or set NAVAUDIT_ROOT"));
        }

        let (config, config_source) = match config_path {
            Some(path) => {
                let loader = ConfigLoader::<NavauditConfig>::new(path);
                (loader.load()?, Some(loader.path().to_path_buf()))
            }
            None => {
                let loader = ConfigLoader::<NavauditConfig>::at(root, DEFAULT_CONFIG_FILE);
                match loader.load_optional()? {
                    Some(config) => (config, Some(loader.path().to_path_buf())),
                    None => (NavauditConfig::default(), None),
                }
            }
        };
        config.validate().map_err(|err| match &config_source {
            Some(path) => err.with_path(path),
            None => err,
        })?;

        match &config_source {
            Some(path) => tracing::debug!(config = %path.display(), "loaded configuration"),
            None => tracing::debug!("no configuration file; using defaults"),
        }

        Ok(Self {
            root: root.to_path_buf(),
            config,
            config_source,
        })
    }

    /// Corpus root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Effective configuration.
    pub fn config(&self) -> &NavauditConfig {
        &self.config
    }

    /// File the configuration was read from, if any.
    pub fn config_source(&self) -> Option<&Path> {
        self.config_source.as_deref()
    }
}
