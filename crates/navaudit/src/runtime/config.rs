//! Typed configuration loading.

use crate::runtime::error::{NavauditError, NavauditResult};
use nav_hierarchy::corpus::DEFAULT_EXCLUDED_DIRS;
use nav_hierarchy::validate::DEFAULT_MISSING_ORDER_SENTINEL;
use nav_hierarchy::{Conventions, RenumberPolicy, ScanOptions, ValidationPolicy};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Config file looked up under the corpus root when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "navaudit.toml";

/// Generic TOML-backed config loader.
///
/// `ConfigLoader<T>` handles only filesystem access and TOML deserialization. Callers are still
/// responsible for semantic validation after the typed value is loaded.
#[derive(Clone, Debug)]
pub struct ConfigLoader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> ConfigLoader<T>
where
    T: DeserializeOwned,
{
    /// Create a loader for an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Create a loader for a path relative to `root`.
    pub fn at(root: &Path, relative_path: &str) -> Self {
        Self::new(root.join(relative_path))
    }

    /// Load and deserialize the configuration file.
    ///
    /// Missing files, unreadable files, and TOML parse failures are all surfaced as
    /// [`ErrorCategory::Config`](crate::runtime::error::ErrorCategory::Config).
    pub fn load(&self) -> NavauditResult<T> {
        let body = fs::read_to_string(&self.path).map_err(|err| {
            NavauditError::config(format!("failed to read {}: {err}", self.path.display()))
        })?;
        self.parse(&body)
    }

    /// Like [`ConfigLoader::load`], but an absent file yields `None`.
    pub fn load_optional(&self) -> NavauditResult<Option<T>> {
        match fs::read_to_string(&self.path) {
            Ok(body) => self.parse(&body).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(NavauditError::config(format!(
                "failed to read {}: {err}",
                self.path.display()
            ))),
        }
    }

    /// Return the config path on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, body: &str) -> NavauditResult<T> {
        toml::from_str(body).map_err(|err| {
            NavauditError::config(format!("failed to parse {}: {err}", self.path.display()))
        })
    }
}

/// Contents of `navaudit.toml`. Every field is optional.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NavauditConfig {
    /// Directory names skipped wherever they appear.
    pub excluded_dirs: Vec<String>,
    /// Landing page file stem.
    pub landing_page: String,
    /// Markdown extension without the dot.
    pub markdown_extension: String,
    /// Title of the home page.
    pub home_title: String,
    /// Sort key for roots with a missing or non-numeric order.
    pub missing_order_sentinel: f64,
    /// Enable the grand-parent consistency check.
    pub check_grand_parent: bool,
    /// `renumber` settings.
    pub renumber: RenumberPolicy,
}

impl Default for NavauditConfig {
    fn default() -> Self {
        let conventions = Conventions::default();
        Self {
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            landing_page: conventions.landing_page,
            markdown_extension: conventions.markdown_extension,
            home_title: ValidationPolicy::default().home_title,
            missing_order_sentinel: DEFAULT_MISSING_ORDER_SENTINEL,
            check_grand_parent: false,
            renumber: RenumberPolicy::default(),
        }
    }
}

impl NavauditConfig {
    /// Reject values that would make every document unreachable or unsortable.
    pub fn validate(&self) -> NavauditResult<()> {
        if self.landing_page.trim().is_empty() {
            return Err(NavauditError::config("`landing_page` must not be empty"));
        }
        let extension = self.markdown_extension.trim();
        if extension.is_empty() || extension.starts_with('.') {
            return Err(NavauditError::config(
                "`markdown_extension` must be a bare extension such as `md`",
            ));
        }
        if !self.missing_order_sentinel.is_finite() {
            return Err(NavauditError::config(
                "`missing_order_sentinel` must be a finite number",
            ));
        }
        Ok(())
    }

    /// File naming conventions.
    pub fn conventions(&self) -> Conventions {
        Conventions {
            landing_page: self.landing_page.clone(),
            markdown_extension: self.markdown_extension.clone(),
        }
    }

    /// Scan inputs rooted at `root`.
    pub fn scan_options(&self, root: &Path) -> ScanOptions {
        ScanOptions {
            root: root.to_path_buf(),
            excluded_dirs: self.excluded_dirs.clone(),
            conventions: self.conventions(),
        }
    }

    /// Validation knobs.
    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            conventions: self.conventions(),
            home_title: self.home_title.clone(),
            missing_order_sentinel: self.missing_order_sentinel,
            check_grand_parent: self.check_grand_parent,
        }
    }
}
