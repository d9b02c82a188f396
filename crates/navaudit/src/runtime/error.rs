//! Structured navaudit error types.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

/// Stable error categories for navaudit commands.
///
/// Categories stay coarse: they keep user-facing failures understandable without exposing
/// command internals in the type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorCategory {
    /// Invalid or unreadable configuration or correction plan.
    Config,
    /// Invalid user input.
    Validation,
    /// Filesystem or general I/O failure.
    Io,
    /// The audit or a correction batch completed but reported problems.
    Findings,
}

/// Structured error with contextual metadata.
///
/// Optional `operation`, `target`, and `hint` fields are attached as the error propagates so the
/// message stays actionable where it is finally printed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NavauditError {
    /// High-level error category.
    pub category: ErrorCategory,
    /// Human-readable message.
    pub message: String,
    /// Optional operation name.
    pub operation: Option<String>,
    /// Optional path target.
    pub target: Option<String>,
    /// Optional remediation hint.
    pub hint: Option<String>,
}

/// Convenience result type for navaudit internals.
pub type NavauditResult<T> = Result<T, NavauditError>;

impl NavauditError {
    /// Create an error with the given category and message.
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            operation: None,
            target: None,
            hint: None,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Config, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Validation, message)
    }

    /// Create an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Io, message)
    }

    /// Create a findings error.
    pub fn findings(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Findings, message)
    }

    /// Attach an operation label.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Attach a target path.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.target = Some(path.display().to_string());
        self
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for NavauditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(operation) = &self.operation {
            write!(f, " [operation: {operation}]")?;
        }
        if let Some(target) = &self.target {
            write!(f, " [target: {target}]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " [hint: {hint}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for NavauditError {}

impl From<nav_hierarchy::ScanError> for NavauditError {
    fn from(value: nav_hierarchy::ScanError) -> Self {
        NavauditError::io(value.to_string()).with_operation("scan documents")
    }
}
