//! Shared runtime services: errors, configuration, command context, filesystem helpers.

pub mod config;
pub mod context;
pub mod error;
pub mod fs;
