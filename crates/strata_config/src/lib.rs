//! Parsing and validation of `strata.toml` project configuration files.
//!
//! This crate reads the optional project configuration file and produces a
//! strongly-typed [`ProjectConfig`], then merges command-line overrides into a
//! [`ResolvedHierarchy`] for the hierarchy pass.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{find_config, load_config, load_config_file, load_config_from_str, CONFIG_FILE};
pub use resolve::{resolve_hierarchy, HierarchyOverrides, ResolvedHierarchy};
pub use types::*;
