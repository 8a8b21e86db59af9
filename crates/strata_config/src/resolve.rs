//! Merging command-line overrides into the `[hierarchy]` table.

use crate::types::{HierarchyConfig, ProjectConfig};

/// Values given on the command line.
///
/// Flags can only switch an option on; they never switch off what the
/// configuration file enables.
#[derive(Debug, Default, Clone)]
pub struct HierarchyOverrides {
    /// Explicit top module; replaces the configured one.
    pub top: Option<String>,
    /// Extra library directories, searched after the configured ones.
    pub libdirs: Vec<String>,
    /// `--check`.
    pub check: bool,
    /// `--purge-lib`.
    pub purge_lib: bool,
    /// `--keep-positionals`.
    pub keep_positionals: bool,
}

/// The effective hierarchy settings after merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHierarchy {
    /// Top module name, unescaped.
    pub top: Option<String>,
    /// Library directories in search order.
    pub libdirs: Vec<String>,
    /// Strict checking.
    pub check: bool,
    /// Purge unused black boxes.
    pub purge_lib: bool,
    /// Keep positional connection keys.
    pub keep_positionals: bool,
}

/// Merges the configured `[hierarchy]` table with command-line overrides.
///
/// The configured libdirs form the base and command-line libdirs are appended.
/// An explicit top on the command line replaces the configured top.
pub fn resolve_hierarchy(config: &ProjectConfig, overrides: &HierarchyOverrides) -> ResolvedHierarchy {
    let HierarchyConfig {
        top,
        libdirs,
        check,
        purge_lib,
        keep_positionals,
    } = &config.hierarchy;

    let mut merged_libdirs = libdirs.clone();
    merged_libdirs.extend(overrides.libdirs.iter().cloned());

    ResolvedHierarchy {
        top: overrides.top.clone().or_else(|| top.clone()),
        libdirs: merged_libdirs,
        check: *check || overrides.check,
        purge_lib: *purge_lib || overrides.purge_lib,
        keep_positionals: *keep_positionals || overrides.keep_positionals,
    }
}
