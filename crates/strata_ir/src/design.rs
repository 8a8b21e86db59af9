//! Top-level design container.
//!
//! A [`Design`] maps module names to modules. Cells refer to their targets by
//! name only, so modules can be removed or cloned without fixing up pointers.

use std::collections::BTreeMap;

use strata_common::Ident;
use serde::{Deserialize, Serialize};

use crate::module::Module;

/// Returned by [`Design::add_module`] when the name is already taken.
///
/// Carries the rejected module back to the caller.
#[derive(Debug, thiserror::Error)]
#[error("a module with this name already exists")]
pub struct DuplicateModule(pub Module);

/// The set of all modules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Design {
    modules: BTreeMap<Ident, Module>,
}

impl Design {
    /// Creates an empty design.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module under its own name.
    pub fn add_module(&mut self, module: Module) -> Result<(), DuplicateModule> {
        if self.modules.contains_key(&module.name) {
            return Err(DuplicateModule(module));
        }
        self.modules.insert(module.name, module);
        Ok(())
    }

    /// Looks up a module by name.
    pub fn module(&self, name: Ident) -> Option<&Module> {
        self.modules.get(&name)
    }

    /// Looks up a module by name for mutation.
    pub fn module_mut(&mut self, name: Ident) -> Option<&mut Module> {
        self.modules.get_mut(&name)
    }

    /// Removes and returns a module.
    pub fn remove_module(&mut self, name: Ident) -> Option<Module> {
        self.modules.remove(&name)
    }

    /// Returns `true` if a module of this name exists.
    pub fn contains(&self, name: Ident) -> bool {
        self.modules.contains_key(&name)
    }

    /// Returns a snapshot of the current module names.
    pub fn module_names(&self) -> Vec<Ident> {
        self.modules.keys().copied().collect()
    }

    /// Iterates over all modules.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// Iterates mutably over all modules.
    pub fn modules_mut(&mut self) -> impl Iterator<Item = &mut Module> {
        self.modules.values_mut()
    }

    /// Returns the number of modules in the design.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }
}
