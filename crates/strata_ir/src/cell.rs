//! Cell instances.
//!
//! A [`Cell`] instantiates another module (or a `$`-prefixed primitive) by
//! name. Its type may also name a module that has not been loaded yet; the
//! hierarchy pass resolves such names in later sweeps.

use std::collections::BTreeMap;

use strata_common::Ident;
use serde::{Deserialize, Serialize};

use crate::const_value::ConstValue;
use crate::sigspec::SigSpec;

/// An instance of a module or primitive inside another module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// The instance name.
    pub name: Ident,
    /// The instantiated type: a module name, a primitive, or an unresolved name.
    pub cell_type: Ident,
    /// Port connections keyed by port name or positional key (`$1`, `$2`, ...).
    pub connections: BTreeMap<Ident, SigSpec>,
    /// Parameter overrides passed to the instantiated module.
    pub parameters: BTreeMap<Ident, ConstValue>,
    /// Parameters bound to a parameter of the enclosing template module.
    ///
    /// Maps the cell's parameter name to the enclosing module's parameter
    /// name. Filled into `parameters` when the enclosing module is derived.
    pub param_refs: BTreeMap<Ident, Ident>,
}

impl Cell {
    /// Creates a cell with no connections or parameters.
    pub fn new(name: Ident, cell_type: Ident) -> Self {
        Self {
            name,
            cell_type,
            connections: BTreeMap::new(),
            parameters: BTreeMap::new(),
            param_refs: BTreeMap::new(),
        }
    }

    /// Builder-style connection.
    pub fn with_connection(mut self, port: Ident, sig: SigSpec) -> Self {
        self.connections.insert(port, sig);
        self
    }

    /// Builder-style parameter override.
    pub fn with_parameter(mut self, name: Ident, value: ConstValue) -> Self {
        self.parameters.insert(name, value);
        self
    }

    /// Returns `true` if the cell carries parameters still to be applied.
    pub fn is_parametrized(&self) -> bool {
        !self.parameters.is_empty() || !self.param_refs.is_empty()
    }
}
