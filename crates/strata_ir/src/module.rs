//! Modules, the unit of hierarchy.
//!
//! A [`Module`] owns its wires and cells by name. Templates are modules
//! registered under a `$abstract` name; they carry the parameter defaults and
//! a cache of the concrete modules already derived from them.

use std::collections::{BTreeMap, HashMap};

use strata_common::{ContentHash, Ident, Interner};
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::const_value::ConstValue;
use crate::names;
use crate::wire::Wire;

/// A single module in the design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// The module name.
    pub name: Ident,
    /// Attribute values (`\blackbox`, `\top`, ...).
    pub attributes: BTreeMap<Ident, ConstValue>,
    /// Declared parameters with their default or bound values.
    pub params: BTreeMap<Ident, ConstValue>,
    /// Wires keyed by name.
    pub wires: BTreeMap<Ident, Wire>,
    /// Cells keyed by instance name.
    pub cells: BTreeMap<Ident, Cell>,
    /// Parameter-assignment hash to derived module name.
    #[serde(skip)]
    pub derive_cache: HashMap<ContentHash, Ident>,
}

impl Module {
    /// Creates an empty module.
    pub fn new(name: Ident) -> Self {
        Self {
            name,
            attributes: BTreeMap::new(),
            params: BTreeMap::new(),
            wires: BTreeMap::new(),
            cells: BTreeMap::new(),
            derive_cache: HashMap::new(),
        }
    }

    /// Returns `true` if the attribute is present and a single-bit true flag.
    pub fn get_bool_attribute(&self, key: Ident) -> bool {
        self.attributes
            .get(&key)
            .is_some_and(ConstValue::is_true_flag)
    }

    /// Sets or erases a flag attribute.
    pub fn set_bool_attribute(&mut self, key: Ident, value: bool) {
        if value {
            self.attributes.insert(key, ConstValue::flag());
        } else {
            self.attributes.remove(&key);
        }
    }

    /// Returns `true` if the module is registered under a `$abstract` name.
    pub fn is_abstract(&self, interner: &Interner) -> bool {
        names::strip_abstract(interner.resolve(self.name)).is_some()
    }

    /// Adds a wire, replacing any wire of the same name.
    pub fn add_wire(&mut self, wire: Wire) {
        self.wires.insert(wire.name, wire);
    }

    /// Adds a cell, replacing any cell of the same name.
    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.insert(cell.name, cell);
    }

    /// Returns the exported wire at a 1-based position.
    pub fn wire_at_position(&self, position: u32) -> Option<&Wire> {
        self.wires
            .values()
            .find(|w| w.port_position() == Some(position))
    }

    /// Returns the exported wires ordered by position.
    pub fn port_wires(&self) -> Vec<&Wire> {
        let mut ports: Vec<&Wire> = self.wires.values().filter(|w| w.port.is_some()).collect();
        ports.sort_by_key(|w| w.port_position());
        ports
    }
}
