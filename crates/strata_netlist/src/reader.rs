//! Builds design modules from netlist JSON.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;
use strata_common::{Ident, Interner};
use strata_ir::names::escape_id;
use strata_ir::{Cell, ConstValue, Design, Module, PortInfo, Wire};

use crate::error::NetlistError;
use crate::format::{ModuleJson, NetlistFile, ValueJson};
use crate::signal::{connection_to_sigspec, parse_logic_literal};

fn intern(interner: &Interner, name: &str) -> Ident {
    interner.get_or_intern(&escape_id(name))
}

pub(crate) fn value_from_json(value: &ValueJson) -> ConstValue {
    match value {
        ValueJson::Bool(b) => ConstValue::Bool(*b),
        ValueJson::Int(n) => ConstValue::Int(*n),
        ValueJson::Real(r) => ConstValue::Real(*r),
        ValueJson::Str(s) => match parse_logic_literal(s) {
            Some(bits) => ConstValue::Logic(bits),
            None => ConstValue::String(s.clone()),
        },
    }
}

fn values_from_json(
    values: &BTreeMap<String, ValueJson>,
    interner: &Interner,
) -> BTreeMap<Ident, ConstValue> {
    values
        .iter()
        .map(|(k, v)| (intern(interner, k), value_from_json(v)))
        .collect()
}

fn build_module(name: &str, json: &ModuleJson, interner: &Interner) -> Result<Module, NetlistError> {
    let mut module = Module::new(intern(interner, name));
    module.attributes = values_from_json(&json.attributes, interner);
    module.params = values_from_json(&json.parameters, interner);

    for (wire_name, w) in &json.wires {
        if w.width == 0 {
            return Err(NetlistError::ZeroWidth {
                module: name.to_string(),
                wire: wire_name.clone(),
            });
        }
        let mut wire = Wire::new(intern(interner, wire_name), w.width);
        wire.port = w.port.as_ref().map(|p| PortInfo {
            position: p.position,
            direction: p.direction.into(),
        });
        wire.width_param = w.width_param.as_deref().map(|p| intern(interner, p));
        module.add_wire(wire);
    }

    for (cell_name, c) in &json.cells {
        let mut cell = Cell::new(intern(interner, cell_name), intern(interner, &c.cell_type));
        cell.parameters = values_from_json(&c.parameters, interner);
        cell.param_refs = c
            .param_refs
            .iter()
            .map(|(k, v)| (intern(interner, k), intern(interner, v)))
            .collect();
        for (port, conn) in &c.connections {
            let sig = connection_to_sigspec(conn, &module, name, interner)?;
            cell.connections.insert(intern(interner, port), sig);
        }
        module.add_cell(cell);
    }
    Ok(module)
}

/// Parses netlist JSON and adds its modules to `design`.
///
/// Either every module in the text is added or none is. Returns the names of
/// the added modules.
pub fn read_netlist(
    text: &str,
    design: &mut Design,
    interner: &Interner,
) -> Result<Vec<Ident>, NetlistError> {
    let file: NetlistFile = serde_json::from_str(text)?;
    let mut modules = Vec::with_capacity(file.modules.len());
    for (name, json) in &file.modules {
        let module = build_module(name, json, interner)?;
        if design.contains(module.name) {
            return Err(NetlistError::DuplicateModule(name.clone()));
        }
        modules.push(module);
    }

    let names: Vec<Ident> = modules.iter().map(|m| m.name).collect();
    for module in modules {
        design.add_module(module).map_err(|dup| {
            NetlistError::DuplicateModule(interner.resolve(dup.0.name).to_string())
        })?;
    }
    debug!("read {} module(s) from netlist", names.len());
    Ok(names)
}

/// Reads a netlist file and adds its modules to `design`.
pub fn read_netlist_file(
    path: &Path,
    design: &mut Design,
    interner: &Interner,
) -> Result<Vec<Ident>, NetlistError> {
    let text = std::fs::read_to_string(path).map_err(|source| NetlistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_netlist(&text, design, interner)
}
