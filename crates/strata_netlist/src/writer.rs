//! Serializes design modules to netlist JSON.

use std::collections::BTreeMap;
use std::path::Path;

use strata_common::{Ident, Interner};
use strata_ir::names::unescape_id;
use strata_ir::{ConstValue, Design, Module};

use crate::error::NetlistError;
use crate::format::{CellJson, ModuleJson, NetlistFile, PortJson, ValueJson, WireJson};
use crate::signal::sigspec_to_connection;

fn name(interner: &Interner, id: Ident) -> String {
    unescape_id(interner.resolve(id)).to_string()
}

pub(crate) fn value_to_json(value: &ConstValue) -> ValueJson {
    match value {
        ConstValue::Bool(b) => ValueJson::Bool(*b),
        ConstValue::Int(n) => ValueJson::Int(*n),
        ConstValue::Real(r) => ValueJson::Real(*r),
        ConstValue::Logic(bits) => ValueJson::Str(format!("{}'b{bits}", bits.width())),
        ConstValue::String(s) => ValueJson::Str(s.clone()),
    }
}

fn values_to_json(
    values: &BTreeMap<Ident, ConstValue>,
    interner: &Interner,
) -> BTreeMap<String, ValueJson> {
    values
        .iter()
        .map(|(k, v)| (name(interner, *k), value_to_json(v)))
        .collect()
}

fn module_to_json(module: &Module, interner: &Interner) -> ModuleJson {
    let wires = module
        .wires
        .values()
        .map(|w| {
            let json = WireJson {
                width: w.width,
                port: w.port.map(|p| PortJson {
                    position: p.position,
                    direction: p.direction.into(),
                }),
                width_param: w.width_param.map(|p| name(interner, p)),
            };
            (name(interner, w.name), json)
        })
        .collect();

    let cells = module
        .cells
        .values()
        .map(|c| {
            let json = CellJson {
                cell_type: name(interner, c.cell_type),
                parameters: values_to_json(&c.parameters, interner),
                param_refs: c
                    .param_refs
                    .iter()
                    .map(|(k, v)| (name(interner, *k), name(interner, *v)))
                    .collect(),
                connections: c
                    .connections
                    .iter()
                    .map(|(port, sig)| {
                        (name(interner, *port), sigspec_to_connection(sig, module, interner))
                    })
                    .collect(),
            };
            (name(interner, c.name), json)
        })
        .collect();

    ModuleJson {
        attributes: values_to_json(&module.attributes, interner),
        parameters: values_to_json(&module.params, interner),
        wires,
        cells,
    }
}

/// Converts the whole design to its file representation.
pub fn to_netlist_file(design: &Design, interner: &Interner) -> NetlistFile {
    NetlistFile {
        modules: design
            .modules()
            .map(|m| (name(interner, m.name), module_to_json(m, interner)))
            .collect(),
    }
}

/// Serializes the design as pretty-printed netlist JSON.
pub fn write_netlist(design: &Design, interner: &Interner) -> Result<String, NetlistError> {
    Ok(serde_json::to_string_pretty(&to_netlist_file(design, interner))?)
}

/// Writes the design to `path`.
pub fn write_netlist_file(
    path: &Path,
    design: &Design,
    interner: &Interner,
) -> Result<(), NetlistError> {
    let text = write_netlist(design, interner)?;
    std::fs::write(path, text + "\n").map_err(|source| NetlistError::Io {
        path: path.to_path_buf(),
        source,
    })
}
