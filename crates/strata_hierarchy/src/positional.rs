//! Positional-Argument Remapper.
//!
//! Rewrites connection keys `$1`, `$2`, ... into the target module's port
//! names. A position the target does not export keeps its key and produces a
//! warning.

use std::collections::{BTreeMap, HashMap};

use strata_common::{Ident, Interner};
use strata_ir::names;

use crate::context::HierarchyContext;
use crate::errors::warn_unmapped_positional;

/// Remaps positional connections on every cell whose type is a design module.
///
/// Returns the number of cells rewritten.
pub fn remap_positionals(ctx: &mut HierarchyContext<'_>) -> usize {
    let mut work: Vec<(Ident, Ident, Ident)> = Vec::new();
    for module in ctx.design.modules() {
        for cell in module.cells.values() {
            if !ctx.design.contains(cell.cell_type) {
                continue;
            }
            if cell.connections.keys().any(|k| is_positional(ctx, *k)) {
                work.push((module.name, cell.name, cell.cell_type));
            }
        }
    }

    let mut port_maps: HashMap<Ident, HashMap<u32, Ident>> = HashMap::new();
    for &(_, _, target) in &work {
        port_maps.entry(target).or_insert_with(|| {
            ctx.design
                .module(target)
                .map(|m| {
                    m.port_wires()
                        .iter()
                        .filter_map(|w| w.port_position().map(|p| (p, w.name)))
                        .collect()
                })
                .unwrap_or_default()
        });
    }

    for &(module, cell, target) in &work {
        let (module_name, cell_name, target_name) =
            (ctx.display(module), ctx.display(cell), ctx.display(target));
        log::info!("Mapping positional arguments of cell {module_name}.{cell_name} ({target_name}).");
        let interner = ctx.interner;
        let sink = ctx.sink;
        let Some(instance) = ctx
            .design
            .module_mut(module)
            .and_then(|m| m.cells.get_mut(&cell))
        else {
            continue;
        };
        let port_map = port_maps.get(&target);
        let mut remapped = BTreeMap::new();
        for (key, sig) in std::mem::take(&mut instance.connections) {
            let Some(index) = positional_index(interner, key) else {
                remapped.insert(key, sig);
                continue;
            };
            match port_map.and_then(|m| m.get(&index)) {
                Some(&port) => {
                    remapped.insert(port, sig);
                }
                None => {
                    log::warn!(
                        "  Failed to map positional argument {index} of cell {module_name}.{cell_name} ({target_name})."
                    );
                    sink.emit(warn_unmapped_positional(index, module_name, cell_name, target_name));
                    remapped.insert(key, sig);
                }
            }
        }
        instance.connections = remapped;
    }
    work.len()
}

fn is_positional(ctx: &HierarchyContext<'_>, key: Ident) -> bool {
    positional_index(ctx.interner, key).is_some()
}

fn positional_index(interner: &Interner, key: Ident) -> Option<u32> {
    names::positional_index(interner.resolve(key))
}
