//! Port Inference Generator: black-box stubs from observed usage.

use std::collections::{BTreeMap, BTreeSet};

use strata_common::{Ident, InternalError};
use strata_ir::names::{self, escape_id, positional_key, unescape_id};
use strata_ir::{Module, PortDirection, Wire};

use crate::context::HierarchyContext;
use crate::errors::{note_ignored_parameter, HierarchyError};
use crate::portdecl::GenerateOptions;

/// How one cell type is used across the design.
#[derive(Debug, Default)]
struct Usage {
    /// Named connections seen, by IR spelling.
    ports: BTreeSet<String>,
    /// Widest signal seen per connection key, positional keys included.
    widths: BTreeMap<String, u32>,
    /// Parameter names seen.
    parameters: BTreeSet<String>,
}

/// A port with its final position.
struct PlacedPort {
    name: String,
    direction: PortDirection,
    width: u32,
}

/// Creates a black-box module for every undeclared cell type matching the
/// options' patterns. Returns the created modules in name order.
pub fn generate(
    ctx: &mut HierarchyContext<'_>,
    options: &GenerateOptions,
) -> Result<Vec<Ident>, HierarchyError> {
    let found = found_cell_types(ctx, options);
    let mut created = Vec::with_capacity(found.len());

    for cell_type in found {
        log::info!("Generate module for cell type {cell_type}:");
        let type_id = ctx.intern(&cell_type);
        let usage = collect_usage(ctx, type_id);
        let ports = place_ports(&cell_type, usage.ports.clone(), &usage.widths, options)?;

        let mut module = Module::new(type_id);
        module.set_bool_attribute(ctx.blackbox_attr, true);
        for (position, port) in (1u32..).zip(&ports) {
            module.add_wire(Wire::port(
                ctx.intern(&port.name),
                port.width,
                position,
                port.direction,
            ));
        }
        ctx.design.add_module(module).map_err(|_| {
            InternalError::new(format!("generated module `{cell_type}` already exists"))
        })?;

        for param in &usage.parameters {
            log::info!("  ignoring parameter {}.", unescape_id(param));
            ctx.sink
                .emit(note_ignored_parameter(unescape_id(&cell_type), unescape_id(param)));
        }
        log::info!("  module {} created.", unescape_id(&cell_type));
        created.push(type_id);
    }
    Ok(created)
}

/// Cell types that are not design modules or primitives and whose unescaped
/// name matches a pattern, in name order.
fn found_cell_types(ctx: &HierarchyContext<'_>, options: &GenerateOptions) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    for module in ctx.design.modules() {
        for cell in module.cells.values() {
            let type_name = ctx.name(cell.cell_type);
            if names::is_internal(type_name) || ctx.design.contains(cell.cell_type) {
                continue;
            }
            let plain = unescape_id(type_name);
            if options.cell_types.iter().any(|p| p.matches(plain)) {
                found.insert(type_name.to_string());
            }
        }
    }
    found
}

fn collect_usage(ctx: &HierarchyContext<'_>, cell_type: Ident) -> Usage {
    let mut usage = Usage::default();
    for module in ctx.design.modules() {
        for cell in module.cells.values().filter(|c| c.cell_type == cell_type) {
            for (key, sig) in &cell.connections {
                let key = ctx.name(*key);
                if !names::is_internal(key) {
                    usage.ports.insert(key.to_string());
                }
                let width = usage.widths.entry(key.to_string()).or_insert(0);
                *width = (*width).max(sig.width());
            }
            for param in cell.parameters.keys() {
                usage.parameters.insert(ctx.name(*param).to_string());
            }
        }
    }
    usage
}

/// Assigns every port a position: positional declarations first, then the
/// remaining names in lexicographic order against the wildcard declarations.
fn place_ports(
    cell_type: &str,
    mut pending: BTreeSet<String>,
    widths: &BTreeMap<String, u32>,
    options: &GenerateOptions,
) -> Result<Vec<PlacedPort>, HierarchyError> {
    let display_type = unescape_id(cell_type).to_string();
    for decl in &options.positional {
        pending.insert(escape_id(&decl.name));
    }

    let count = pending.len();
    let mut free: BTreeSet<u32> = (1..=count as u32).collect();
    let mut slots: Vec<Option<PlacedPort>> = (0..count).map(|_| None).collect();
    let observed = |name: &str| widths.get(name).copied().unwrap_or(0);

    for decl in &options.positional {
        let name = escape_id(&decl.name);
        let width = 1u32
            .max(observed(&name))
            .max(observed(&positional_key(decl.position)));
        log::info!(
            "  port {}: {} [{}:0] {}",
            decl.position,
            decl.direction,
            width - 1,
            decl.name
        );
        if decl.position as usize > count {
            return Err(HierarchyError::PortIndexOutOfRange {
                cell_type: display_type,
                position: decl.position,
                count,
            });
        }
        if !free.remove(&decl.position) {
            return Err(HierarchyError::PortIndexConflict {
                cell_type: display_type,
                position: decl.position,
            });
        }
        pending.remove(&name);
        slots[decl.position as usize - 1] = Some(PlacedPort {
            name,
            direction: decl.direction,
            width,
        });
    }

    for name in pending {
        let plain = unescape_id(&name);
        let Some(decl) = options.wildcards.iter().find(|d| d.pattern.matches(plain)) else {
            return Err(HierarchyError::UnmatchedPort {
                cell_type: display_type,
                port: plain.to_string(),
            });
        };
        let position = free.pop_first().ok_or_else(|| {
            InternalError::new(format!("no free port position left for `{plain}`"))
        })?;
        let width = 1u32.max(observed(&name));
        log::info!("  port {position}: {} [{}:0] {plain}", decl.direction, width - 1);
        slots[position as usize - 1] = Some(PlacedPort {
            name,
            direction: decl.direction,
            width,
        });
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            slot.ok_or_else(|| {
                HierarchyError::from(InternalError::new(format!(
                    "port position {} of `{display_type}` left empty",
                    i + 1
                )))
            })
        })
        .collect()
}
