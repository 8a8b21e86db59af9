//! Hierarchy Expander: the fixed-point driver over all modules.

use std::path::PathBuf;

use strata_common::Ident;
use strata_ir::names::ArrayDescriptor;

use crate::array::{normalize_array_cell, split_array_type};
use crate::context::HierarchyContext;
use crate::derive::derive;
use crate::errors::HierarchyError;
use crate::resolve::{resolve_type, CellSite, Resolution};

/// Library search and strictness for expansion.
#[derive(Debug, Clone, Copy)]
pub struct ExpandSettings<'s> {
    /// Library directories, in search order.
    pub libdirs: &'s [PathBuf],
    /// Fail on cell types that cannot be resolved.
    pub check: bool,
}

/// Sweeps all modules until a sweep changes nothing.
///
/// Returns the number of sweeps that changed the design. Module names are
/// re-read at the start of every sweep, since derivation and library loads
/// add modules mid-sweep.
pub fn expand_design(
    ctx: &mut HierarchyContext<'_>,
    settings: ExpandSettings<'_>,
) -> Result<usize, HierarchyError> {
    let mut changed_sweeps = 0;
    loop {
        let mut did_something = false;
        for module in ctx.design.module_names() {
            if !ctx.design.contains(module) {
                continue;
            }
            if expand_module(ctx, module, settings)? {
                did_something = true;
            }
        }
        if !did_something {
            return Ok(changed_sweeps);
        }
        changed_sweeps += 1;
    }
}

/// Runs one expansion step over the cells of `module`.
///
/// Returns `true` if any cell was retargeted or any module was added.
/// Templates are skipped: their cells are specialized when they are derived.
pub fn expand_module(
    ctx: &mut HierarchyContext<'_>,
    module: Ident,
    settings: ExpandSettings<'_>,
) -> Result<bool, HierarchyError> {
    if ctx.is_template_name(module) {
        return Ok(false);
    }
    let cell_names: Vec<Ident> = match ctx.design.module(module) {
        Some(m) => m.cells.keys().copied().collect(),
        None => return Ok(false),
    };

    let mut did_something = false;
    let mut array_cells: Vec<(Ident, ArrayDescriptor)> = Vec::new();

    for cell in cell_names {
        let Some(instance) = ctx.design.module(module).and_then(|m| m.cells.get(&cell)) else {
            continue;
        };
        let mut cell_type = instance.cell_type;
        let parameters = instance.parameters.clone();

        if let Some((desc, base)) = split_array_type(ctx, module, cell, cell_type)? {
            array_cells.push((cell, desc));
            cell_type = base;
            set_cell_type(ctx, module, cell, cell_type, false);
        }

        let site = CellSite { module, cell };
        match resolve_type(ctx, site, cell_type, &parameters, settings.libdirs, settings.check)? {
            Resolution::Derived(derived) => {
                set_cell_type(ctx, module, cell, derived, true);
                did_something = true;
                continue;
            }
            Resolution::Primitive | Resolution::Deferred => continue,
            Resolution::Loaded(_) => did_something = true,
            Resolution::Present => {}
        }

        if parameters.is_empty() || ctx.is_blackbox(cell_type) {
            continue;
        }
        let derived = derive(ctx, cell_type, &parameters)?;
        set_cell_type(ctx, module, cell, derived, true);
        did_something = true;
    }

    for (cell, desc) in array_cells {
        normalize_array_cell(ctx, module, cell, desc)?;
    }

    Ok(did_something)
}

fn set_cell_type(
    ctx: &mut HierarchyContext<'_>,
    module: Ident,
    cell: Ident,
    cell_type: Ident,
    clear_parameters: bool,
) {
    if let Some(instance) = ctx
        .design
        .module_mut(module)
        .and_then(|m| m.cells.get_mut(&cell))
    {
        instance.cell_type = cell_type;
        if clear_parameters {
            instance.parameters.clear();
        }
    }
}
