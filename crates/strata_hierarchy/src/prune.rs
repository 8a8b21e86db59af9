//! Reachability Pruner: mark from the top module, sweep the rest.

use std::collections::HashSet;

use strata_common::Ident;

use crate::context::HierarchyContext;

/// Retention rules for one pruning pass.
#[derive(Debug, Clone, Copy)]
pub struct PruneSettings {
    /// Also delete unused black-box modules.
    pub purge_lib: bool,
    /// Keep `$abstract` templates, which expansion may still derive from.
    pub first_pass: bool,
}

/// Returns the modules reachable from `top` through cell types.
///
/// Primitives and unresolved types are leaves. The walk logs the used-module
/// tree.
pub fn used_modules(ctx: &HierarchyContext<'_>, top: Ident) -> HashSet<Ident> {
    let mut used = HashSet::new();
    mark(ctx, top, 0, &mut used);
    used
}

fn mark(ctx: &HierarchyContext<'_>, module: Ident, indent: usize, used: &mut HashSet<Ident>) {
    let Some(m) = ctx.design.module(module) else {
        return;
    };
    if !used.insert(module) {
        return;
    }
    if indent == 0 {
        log::info!("Top module:  {}", ctx.name(module));
    } else {
        log::debug!("Used module: {:indent$}{}", "", ctx.name(module));
    }
    for cell in m.cells.values() {
        if ctx.design.contains(cell.cell_type) {
            mark(ctx, cell.cell_type, indent + 4, used);
        }
    }
}

/// Deletes every module not reachable from `top`, subject to the retention
/// rules. Returns the number of modules removed.
pub fn prune(ctx: &mut HierarchyContext<'_>, top: Ident, settings: PruneSettings) -> usize {
    let used = used_modules(ctx, top);

    let doomed: Vec<Ident> = ctx
        .design
        .module_names()
        .into_iter()
        .filter(|name| !used.contains(name))
        .filter(|&name| !(settings.first_pass && ctx.is_template_name(name)))
        .filter(|&name| settings.purge_lib || !ctx.is_blackbox(name))
        .collect();

    for &name in &doomed {
        log::info!("Removing unused module `{}`.", ctx.name(name));
        ctx.design.remove_module(name);
    }
    log::info!("Removed {} unused modules.", doomed.len());
    doomed.len()
}
