//! Design hierarchy elaboration.
//!
//! Given a [`Design`] whose modules instantiate each other (possibly with
//! parameters, possibly as arrays, possibly referring to modules that are not
//! loaded yet), [`run_hierarchy`]:
//!
//! 1. selects the top module, deriving it from its template if needed;
//! 2. prunes modules unreachable from the top, keeping templates;
//! 3. expands the hierarchy to a fixed point: loads missing modules from
//!    library directories, derives a concrete module for every parametrized
//!    instance and slices array-cell buses;
//! 4. prunes again and marks the top module;
//! 5. rewrites positional connections to named ones.
//!
//! In generate mode it instead synthesizes black-box modules for undeclared
//! cell types from how they are used.
//!
//! # Usage
//!
//! ```ignore
//! let options = HierarchyOptions { top: Some("top".into()), check: true, ..Default::default() };
//! let report = run_hierarchy(&mut design, &interner, &sink, &frontend, &options)?;
//! ```

#![warn(missing_docs)]

pub mod array;
pub mod context;
pub mod derive;
pub mod errors;
pub mod expand;
pub mod frontend;
pub mod generate;
pub mod portdecl;
pub mod positional;
pub mod prune;
pub mod resolve;

#[cfg(test)]
mod test_support;

use std::collections::BTreeMap;
use std::path::PathBuf;

use strata_common::{Ident, Interner};
use strata_diagnostics::DiagnosticSink;
use strata_ir::names;
use strata_ir::Design;

pub use context::HierarchyContext;
pub use errors::HierarchyError;
pub use frontend::{Frontend, FrontendError, LibraryFormat};
pub use portdecl::{GenerateArg, GenerateOptions};

use expand::ExpandSettings;
use prune::PruneSettings;

/// Settings for one run of the pass.
#[derive(Debug, Clone, Default)]
pub struct HierarchyOptions {
    /// Explicit top module, unescaped or escaped.
    pub top: Option<String>,
    /// Library directories searched for missing modules, in order.
    pub libdirs: Vec<PathBuf>,
    /// Fail on cell types that cannot be resolved.
    pub check: bool,
    /// Also delete unused black-box modules.
    pub purge_lib: bool,
    /// Leave positional connections as they are.
    pub keep_positionals: bool,
    /// Run generate mode instead of elaboration.
    pub generate: Option<GenerateOptions>,
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyReport {
    /// The top module, if one was selected.
    pub top: Option<Ident>,
    /// Expansion sweeps that changed the design.
    pub sweeps: usize,
    /// Modules deleted by pruning, both passes.
    pub removed_modules: usize,
    /// Cells whose positional connections were rewritten.
    pub remapped_cells: usize,
    /// Black boxes created in generate mode.
    pub generated_modules: Vec<Ident>,
}

/// Runs the hierarchy pass over `design`.
///
/// A fatal error is also emitted to `sink` as a diagnostic before it is
/// returned. Warnings go to `sink` only.
pub fn run_hierarchy(
    design: &mut Design,
    interner: &Interner,
    sink: &DiagnosticSink,
    frontend: &dyn Frontend,
    options: &HierarchyOptions,
) -> Result<HierarchyReport, HierarchyError> {
    let mut ctx = HierarchyContext::new(design, interner, sink, frontend);
    run(&mut ctx, options).inspect_err(|err| sink.emit(err.to_diagnostic()))
}

fn run(
    ctx: &mut HierarchyContext<'_>,
    options: &HierarchyOptions,
) -> Result<HierarchyReport, HierarchyError> {
    let mut report = HierarchyReport::default();

    if let Some(generate) = &options.generate {
        log::info!("Entering generate mode.");
        report.generated_modules = generate::generate(ctx, generate)?;
        return Ok(report);
    }

    let top = match &options.top {
        Some(name) => Some(select_top(ctx, name)?),
        None => ctx
            .design
            .modules()
            .filter(|m| m.get_bool_attribute(ctx.top_attr))
            .max_by_key(|m| ctx.name(m.name))
            .map(|m| m.name),
    };
    report.top = top;

    if let Some(top) = top {
        report.removed_modules += prune::prune(
            ctx,
            top,
            PruneSettings {
                purge_lib: options.purge_lib,
                first_pass: true,
            },
        );
    }

    report.sweeps = expand::expand_design(
        ctx,
        ExpandSettings {
            libdirs: &options.libdirs,
            check: options.check,
        },
    )?;

    if let Some(top) = top {
        if report.sweeps > 0 {
            log::info!("Re-running hierarchy analysis..");
            report.removed_modules += prune::prune(
                ctx,
                top,
                PruneSettings {
                    purge_lib: options.purge_lib,
                    first_pass: false,
                },
            );
        }
        let top_attr = ctx.top_attr;
        for module in ctx.design.modules_mut() {
            module.set_bool_attribute(top_attr, module.name == top);
        }
    }

    if !options.keep_positionals {
        report.remapped_cells = positional::remap_positionals(ctx);
    }

    Ok(report)
}

/// Finds the requested top module, deriving it from `$abstract<name>` with
/// default parameters when only the template exists.
fn select_top(ctx: &mut HierarchyContext<'_>, name: &str) -> Result<Ident, HierarchyError> {
    let escaped = names::escape_id(name);
    let top = ctx.intern(&escaped);
    if !ctx.design.contains(top) {
        let template = ctx.intern(&names::abstract_name(&escaped));
        if ctx.design.contains(template) {
            derive::derive(ctx, template, &BTreeMap::new())?;
        }
    }
    if ctx.design.contains(top) {
        Ok(top)
    } else {
        Err(HierarchyError::TopNotFound {
            name: name.to_string(),
        })
    }
}
