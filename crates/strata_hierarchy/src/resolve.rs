//! Module Resolver: find a definition for a cell type that is not in the design.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use strata_common::Ident;
use strata_ir::names;
use strata_ir::ConstValue;

use crate::context::HierarchyContext;
use crate::derive::derive;
use crate::errors::HierarchyError;
use crate::frontend::LibraryFormat;

/// What the resolver did with a cell type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The type already names a design module.
    Present,
    /// The type was derived from its `$abstract` template; the cell's
    /// parameters have been consumed.
    Derived(Ident),
    /// The type was loaded from a library file.
    Loaded(PathBuf),
    /// A `$`-prefixed primitive, never resolved.
    Primitive,
    /// Not found; left for a later sweep.
    Deferred,
}

/// Where the cell sits, for error messages.
#[derive(Debug, Clone, Copy)]
pub struct CellSite {
    /// The containing module.
    pub module: Ident,
    /// The cell.
    pub cell: Ident,
}

/// Resolves `cell_type` for one cell.
///
/// Order: an `$abstract` template of the same name wins, even over a library
/// file; `$` primitives are leaves; then each library directory is searched for
/// `<type>.v` and `<type>.json`. An unresolved type is an error only under
/// `check`.
pub fn resolve_type(
    ctx: &mut HierarchyContext<'_>,
    site: CellSite,
    cell_type: Ident,
    parameters: &BTreeMap<Ident, ConstValue>,
    libdirs: &[PathBuf],
    check: bool,
) -> Result<Resolution, HierarchyError> {
    if ctx.design.contains(cell_type) {
        return Ok(Resolution::Present);
    }

    let type_name = ctx.name(cell_type);
    if let Some(template) = ctx.interner.get(&names::abstract_name(type_name)) {
        if ctx.design.contains(template) {
            let derived = derive(ctx, template, parameters)?;
            return Ok(Resolution::Derived(derived));
        }
    }

    if names::is_internal(type_name) {
        return Ok(Resolution::Primitive);
    }

    if let Some((path, format)) = find_library_file(libdirs, names::unescape_id(type_name)) {
        log::info!("Loading `{}` from {}.", ctx.display(cell_type), path.display());
        ctx.frontend.load(ctx.design, ctx.interner, &path, format)?;
        if !ctx.design.contains(cell_type) {
            return Err(HierarchyError::MissingLibraryModule {
                path,
                module: ctx.display(cell_type).to_string(),
            });
        }
        return Ok(Resolution::Loaded(path));
    }

    if check {
        return Err(HierarchyError::UnresolvedModule {
            module: ctx.display(site.module).to_string(),
            cell: ctx.display(site.cell).to_string(),
            cell_type: ctx.display(cell_type).to_string(),
        });
    }
    Ok(Resolution::Deferred)
}

/// Returns the first existing `<dir>/<stem>.<ext>`, directories in order and
/// formats in [`LibraryFormat::SEARCH_ORDER`] within each directory.
pub fn find_library_file(libdirs: &[PathBuf], stem: &str) -> Option<(PathBuf, LibraryFormat)> {
    libdirs.iter().find_map(|dir| search_dir(dir, stem))
}

fn search_dir(dir: &Path, stem: &str) -> Option<(PathBuf, LibraryFormat)> {
    LibraryFormat::SEARCH_ORDER.iter().find_map(|format| {
        let path = dir.join(format!("{stem}.{}", format.extension()));
        path.exists().then_some((path, *format))
    })
}
