//! Array-Cell Normalizer.
//!
//! An array cell is one of `count` replicas that share one bus per port.
//! Once its type resolves, each connection is either one port wide (kept) or
//! `count` ports wide (the replica's slice is cut out).

use std::collections::BTreeMap;

use strata_common::{Ident, InternalError};
use strata_ir::names::{self, ArrayDescriptor};
use strata_ir::SigSpec;

use crate::context::HierarchyContext;
use crate::errors::HierarchyError;

/// Strips an `$array:<index>:<count>:` prefix from the type of `cell`.
///
/// Returns the descriptor and the base type, or `None` for ordinary types. A
/// descriptor that is not numeric or whose index is not below its count is
/// fatal.
pub fn split_array_type(
    ctx: &HierarchyContext<'_>,
    module: Ident,
    cell: Ident,
    cell_type: Ident,
) -> Result<Option<(ArrayDescriptor, Ident)>, HierarchyError> {
    let type_name = ctx.name(cell_type);
    if !type_name.starts_with(names::ARRAY_PREFIX) {
        return Ok(None);
    }
    match names::parse_array_type(type_name) {
        Some((desc, base)) if desc.index < desc.count => Ok(Some((desc, ctx.intern(base)))),
        _ => Err(HierarchyError::ArrayBadDescriptor {
            module: ctx.display(module).to_string(),
            cell: ctx.display(cell).to_string(),
            cell_type: type_name.to_string(),
        }),
    }
}

/// Slices the connections of one array cell against its target's ports.
///
/// A positional key (`$2`) is matched to the port at that position for the
/// width check; the key itself is left for the positional remapper.
pub fn normalize_array_cell(
    ctx: &mut HierarchyContext<'_>,
    module: Ident,
    cell: Ident,
    desc: ArrayDescriptor,
) -> Result<(), HierarchyError> {
    let owner = ctx.design.module(module).ok_or_else(|| {
        InternalError::new(format!("module `{}` vanished during expansion", ctx.name(module)))
    })?;
    let instance = owner.cells.get(&cell).ok_or_else(|| {
        InternalError::new(format!("cell `{}` vanished during expansion", ctx.name(cell)))
    })?;

    let location = |ctx: &HierarchyContext<'_>| {
        (ctx.display(module).to_string(), ctx.display(cell).to_string())
    };

    if desc.index >= desc.count {
        let (module, cell) = location(ctx);
        return Err(HierarchyError::ArrayBadDescriptor {
            module,
            cell,
            cell_type: names::array_type(desc, ctx.name(instance.cell_type)),
        });
    }

    let Some(target) = ctx.design.module(instance.cell_type) else {
        let (module, cell) = location(ctx);
        return Err(HierarchyError::ArrayUnknownType {
            module,
            cell,
            cell_type: ctx.display(instance.cell_type).to_string(),
        });
    };

    let mut sliced: BTreeMap<Ident, SigSpec> = BTreeMap::new();
    for (&key, sig) in &instance.connections {
        let port_name = names::positional_index(ctx.name(key))
            .and_then(|pos| target.wire_at_position(pos))
            .map_or(key, |w| w.name);
        let Some(port) = target.wires.get(&port_name) else {
            let (module, cell) = location(ctx);
            return Err(HierarchyError::ArrayUnknownPort {
                module,
                cell,
                port: ctx.display(key).to_string(),
            });
        };

        let signal_width = sig.width();
        if signal_width == port.width {
            continue;
        }
        if u64::from(signal_width) != u64::from(port.width) * u64::from(desc.count) {
            let (module, cell) = location(ctx);
            return Err(HierarchyError::ArraySizeMismatch {
                module,
                cell,
                port: ctx.display(key).to_string(),
                signal_width,
                port_width: port.width,
                count: desc.count,
            });
        }
        sliced.insert(key, sig.extract(port.width * desc.index, port.width));
    }

    if let Some(instance) = ctx
        .design
        .module_mut(module)
        .and_then(|m| m.cells.get_mut(&cell))
    {
        instance.connections.extend(sliced);
    }
    Ok(())
}
