//! Module Deriver: clone-and-specialize with a per-template cache.

use std::collections::BTreeMap;

use strata_common::{ContentHash, Ident, InternalError};
use strata_ir::names::{self, PARAMOD_PREFIX};
use strata_ir::ConstValue;

use crate::context::HierarchyContext;
use crate::errors::HierarchyError;

/// Returns the concrete module for `template` under `assignment`.
///
/// The assignment is canonicalized by parameter name, so two assignments with
/// the same contents always map to the same module. A repeated call with an
/// equal assignment returns the cached name without touching the design.
///
/// An empty assignment yields the template's base name (`$abstract\adder`
/// derives to `\adder`); otherwise the name is `$paramod\adder\WIDTH=8`.
pub fn derive(
    ctx: &mut HierarchyContext<'_>,
    template: Ident,
    assignment: &BTreeMap<Ident, ConstValue>,
) -> Result<Ident, HierarchyError> {
    let template_name = ctx.name(template);
    let source = ctx.design.module(template).ok_or_else(|| {
        InternalError::new(format!("derivation template `{template_name}` is not in the design"))
    })?;

    let mut sorted: Vec<(&str, &ConstValue)> = assignment
        .iter()
        .map(|(k, v)| (ctx.name(*k), v))
        .collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let key = assignment_hash(&sorted);

    if let Some(&cached) = source.derive_cache.get(&key) {
        if ctx.design.contains(cached) {
            return Ok(cached);
        }
    }

    let base = names::strip_abstract(template_name).unwrap_or(template_name);
    let is_template = base.len() != template_name.len();

    if !assignment.is_empty() && !is_template && source.params.is_empty() {
        return Err(HierarchyError::NotParametric {
            module: names::unescape_id(base).to_string(),
        });
    }
    if let Some(unknown) = assignment.keys().find(|k| !source.params.contains_key(k)) {
        return Err(HierarchyError::IllFormedParameters {
            module: names::unescape_id(base).to_string(),
            parameter: ctx.display(*unknown).to_string(),
        });
    }

    let derived_name = ctx.intern(&derived_module_name(base, &sorted));

    if !ctx.design.contains(derived_name) {
        log::info!(
            "Deriving module `{}` as `{}`.",
            names::unescape_id(base),
            ctx.name(derived_name)
        );
        let mut module = source.clone();
        module.name = derived_name;
        module.derive_cache.clear();
        for (param, value) in assignment {
            module.params.insert(*param, value.clone());
        }

        for wire in module.wires.values_mut() {
            let Some(param) = wire.width_param else {
                continue;
            };
            let width = module
                .params
                .get(&param)
                .and_then(ConstValue::as_int)
                .and_then(|w| u32::try_from(w).ok())
                .filter(|&w| w > 0)
                .ok_or_else(|| HierarchyError::InvalidParamWidth {
                    module: ctx.display(derived_name).to_string(),
                    wire: ctx.display(wire.name).to_string(),
                    parameter: ctx.display(param).to_string(),
                })?;
            wire.width = width;
        }

        for cell in module.cells.values_mut() {
            for (cell_param, module_param) in std::mem::take(&mut cell.param_refs) {
                let value = module.params.get(&module_param).cloned().ok_or_else(|| {
                    HierarchyError::IllFormedParameters {
                        module: names::unescape_id(base).to_string(),
                        parameter: ctx.display(module_param).to_string(),
                    }
                })?;
                cell.parameters.insert(cell_param, value);
            }
        }

        ctx.design.add_module(module).map_err(|dup| {
            InternalError::new(format!(
                "derived module `{}` appeared during derivation",
                ctx.name(dup.0.name)
            ))
        })?;
    }

    if let Some(source) = ctx.design.module_mut(template) {
        source.derive_cache.insert(key, derived_name);
    }
    Ok(derived_name)
}

/// Builds the derived name from a name-sorted assignment.
fn derived_module_name(base: &str, sorted: &[(&str, &ConstValue)]) -> String {
    if sorted.is_empty() {
        return base.to_string();
    }
    let mut name = format!("{PARAMOD_PREFIX}{base}");
    for (param, value) in sorted {
        name.push_str(&format!("{param}={value}"));
    }
    name
}

fn assignment_hash(sorted: &[(&str, &ConstValue)]) -> ContentHash {
    let mut canonical = String::new();
    for (param, value) in sorted {
        canonical.push_str(param);
        canonical.push('=');
        canonical.push_str(&value.to_string());
        canonical.push('\0');
    }
    ContentHash::from_bytes(canonical.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fixture, NoFrontend};
    use strata_common::LogicVec;
    use strata_ir::{Cell, Module, PortDirection, Wire};

    fn adder_template(fx: &mut Fixture) {
        let mut m = Module::new(fx.id("$abstract\\adder"));
        m.params.insert(fx.id("\\WIDTH"), ConstValue::Int(4));
        m.add_wire(
            Wire::port(fx.id("\\a"), 4, 1, PortDirection::Input).with_width_param(fx.id("\\WIDTH")),
        );
        m.add_wire(Wire::port(fx.id("\\cin"), 1, 2, PortDirection::Input));
        fx.design.add_module(m).unwrap();
    }

    fn width(v: i64, fx: &Fixture) -> BTreeMap<Ident, ConstValue> {
        BTreeMap::from([(fx.id("\\WIDTH"), ConstValue::Int(v))])
    }

    #[test]
    fn derive_specializes_widths() {
        let mut fx = Fixture::new();
        adder_template(&mut fx);
        let assignment = width(8, &fx);
        let template = fx.id("$abstract\\adder");
        let mut ctx = HierarchyContext::new(&mut fx.design, &fx.interner, &fx.sink, &NoFrontend);
        let name = derive(&mut ctx, template, &assignment).unwrap();

        assert_eq!(fx.interner.resolve(name), "$paramod\\adder\\WIDTH=8");
        let m = fx.design.module(name).unwrap();
        assert_eq!(m.wires[&fx.id("\\a")].width, 8);
        assert_eq!(m.wires[&fx.id("\\cin")].width, 1);
        assert!(!m.is_abstract(&fx.interner));
        assert!(m.derive_cache.is_empty());
    }

    #[test]
    fn derive_is_memoized() {
        let mut fx = Fixture::new();
        adder_template(&mut fx);
        let assignment = width(16, &fx);
        let template = fx.id("$abstract\\adder");
        let mut ctx = HierarchyContext::new(&mut fx.design, &fx.interner, &fx.sink, &NoFrontend);
        let first = derive(&mut ctx, template, &assignment).unwrap();
        let second = derive(&mut ctx, template, &assignment).unwrap();
        assert_eq!(first, second);
        assert_eq!(fx.design.module_count(), 2);
        assert_eq!(fx.design.module(template).unwrap().derive_cache.len(), 1);
    }

    #[test]
    fn empty_assignment_yields_base_name() {
        let mut fx = Fixture::new();
        adder_template(&mut fx);
        let template = fx.id("$abstract\\adder");
        let mut ctx = HierarchyContext::new(&mut fx.design, &fx.interner, &fx.sink, &NoFrontend);
        let name = derive(&mut ctx, template, &BTreeMap::new()).unwrap();
        assert_eq!(fx.interner.resolve(name), "\\adder");
        assert_eq!(fx.design.module(name).unwrap().wires[&fx.id("\\a")].width, 4);
    }

    #[test]
    fn existing_module_is_reused_when_cache_is_cold() {
        let mut fx = Fixture::new();
        adder_template(&mut fx);
        fx.design
            .add_module(Module::new(fx.id("$paramod\\adder\\WIDTH=8")))
            .unwrap();
        let assignment = width(8, &fx);
        let template = fx.id("$abstract\\adder");
        let mut ctx = HierarchyContext::new(&mut fx.design, &fx.interner, &fx.sink, &NoFrontend);
        let name = derive(&mut ctx, template, &assignment).unwrap();
        assert!(fx.design.module(name).unwrap().wires.is_empty());
        assert_eq!(fx.design.module_count(), 2);
    }

    #[test]
    fn unknown_parameter_is_fatal() {
        let mut fx = Fixture::new();
        adder_template(&mut fx);
        let assignment = BTreeMap::from([(fx.id("\\DEPTH"), ConstValue::Int(2))]);
        let template = fx.id("$abstract\\adder");
        let mut ctx = HierarchyContext::new(&mut fx.design, &fx.interner, &fx.sink, &NoFrontend);
        let err = derive(&mut ctx, template, &assignment).unwrap_err();
        assert!(matches!(
            err,
            HierarchyError::IllFormedParameters { ref module, ref parameter }
                if module == "adder" && parameter == "DEPTH"
        ));
    }

    #[test]
    fn non_parametric_module_is_fatal() {
        let mut fx = Fixture::new();
        fx.add_module("\\inv", &[("\\a", 1, PortDirection::Input)]);
        let assignment = BTreeMap::from([(fx.id("\\W"), ConstValue::Int(2))]);
        let inv = fx.id("\\inv");
        let mut ctx = HierarchyContext::new(&mut fx.design, &fx.interner, &fx.sink, &NoFrontend);
        let err = derive(&mut ctx, inv, &assignment).unwrap_err();
        assert!(matches!(err, HierarchyError::NotParametric { .. }));
    }

    #[test]
    fn non_integer_width_is_fatal() {
        let mut fx = Fixture::new();
        adder_template(&mut fx);
        let assignment =
            BTreeMap::from([(fx.id("\\WIDTH"), ConstValue::String("wide".to_string()))]);
        let template = fx.id("$abstract\\adder");
        let mut ctx = HierarchyContext::new(&mut fx.design, &fx.interner, &fx.sink, &NoFrontend);
        let err = derive(&mut ctx, template, &assignment).unwrap_err();
        assert!(matches!(err, HierarchyError::InvalidParamWidth { .. }));
    }

    #[test]
    fn logic_width_parameter_is_accepted() {
        let mut fx = Fixture::new();
        adder_template(&mut fx);
        let assignment = BTreeMap::from([(
            fx.id("\\WIDTH"),
            ConstValue::Logic(LogicVec::from_u64(2, 32)),
        )]);
        let template = fx.id("$abstract\\adder");
        let mut ctx = HierarchyContext::new(&mut fx.design, &fx.interner, &fx.sink, &NoFrontend);
        let name = derive(&mut ctx, template, &assignment).unwrap();
        assert_eq!(fx.design.module(name).unwrap().wires[&fx.id("\\a")].width, 2);
    }

    #[test]
    fn param_refs_become_cell_parameters() {
        let mut fx = Fixture::new();
        adder_template(&mut fx);
        let mut inner = Cell::new(fx.id("\\u0"), fx.id("\\leaf"));
        inner.param_refs.insert(fx.id("\\W"), fx.id("\\WIDTH"));
        let template = fx.id("$abstract\\adder");
        fx.design.module_mut(template).unwrap().add_cell(inner);

        let assignment = width(12, &fx);
        let mut ctx = HierarchyContext::new(&mut fx.design, &fx.interner, &fx.sink, &NoFrontend);
        let name = derive(&mut ctx, template, &assignment).unwrap();
        let cell = &fx.design.module(name).unwrap().cells[&fx.id("\\u0")];
        assert!(cell.param_refs.is_empty());
        assert_eq!(cell.parameters[&fx.id("\\W")], ConstValue::Int(12));
    }

    #[test]
    fn names_sort_parameters_by_spelling() {
        let a = ConstValue::Int(1);
        let b = ConstValue::Int(2);
        let name = derived_module_name("\\m", &[("\\A", &a), ("\\B", &b)]);
        assert_eq!(name, "$paramod\\m\\A=1\\B=2");
    }

    #[test]
    fn hash_distinguishes_value_kinds() {
        let int = ConstValue::Int(8);
        let string = ConstValue::String("8".into());
        assert_ne!(
            assignment_hash(&[("\\W", &int)]),
            assignment_hash(&[("\\W", &string)])
        );
    }
}
