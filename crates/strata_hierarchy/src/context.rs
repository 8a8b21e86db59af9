//! Shared state threaded through every hierarchy component.

use strata_common::{Ident, Interner};
use strata_diagnostics::DiagnosticSink;
use strata_ir::names::{self, BLACKBOX_ATTR, TOP_ATTR};
use strata_ir::Design;

use crate::frontend::Frontend;

/// The design under modification plus the collaborators the pass needs.
///
/// Components borrow the context mutably one at a time; nothing here is
/// process-wide state.
pub struct HierarchyContext<'a> {
    /// The design being elaborated.
    pub design: &'a mut Design,
    /// The session interner.
    pub interner: &'a Interner,
    /// Where warnings go.
    pub sink: &'a DiagnosticSink,
    /// Loads library files.
    pub frontend: &'a dyn Frontend,
    /// `\blackbox`.
    pub blackbox_attr: Ident,
    /// `\top`.
    pub top_attr: Ident,
}

impl<'a> HierarchyContext<'a> {
    /// Creates a context, interning the well-known attribute names.
    pub fn new(
        design: &'a mut Design,
        interner: &'a Interner,
        sink: &'a DiagnosticSink,
        frontend: &'a dyn Frontend,
    ) -> Self {
        Self {
            design,
            interner,
            sink,
            frontend,
            blackbox_attr: interner.get_or_intern(BLACKBOX_ATTR),
            top_attr: interner.get_or_intern(TOP_ATTR),
        }
    }

    /// Returns the IR spelling of a name.
    pub fn name(&self, id: Ident) -> &'a str {
        self.interner.resolve(id)
    }

    /// Returns a name as shown to users, without the `\` escape.
    pub fn display(&self, id: Ident) -> &'a str {
        names::unescape_id(self.interner.resolve(id))
    }

    /// Interns a name.
    pub fn intern(&self, name: &str) -> Ident {
        self.interner.get_or_intern(name)
    }

    /// Returns `true` if `module` exists and is flagged as a black box.
    pub fn is_blackbox(&self, module: Ident) -> bool {
        self.design
            .module(module)
            .is_some_and(|m| m.get_bool_attribute(self.blackbox_attr))
    }

    /// Returns `true` if `module` is a `$abstract` template name.
    pub fn is_template_name(&self, module: Ident) -> bool {
        names::strip_abstract(self.name(module)).is_some()
    }
}
