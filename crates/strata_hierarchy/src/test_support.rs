//! Small builders for unit tests.

use std::path::Path;

use strata_common::Interner;
use strata_diagnostics::DiagnosticSink;
use strata_ir::{Cell, Design, Module, PortDirection, SigSpec, Wire};

use crate::frontend::{Frontend, FrontendError, LibraryFormat};

/// A front end that never loads anything.
pub(crate) struct NoFrontend;

impl Frontend for NoFrontend {
    fn load(
        &self,
        _design: &mut Design,
        _interner: &Interner,
        _path: &Path,
        format: LibraryFormat,
    ) -> Result<(), FrontendError> {
        Err(FrontendError::Unsupported(format))
    }
}

/// Everything a context borrows, owned in one place.
pub(crate) struct Fixture {
    pub design: Design,
    pub interner: Interner,
    pub sink: DiagnosticSink,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            design: Design::new(),
            interner: Interner::new(),
            sink: DiagnosticSink::new(),
        }
    }

    pub fn id(&self, name: &str) -> strata_common::Ident {
        self.interner.get_or_intern(name)
    }

    /// Adds a module with the given `(name, width, direction)` ports at positions 1.. .
    pub fn add_module(&mut self, name: &str, ports: &[(&str, u32, PortDirection)]) {
        let mut module = Module::new(self.id(name));
        for (i, (port, width, dir)) in ports.iter().enumerate() {
            module.add_wire(Wire::port(self.id(port), *width, i as u32 + 1, *dir));
        }
        self.design.add_module(module).unwrap();
    }

    /// Adds an instance of `cell_type` to `parent`.
    pub fn add_cell(&mut self, parent: &str, cell: &str, cell_type: &str) {
        let cell = Cell::new(self.id(cell), self.id(cell_type));
        let parent = self.id(parent);
        self.design.module_mut(parent).unwrap().add_cell(cell);
    }

    /// Adds a wire to `module` and connects it to `port` of `cell`.
    pub fn connect(&mut self, module: &str, cell: &str, port: &str, wire: &str, width: u32) {
        let wire = Wire::new(self.id(wire), width);
        let sig = SigSpec::from_wire(&wire);
        let port = self.id(port);
        let cell = self.id(cell);
        let module = self.id(module);
        let m = self.design.module_mut(module).unwrap();
        m.add_wire(wire);
        m.cells.get_mut(&cell).unwrap().connections.insert(port, sig);
    }

    pub fn cell(&self, module: &str, cell: &str) -> &Cell {
        &self.design.module(self.id(module)).unwrap().cells[&self.id(cell)]
    }
}
