//! Shared design builders and an in-memory front end.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use strata_common::{Ident, Interner};
use strata_diagnostics::DiagnosticSink;
use strata_hierarchy::{
    run_hierarchy, Frontend, FrontendError, HierarchyError, HierarchyOptions, HierarchyReport,
    LibraryFormat,
};
use strata_ir::{Cell, ConstValue, Design, Module, PortDirection, SigSpec, Wire};

type ModuleFactory = Box<dyn Fn(&Interner) -> Vec<Module>>;

/// A front end that serves modules from memory, keyed by file name.
#[derive(Default)]
pub struct MockFrontend {
    files: HashMap<String, ModuleFactory>,
    pub loads: RefCell<Vec<(PathBuf, LibraryFormat)>>,
}

impl MockFrontend {
    pub fn with_file(mut self, file_name: &str, factory: impl Fn(&Interner) -> Vec<Module> + 'static) -> Self {
        self.files.insert(file_name.to_string(), Box::new(factory));
        self
    }
}

impl Frontend for MockFrontend {
    fn load(
        &self,
        design: &mut Design,
        interner: &Interner,
        path: &Path,
        format: LibraryFormat,
    ) -> Result<(), FrontendError> {
        self.loads.borrow_mut().push((path.to_path_buf(), format));
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let factory = self.files.get(file_name).ok_or_else(|| FrontendError::Malformed {
            path: path.to_path_buf(),
            message: "no such mock file".to_string(),
        })?;
        for module in factory(interner) {
            design.add_module(module).map_err(|_| FrontendError::Malformed {
                path: path.to_path_buf(),
                message: "duplicate module".to_string(),
            })?;
        }
        Ok(())
    }
}

/// A design under construction plus the session objects around it.
pub struct Harness {
    pub design: Design,
    pub interner: Interner,
    pub sink: DiagnosticSink,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            design: Design::new(),
            interner: Interner::new(),
            sink: DiagnosticSink::new(),
        }
    }

    pub fn id(&self, name: &str) -> Ident {
        self.interner.get_or_intern(name)
    }

    pub fn name(&self, id: Ident) -> &str {
        self.interner.resolve(id)
    }

    pub fn module(&mut self, name: &str) -> &mut Module {
        let id = self.id(name);
        if !self.design.contains(id) {
            self.design.add_module(Module::new(id)).unwrap();
        }
        self.design.module_mut(id).unwrap()
    }

    pub fn port(&mut self, module: &str, port: &str, width: u32, position: u32, dir: PortDirection) {
        let wire = Wire::port(self.id(port), width, position, dir);
        self.module(module).add_wire(wire);
    }

    pub fn cell(&mut self, module: &str, cell: &str, cell_type: &str) {
        let cell = Cell::new(self.id(cell), self.id(cell_type));
        self.module(module).add_cell(cell);
    }

    pub fn param(&mut self, module: &str, cell: &str, param: &str, value: ConstValue) {
        let (cell, param) = (self.id(cell), self.id(param));
        self.module(module)
            .cells
            .get_mut(&cell)
            .unwrap()
            .parameters
            .insert(param, value);
    }

    pub fn connect(&mut self, module: &str, cell: &str, key: &str, wire: &str, width: u32) -> SigSpec {
        let wire = Wire::new(self.id(wire), width);
        let sig = SigSpec::from_wire(&wire);
        let (cell, key) = (self.id(cell), self.id(key));
        let m = self.module(module);
        m.add_wire(wire);
        m.cells.get_mut(&cell).unwrap().connections.insert(key, sig.clone());
        sig
    }

    pub fn get_cell(&self, module: &str, cell: &str) -> &Cell {
        &self.design.module(self.id(module)).unwrap().cells[&self.id(cell)]
    }

    pub fn cell_type(&self, module: &str, cell: &str) -> &str {
        self.name(self.get_cell(module, cell).cell_type)
    }

    pub fn has(&self, module: &str) -> bool {
        self.design.contains(self.id(module))
    }

    pub fn run(&mut self, frontend: &dyn Frontend, options: &HierarchyOptions) -> Result<HierarchyReport, HierarchyError> {
        run_hierarchy(&mut self.design, &self.interner, &self.sink, frontend, options)
    }
}
