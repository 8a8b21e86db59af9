//! The hierarchy pass loading real netlist files from library directories.

use std::path::Path;

use strata_common::Interner;
use strata_diagnostics::DiagnosticSink;
use strata_hierarchy::{
    run_hierarchy, FrontendError, HierarchyError, HierarchyOptions, LibraryFormat,
};
use strata_ir::{ConstValue, Design};
use strata_netlist::{read_netlist, write_netlist, JsonFrontend};

const TOP: &str = r#"{ "modules": { "top": {
    "wires": { "x": { "width": 8 }, "y": { "width": 4 } },
    "cells": { "u0": { "type": "leaf", "parameters": { "W": 4 },
                       "connections": { "$1": "x[3:0]", "$2": "y" } } } } } }"#;

const LEAF: &str = r#"{ "modules": { "leaf": {
    "parameters": { "W": 1 },
    "wires": { "a": { "width": 1, "width_param": "W",
                      "port": { "position": 1, "direction": "input" } },
               "b": { "width": 1, "width_param": "W",
                      "port": { "position": 2, "direction": "output" } } } } } }"#;

fn write(dir: &Path, file: &str, text: &str) {
    std::fs::write(dir.join(file), text).unwrap();
}

fn options(libdir: &Path) -> HierarchyOptions {
    HierarchyOptions {
        top: Some("top".into()),
        libdirs: vec![libdir.to_path_buf()],
        check: true,
        ..Default::default()
    }
}

#[test]
fn parametrized_library_cell_is_loaded_and_derived() {
    let lib = tempfile::tempdir().unwrap();
    write(lib.path(), "leaf.json", LEAF);

    let interner = Interner::new();
    let sink = DiagnosticSink::new();
    let mut design = Design::new();
    read_netlist(TOP, &mut design, &interner).unwrap();

    let report =
        run_hierarchy(&mut design, &interner, &sink, &JsonFrontend, &options(lib.path())).unwrap();
    assert_eq!(report.top, Some(interner.get_or_intern("\\top")));
    assert!(!sink.has_errors());

    let derived = interner.get_or_intern("$paramod\\leaf\\W=4");
    let leaf = design.module(derived).expect("derived module present");
    assert_eq!(leaf.wires[&interner.get_or_intern("\\a")].width, 4);
    assert!(!design.contains(interner.get_or_intern("\\leaf")));

    let top = design.module(interner.get_or_intern("\\top")).unwrap();
    assert_eq!(
        top.attributes.get(&interner.get_or_intern("\\top")),
        Some(&ConstValue::flag())
    );
    let cell = &top.cells[&interner.get_or_intern("\\u0")];
    assert_eq!(cell.cell_type, derived);
    assert!(cell.parameters.is_empty());
    assert!(cell.connections.contains_key(&interner.get_or_intern("\\a")));
    assert!(cell.connections.contains_key(&interner.get_or_intern("\\b")));

    let text = write_netlist(&design, &interner).unwrap();
    assert!(text.contains(r#""type": "$paramod\\leaf\\W=4""#));
    assert!(text.contains(r#""a": "x[3:0]""#));
}

#[test]
fn written_design_reads_back() {
    let lib = tempfile::tempdir().unwrap();
    write(lib.path(), "leaf.json", LEAF);

    let interner = Interner::new();
    let sink = DiagnosticSink::new();
    let mut design = Design::new();
    read_netlist(TOP, &mut design, &interner).unwrap();
    run_hierarchy(&mut design, &interner, &sink, &JsonFrontend, &options(lib.path())).unwrap();

    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("elaborated.json");
    strata_netlist::write_netlist_file(&path, &design, &interner).unwrap();

    let fresh = Interner::new();
    let mut reread = Design::new();
    let names = strata_netlist::read_netlist_file(&path, &mut reread, &fresh).unwrap();
    assert_eq!(names.len(), 2);
    assert!(reread.contains(fresh.get_or_intern("$paramod\\leaf\\W=4")));
}

#[test]
fn source_file_is_searched_first() {
    let lib = tempfile::tempdir().unwrap();
    write(lib.path(), "leaf.v", "module leaf; endmodule\n");
    write(lib.path(), "leaf.json", LEAF);

    let interner = Interner::new();
    let sink = DiagnosticSink::new();
    let mut design = Design::new();
    read_netlist(TOP, &mut design, &interner).unwrap();

    let err = run_hierarchy(&mut design, &interner, &sink, &JsonFrontend, &options(lib.path()))
        .unwrap_err();
    assert!(matches!(
        err,
        HierarchyError::Frontend(FrontendError::Unsupported(LibraryFormat::Verilog))
    ));
    assert!(sink.has_errors());
}

#[test]
fn malformed_library_file_is_fatal() {
    let lib = tempfile::tempdir().unwrap();
    write(lib.path(), "leaf.json", r#"{ "modules": { "leaf": { "wires": { "a": {} } } } }"#);

    let interner = Interner::new();
    let sink = DiagnosticSink::new();
    let mut design = Design::new();
    read_netlist(TOP, &mut design, &interner).unwrap();

    let err = run_hierarchy(&mut design, &interner, &sink, &JsonFrontend, &options(lib.path()))
        .unwrap_err();
    assert!(matches!(
        err,
        HierarchyError::Frontend(FrontendError::Malformed { .. })
    ));
}

#[test]
fn missing_everywhere_is_unresolved_under_check() {
    let lib = tempfile::tempdir().unwrap();

    let interner = Interner::new();
    let sink = DiagnosticSink::new();
    let mut design = Design::new();
    read_netlist(TOP, &mut design, &interner).unwrap();

    let err = run_hierarchy(&mut design, &interner, &sink, &JsonFrontend, &options(lib.path()))
        .unwrap_err();
    assert!(matches!(err, HierarchyError::UnresolvedModule { .. }));
}
