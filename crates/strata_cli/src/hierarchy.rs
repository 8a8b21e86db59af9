//! `strata hierarchy`: elaborate or generate over a JSON netlist.
//!
//! 1. Load `strata.toml` (explicit `--config`, else the working directory)
//! 2. Merge command-line flags into the `[hierarchy]` settings
//! 3. Read the input netlist
//! 4. Run the hierarchy pass with the JSON library front end
//! 5. Render diagnostics and write the result

use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use strata_common::Interner;
use strata_config::{resolve_hierarchy, HierarchyOverrides, ProjectConfig};
use strata_diagnostics::{DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use strata_hierarchy::errors::W300;
use strata_hierarchy::{run_hierarchy, GenerateOptions, HierarchyOptions, HierarchyReport};
use strata_ir::Design;
use strata_netlist::{read_netlist_file, write_netlist, JsonFrontend};

use crate::{GlobalArgs, HierarchyArgs};

/// Runs the `strata hierarchy` command.
///
/// Returns exit code 0 on success and 1 when the pass reported a fatal error.
pub fn run(args: &HierarchyArgs, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let config = load_project_config(global)?;
    let options = build_options(&config, args)?;

    let interner = Interner::new();
    let sink = DiagnosticSink::new();
    let mut design = Design::new();
    read_netlist_file(Path::new(&args.input), &mut design, &interner)?;

    let result = run_hierarchy(&mut design, &interner, &sink, &JsonFrontend, &options);

    let unmapped = sink.with_code(W300).len();
    let renderer = TerminalRenderer::new(global.color);
    for diag in sink.take_all() {
        eprint!("{}", renderer.render(&diag));
    }

    let report = match result {
        Ok(report) => report,
        Err(_) => return Ok(1),
    };
    summarize(&report, unmapped, &interner, global);

    let text = write_netlist(&design, &interner)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, text + "\n")?;
            info!("Wrote `{path}`.");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}")?;
        }
    }
    Ok(0)
}

fn load_project_config(global: &GlobalArgs) -> Result<ProjectConfig, Box<dyn Error>> {
    let config = match &global.config {
        Some(path) => strata_config::load_config_file(Path::new(path))?,
        None => strata_config::find_config(&std::env::current_dir()?)?,
    };
    Ok(config)
}

/// Merges the configuration file with the command line into pass options.
///
/// Generate mode is entered only by `--generate`; the `[generate]` table then
/// supplies cell type globs and port declarations ahead of the command-line
/// arguments. A configured top or strict check rules generate mode out, just
/// as the conflicting flags do.
pub fn build_options(
    config: &ProjectConfig,
    args: &HierarchyArgs,
) -> Result<HierarchyOptions, Box<dyn Error>> {
    let overrides = HierarchyOverrides {
        top: args.top.clone(),
        libdirs: args.libdirs.clone(),
        check: args.check,
        purge_lib: args.purge_lib,
        keep_positionals: args.keep_positionals,
    };
    let resolved = resolve_hierarchy(config, &overrides);

    let generate = match &args.generate {
        Some(_) if resolved.check || resolved.top.is_some() => {
            return Err(
                "generate mode cannot be combined with `check` or `top` (set in strata.toml)"
                    .into(),
            );
        }
        Some(cli_args) => {
            let mut all: Vec<String> = Vec::new();
            if let Some(table) = &config.generate {
                all.extend(table.cell_types.iter().cloned());
                all.extend(table.ports.iter().cloned());
            }
            all.extend(cli_args.iter().cloned());
            Some(GenerateOptions::from_args(&all)?)
        }
        None => None,
    };

    Ok(HierarchyOptions {
        top: resolved.top,
        libdirs: resolved.libdirs.into_iter().map(PathBuf::from).collect(),
        check: resolved.check,
        purge_lib: resolved.purge_lib,
        keep_positionals: resolved.keep_positionals,
        generate,
    })
}

fn summarize(report: &HierarchyReport, unmapped: usize, interner: &Interner, global: &GlobalArgs) {
    if global.quiet {
        return;
    }
    if let Some(top) = report.top {
        eprintln!(
            "   Elaborated `{}`: {} sweep(s), {} module(s) removed, {} cell(s) remapped",
            strata_ir::names::unescape_id(interner.resolve(top)),
            report.sweeps,
            report.removed_modules,
            report.remapped_cells
        );
    }
    if unmapped > 0 {
        eprintln!("   {unmapped} positional argument(s) left unmapped");
    }
    if !report.generated_modules.is_empty() {
        eprintln!(
            "   Generated {} black-box module(s)",
            report.generated_modules.len()
        );
    }
}
