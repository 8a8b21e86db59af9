//! Strata CLI: the command-line front of the Strata hierarchy tools.
//!
//! `strata hierarchy` reads a JSON netlist, elaborates its module hierarchy
//! (or generates black boxes for undeclared cell types) and writes the
//! result back as a JSON netlist.

#![warn(missing_docs)]

mod hierarchy;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

/// Strata: design hierarchy elaboration for gate-level netlists.
#[derive(Parser, Debug)]
#[command(name = "strata", version, about = "Strata hierarchy tools")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `strata.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Elaborate the module hierarchy of a netlist.
    Hierarchy(HierarchyArgs),
}

/// Arguments for the `strata hierarchy` subcommand.
#[derive(Parser, Debug)]
pub struct HierarchyArgs {
    /// Input JSON netlist.
    pub input: String,

    /// Output path. Defaults to standard output.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Fail on cell types that cannot be resolved.
    #[arg(long)]
    pub check: bool,

    /// Also remove unused black-box modules.
    #[arg(long)]
    pub purge_lib: bool,

    /// Leave positional connections keyed by position.
    #[arg(long)]
    pub keep_positionals: bool,

    /// Library directory searched for missing modules (repeatable).
    #[arg(long = "libdir", value_name = "DIR")]
    pub libdirs: Vec<String>,

    /// Top module name.
    #[arg(long)]
    pub top: Option<String>,

    /// Generate black boxes instead of elaborating. Takes cell type globs and
    /// port declarations such as `i:A`, `o@3:Y` or `io:*`.
    #[arg(long, num_args = 0.., value_name = "ARG", conflicts_with_all = ["check", "top"])]
    pub generate: Option<Vec<String>>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

impl GlobalArgs {
    /// The log level implied by `--quiet` and `--verbose`.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::env::var_os("TERM").is_some_and(|t| t != "dumb"),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    env_logger::Builder::new()
        .filter_level(global.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Command::Hierarchy(ref args) => hierarchy::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
