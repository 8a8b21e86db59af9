//! Fatal hierarchy errors and their diagnostic codes.
//!
//! Error codes `E300`--`E314` cover conditions that abort the pass (unresolved
//! modules, malformed library files, array size mismatches, generate-mode port
//! conflicts). `E399` marks internal errors. Warning `W300` covers the one
//! recoverable condition: a positional argument with no matching port. Note
//! `I300` reports parameters generate mode ignored.

use std::path::PathBuf;

use strata_common::InternalError;
use strata_diagnostics::{Category, Diagnostic, DiagnosticCode};

use crate::frontend::FrontendError;

/// Module type referenced by a cell is not part of the design.
pub const E300: DiagnosticCode = DiagnosticCode::new(Category::Error, 300);
/// Library file does not declare the module it was loaded for.
pub const E301: DiagnosticCode = DiagnosticCode::new(Category::Error, 301);
/// Array cell of unknown type.
pub const E302: DiagnosticCode = DiagnosticCode::new(Category::Error, 302);
/// Array cell connects to a port its type does not have.
pub const E303: DiagnosticCode = DiagnosticCode::new(Category::Error, 303);
/// Array cell connection is neither one port wide nor `count` ports wide.
pub const E304: DiagnosticCode = DiagnosticCode::new(Category::Error, 304);
/// Parameter assignment names an undeclared parameter.
pub const E305: DiagnosticCode = DiagnosticCode::new(Category::Error, 305);
/// Module instantiated with parameters declares none.
pub const E306: DiagnosticCode = DiagnosticCode::new(Category::Error, 306);
/// Width parameter does not evaluate to a positive integer.
pub const E307: DiagnosticCode = DiagnosticCode::new(Category::Error, 307);
/// Generated port matches no port declaration.
pub const E308: DiagnosticCode = DiagnosticCode::new(Category::Error, 308);
/// Two port declarations claim the same position.
pub const E309: DiagnosticCode = DiagnosticCode::new(Category::Error, 309);
/// Port declaration position exceeds the number of ports.
pub const E310: DiagnosticCode = DiagnosticCode::new(Category::Error, 310);
/// Requested top module does not exist.
pub const E311: DiagnosticCode = DiagnosticCode::new(Category::Error, 311);
/// Front end failed to load a library file.
pub const E312: DiagnosticCode = DiagnosticCode::new(Category::Error, 312);
/// Malformed glob pattern in generate mode.
pub const E313: DiagnosticCode = DiagnosticCode::new(Category::Error, 313);
/// Array cell type carries a malformed `$array:<index>:<count>:` descriptor.
pub const E314: DiagnosticCode = DiagnosticCode::new(Category::Error, 314);
/// Internal error.
pub const E399: DiagnosticCode = DiagnosticCode::new(Category::Error, 399);

/// Parameter observed on a generated cell type was not turned into a port.
pub const I300: DiagnosticCode = DiagnosticCode::new(Category::Info, 300);

/// Positional argument could not be mapped to a port name.
pub const W300: DiagnosticCode = DiagnosticCode::new(Category::Warning, 300);

/// A condition that aborts the hierarchy pass.
///
/// Names are carried in their display form (escape stripped).
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    /// A non-primitive cell type could not be resolved under strict checking.
    #[error("module `{cell_type}` referenced in module `{module}` in cell `{cell}` is not part of the design")]
    UnresolvedModule {
        /// The containing module.
        module: String,
        /// The cell instantiating the missing type.
        cell: String,
        /// The missing type.
        cell_type: String,
    },

    /// A library file was loaded but did not register the expected module.
    #[error("file `{}` from libdir does not declare module `{module}`", path.display())]
    MissingLibraryModule {
        /// The loaded file.
        path: PathBuf,
        /// The module the file was expected to declare.
        module: String,
    },

    /// An array cell's type is not a design module after resolution.
    #[error("array cell `{module}.{cell}` of unknown type `{cell_type}`")]
    ArrayUnknownType {
        /// The containing module.
        module: String,
        /// The array cell.
        cell: String,
        /// The unresolved type.
        cell_type: String,
    },

    /// An array cell connects to a port the target module does not have.
    #[error("array cell `{module}.{cell}` connects to unknown port `{port}`")]
    ArrayUnknownPort {
        /// The containing module.
        module: String,
        /// The array cell.
        cell: String,
        /// The connection key.
        port: String,
    },

    /// An array cell connection width fits neither one replica nor all of them.
    #[error(
        "array cell `{module}.{cell}` has invalid port vs. signal size for port `{port}`: \
         signal is {signal_width} bits, port is {port_width} bits, {count} replicas"
    )]
    ArraySizeMismatch {
        /// The containing module.
        module: String,
        /// The array cell.
        cell: String,
        /// The connection key.
        port: String,
        /// Width of the connected signal.
        signal_width: u32,
        /// Width of the target port.
        port_width: u32,
        /// Replica count from the array descriptor.
        count: u32,
    },

    /// An array descriptor is not numeric, has no replicas, or places the
    /// cell past the last replica.
    #[error("array cell `{module}.{cell}` has malformed array type `{cell_type}`")]
    ArrayBadDescriptor {
        /// The containing module.
        module: String,
        /// The array cell.
        cell: String,
        /// The full cell type, descriptor included.
        cell_type: String,
    },

    /// A parameter assignment names a parameter the module does not declare.
    #[error("module `{module}` has no parameter `{parameter}`")]
    IllFormedParameters {
        /// The module being derived.
        module: String,
        /// The undeclared parameter.
        parameter: String,
    },

    /// A module without parameters was instantiated with parameters.
    #[error("module `{module}` is used with parameters but is not parametric")]
    NotParametric {
        /// The module.
        module: String,
    },

    /// A wire's width parameter is not a positive integer.
    #[error("wire `{wire}` of module `{module}` takes its width from parameter `{parameter}`, which is not a positive integer")]
    InvalidParamWidth {
        /// The derived module.
        module: String,
        /// The wire being resized.
        wire: String,
        /// The parameter controlling the width.
        parameter: String,
    },

    /// A port discovered in generate mode matches no declaration.
    #[error("can't match port `{port}` of cell type `{cell_type}`")]
    UnmatchedPort {
        /// The cell type being generated.
        cell_type: String,
        /// The unmatched port.
        port: String,
    },

    /// Two positional declarations claim the same position.
    #[error("conflict on port index {position} of cell type `{cell_type}`")]
    PortIndexConflict {
        /// The cell type being generated.
        cell_type: String,
        /// The contested position.
        position: u32,
    },

    /// A positional declaration is beyond the number of ports found.
    #[error("port index ({position}) exceeds number of found ports ({count}) of cell type `{cell_type}`")]
    PortIndexOutOfRange {
        /// The cell type being generated.
        cell_type: String,
        /// The declared position.
        position: u32,
        /// The number of ports found.
        count: usize,
    },

    /// The requested top module does not exist.
    #[error("module `{name}` not found")]
    TopNotFound {
        /// The requested name.
        name: String,
    },

    /// A generate-mode cell type pattern is not a valid glob.
    #[error("invalid cell type pattern `{pattern}`: {message}")]
    InvalidPattern {
        /// The pattern as given.
        pattern: String,
        /// The glob parser's complaint.
        message: String,
    },

    /// The front end failed to load a library file.
    #[error(transparent)]
    Frontend(#[from] FrontendError),

    /// An internal invariant was broken.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl HierarchyError {
    /// Returns the diagnostic code for this error.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            HierarchyError::UnresolvedModule { .. } => E300,
            HierarchyError::MissingLibraryModule { .. } => E301,
            HierarchyError::ArrayUnknownType { .. } => E302,
            HierarchyError::ArrayUnknownPort { .. } => E303,
            HierarchyError::ArraySizeMismatch { .. } => E304,
            HierarchyError::IllFormedParameters { .. } => E305,
            HierarchyError::NotParametric { .. } => E306,
            HierarchyError::InvalidParamWidth { .. } => E307,
            HierarchyError::UnmatchedPort { .. } => E308,
            HierarchyError::PortIndexConflict { .. } => E309,
            HierarchyError::PortIndexOutOfRange { .. } => E310,
            HierarchyError::TopNotFound { .. } => E311,
            HierarchyError::Frontend(_) => E312,
            HierarchyError::InvalidPattern { .. } => E313,
            HierarchyError::ArrayBadDescriptor { .. } => E314,
            HierarchyError::Internal(_) => E399,
        }
    }

    /// Converts the error into a structured diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string());
        match self {
            HierarchyError::UnresolvedModule { module, cell, .. } => diag
                .at(format!("{module}.{cell}"))
                .with_help("add a library directory containing the module, or drop the strict check"),
            HierarchyError::ArrayUnknownType { module, cell, .. }
            | HierarchyError::ArrayUnknownPort { module, cell, .. } => {
                diag.at(format!("{module}.{cell}"))
            }
            HierarchyError::ArrayBadDescriptor { module, cell, .. } => diag
                .at(format!("{module}.{cell}"))
                .with_note("expected `$array:<index>:<count>:<type>` with index below count"),
            HierarchyError::ArraySizeMismatch {
                module,
                cell,
                port_width,
                count,
                ..
            } => diag.at(format!("{module}.{cell}")).with_note(format!(
                "expected {port_width} or {} bits",
                u64::from(*port_width) * u64::from(*count)
            )),
            HierarchyError::MissingLibraryModule { path, .. } => diag.at(path.display().to_string()),
            HierarchyError::InvalidParamWidth { module, wire, .. } => {
                diag.at(format!("{module}.{wire}"))
            }
            HierarchyError::UnmatchedPort { .. } => {
                diag.with_help("add a port declaration whose pattern matches this port")
            }
            HierarchyError::TopNotFound { .. } => {
                diag.with_help("check the top module name against the modules in the design")
            }
            HierarchyError::Internal(_) => {
                diag.with_note("this is a bug in strata, not a problem with the design")
            }
            _ => diag,
        }
    }
}

/// Creates a warning for a positional argument with no matching port.
pub fn warn_unmapped_positional(index: u32, module: &str, cell: &str, cell_type: &str) -> Diagnostic {
    Diagnostic::warning(
        W300,
        format!("failed to map positional argument {index} of cell `{module}.{cell}` ({cell_type})"),
    )
    .at(format!("{module}.{cell}"))
    .with_note("the connection is kept under its positional key")
}

/// Creates a note for a parameter that generate mode does not model.
pub fn note_ignored_parameter(cell_type: &str, parameter: &str) -> Diagnostic {
    Diagnostic::note(
        I300,
        format!("ignoring parameter `{parameter}` of generated cell type `{cell_type}`"),
    )
}
