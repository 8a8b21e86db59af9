//! The seam to the design front ends.
//!
//! The hierarchy pass decides which library file to load and when; a
//! [`Frontend`] implementation does the parsing and registers the modules it
//! finds into the design.

use std::fmt;
use std::path::{Path, PathBuf};

use strata_common::Interner;
use strata_ir::Design;

/// The file formats looked up in a library directory, in search order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LibraryFormat {
    /// A Verilog source description (`.v`).
    Verilog,
    /// A serialized JSON netlist (`.json`).
    Netlist,
}

impl LibraryFormat {
    /// Search order within one library directory.
    pub const SEARCH_ORDER: [LibraryFormat; 2] = [LibraryFormat::Verilog, LibraryFormat::Netlist];

    /// Returns the file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            LibraryFormat::Verilog => "v",
            LibraryFormat::Netlist => "json",
        }
    }
}

impl fmt::Display for LibraryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryFormat::Verilog => write!(f, "verilog"),
            LibraryFormat::Netlist => write!(f, "json netlist"),
        }
    }
}

/// Errors a front end reports while loading a file.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    /// The file could not be read.
    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file was read but its content is invalid.
    #[error("malformed `{}`: {message}", path.display())]
    Malformed {
        /// The offending file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// This front end cannot read the format.
    #[error("no front end available for {0} files")]
    Unsupported(LibraryFormat),
}

/// Loads a design file into an existing design.
pub trait Frontend {
    /// Parses `path` as `format` and registers its modules into `design`.
    ///
    /// Module names are interned in `interner`. On success at least the
    /// modules declared in the file exist in `design`.
    fn load(
        &self,
        design: &mut Design,
        interner: &Interner,
        path: &Path,
        format: LibraryFormat,
    ) -> Result<(), FrontendError>;
}
