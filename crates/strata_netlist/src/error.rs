//! Errors produced while reading or writing JSON netlists.

use std::path::PathBuf;

/// Errors from the JSON netlist reader and writer.
#[derive(Debug, thiserror::Error)]
pub enum NetlistError {
    /// The file could not be read or written.
    #[error("I/O error on `{}`: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The text is not valid netlist JSON.
    #[error("invalid netlist JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two modules with the same name.
    #[error("module `{0}` is already defined")]
    DuplicateModule(String),

    /// A signal string could not be parsed.
    #[error("in module `{module}`: cannot parse signal `{text}`")]
    BadSignal {
        /// The module containing the connection.
        module: String,
        /// The offending signal text.
        text: String,
    },

    /// A signal names a wire the module does not declare.
    #[error("in module `{module}`: unknown wire `{wire}`")]
    UnknownWire {
        /// The module containing the connection.
        module: String,
        /// The missing wire.
        wire: String,
    },

    /// A bit select lies outside the wire.
    #[error("in module `{module}`: bits [{hi}:{lo}] out of range for `{wire}` of width {width}")]
    RangeOutOfBounds {
        /// The module containing the connection.
        module: String,
        /// The wire being sliced.
        wire: String,
        /// Upper bit index.
        hi: u32,
        /// Lower bit index.
        lo: u32,
        /// Declared width of the wire.
        width: u32,
    },

    /// A wire declares a width of zero.
    #[error("in module `{module}`: wire `{wire}` has zero width")]
    ZeroWidth {
        /// The module declaring the wire.
        module: String,
        /// The wire.
        wire: String,
    },
}
