//! JSON netlist reader and writer.
//!
//! The on-disk form is a `modules` object keyed by unescaped module name.
//! Connections are signal strings (`bus`, `bus[7:0]`, `bus[3]`, `4'b10x1`)
//! or lists of them concatenated most significant first. [`JsonFrontend`]
//! plugs the reader into the hierarchy pass as its library loader.

#![warn(missing_docs)]

pub mod error;
pub mod format;
pub mod frontend;
pub mod reader;
mod signal;
pub mod writer;

pub use error::NetlistError;
pub use format::NetlistFile;
pub use frontend::JsonFrontend;
pub use reader::{read_netlist, read_netlist_file};
pub use writer::{to_netlist_file, write_netlist, write_netlist_file};
