//! The Strata design graph.
//!
//! This crate defines [`Design`], [`Module`], [`Cell`], [`Wire`] and
//! [`SigSpec`], the shared in-memory structure that front ends populate and
//! hierarchy passes read and mutate. Modules refer to each other only by
//! interned name, so deleting or cloning a module never leaves a dangling
//! reference behind.

#![warn(missing_docs)]

pub mod cell;
pub mod const_value;
pub mod design;
pub mod module;
pub mod names;
pub mod sigspec;
pub mod wire;

pub use cell::Cell;
pub use const_value::ConstValue;
pub use design::{Design, DuplicateModule};
pub use module::Module;
pub use sigspec::{SigChunk, SigSpec};
pub use wire::{PortDirection, PortInfo, Wire};
