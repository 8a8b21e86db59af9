//! Wires and their optional port role.
//!
//! A [`Wire`] is a named bit vector inside one module. Exported wires carry a
//! [`PortInfo`] with a 1-based position and a direction; positions of one
//! module's ports are unique and contiguous from 1.

use std::fmt;

use strata_common::Ident;
use serde::{Deserialize, Serialize};

/// The direction of a port on a module boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// An input port (data flows into the module).
    Input,
    /// An output port (data flows out of the module).
    Output,
    /// A bidirectional port (data flows both ways).
    InOut,
}

impl PortDirection {
    /// Builds a direction from separate input/output flags.
    ///
    /// Returns `None` when neither flag is set.
    pub fn from_flags(input: bool, output: bool) -> Option<Self> {
        match (input, output) {
            (true, true) => Some(PortDirection::InOut),
            (true, false) => Some(PortDirection::Input),
            (false, true) => Some(PortDirection::Output),
            (false, false) => None,
        }
    }

    /// Returns `true` for `Input` and `InOut`.
    pub fn is_input(self) -> bool {
        matches!(self, PortDirection::Input | PortDirection::InOut)
    }

    /// Returns `true` for `Output` and `InOut`.
    pub fn is_output(self) -> bool {
        matches!(self, PortDirection::Output | PortDirection::InOut)
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
            PortDirection::InOut => write!(f, "inout"),
        }
    }
}

/// The port role of an exported wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortInfo {
    /// 1-based position in the module's argument list.
    pub position: u32,
    /// The direction of data flow.
    pub direction: PortDirection,
}

/// A named bit vector within a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    /// The wire name.
    pub name: Ident,
    /// Width in bits.
    pub width: u32,
    /// Port role, if the wire is exported.
    pub port: Option<PortInfo>,
    /// Module parameter whose value sets the width when the module is derived.
    pub width_param: Option<Ident>,
}

impl Wire {
    /// Creates an internal (unexported) wire.
    pub fn new(name: Ident, width: u32) -> Self {
        Self {
            name,
            width,
            port: None,
            width_param: None,
        }
    }

    /// Creates an exported wire at the given position.
    pub fn port(name: Ident, width: u32, position: u32, direction: PortDirection) -> Self {
        Self {
            name,
            width,
            port: Some(PortInfo {
                position,
                direction,
            }),
            width_param: None,
        }
    }

    /// Ties the width to a module parameter.
    pub fn with_width_param(mut self, param: Ident) -> Self {
        self.width_param = Some(param);
        self
    }

    /// Returns the 1-based port position, if exported.
    pub fn port_position(&self) -> Option<u32> {
        self.port.map(|p| p.position)
    }
}
