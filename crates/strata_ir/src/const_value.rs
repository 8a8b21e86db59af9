//! Constant values for parameters and attributes.

use std::fmt;

use strata_common::LogicVec;
use serde::{Deserialize, Serialize};

/// A parameter or attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstValue {
    /// An integer constant.
    Int(i64),
    /// A floating-point constant.
    Real(f64),
    /// A logic vector constant (bit pattern).
    Logic(LogicVec),
    /// A string constant.
    String(String),
    /// A boolean constant.
    Bool(bool),
}

impl ConstValue {
    /// The single-bit `1` used for flag attributes such as `blackbox` and `top`.
    pub fn flag() -> Self {
        ConstValue::Logic(LogicVec::from_bool(true))
    }

    /// Returns `true` if this value reads as a set flag.
    pub fn is_true_flag(&self) -> bool {
        match self {
            ConstValue::Bool(b) => *b,
            ConstValue::Int(n) => *n != 0,
            ConstValue::Logic(v) => v.to_u64().is_some_and(|n| n != 0),
            ConstValue::Real(_) | ConstValue::String(_) => false,
        }
    }

    /// Returns the integer value of `Int` and fully-defined `Logic` constants.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConstValue::Int(n) => Some(*n),
            ConstValue::Logic(v) => v.to_u64().and_then(|n| i64::try_from(n).ok()),
            ConstValue::Bool(b) => Some(i64::from(*b)),
            ConstValue::Real(_) | ConstValue::String(_) => None,
        }
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Int(n) => write!(f, "{n}"),
            ConstValue::Real(r) => write!(f, "{r:?}"),
            ConstValue::Logic(v) => write!(f, "{}'b{v}", v.width()),
            ConstValue::String(s) => write!(f, "\"{s}\""),
            ConstValue::Bool(b) => write!(f, "{b}"),
        }
    }
}
