//! Shared foundational types used across the Strata hierarchy tools.
//!
//! This crate provides interned identifiers, content hashing, 4-state logic
//! values, packed logic vectors, and the internal-error result type.

#![warn(missing_docs)]

pub mod hash;
pub mod ident;
pub mod logic;
pub mod logic_vec;
pub mod result;

pub use hash::ContentHash;
pub use ident::{Ident, Interner};
pub use logic::Logic;
pub use logic_vec::LogicVec;
pub use result::{InternalError, StrataResult};
