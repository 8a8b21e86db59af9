//! Bit-vector signal references.
//!
//! A [`SigSpec`] names the bits a cell port is connected to: an LSB-first
//! sequence of wire slices and constants inside the containing module.

use strata_common::{Ident, LogicVec};
use serde::{Deserialize, Serialize};

use crate::wire::Wire;

/// One contiguous piece of a [`SigSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SigChunk {
    /// `width` bits of a wire, starting at bit `offset`.
    Wire {
        /// The wire being referenced.
        wire: Ident,
        /// The lowest referenced bit.
        offset: u32,
        /// Number of bits.
        width: u32,
    },
    /// Constant bits.
    Const(LogicVec),
}

impl SigChunk {
    /// Returns the width of this chunk in bits.
    pub fn width(&self) -> u32 {
        match self {
            SigChunk::Wire { width, .. } => *width,
            SigChunk::Const(v) => v.width(),
        }
    }

    fn slice(&self, offset: u32, len: u32) -> SigChunk {
        match self {
            SigChunk::Wire {
                wire,
                offset: base,
                ..
            } => SigChunk::Wire {
                wire: *wire,
                offset: base + offset,
                width: len,
            },
            SigChunk::Const(v) => SigChunk::Const(v.slice(offset, len)),
        }
    }
}

/// A signal: an LSB-first concatenation of chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigSpec {
    chunks: Vec<SigChunk>,
}

impl SigSpec {
    /// Creates an empty (zero-width) signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refers to every bit of `wire`.
    pub fn from_wire(wire: &Wire) -> Self {
        Self::wire_slice(wire.name, 0, wire.width)
    }

    /// Refers to `width` bits of the named wire starting at `offset`.
    pub fn wire_slice(wire: Ident, offset: u32, width: u32) -> Self {
        let mut sig = Self::new();
        sig.push(SigChunk::Wire {
            wire,
            offset,
            width,
        });
        sig
    }

    /// A constant signal.
    pub fn constant(value: LogicVec) -> Self {
        let mut sig = Self::new();
        sig.push(SigChunk::Const(value));
        sig
    }

    /// Appends a chunk above the current most significant bit.
    ///
    /// Zero-width chunks are dropped.
    pub fn push(&mut self, chunk: SigChunk) {
        if chunk.width() > 0 {
            self.chunks.push(chunk);
        }
    }

    /// Appends `high` above the current most significant bit.
    pub fn append(&mut self, high: SigSpec) {
        for chunk in high.chunks {
            self.push(chunk);
        }
    }

    /// Returns the chunks, least significant first.
    pub fn chunks(&self) -> &[SigChunk] {
        &self.chunks
    }

    /// Returns the total width in bits.
    pub fn width(&self) -> u32 {
        self.chunks.iter().map(SigChunk::width).sum()
    }

    /// Returns `true` for a zero-width signal.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Returns bits `[offset, offset + len)` as a new signal.
    ///
    /// # Panics
    ///
    /// Panics if the range extends past the signal's width.
    pub fn extract(&self, offset: u32, len: u32) -> SigSpec {
        let width = self.width();
        assert!(
            offset + len <= width,
            "extract [{offset}+:{len}] out of bounds for width {width}"
        );
        let end = offset + len;
        let mut out = SigSpec::new();
        let mut pos = 0;
        for chunk in &self.chunks {
            let chunk_end = pos + chunk.width();
            let lo = offset.max(pos);
            let hi = end.min(chunk_end);
            if lo < hi {
                out.push(chunk.slice(lo - pos, hi - lo));
            }
            pos = chunk_end;
            if pos >= end {
                break;
            }
        }
        out
    }
}
