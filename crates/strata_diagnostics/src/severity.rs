//! How bad a diagnostic is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a [`Diagnostic`](crate::Diagnostic).
///
/// `Error` aborts the hierarchy pass, `Warning` marks something the pass
/// worked around (a positional argument left unmapped), and `Note` reports a
/// choice the pass made on the user's behalf (a parameter ignored in generate
/// mode). Suggestions are not a severity; they ride along as a diagnostic's
/// `help` lines.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// Informational, never counted.
    Note,
    /// Recoverable; the pass continued.
    Warning,
    /// Fatal to the pass.
    Error,
}

impl Severity {
    /// ANSI SGR color used by the terminal renderer.
    pub fn ansi_color(self) -> &'static str {
        match self {
            Severity::Note => "36",
            Severity::Warning => "33",
            Severity::Error => "31",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}
