//! Generate-mode argument parsing.
//!
//! Each argument is a port declaration `{i|o|io}[@<pos>]:<name>` or, failing
//! that, a cell type pattern. Positional declarations name one exact port;
//! declarations without a position carry a glob pattern over port names.

use glob::Pattern;
use strata_ir::PortDirection;

use crate::errors::HierarchyError;

/// One classified generate-mode argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateArg {
    /// `dir@pos:name`.
    PositionalPort {
        /// Port direction.
        direction: PortDirection,
        /// 1-based position.
        position: u32,
        /// Exact port name, unescaped.
        name: String,
    },
    /// `dir:pattern`.
    WildcardPort {
        /// Port direction.
        direction: PortDirection,
        /// Glob over unescaped port names.
        pattern: String,
    },
    /// Anything else: a glob over unescaped cell type names.
    CellTypePattern(String),
}

impl GenerateArg {
    /// Classifies one argument.
    pub fn parse(arg: &str) -> GenerateArg {
        parse_port_decl(arg).unwrap_or_else(|| {
            GenerateArg::CellTypePattern(strata_ir::names::unescape_id(arg).to_string())
        })
    }
}

fn parse_port_decl(arg: &str) -> Option<GenerateArg> {
    let (direction, rest) = if let Some(rest) = arg.strip_prefix("io") {
        (PortDirection::InOut, rest)
    } else if let Some(rest) = arg.strip_prefix('i') {
        (PortDirection::Input, rest)
    } else if let Some(rest) = arg.strip_prefix('o') {
        (PortDirection::Output, rest)
    } else {
        return None;
    };

    let (position, rest) = match rest.strip_prefix('@') {
        Some(after) => {
            let digits = after
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after.len());
            let position: u32 = after[..digits].parse().ok()?;
            if position < 1 {
                return None;
            }
            (Some(position), &after[digits..])
        }
        None => (None, rest),
    };

    let name = rest.strip_prefix(':')?;
    if name.is_empty() {
        return None;
    }

    Some(match position {
        Some(position) => GenerateArg::PositionalPort {
            direction,
            position,
            name: name.to_string(),
        },
        None => GenerateArg::WildcardPort {
            direction,
            pattern: name.to_string(),
        },
    })
}

/// A port declaration with a fixed position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalDecl {
    /// Port direction.
    pub direction: PortDirection,
    /// 1-based position.
    pub position: u32,
    /// Exact port name, unescaped.
    pub name: String,
}

/// A port declaration matching port names by glob.
#[derive(Debug, Clone)]
pub struct WildcardDecl {
    /// Port direction.
    pub direction: PortDirection,
    /// Compiled glob over unescaped port names.
    pub pattern: Pattern,
}

/// Everything generate mode needs, with patterns compiled.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Globs over unescaped cell type names.
    pub cell_types: Vec<Pattern>,
    /// Positional declarations, in argument order.
    pub positional: Vec<PositionalDecl>,
    /// Wildcard declarations, in argument order. The first match wins.
    pub wildcards: Vec<WildcardDecl>,
}

impl GenerateOptions {
    /// Classifies and compiles a generate-mode argument list.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, HierarchyError> {
        let mut options = GenerateOptions::default();
        for arg in args {
            match GenerateArg::parse(arg.as_ref()) {
                GenerateArg::PositionalPort {
                    direction,
                    position,
                    name,
                } => {
                    log::info!("Port declaration: {direction} [at position {position}] {name}");
                    options.positional.push(PositionalDecl {
                        direction,
                        position,
                        name,
                    });
                }
                GenerateArg::WildcardPort { direction, pattern } => {
                    log::info!("Port declaration: {direction} {pattern}");
                    options.wildcards.push(WildcardDecl {
                        direction,
                        pattern: compile(&pattern)?,
                    });
                }
                GenerateArg::CellTypePattern(pattern) => {
                    log::info!("Celltype: {pattern}");
                    options.cell_types.push(compile(&pattern)?);
                }
            }
        }
        Ok(options)
    }
}

fn compile(pattern: &str) -> Result<Pattern, HierarchyError> {
    Pattern::new(pattern).map_err(|e| HierarchyError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_ports() {
        assert_eq!(
            GenerateArg::parse("i:A*"),
            GenerateArg::WildcardPort {
                direction: PortDirection::Input,
                pattern: "A*".into()
            }
        );
        assert_eq!(
            GenerateArg::parse("io:PAD"),
            GenerateArg::WildcardPort {
                direction: PortDirection::InOut,
                pattern: "PAD".into()
            }
        );
    }

    #[test]
    fn positional_ports() {
        assert_eq!(
            GenerateArg::parse("o@3:Y"),
            GenerateArg::PositionalPort {
                direction: PortDirection::Output,
                position: 3,
                name: "Y".into()
            }
        );
    }

    #[test]
    fn name_may_contain_colons() {
        assert_eq!(
            GenerateArg::parse("i:a:b"),
            GenerateArg::WildcardPort {
                direction: PortDirection::Input,
                pattern: "a:b".into()
            }
        );
    }

    #[test]
    fn malformed_declarations_are_cell_types() {
        for arg in ["i@0:A", "o@:Y", "i@2Y", "o:", "inv*", "MUX*", "io"] {
            assert_eq!(
                GenerateArg::parse(arg),
                GenerateArg::CellTypePattern(arg.to_string()),
                "{arg}"
            );
        }
    }

    #[test]
    fn cell_type_patterns_are_unescaped() {
        assert_eq!(
            GenerateArg::parse("\\MUX2"),
            GenerateArg::CellTypePattern("MUX2".into())
        );
    }

    #[test]
    fn options_keep_declaration_order() {
        let options = GenerateOptions::from_args(&["MUX*", "i:A", "o@3:Y", "i:*"]).unwrap();
        assert_eq!(options.cell_types.len(), 1);
        assert_eq!(options.positional.len(), 1);
        let patterns: Vec<&str> = options.wildcards.iter().map(|w| w.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["A", "*"]);
    }

    #[test]
    fn invalid_glob_is_reported() {
        let err = GenerateOptions::from_args(&["MUX[", "i:A"]).unwrap_err();
        assert!(matches!(err, HierarchyError::InvalidPattern { .. }));
    }
}
