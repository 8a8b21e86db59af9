//! Serde schema of the JSON netlist file.
//!
//! These types mirror the file layout one to one. Conversion to and from the
//! design graph lives in [`crate::reader`] and [`crate::writer`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strata_ir::PortDirection;

/// The whole file: modules keyed by unescaped name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetlistFile {
    /// Modules by name.
    #[serde(default)]
    pub modules: BTreeMap<String, ModuleJson>,
}

/// One module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleJson {
    /// Module attributes such as `top` and `blackbox`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, ValueJson>,
    /// Declared parameters with their defaults.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, ValueJson>,
    /// Wires by name.
    #[serde(default)]
    pub wires: BTreeMap<String, WireJson>,
    /// Cells by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cells: BTreeMap<String, CellJson>,
}

/// One wire, optionally a port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireJson {
    /// Width in bits.
    pub width: u32,
    /// Port information, if the wire is a port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<PortJson>,
    /// Parameter whose value gives the width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_param: Option<String>,
}

/// Port position and direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortJson {
    /// 1-based port position.
    pub position: u32,
    /// Port direction.
    pub direction: DirectionJson,
}

/// Port direction as written in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionJson {
    /// `"input"`
    Input,
    /// `"output"`
    Output,
    /// `"inout"`
    Inout,
}

impl From<DirectionJson> for PortDirection {
    fn from(dir: DirectionJson) -> Self {
        match dir {
            DirectionJson::Input => PortDirection::Input,
            DirectionJson::Output => PortDirection::Output,
            DirectionJson::Inout => PortDirection::InOut,
        }
    }
}

impl From<PortDirection> for DirectionJson {
    fn from(dir: PortDirection) -> Self {
        match dir {
            PortDirection::Input => DirectionJson::Input,
            PortDirection::Output => DirectionJson::Output,
            PortDirection::InOut => DirectionJson::Inout,
        }
    }
}

/// One cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CellJson {
    /// The instantiated type.
    #[serde(rename = "type")]
    pub cell_type: String,
    /// Parameter overrides.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, ValueJson>,
    /// Parameters bound to the enclosing module's parameters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub param_refs: BTreeMap<String, String>,
    /// Port connections.
    #[serde(default)]
    pub connections: BTreeMap<String, ConnectionJson>,
}

/// A connection: one signal, or several concatenated MSB-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConnectionJson {
    /// A single signal string.
    Single(String),
    /// A concatenation, most significant part first.
    Concat(Vec<String>),
}

/// A parameter or attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueJson {
    /// `true` / `false`
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A float.
    Real(f64),
    /// A string, or a `<width>'b<bits>` logic constant.
    Str(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_variants_by_shape() {
        let v: BTreeMap<String, ValueJson> =
            serde_json::from_str(r#"{"a": 3, "b": 1.5, "c": true, "d": "x"}"#).unwrap();
        assert_eq!(v["a"], ValueJson::Int(3));
        assert_eq!(v["b"], ValueJson::Real(1.5));
        assert_eq!(v["c"], ValueJson::Bool(true));
        assert_eq!(v["d"], ValueJson::Str("x".into()));
    }

    #[test]
    fn connection_single_or_list() {
        let c: BTreeMap<String, ConnectionJson> =
            serde_json::from_str(r#"{"A": "bus[7:0]", "B": ["a", "b"]}"#).unwrap();
        assert_eq!(c["A"], ConnectionJson::Single("bus[7:0]".into()));
        assert_eq!(
            c["B"],
            ConnectionJson::Concat(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn unknown_field_rejected() {
        let err = serde_json::from_str::<WireJson>(r#"{"width": 1, "signed": true}"#);
        assert!(err.is_err());
    }

    #[test]
    fn empty_sections_omitted() {
        let m = ModuleJson::default();
        let text = serde_json::to_string(&m).unwrap();
        assert_eq!(text, r#"{"wires":{}}"#);
    }
}
