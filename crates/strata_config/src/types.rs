//! Configuration types deserialized from `strata.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// The top-level project configuration parsed from `strata.toml`.
///
/// Every table is optional; an empty file yields the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Settings for normal elaboration.
    #[serde(default)]
    pub hierarchy: HierarchyConfig,
    /// Settings for black-box generation mode.
    #[serde(default)]
    pub generate: Option<GenerateConfig>,
}

/// The `[hierarchy]` table.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HierarchyConfig {
    /// Name of the top module, unescaped.
    pub top: Option<String>,
    /// Library directories searched for missing modules, in order.
    ///
    /// Accepts a single string or a list of strings.
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub libdirs: Vec<String>,
    /// Treat an unresolvable module type as an error.
    #[serde(default)]
    pub check: bool,
    /// Also remove unused black-box modules.
    #[serde(default)]
    pub purge_lib: bool,
    /// Leave positional connections keyed by position.
    #[serde(default)]
    pub keep_positionals: bool,
}

/// The `[generate]` table.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    /// Glob patterns selecting the cell types to generate modules for.
    #[serde(default)]
    pub cell_types: Vec<String>,
    /// Port declarations in the `{i|o|io}[@pos]:name` grammar.
    #[serde(default)]
    pub ports: Vec<String>,
}

/// Deserializes a field that can be either a single string or a list of strings.
///
/// Allows `libdirs = "lib"` as well as `libdirs = ["lib", "vendor"]`.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}
