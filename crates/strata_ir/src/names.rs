//! Naming conventions for design identifiers.
//!
//! User-visible names are escaped with a leading `\` (`\top`). Names that
//! begin with `$` are internal: primitives, template and derived modules,
//! array descriptors and positional connection keys.

/// Prefix under which a parametric template module is registered.
pub const ABSTRACT_PREFIX: &str = "$abstract";
/// Prefix of modules derived from a template with a non-empty assignment.
pub const PARAMOD_PREFIX: &str = "$paramod";
/// Prefix of a cell type carrying an array descriptor.
pub const ARRAY_PREFIX: &str = "$array:";
/// Attribute flagging an interface-only (black-box) module.
pub const BLACKBOX_ATTR: &str = "\\blackbox";
/// Attribute flagging the design's top module.
pub const TOP_ATTR: &str = "\\top";

/// Escapes a user-supplied name. Already-escaped and internal names pass through.
pub fn escape_id(name: &str) -> String {
    if name.starts_with('\\') || name.starts_with('$') {
        name.to_string()
    } else {
        format!("\\{name}")
    }
}

/// Strips the public-name escape, leaving internal names untouched.
pub fn unescape_id(name: &str) -> &str {
    name.strip_prefix('\\').unwrap_or(name)
}

/// Returns `true` for internal (`$`-prefixed) names.
pub fn is_internal(name: &str) -> bool {
    name.starts_with('$')
}

/// Returns the template registration name for `name`.
pub fn abstract_name(name: &str) -> String {
    format!("{ABSTRACT_PREFIX}{name}")
}

/// Returns the name a template was registered for, if `name` is a template name.
pub fn strip_abstract(name: &str) -> Option<&str> {
    name.strip_prefix(ABSTRACT_PREFIX)
}

/// Parses a positional connection key (`$1`, `$2`, ...) into its 1-based index.
///
/// Only keys whose first character after `$` is a digit are positional; the
/// index is read from the leading run of digits.
pub fn positional_index(name: &str) -> Option<u32> {
    let rest = name.strip_prefix('$')?;
    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Builds the positional connection key for a 1-based index.
pub fn positional_key(index: u32) -> String {
    format!("${index}")
}

/// The `(index, count)` pair of an array-instantiated cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ArrayDescriptor {
    /// This cell's 0-based position among the replicas.
    pub index: u32,
    /// The number of replicas sharing each connection bus.
    pub count: u32,
}

/// Splits `$array:<index>:<count>:<type>` into its descriptor and base type.
///
/// Returns `None` for names without the array prefix or with non-numeric fields.
pub fn parse_array_type(name: &str) -> Option<(ArrayDescriptor, &str)> {
    let rest = name.strip_prefix(ARRAY_PREFIX)?;
    let mut parts = rest.splitn(3, ':');
    let index = parts.next()?.parse().ok()?;
    let count = parts.next()?.parse().ok()?;
    let base = parts.next()?;
    Some((ArrayDescriptor { index, count }, base))
}

/// Builds an array cell type name.
pub fn array_type(desc: ArrayDescriptor, base: &str) -> String {
    format!("{ARRAY_PREFIX}{}:{}:{base}", desc.index, desc.count)
}
