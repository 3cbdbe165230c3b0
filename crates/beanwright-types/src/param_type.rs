//! Constructor parameter types and signature parsing.
//!
//! Provides the textual form used when constructors are registered from
//! strings (`"int, string"`) and when signatures are printed in diagnostics
//! (`Point(int, int)`).

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

/// The type a constructor parameter expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    Bool,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    Double,
    String,
    /// Accepts any value unchanged
    Any,
    /// A registered object type, by name
    Object(String),
}

impl ParamType {
    pub fn object(type_name: impl Into<String>) -> Self {
        ParamType::Object(type_name.into())
    }

    /// Canonical textual name, as accepted by [`parse_param_type`].
    pub fn name(&self) -> &str {
        match self {
            ParamType::Bool => "bool",
            ParamType::Int => "int",
            ParamType::Long => "long",
            ParamType::Double => "double",
            ParamType::String => "string",
            ParamType::Any => "any",
            ParamType::Object(name) => name,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_param_type(s).ok_or_else(|| anyhow!("invalid parameter type: {:?}", s))
    }
}

/// Parse a parameter type name.
///
/// Supports:
/// - Primitives and their aliases: `bool`/`boolean`, `int`/`i32`/`integer`,
///   `long`/`i64`, `double`/`f64`/`float`, `string`/`str`
/// - The wildcard `any`
/// - Object types: `User`, `app::model::User`, `com.example.User`
///
/// Generic forms such as `List<User>` are rejected.
pub fn parse_param_type(type_str: &str) -> Option<ParamType> {
    let type_str = type_str.trim();

    match type_str {
        "bool" | "boolean" => return Some(ParamType::Bool),
        "int" | "i32" | "integer" => return Some(ParamType::Int),
        "long" | "i64" => return Some(ParamType::Long),
        "double" | "f64" | "float" => return Some(ParamType::Double),
        "string" | "String" | "str" => return Some(ParamType::String),
        "any" => return Some(ParamType::Any),
        _ => {}
    }

    if !is_type_path(type_str) {
        return None;
    }
    Some(ParamType::Object(type_str.to_string()))
}

/// Parse a comma-separated parameter list like `"int, string, User"`.
///
/// An empty (or all-whitespace) list parses to no parameters.
pub fn parse_signature(signature: &str) -> Option<Vec<ParamType>> {
    let signature = signature.trim();
    if signature.is_empty() {
        return Some(vec![]);
    }
    signature.split(',').map(parse_param_type).collect()
}

/// Render a constructor signature, e.g. `Point(int, int)`.
pub fn format_signature(type_name: &str, params: &[ParamType]) -> String {
    let params: Vec<&str> = params.iter().map(ParamType::name).collect();
    format!("{}({})", type_name, params.join(", "))
}

/// A type path is one or more identifiers joined by `::` or `.`.
fn is_type_path(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.split("::")
        .flat_map(|part| part.split('.'))
        .all(is_identifier)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
