use serde_json::Value;
use std::fmt;

/// HTTP methods that may appear as keys of a path item.
pub const METHODS: [&str; 8] = [
    "get", "post", "put", "delete", "patch", "options", "head", "trace",
];

/// Where a parameter is carried.
///
/// Only `Query`, `Path` and `Body` are validated; the other Swagger 2.0
/// locations are parsed so they can be reported but are otherwise skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Query,
    Path,
    Body,
    Header,
    FormData,
}

impl ParameterLocation {
    /// Parse the value of a parameter's `in` field.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "query" => Some(ParameterLocation::Query),
            "path" => Some(ParameterLocation::Path),
            "body" => Some(ParameterLocation::Body),
            "header" => Some(ParameterLocation::Header),
            "formData" => Some(ParameterLocation::FormData),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterLocation::Query => write!(f, "Query"),
            ParameterLocation::Path => write!(f, "Path"),
            ParameterLocation::Body => write!(f, "Body"),
            ParameterLocation::Header => write!(f, "Header"),
            ParameterLocation::FormData => write!(f, "FormData"),
        }
    }
}

/// Primitive `type` tag of a parameter or schema property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    /// Any other tag (`object`, `file`, ...) or no tag at all. Never checked.
    Unchecked,
}

impl PrimitiveType {
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("string") => PrimitiveType::String,
            Some("integer") => PrimitiveType::Integer,
            Some("number") => PrimitiveType::Number,
            Some("boolean") => PrimitiveType::Boolean,
            Some("array") => PrimitiveType::Array,
            _ => PrimitiveType::Unchecked,
        }
    }

    /// Read the `type` field of a parameter or schema node.
    #[must_use]
    pub fn of(node: &Value) -> Self {
        Self::from_tag(node.get("type").and_then(Value::as_str))
    }
}

/// A parameter as declared by an operation, borrowed from the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMeta<'a> {
    pub name: &'a str,
    /// `None` when the parameter has no (or an unknown) `in` field.
    pub location: Option<ParameterLocation>,
    pub required: bool,
    pub param_type: PrimitiveType,
    /// Only meaningful for body parameters.
    pub schema: Option<&'a Value>,
}

impl ParameterMeta<'_> {
    /// Whether the checker looks at this parameter at all.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        matches!(
            self.location,
            Some(ParameterLocation::Query | ParameterLocation::Path | ParameterLocation::Body)
        )
    }
}
