use crate::error::ValidationError;
use crate::spec::{ParameterLocation, PrimitiveType};
use serde_json::Value;

/// Check `value` against a declared primitive type.
///
/// No coercion happens: a numeric string passes an `integer` check but stays a
/// string. `Unchecked` tags always pass.
///
/// # Errors
///
/// `BAD_REQUEST` naming the location and the parameter.
pub fn check_type(
    value: &Value,
    param_type: PrimitiveType,
    name: &str,
    location: ParameterLocation,
) -> Result<(), ValidationError> {
    let (ok, expected) = match param_type {
        PrimitiveType::String => (value.is_string(), "a string"),
        PrimitiveType::Integer | PrimitiveType::Number => {
            (is_numeric(value), "a integer or numeric")
        }
        PrimitiveType::Boolean => (is_boolean(value), "a boolean"),
        PrimitiveType::Array => (value.is_array(), "an array"),
        PrimitiveType::Unchecked => return Ok(()),
    };
    if ok {
        Ok(())
    } else {
        Err(ValidationError::bad_request(format!(
            "{location} param {name} must be {expected}"
        )))
    }
}

fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => is_numeric_str(s),
        _ => false,
    }
}

fn is_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::Number(n) => matches!(n.as_u64(), Some(0 | 1)),
        Value::String(s) => is_boolean_token(s),
        _ => false,
    }
}

/// Decimal notation only: `inf`, `NaN` and hex are rejected even though some
/// float parsers accept them.
#[must_use]
pub fn is_numeric_str(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        && s.parse::<f64>().is_ok()
}

#[must_use]
pub fn is_boolean_token(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "true" | "false" | "1" | "0" | "yes" | "no" | "on" | "off"
    )
}
