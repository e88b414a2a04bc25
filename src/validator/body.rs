use super::types::check_type;
use crate::error::{Check, SpecFault, ValidationError};
use crate::spec::{
    is_reference, resolve_schema, ParameterLocation, ParameterMeta, PrimitiveType, SpecDocument,
};
use serde_json::Value;
use tracing::debug;

/// Decode a raw request body. Empty (or whitespace-only) bodies become `null`.
///
/// # Errors
///
/// `BAD_REQUEST` if the bytes are not JSON.
pub fn decode_body(raw: &[u8]) -> Result<Value, ValidationError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(raw).map_err(|err| {
        debug!(error = %err, body_len = raw.len(), "Request body did not decode");
        ValidationError::bad_request("Request body is not valid JSON")
    })
}

/// Validate the decoded body against a body parameter's schema.
///
/// # Errors
///
/// [`SpecFault::MissingBodySchema`] if the parameter has no `schema`; otherwise
/// whatever [`check_struct`] reports.
pub fn check_body(spec: &SpecDocument, param: &ParameterMeta<'_>, body: &Value) -> Check {
    let schema = param.schema.ok_or_else(|| SpecFault::MissingBodySchema {
        parameter: param.name.to_string(),
    })?;
    check_struct(spec, body, schema, &format!("body parameter '{}'", param.name))
}

/// Walk `schema.properties` in declaration order against `data`.
///
/// Every declared property must be present and non-null. Properties that are
/// references or inline objects with their own `properties` are descended into;
/// the rest get a primitive type check. The first failure wins.
///
/// `location` names `schema` in fault messages.
///
/// # Errors
///
/// * [`crate::error::Rejection::Invalid`] for a missing or mistyped property
/// * [`crate::error::Rejection::Fault`] for dangling or cyclic references and
///   nodes of the wrong shape
pub fn check_struct(spec: &SpecDocument, data: &Value, schema: &Value, location: &str) -> Check {
    let mut chain = Vec::new();
    let resolved = resolve_schema(spec, schema, &mut chain)?;
    let location = match chain.last() {
        Some(name) => format!("#/definitions/{name}"),
        None => location.to_string(),
    };

    let properties = match resolved.get("properties") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Object(properties)) => properties,
        Some(_) => {
            return Err(SpecFault::MalformedNode {
                location: format!("{location}/properties"),
                expected: "a mapping",
            }
            .into())
        }
    };

    for (key, property) in properties {
        let value = match data.get(key) {
            None | Some(Value::Null) => {
                let err = ValidationError::bad_request(format!("Body param {key} not found"));
                return Err(err.into());
            }
            Some(value) => value,
        };
        if !property.is_object() {
            return Err(SpecFault::MalformedNode {
                location: format!("{location}/properties/{key}"),
                expected: "a schema mapping",
            }
            .into());
        }

        if is_reference(property) || property.get("properties").is_some() {
            check_struct(spec, value, property, &format!("{location}/properties/{key}"))?;
        } else {
            check_type(value, PrimitiveType::of(property), key, ParameterLocation::Body)?;
        }
    }
    Ok(())
}
