use super::document::SpecDocument;
use super::types::{ParameterLocation, ParameterMeta, PrimitiveType};
use crate::error::SpecFault;
use serde_json::{Map, Value};

/// The `$ref` string of a node, if it is a reference.
#[must_use]
pub fn reference_of(node: &Value) -> Option<&str> {
    node.get("$ref").and_then(Value::as_str)
}

/// Whether a node is a `$ref` pointer.
#[must_use]
pub fn is_reference(node: &Value) -> bool {
    reference_of(node).is_some()
}

/// Name of the entry a reference points at inside `section`.
///
/// `#/definitions/User` with section `definitions` yields `User`. The segment
/// right after the section name is used, so `definitions/User` (no leading `#/`)
/// resolves the same way.
#[must_use]
pub fn reference_target<'r>(reference: &'r str, section: &str) -> Option<&'r str> {
    let mut segments = reference.split('/').skip_while(|s| *s != section);
    segments.next()?;
    segments.next().filter(|name| !name.is_empty())
}

/// Follow `$ref` aliases until a schema with content is reached.
///
/// `chain` collects the definition names visited during this resolution; seeing
/// a name twice means the aliases loop and no schema will ever be reached.
///
/// # Errors
///
/// * [`SpecFault::UnresolvedReference`] for a pointer outside `definitions` or to
///   an unknown name
/// * [`SpecFault::CyclicReference`] for an alias loop
pub fn resolve_schema<'a>(
    spec: &'a SpecDocument,
    schema: &'a Value,
    chain: &mut Vec<String>,
) -> Result<&'a Value, SpecFault> {
    let mut current = schema;
    while let Some(reference) = reference_of(current) {
        let name = reference_target(reference, "definitions").ok_or_else(|| {
            SpecFault::UnresolvedReference {
                reference: reference.to_string(),
            }
        })?;
        if chain.iter().any(|seen| seen == name) {
            chain.push(name.to_string());
            return Err(SpecFault::CyclicReference {
                chain: std::mem::take(chain),
            });
        }
        chain.push(name.to_string());
        current = spec.definition(name)?;
    }
    Ok(current)
}

fn resolve_parameter_ref<'a>(
    spec: &'a SpecDocument,
    node: &'a Value,
) -> Result<&'a Value, SpecFault> {
    match reference_of(node) {
        Some(reference) => {
            let name = reference_target(reference, "parameters").ok_or_else(|| {
                SpecFault::UnresolvedReference {
                    reference: reference.to_string(),
                }
            })?;
            spec.shared_parameter(name)
        }
        None => Ok(node),
    }
}

/// Read one parameter declaration.
///
/// # Errors
///
/// Returns [`SpecFault::MalformedNode`] when the node is not a mapping or has no
/// string `name`.
pub fn parse_parameter<'a>(
    node: &'a Value,
    location: &str,
) -> Result<ParameterMeta<'a>, SpecFault> {
    let obj = node.as_object().ok_or_else(|| SpecFault::MalformedNode {
        location: location.to_string(),
        expected: "a parameter mapping",
    })?;
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| SpecFault::MalformedNode {
            location: format!("{location}/name"),
            expected: "a string",
        })?;

    Ok(ParameterMeta {
        name,
        location: obj
            .get("in")
            .and_then(Value::as_str)
            .and_then(ParameterLocation::parse),
        required: obj.get("required").and_then(Value::as_bool).unwrap_or(false),
        param_type: PrimitiveType::of(node),
        schema: obj.get("schema"),
    })
}

fn parameter_list<'a>(
    spec: &'a SpecDocument,
    owner: &'a Map<String, Value>,
    location: &str,
) -> Result<Vec<ParameterMeta<'a>>, SpecFault> {
    let list = match owner.get("parameters") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(list)) => list,
        Some(_) => {
            return Err(SpecFault::MalformedNode {
                location: format!("{location}/parameters"),
                expected: "a sequence",
            })
        }
    };

    list.iter()
        .enumerate()
        .map(|(idx, node)| {
            let node = resolve_parameter_ref(spec, node)?;
            parse_parameter(node, &format!("{location}/parameters/{idx}"))
        })
        .collect()
}

/// Collect the parameters that apply to one operation.
///
/// Path-item level parameters come first, followed by the operation's own. An
/// operation parameter with the same `name` and `in` replaces the path-item one
/// in place, so declaration order is otherwise preserved.
///
/// # Errors
///
/// Any malformed parameter list or unresolved `#/parameters/...` reference.
pub fn extract_parameters<'a>(
    spec: &'a SpecDocument,
    template: &str,
    path_item: &'a Map<String, Value>,
    method: &str,
    operation: &'a Map<String, Value>,
) -> Result<Vec<ParameterMeta<'a>>, SpecFault> {
    let item_location = format!("#/paths/{template}");
    let mut params = parameter_list(spec, path_item, &item_location)?;
    let own = parameter_list(spec, operation, &format!("{item_location}/{method}"))?;

    for param in own {
        match params
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            Some(existing) => *existing = param,
            None => params.push(param),
        }
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> SpecDocument {
        SpecDocument::from_value(value).unwrap()
    }

    #[test]
    fn test_reference_target() {
        assert_eq!(reference_target("#/definitions/User", "definitions"), Some("User"));
        assert_eq!(reference_target("definitions/User", "definitions"), Some("User"));
        assert_eq!(reference_target("#/parameters/Limit", "parameters"), Some("Limit"));
        assert_eq!(reference_target("#/definitions/", "definitions"), None);
        assert_eq!(reference_target("#/components/schemas/User", "definitions"), None);
    }

    #[test]
    fn test_resolve_schema_follows_aliases() {
        let spec = doc(json!({
            "paths": {},
            "definitions": {
                "Alias": { "$ref": "#/definitions/User" },
                "User": { "properties": { "id": { "type": "integer" } } }
            }
        }));
        let schema = json!({ "$ref": "#/definitions/Alias" });
        let mut chain = Vec::new();
        let resolved = resolve_schema(&spec, &schema, &mut chain).unwrap();
        assert!(resolved.get("properties").is_some());
        assert_eq!(chain, vec!["Alias", "User"]);
    }

    #[test]
    fn test_resolve_schema_detects_alias_loop() {
        let spec = doc(json!({
            "paths": {},
            "definitions": {
                "A": { "$ref": "#/definitions/B" },
                "B": { "$ref": "#/definitions/A" }
            }
        }));
        let schema = json!({ "$ref": "#/definitions/A" });
        let err = resolve_schema(&spec, &schema, &mut Vec::new()).unwrap_err();
        assert_eq!(
            err,
            SpecFault::CyclicReference {
                chain: vec!["A".into(), "B".into(), "A".into()]
            }
        );
    }

    #[test]
    fn test_resolve_schema_unknown_definition() {
        let spec = doc(json!({ "paths": {} }));
        let schema = json!({ "$ref": "#/definitions/Ghost" });
        assert!(matches!(
            resolve_schema(&spec, &schema, &mut Vec::new()),
            Err(SpecFault::UnresolvedReference { .. })
        ));
    }

    #[test]
    fn test_extract_parameters_merges_and_overrides() {
        let spec = doc(json!({
            "paths": {
                "/users/{id}": {
                    "parameters": [
                        { "name": "id", "in": "path", "type": "string" },
                        { "$ref": "#/parameters/Verbose" }
                    ],
                    "get": {
                        "parameters": [
                            { "name": "id", "in": "path", "type": "integer", "required": true },
                            { "name": "active", "in": "query", "type": "boolean" }
                        ]
                    }
                }
            },
            "parameters": {
                "Verbose": { "name": "verbose", "in": "query", "type": "boolean" }
            }
        }));
        let item = spec.path_item("/users/{id}").unwrap();
        let op = item["get"].as_object().unwrap();
        let params = extract_parameters(&spec, "/users/{id}", item, "get", op).unwrap();

        let names: Vec<&str> = params.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["id", "verbose", "active"]);
        assert_eq!(params[0].param_type, PrimitiveType::Integer);
        assert!(params[0].required);
        assert_eq!(params[1].location, Some(ParameterLocation::Query));
    }

    #[test]
    fn test_parameter_without_name_is_a_fault() {
        let node = json!({ "in": "query" });
        assert!(matches!(
            parse_parameter(&node, "#/paths/x/get/parameters/0"),
            Err(SpecFault::MalformedNode { .. })
        ));
    }
}
