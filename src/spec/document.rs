use crate::error::SpecFault;
use serde_json::{Map, Value};

/// A parsed Swagger 2.0 document.
///
/// Built from the generic tree produced by `serde_yaml`/`serde_json`. The three
/// sections the validator walks (`paths`, `definitions`, `parameters`) are split
/// out at construction so their shape is checked once; lookups below them report
/// a wrong shape as a [`SpecFault`] instead of coercing it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDocument {
    paths: Map<String, Value>,
    definitions: Map<String, Value>,
    parameters: Map<String, Value>,
    /// Every other top-level key (`swagger`, `info`, `basePath`, ...)
    rest: Map<String, Value>,
}

fn take_mapping(
    root: &mut Map<String, Value>,
    key: &str,
) -> Result<Option<Map<String, Value>>, SpecFault> {
    match root.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(SpecFault::MalformedNode {
            location: format!("#/{key}"),
            expected: "a mapping",
        }),
    }
}

impl SpecDocument {
    /// Wrap an already parsed tree. The root must be a mapping with a `paths`
    /// mapping; `definitions` and `parameters` are optional mappings.
    pub fn from_value(root: Value) -> Result<Self, SpecFault> {
        let Value::Object(mut rest) = root else {
            return Err(SpecFault::MalformedNode {
                location: "#".to_string(),
                expected: "a mapping",
            });
        };
        let paths = take_mapping(&mut rest, "paths")?.ok_or(SpecFault::MissingPaths)?;
        let definitions = take_mapping(&mut rest, "definitions")?.unwrap_or_default();
        let parameters = take_mapping(&mut rest, "parameters")?.unwrap_or_default();
        Ok(SpecDocument {
            paths,
            definitions,
            parameters,
            rest,
        })
    }

    /// Reassemble the original tree.
    #[must_use]
    pub fn into_value(self) -> Value {
        let mut root = self.rest;
        root.insert("paths".to_string(), Value::Object(self.paths));
        if !self.definitions.is_empty() {
            root.insert("definitions".to_string(), Value::Object(self.definitions));
        }
        if !self.parameters.is_empty() {
            root.insert("parameters".to_string(), Value::Object(self.parameters));
        }
        Value::Object(root)
    }

    #[must_use]
    pub fn paths(&self) -> &Map<String, Value> {
        &self.paths
    }

    #[must_use]
    pub fn definitions(&self) -> &Map<String, Value> {
        &self.definitions
    }

    #[must_use]
    pub fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    /// A top-level field outside the three walked sections (e.g. `basePath`).
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.rest.get(key)
    }

    /// Documented path templates in declaration order.
    pub fn path_templates(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// The path item for `template`.
    pub fn path_item(&self, template: &str) -> Result<&Map<String, Value>, SpecFault> {
        let item = self
            .paths
            .get(template)
            .ok_or_else(|| SpecFault::MalformedNode {
                location: format!("#/paths/{template}"),
                expected: "a documented path",
            })?;
        item.as_object().ok_or_else(|| SpecFault::MalformedNode {
            location: format!("#/paths/{template}"),
            expected: "a mapping",
        })
    }

    /// Schema registered under `definitions/<name>`.
    pub fn definition(&self, name: &str) -> Result<&Value, SpecFault> {
        self.definitions
            .get(name)
            .ok_or_else(|| SpecFault::UnresolvedReference {
                reference: format!("#/definitions/{name}"),
            })
    }

    /// Shared parameter registered under `parameters/<name>`.
    pub fn shared_parameter(&self, name: &str) -> Result<&Value, SpecFault> {
        self.parameters
            .get(name)
            .ok_or_else(|| SpecFault::UnresolvedReference {
                reference: format!("#/parameters/{name}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_requires_paths_mapping() {
        assert_eq!(
            SpecDocument::from_value(json!({"swagger": "2.0"})),
            Err(SpecFault::MissingPaths)
        );
        assert!(matches!(
            SpecDocument::from_value(json!({"paths": []})),
            Err(SpecFault::MalformedNode { .. })
        ));
        assert!(matches!(
            SpecDocument::from_value(json!("paths")),
            Err(SpecFault::MalformedNode { .. })
        ));
        assert!(matches!(
            SpecDocument::from_value(json!({"paths": {}, "definitions": "User"})),
            Err(SpecFault::MalformedNode { .. })
        ));
    }

    #[test]
    fn test_templates_keep_declaration_order() {
        let doc = SpecDocument::from_value(json!({
            "paths": { "/b": {}, "/a": {}, "/c/{id}": {} }
        }))
        .unwrap();
        let templates: Vec<&str> = doc.path_templates().collect();
        assert_eq!(templates, vec!["/b", "/a", "/c/{id}"]);
    }

    #[test]
    fn test_definition_lookup() {
        let doc = SpecDocument::from_value(json!({
            "paths": {},
            "definitions": { "User": { "properties": {} } }
        }))
        .unwrap();
        assert!(doc.definition("User").is_ok());
        assert_eq!(
            doc.definition("Missing"),
            Err(SpecFault::UnresolvedReference {
                reference: "#/definitions/Missing".to_string()
            })
        );
    }

    #[test]
    fn test_into_value_round_trips_sections() {
        let original = json!({
            "swagger": "2.0",
            "basePath": "/api",
            "paths": { "/a": {} },
            "definitions": { "A": {} }
        });
        let doc = SpecDocument::from_value(original.clone()).unwrap();
        assert_eq!(doc.field("basePath"), Some(&json!("/api")));
        assert_eq!(doc.into_value(), original);
    }
}
