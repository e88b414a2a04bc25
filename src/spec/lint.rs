//! Load-time checks of a specification document.
//!
//! Request validation treats a broken document as a [`crate::error::SpecFault`]
//! the moment it trips over it. Linting finds the same problems up front so a
//! service can refuse to start instead of failing its first unlucky request.

use super::build::{extract_parameters, reference_target, resolve_schema};
use super::document::SpecDocument;
use super::types::{ParameterLocation, METHODS};
use serde_json::Value;

/// One problem found in a specification document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub location: String,
    pub kind: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        location: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ValidationIssue {
            location: location.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Render issues one per line as `[kind] location: message`.
#[must_use]
pub fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("[{}] {}: {}\n", issue.kind, issue.location, issue.message))
        .collect()
}

fn collect_refs<'a>(node: &'a Value, pointer: &str, out: &mut Vec<(String, &'a str)>) {
    match node {
        Value::Object(obj) => {
            for (key, child) in obj {
                if key == "$ref" {
                    if let Some(reference) = child.as_str() {
                        out.push((pointer.to_string(), reference));
                    }
                } else {
                    collect_refs(child, &format!("{pointer}/{key}"), out);
                }
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                collect_refs(child, &format!("{pointer}/{idx}"), out);
            }
        }
        _ => {}
    }
}

fn lint_references(spec: &SpecDocument, issues: &mut Vec<ValidationIssue>) {
    let mut refs = Vec::new();
    for (section, map) in [
        ("paths", spec.paths()),
        ("definitions", spec.definitions()),
        ("parameters", spec.parameters()),
    ] {
        for (key, node) in map {
            collect_refs(node, &format!("#/{section}/{key}"), &mut refs);
        }
    }

    for (location, reference) in refs {
        if reference_target(reference, "definitions").is_some() {
            let node = serde_json::json!({ "$ref": reference });
            if let Err(fault) = resolve_schema(spec, &node, &mut Vec::new()) {
                issues.push(ValidationIssue::new(location, "UnresolvedRef", fault.to_string()));
            }
        } else if let Some(name) = reference_target(reference, "parameters") {
            if let Err(fault) = spec.shared_parameter(name) {
                issues.push(ValidationIssue::new(location, "UnresolvedRef", fault.to_string()));
            }
        } else {
            issues.push(ValidationIssue::new(
                location,
                "UnsupportedRef",
                format!("'{reference}' must point into #/definitions or #/parameters"),
            ));
        }
    }
}

fn lint_operations(spec: &SpecDocument, issues: &mut Vec<ValidationIssue>) {
    for (template, item) in spec.paths() {
        let location = format!("#/paths/{template}");
        if !template.starts_with('/') {
            issues.push(ValidationIssue::new(
                &location,
                "InvalidPath",
                "Path template must start with '/'",
            ));
        }
        let Some(item_map) = item.as_object() else {
            issues.push(ValidationIssue::new(
                &location,
                "MalformedPathItem",
                "Path item must be a mapping",
            ));
            continue;
        };

        for (method, operation) in item_map {
            if !METHODS.contains(&method.as_str()) {
                continue;
            }
            let op_location = format!("{location}/{method}");
            let Some(op_map) = operation.as_object() else {
                issues.push(ValidationIssue::new(
                    &op_location,
                    "MalformedOperation",
                    "Operation must be a mapping",
                ));
                continue;
            };

            let params = match extract_parameters(spec, template, item_map, method, op_map) {
                Ok(params) => params,
                Err(fault) => {
                    // Dangling parameter refs are reported by lint_references.
                    if !matches!(fault, crate::error::SpecFault::UnresolvedReference { .. }) {
                        issues.push(ValidationIssue::new(
                            &op_location,
                            "InvalidParameter",
                            fault.to_string(),
                        ));
                    }
                    continue;
                }
            };

            for param in params {
                if param.location == Some(ParameterLocation::Body) && param.schema.is_none() {
                    issues.push(ValidationIssue::new(
                        &op_location,
                        "MissingBodySchema",
                        format!("Body parameter '{}' has no schema", param.name),
                    ));
                }
            }
        }
    }
}

/// Check a document for problems that would make request validation fault.
#[must_use]
pub fn lint_spec(spec: &SpecDocument) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    lint_operations(spec, &mut issues);
    lint_references(spec, &mut issues);
    if issues.is_empty() {
        tracing::debug!(paths_count = spec.paths().len(), "Specification lint passed");
    } else {
        tracing::warn!(issues_count = issues.len(), "Specification lint found issues");
    }
    issues
}
