//! # Request Validation
//!
//! Ties the resolver and the checkers together:
//!
//! 1. strip `"{prefix}/{version}"` from the request path ([`ValidatorConfig::strip_base`])
//! 2. resolve the path and method to one operation ([`PathResolver`])
//! 3. check every declared parameter in declaration order; query and path
//!    parameters go through [`check_parameter`], the body parameter through
//!    [`check_body`]
//!
//! The first failure is returned. Nothing is cached between calls, so one
//! [`RequestValidator`] can be shared by any number of threads.
//!
//! ```
//! use openapi_request_validator::{validate, Request, SpecDocument, ValidatorConfig};
//! use http::Method;
//! use serde_json::json;
//!
//! let spec = SpecDocument::from_value(json!({
//!     "paths": { "/users/{id}": { "get": { "parameters": [
//!         { "name": "id", "in": "path", "type": "integer" }
//!     ] } } }
//! })).unwrap();
//!
//! let config = ValidatorConfig::new("/api", "v1");
//! let req = Request::new(Method::GET, "/api/v1/users/abc");
//! let result = validate(&config, &req, &spec).unwrap();
//! assert_eq!(result.message(), Some("Path param id must be a integer or numeric"));
//! ```

mod body;
mod params;
mod types;

pub use body::{check_body, check_struct, decode_body};
pub use params::check_parameter;
pub use types::{check_type, is_boolean_token, is_numeric_str};

use crate::config::ValidatorConfig;
use crate::error::{finish, Check, SpecFault, ValidationResult};
use crate::router::PathResolver;
use crate::server::Request;
use crate::spec::{extract_parameters, ParameterLocation, SpecDocument};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

fn run(config: &ValidatorConfig, request: &Request, spec: &SpecDocument) -> Check {
    let path = config.strip_base(&request.path);
    let route = PathResolver::new(spec).resolve(&request.method, path)?;
    let params = extract_parameters(
        spec,
        route.template,
        route.path_item,
        &route.method,
        route.operation,
    )?;
    debug!(template = %route.template, param_count = params.len(), "Checking parameters");

    // Decoded on first use; most operations declare no body.
    let mut body: Option<Value> = None;
    for param in params.iter().filter(|p| p.is_checked()) {
        if param.location == Some(ParameterLocation::Body) {
            if body.is_none() {
                body = Some(decode_body(&request.body)?);
            }
            if let Some(data) = &body {
                check_body(spec, param, data)?;
            }
        } else {
            check_parameter(param, request, &route, config.path_binding)?;
        }
    }
    Ok(())
}

/// Validate one request against `spec`.
///
/// # Errors
///
/// Returns a [`SpecFault`] when the document itself is broken somewhere along
/// the path this request exercises. Client mistakes come back as
/// `Ok(ValidationResult::Invalid(..))`.
pub fn validate(
    config: &ValidatorConfig,
    request: &Request,
    spec: &SpecDocument,
) -> Result<ValidationResult, SpecFault> {
    let outcome = finish(run(config, request, spec));
    match &outcome {
        Ok(ValidationResult::Valid) => {
            debug!(method = %request.method, path = %request.path, "Request valid");
        }
        Ok(ValidationResult::Invalid(err)) => {
            warn!(
                method = %request.method,
                path = %request.path,
                kind = %err.kind,
                status = err.status_code().as_u16(),
                message = %err.message,
                "Request rejected"
            );
        }
        Err(fault) => {
            error!(
                method = %request.method,
                path = %request.path,
                fault = %fault,
                "Specification fault during validation"
            );
        }
    }
    outcome
}

/// A configuration bound to a shared document.
#[derive(Debug, Clone)]
pub struct RequestValidator {
    config: ValidatorConfig,
    spec: Arc<SpecDocument>,
}

impl RequestValidator {
    pub fn new(config: ValidatorConfig, spec: impl Into<Arc<SpecDocument>>) -> Self {
        RequestValidator {
            config,
            spec: spec.into(),
        }
    }

    /// See [`validate`].
    ///
    /// # Errors
    ///
    /// A [`SpecFault`] for a broken document.
    pub fn validate(&self, request: &Request) -> Result<ValidationResult, SpecFault> {
        validate(&self.config, request, &self.spec)
    }

    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    #[must_use]
    pub fn spec(&self) -> &Arc<SpecDocument> {
        &self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use http::Method;
    use serde_json::json;

    fn validator() -> RequestValidator {
        let spec = SpecDocument::from_value(json!({
            "paths": {
                "/users": {
                    "post": {
                        "parameters": [
                            { "name": "dry_run", "in": "query", "type": "boolean" },
                            { "name": "user", "in": "body", "schema": { "$ref": "#/definitions/User" } }
                        ]
                    }
                },
                "/files": {
                    "put": { "parameters": [ { "name": "blob", "in": "body" } ] }
                }
            },
            "definitions": {
                "User": { "properties": { "name": { "type": "string" } } }
            }
        }))
        .unwrap();
        RequestValidator::new(ValidatorConfig::new("/api", "v1"), spec)
    }

    #[test]
    fn test_body_valid() {
        let req = Request::new(Method::POST, "/api/v1/users").with_json_body(&json!({ "name": "Ada" }));
        assert_eq!(validator().validate(&req), Ok(ValidationResult::Valid));
    }

    #[test]
    fn test_query_checked_before_body() {
        let req = Request::new(Method::POST, "/api/v1/users")
            .with_query("dry_run", "perhaps")
            .with_body("{broken");
        let result = validator().validate(&req).unwrap();
        assert_eq!(result.message(), Some("Query param dry_run must be a boolean"));
    }

    #[test]
    fn test_invalid_json_body() {
        let req = Request::new(Method::POST, "/api/v1/users").with_body("{broken");
        let result = validator().validate(&req).unwrap();
        assert_eq!(result.kind(), Some(ErrorKind::BadRequest));
        assert_eq!(result.message(), Some("Request body is not valid JSON"));
    }

    #[test]
    fn test_empty_body_is_null() {
        let req = Request::new(Method::POST, "/api/v1/users");
        let result = validator().validate(&req).unwrap();
        assert_eq!(result.message(), Some("Body param name not found"));
    }

    #[test]
    fn test_body_without_schema_is_fault() {
        let req = Request::new(Method::PUT, "/api/v1/files").with_body("{}");
        assert_eq!(
            validator().validate(&req),
            Err(SpecFault::MissingBodySchema {
                parameter: "blob".into()
            })
        );
    }

    #[test]
    fn test_method_not_allowed() {
        let req = Request::new(Method::DELETE, "/api/v1/users");
        let result = validator().validate(&req).unwrap();
        assert_eq!(result.kind(), Some(ErrorKind::BadMethod));
        assert_eq!(result.message(), Some("Method not allowed"));
    }
}
