use super::types::check_type;
use crate::config::PathBinding;
use crate::error::ValidationError;
use crate::router::ResolvedRoute;
use crate::server::Request;
use crate::spec::{ParameterLocation, ParameterMeta};
use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;

/// Concrete value a path parameter is checked against.
fn path_value<'r>(
    param: &ParameterMeta<'_>,
    route: &'r ResolvedRoute<'_>,
    binding: PathBinding,
) -> Option<&'r str> {
    match binding {
        PathBinding::Template => route.path_param(param.name),
        PathBinding::ThirdSegment => route.third_segment.as_deref(),
    }
}

/// Check one query or path parameter. Other locations pass untouched.
///
/// Required-ness is enforced for query parameters only; a path parameter that
/// cannot be bound is simply not type-checked.
///
/// # Errors
///
/// `BAD_REQUEST` when a required query parameter is missing or a present value
/// has the wrong type.
pub fn check_parameter(
    param: &ParameterMeta<'_>,
    request: &Request,
    route: &ResolvedRoute<'_>,
    binding: PathBinding,
) -> Result<(), ValidationError> {
    let (location, value) = match param.location {
        Some(ParameterLocation::Query) => {
            let value = request.query_param(param.name).map(Cow::Borrowed);
            if value.is_none() && param.required {
                return Err(ValidationError::bad_request(format!(
                    "Query param {} not found",
                    param.name
                )));
            }
            (ParameterLocation::Query, value)
        }
        Some(ParameterLocation::Path) => {
            let value = path_value(param, route, binding)
                .map(|segment| Cow::Owned(Value::String(segment.to_string())));
            (ParameterLocation::Path, value)
        }
        _ => return Ok(()),
    };

    match value {
        Some(value) => {
            debug!(param = %param.name, location = %location, "Checking parameter type");
            check_type(&value, param.param_type, param.name, location)
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::PathResolver;
    use crate::spec::{extract_parameters, SpecDocument};
    use http::Method;
    use serde_json::json;

    fn spec() -> SpecDocument {
        SpecDocument::from_value(json!({
            "paths": {
                "/users/{id}/orders/{orderId}": {
                    "get": {
                        "parameters": [
                            { "name": "id", "in": "path", "type": "integer" },
                            { "name": "orderId", "in": "path", "type": "string" },
                            { "name": "limit", "in": "query", "type": "integer" },
                            { "name": "active", "in": "query", "required": true, "type": "boolean" },
                            { "name": "X-Trace", "in": "header", "required": true, "type": "string" }
                        ]
                    }
                }
            }
        }))
        .unwrap()
    }

    fn run(spec: &SpecDocument, req: &Request, binding: PathBinding) -> Result<(), ValidationError> {
        let route = PathResolver::new(spec).resolve(&req.method, &req.path).unwrap();
        let params = extract_parameters(
            spec,
            route.template,
            route.path_item,
            &route.method,
            route.operation,
        )
        .unwrap();
        for param in &params {
            check_parameter(param, req, &route, binding)?;
        }
        Ok(())
    }

    #[test]
    fn test_required_query_missing() {
        let spec = spec();
        let req = Request::new(Method::GET, "/users/42/orders/a1");
        let err = run(&spec, &req, PathBinding::Template).unwrap_err();
        assert_eq!(err.message, "Query param active not found");
    }

    #[test]
    fn test_optional_absent_query_not_checked() {
        let spec = spec();
        let req = Request::new(Method::GET, "/users/42/orders/a1").with_query("active", "yes");
        assert!(run(&spec, &req, PathBinding::Template).is_ok());
    }

    #[test]
    fn test_optional_present_query_checked() {
        let spec = spec();
        let req = Request::new(Method::GET, "/users/42/orders/a1")
            .with_query("active", "true")
            .with_query("limit", "ten");
        let err = run(&spec, &req, PathBinding::Template).unwrap_err();
        assert_eq!(err.message, "Query param limit must be a integer or numeric");
    }

    #[test]
    fn test_template_binding_checks_each_segment() {
        let spec = spec();
        let req = Request::new(Method::GET, "/users/abc/orders/a1").with_query("active", "1");
        let err = run(&spec, &req, PathBinding::Template).unwrap_err();
        assert_eq!(err.message, "Path param id must be a integer or numeric");
    }

    #[test]
    fn test_unbound_required_path_param_not_reported() {
        let spec = SpecDocument::from_value(json!({
            "paths": {
                "/users/{id}/orders/{orderId}": {
                    "get": {
                        "parameters": [
                            { "name": "orderId", "in": "path", "required": true, "type": "integer" }
                        ]
                    }
                }
            }
        }))
        .unwrap();
        let req = Request::new(Method::GET, "/users/1");
        assert_eq!(run(&spec, &req, PathBinding::Template), Ok(()));
    }

    #[test]
    fn test_same_param_in_query_is_required() {
        let spec = SpecDocument::from_value(json!({
            "paths": {
                "/users/{id}/orders/{orderId}": {
                    "get": {
                        "parameters": [
                            { "name": "orderId", "in": "query", "required": true, "type": "integer" }
                        ]
                    }
                }
            }
        }))
        .unwrap();
        let req = Request::new(Method::GET, "/users/1");
        let err = run(&spec, &req, PathBinding::Template).unwrap_err();
        assert_eq!(err.message, "Query param orderId not found");
    }

    #[test]
    fn test_third_segment_binding() {
        let spec = spec();
        // Both path params are checked against `42`.
        let req = Request::new(Method::GET, "/users/42/orders/a1").with_query("active", "on");
        assert!(run(&spec, &req, PathBinding::ThirdSegment).is_ok());
    }
}
