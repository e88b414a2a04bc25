//! # Router Module
//!
//! Maps a concrete request path onto exactly one documented path template and
//! the operation declared for the request method.
//!
//! ## Matching
//!
//! The matcher is deliberately loose. It looks at the first path segment (the
//! resource) and at whether anything follows it:
//!
//! | request path | matching templates                      |
//! |--------------|-----------------------------------------|
//! | `/`          | `/`                                     |
//! | `/users`     | `/users`, `/users_admin`, `/users.json` |
//! | `/users/42`  | `/users/{id}`, `/users/{id}/orders`     |
//!
//! Exactly one template must match. None yields `BAD_URL("Url not found")`,
//! several yield `BAD_URL("Url conflict")`. A path that resolves but does not
//! document the method yields `BAD_METHOD("Method not allowed")`.
//!
//! ## Example
//!
//! ```rust
//! use openapi_request_validator::router::PathResolver;
//! use openapi_request_validator::spec::SpecDocument;
//! use http::Method;
//! use serde_json::json;
//!
//! let spec = SpecDocument::from_value(json!({
//!     "paths": { "/users/{id}": { "get": { "parameters": [] } } }
//! })).unwrap();
//!
//! let route = PathResolver::new(&spec).resolve(&Method::GET, "/users/42").unwrap();
//! assert_eq!(route.template, "/users/{id}");
//! assert_eq!(route.path_param("id"), Some("42"));
//! ```

mod core;

pub use core::{
    bind_template, normalize_path, MatchRule, ParamVec, PathResolver, ResolvedRoute,
    MAX_INLINE_PARAMS,
};
