//! # openapi-request-validator
//!
//! Validates an incoming HTTP request against a Swagger 2.0 style
//! specification document before the request reaches a handler.
//!
//! ## Overview
//!
//! A validation call answers three questions, in order, and stops at the first
//! "no":
//!
//! 1. Does the request path map to exactly one documented path template, and
//!    does that template document the request method? ([`router`])
//! 2. Are the declared query and path parameters present (when required) and of
//!    the declared primitive type? ([`validator::check_parameter`])
//! 3. Does the JSON body carry every property of its schema, following `$ref`
//!    into `definitions` and into nested objects? ([`validator::check_body`])
//!
//! ## Architecture
//!
//! - **[`spec`]** - Document wrapper, typed parameter views, `$ref` resolution,
//!   load-time lint and the hot-swappable [`SpecStore`]
//! - **[`router`]** - Loose resource-based path matching and operation lookup
//! - **[`validator`]** - Parameter checker and body/schema matcher
//! - **[`server`]** - The host-facing [`Request`] value and query parsing
//! - **[`config`]** - Path prefix, API version and path-binding mode
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `oarv` command line front end
//!
//! ### Request Validation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host
//!     participant Validator as validator::validate
//!     participant Resolver as router::PathResolver
//!     participant Params as validator::check_parameter
//!     participant Body as validator::check_body
//!
//!     Host->>Validator: (config, request, spec)
//!     Validator->>Validator: strip "{prefix}/{version}"
//!     Validator->>Resolver: resolve(method, path)
//!     alt no template / several templates
//!         Resolver-->>Host: BAD_URL
//!     else method not documented
//!         Resolver-->>Host: BAD_METHOD
//!     end
//!     Resolver-->>Validator: ResolvedRoute
//!     loop each declared parameter
//!         alt in: query / path
//!             Validator->>Params: presence + type
//!         else in: body
//!             Validator->>Body: decode once, walk schema
//!         end
//!     end
//!     Validator-->>Host: Valid | Invalid(kind, message) | SpecFault
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use openapi_request_validator::{load_spec, Request, RequestValidator, ValidatorConfig};
//! use http::Method;
//!
//! let spec = load_spec("swagger.yaml")?;
//! let validator = RequestValidator::new(ValidatorConfig::new("/api", "v1"), spec);
//!
//! let req = Request::from_uri(Method::GET, "/api/v1/users/42?active=true");
//! let result = validator.validate(&req)?;
//! if let Some(err) = result.error() {
//!     println!("{} {}", err.status_code(), err.message);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Errors
//!
//! Client mistakes come back as [`ValidationResult::Invalid`] with an
//! [`ErrorKind`] (`BAD_URL` 404, `BAD_METHOD` 405, `BAD_REQUEST` 400). A broken
//! document (dangling `$ref`, alias loop, missing body schema) is a
//! [`SpecFault`] on the `Err` side; the request is not to blame.
//!
//! ## Concurrency
//!
//! Validation is synchronous and keeps no state between calls. Share one
//! `Arc<SpecDocument>` (or a [`SpecStore`]) across threads.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod router;
pub mod server;
pub mod spec;
pub mod validator;

pub use config::{PathBinding, ValidatorConfig};
pub use error::{ErrorKind, Rejection, SpecFault, ValidationError, ValidationResult};
pub use server::Request;
pub use spec::{load_spec, SpecDocument, SpecStore};
pub use validator::{validate, RequestValidator};
