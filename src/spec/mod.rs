//! # Spec Module
//!
//! Access to a parsed Swagger 2.0 document.
//!
//! The validator never touches specification text; it walks the generic tree that
//! `serde_yaml` or `serde_json` produce. This module wraps that tree in a
//! [`SpecDocument`], gives the parts the validator cares about typed views
//! ([`ParameterMeta`], [`ParameterLocation`], [`PrimitiveType`]) and resolves
//! `$ref` pointers into `definitions` and `parameters`.
//!
//! ## Loading
//!
//! ```no_run
//! use openapi_request_validator::spec::{load_spec, SpecStore};
//!
//! // Parse and lint once at startup
//! let spec = load_spec("swagger.yaml").expect("valid specification");
//!
//! // Share it between request threads
//! let store = SpecStore::new(spec);
//! let snapshot = store.load();
//! assert!(snapshot.paths().len() > 0);
//! ```
//!
//! ## Faults
//!
//! A document that is broken (dangling `$ref`, operation that is not a mapping,
//! body parameter without a schema) yields a [`crate::SpecFault`] during
//! validation. [`lint_spec`] reports the same problems ahead of time as a list of
//! [`ValidationIssue`]s; [`load_spec`] refuses to return a document with issues.

mod build;
mod document;
mod lint;
mod load;
mod store;
mod types;

pub use build::*;
pub use document::SpecDocument;
pub use lint::{format_issues, lint_spec, ValidationIssue};
pub use load::{load_spec, parse_spec_str, read_spec, SpecFormat};
pub use store::SpecStore;
pub use types::*;
