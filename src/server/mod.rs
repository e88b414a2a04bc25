//! Host-facing request representation.
//!
//! The validator does not run an HTTP server. Hosting services translate their own
//! request objects into a [`Request`]; an `http::Request` converts directly.

pub mod request;

pub use request::{parse_query_params, split_uri, Request};
