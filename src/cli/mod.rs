//! # CLI Module
//!
//! Command-line front end, shipped as the `oarv` binary.
//!
//! ## Commands
//!
//! ### `check`
//!
//! Validate one request and print `VALID` or `<KIND> (<status>): <message>`:
//!
//! ```bash
//! oarv check --spec swagger.yaml --prefix /api --api-version v1 \
//!     --method GET --url '/api/v1/users/42?active=true'
//! ```
//!
//! Exit status is 0 for a valid request, 1 for a rejected one and 2 when the
//! specification (or another input) cannot be used.
//!
//! ### `lint`
//!
//! ```bash
//! oarv lint --spec swagger.yaml
//! ```
//!
//! Prints one `[kind] location: message` line per issue and exits 1 if any.
//!
//! ### `routes`
//!
//! ```bash
//! oarv routes --spec swagger.yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use openapi_request_validator::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! let status = run_cli(&Cli::parse())?;
//! ```

mod commands;


pub use commands::{
    execute, run_cli, write_routes, Cli, Commands, EXIT_FAULT, EXIT_INVALID, EXIT_VALID,
};
