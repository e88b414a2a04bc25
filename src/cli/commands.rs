use crate::config::{PathBinding, ValidatorConfig};
use crate::error::ValidationResult;
use crate::server::Request;
use crate::spec::{format_issues, lint_spec, load_spec, read_spec, SpecDocument, METHODS};
use crate::validator::validate;
use anyhow::Context;
use clap::{Parser, Subcommand};
use http::Method;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The request matched the document.
pub const EXIT_VALID: u8 = 0;
/// The request was rejected, or `lint` found issues.
pub const EXIT_INVALID: u8 = 1;
/// The document (or another input file) is unusable.
pub const EXIT_FAULT: u8 = 2;

/// Command-line interface for the request validator
#[derive(Parser, Debug)]
#[command(name = "oarv", version)]
#[command(about = "Validate HTTP requests against a Swagger 2.0 specification", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a single request
    Check {
        /// Path to the specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// HTTP method, case-insensitive
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path including prefix, version and query string
        #[arg(short, long)]
        url: String,

        /// File holding the raw request body
        #[arg(short, long)]
        body: Option<PathBuf>,

        /// Path prefix (overrides config file and OARV_PATH_PREFIX)
        #[arg(long)]
        prefix: Option<String>,

        /// API version segment (overrides config file and OARV_API_VERSION)
        #[arg(long)]
        api_version: Option<String>,

        /// Path parameter binding: template or third_segment
        #[arg(long, value_parser = parse_binding)]
        path_binding: Option<PathBinding>,

        /// Validator config file (TOML or YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Report structural problems in a specification
    ///
    /// Checks that every path item and operation is a mapping, that parameters
    /// carry a name, that body parameters declare a schema and that every
    /// `$ref` resolves without looping.
    Lint {
        /// Path to the specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,
    },
    /// List the documented `METHOD template` pairs
    Routes {
        /// Path to the specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,
    },
}

fn parse_binding(s: &str) -> Result<PathBinding, String> {
    PathBinding::parse(s).ok_or_else(|| format!("unknown path binding '{s}'"))
}

fn build_config(
    file: Option<&Path>,
    prefix: Option<&str>,
    api_version: Option<&str>,
    path_binding: Option<PathBinding>,
) -> anyhow::Result<ValidatorConfig> {
    let mut config = match file {
        Some(path) => ValidatorConfig::from_file(path)?,
        None => ValidatorConfig::from_env(),
    };
    if let Some(prefix) = prefix {
        config.path_prefix = prefix.to_string();
    }
    if let Some(version) = api_version {
        config.version = version.to_string();
    }
    if let Some(binding) = path_binding {
        config.path_binding = binding;
    }
    Ok(config)
}

/// Write `METHOD template` for every documented operation, in document order.
pub fn write_routes(spec: &SpecDocument, out: &mut dyn Write) -> std::io::Result<usize> {
    let mut count = 0;
    for (template, item) in spec.paths() {
        let Some(item) = item.as_object() else {
            continue;
        };
        for method in item.keys().filter(|k| METHODS.contains(&k.as_str())) {
            writeln!(out, "{} {}", method.to_ascii_uppercase(), template)?;
            count += 1;
        }
    }
    Ok(count)
}

/// Run a parsed command, writing its report to `out`.
///
/// Returns the process exit status ([`EXIT_VALID`], [`EXIT_INVALID`] or
/// [`EXIT_FAULT`]).
///
/// # Errors
///
/// Unreadable or unparsable input files. Callers should exit with
/// [`EXIT_FAULT`].
pub fn execute(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<u8> {
    match &cli.command {
        Commands::Check {
            spec,
            method,
            url,
            body,
            prefix,
            api_version,
            path_binding,
            config,
        } => {
            let config = build_config(
                config.as_deref(),
                prefix.as_deref(),
                api_version.as_deref(),
                *path_binding,
            )?;
            let document = load_spec(spec)?;
            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .with_context(|| format!("Invalid HTTP method: {method}"))?;

            let mut request = Request::from_uri(method, url);
            if let Some(body) = body {
                request.body = std::fs::read(body)
                    .with_context(|| format!("Failed to read request body: {}", body.display()))?;
            }

            match validate(&config, &request, &document) {
                Ok(ValidationResult::Valid) => {
                    writeln!(out, "VALID")?;
                    Ok(EXIT_VALID)
                }
                Ok(ValidationResult::Invalid(err)) => {
                    writeln!(
                        out,
                        "{} ({}): {}",
                        err.kind,
                        err.status_code().as_u16(),
                        err.message
                    )?;
                    Ok(EXIT_INVALID)
                }
                Err(fault) => {
                    writeln!(out, "{fault}")?;
                    Ok(EXIT_FAULT)
                }
            }
        }
        Commands::Lint { spec } => {
            let document = read_spec(spec)?;
            let issues = lint_spec(&document);
            if issues.is_empty() {
                writeln!(out, "No issues found in {}", spec.display())?;
                Ok(EXIT_VALID)
            } else {
                write!(out, "{}", format_issues(&issues))?;
                writeln!(out, "{} issue(s) found", issues.len())?;
                Ok(EXIT_INVALID)
            }
        }
        Commands::Routes { spec } => {
            let document = load_spec(spec)?;
            let count = write_routes(&document, out)?;
            tracing::debug!(count, "Routes listed");
            Ok(EXIT_VALID)
        }
    }
}

/// Run a parsed command against stdout.
///
/// # Errors
///
/// See [`execute`].
pub fn run_cli(cli: &Cli) -> anyhow::Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(cli, &mut out)
}
