use clap::Parser;
use openapi_request_validator::cli::{run_cli, Cli, EXIT_FAULT};
use openapi_request_validator::logging::{init_logging_with_config, LogConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match init_logging_with_config(&LogConfig::from_env()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: {err:#}");
            None
        }
    };

    match run_cli(&cli) {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FAULT)
        }
    }
}
