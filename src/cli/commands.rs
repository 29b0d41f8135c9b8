//! CLI command implementations
//!
//! Configuration is resolved in order: file (or defaults), environment,
//! then command-line flags. The result is validated before anything binds.

use std::path::Path;

use crate::http_server::config::process_env;
use crate::http_server::{HttpServer, ServerConfig};
use crate::observability::{log_event, Event};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Main CLI entry point. This is the only function main.rs calls.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
    }
}

/// Build the effective server configuration
pub fn resolve_config(config_path: Option<&Path>, port: Option<u16>) -> CliResult<ServerConfig> {
    resolve_config_with(config_path, port, process_env)
}

/// [`resolve_config`] reading variables through `lookup`
pub fn resolve_config_with<F>(config_path: Option<&Path>, port: Option<u16>, lookup: F) -> CliResult<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match config_path {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    config.apply_vars(lookup)?;
    if let Some(port) = port {
        config.port = port;
    }
    config.validate()?;
    Ok(config)
}

/// Run the HTTP API until the process is stopped
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let config = match resolve_config(config_path, port) {
        Ok(config) => config,
        Err(err) => {
            log_event(Event::BootFailed, &[("code", err.code_str()), ("reason", err.message())]);
            return Err(err);
        }
    };

    let source = config_path
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    log_event(
        Event::ConfigLoaded,
        &[("addr", &config.socket_addr()), ("source", &source)],
    );

    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
    .map_err(|err| {
        log_event(Event::BootFailed, &[("code", err.code_str()), ("reason", err.message())]);
        err
    })
}
