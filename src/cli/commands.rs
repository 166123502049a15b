//! CLI command implementations
//!
//! Boot order for both commands: config, logging, index client, seed
//! catalog. `serve` then hands the wired application to the HTTP server.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;

use crate::app::Storefront;
use crate::config::AppConfig;
use crate::http_server::HttpServer;
use crate::observability::init_logging;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::boot_failed(format!("cannot start runtime: {}", e)))?;
    runtime.block_on(run_command(cli.command))
}

/// Dispatch a parsed command
pub async fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config, seed } => serve(&config, seed).await,
        Command::Query {
            config,
            seed,
            prefix,
            limit,
            offset,
        } => {
            let stdout = std::io::stdout();
            query(&config, &seed, &prefix, limit, offset, &mut stdout.lock()).await
        }
    }
}

async fn boot(config: &AppConfig) -> CliResult<Storefront> {
    Storefront::new_in_memory(config)
        .await
        .map_err(|e| CliError::boot_failed(e.to_string()))
}

/// Serve HTTP until Ctrl-C, then close the index client.
pub async fn serve(config_path: &Path, seed: Option<PathBuf>) -> CliResult<()> {
    let mut config = AppConfig::load(config_path)?;
    if seed.is_some() {
        config.seed_path = seed;
    }
    init_logging(&config.log);

    let app = Arc::new(boot(&config).await?);
    if let Some(path) = &config.seed_path {
        app.seed_from(path).await?;
    }

    let watcher = app.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("shutdown requested");
                watcher.shutdown_token().cancel();
            }
            Err(e) => tracing::warn!(error = %e, "cannot listen for Ctrl-C"),
        }
    });

    let server = HttpServer::new(config.http.clone(), app.clone());
    let served = server.start().await;
    app.shutdown().await?;
    served?;
    Ok(())
}

/// Index `seed` and print one page of suggestions for `prefix` as JSON.
pub async fn query<W: Write>(
    config_path: &Path,
    seed: &Path,
    prefix: &str,
    limit: usize,
    offset: usize,
    out: &mut W,
) -> CliResult<()> {
    let config = AppConfig::load(config_path)?;
    init_logging(&config.log);

    let app = boot(&config).await?;
    app.seed_from(seed).await?;

    let result = app
        .autocomplete
        .suggest(prefix, limit, offset, &app.request_token())
        .await;
    app.shutdown().await?;
    let outcome = result?;

    let body = json!({
        "query": prefix,
        "items": outcome.suggestions,
        "source": outcome.source,
    });
    serde_json::to_writer_pretty(&mut *out, &body)?;
    writeln!(out)?;
    Ok(())
}
