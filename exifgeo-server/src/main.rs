//! # exifgeo server
//!
//! Serves `POST /upload`, which extracts the GPS position from an uploaded
//! JPEG. The `inspect` subcommand runs the same checks against a local file.

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exifgeo_core::extract_gps;
use exifgeo_server::{
    AppState, create_app,
    infra::config::{ConfigLoad, ConfigLoader, ConfigLoaderOptions},
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "exifgeo-server")]
#[command(about = "Extract GPS coordinates from uploaded JPEG images")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to a .env file (defaults to ./.env when present)
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the GPS position of a local JPEG as JSON
    Inspect {
        /// Image to inspect
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ConfigLoad {
        mut config,
        warnings,
    } = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: cli.serve.config.clone(),
        env_file: cli.serve.env_file.clone(),
    })
    .load()
    .context("failed to load configuration")?;

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = config.metadata.config_path.as_ref() {
        info!(path = %path.display(), "loaded configuration file");
    }
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    if let Some(Command::Inspect { file }) = cli.command {
        return inspect(&file, AppState::new(config));
    }

    if let Some(port) = cli.serve.port {
        config.server.port = port;
    }
    if let Some(host) = cli.serve.host {
        config.server.host = host;
    }

    let addr = config.server.bind_address();
    let state = AppState::new(config);
    info!(
        origin = %state.config().cors.allowed_origin,
        max_upload_bytes = state.policy().max_bytes(),
        extensions = ?state.policy().allowed_extensions(),
        "upload policy"
    );

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(address = %addr, "exifgeo server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// Validate and decode a local file the same way an upload is handled.
fn inspect(path: &Path, state: AppState) -> anyhow::Result<()> {
    let mut file = File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let filename = path.file_name().and_then(|name| name.to_str());

    let size = state.policy().validate_stream(filename, &mut file)?;
    let mut bytes = Vec::with_capacity(size as usize);
    file.read_to_end(&mut bytes)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let result = extract_gps(&bytes)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
