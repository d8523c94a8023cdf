//! Metasearch gateway entry point

use anyhow::{bail, Result};
use metasearch_gateway::{
    config,
    engines::EngineLoader,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let Some(config_path) = parse_args()? else {
        return Ok(());
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting metasearch-gateway v{}", metasearch_gateway::VERSION);

    // Load configuration
    let settings = config::load(config_path.as_deref())?;
    info!(
        "Quality service at {} (timeout {}s)",
        settings.quality.url, settings.quality.timeout
    );

    // Load engines
    let registry = EngineLoader::load(&settings)?;

    // Create application state
    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );
    let state = AppState::new(settings, registry)?;

    // Create router
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Parse command line arguments.
///
/// Returns `None` when the process should exit after printing help or version.
fn parse_args() -> Result<Option<Option<PathBuf>>> {
    let mut config_path = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => bail!("{} requires a file argument", arg),
            },
            "-h" | "--help" => {
                print_usage();
                return Ok(None);
            }
            "-V" | "--version" => {
                println!("metasearch-gateway {}", metasearch_gateway::VERSION);
                return Ok(None);
            }
            other => bail!("unrecognized argument: {} (see --help)", other),
        }
    }

    Ok(Some(config_path))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
metasearch-gateway v{}
Meta-search aggregation gateway

USAGE:
    metasearch-gateway [OPTIONS]

OPTIONS:
    -c, --config <FILE>    Path to configuration file
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    GATEWAY_SETTINGS_PATH    Path to settings.yml
    GATEWAY_BIND_ADDRESS     Bind address
    GATEWAY_PORT             Server port
    GATEWAY_QUALITY_URL      Quality service endpoint
    GATEWAY_REQUEST_TIMEOUT  Whole-request timeout in seconds
    GATEWAY_QUALITY_TIMEOUT  Quality service timeout in seconds
    GATEWAY_DEFAULT_ENGINES  Comma-separated default engines
    GATEWAY_STATIC_DIR       Directory with the UI assets
    RUST_LOG                 Log filter (default: info)
"#,
        metasearch_gateway::VERSION
    );
}
