mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use logic::{ConnectionStatus, MonitoringService};
use models::Coordinates;
use server::{create_router, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        None => serve(Config::load_or_default(cli.config)?, None).await,
        Some(Commands::Serve { port }) => serve(Config::load_or_default(cli.config)?, port).await,
        Some(Commands::Assess { lat, lng }) => {
            let coords = Coordinates::parse(Some(lat.as_str()), Some(lng.as_str()))?;
            let config = Config::load_or_default(cli.config)?;
            let service = MonitoringService::from_config(&config)?;
            let report = service.report(coords).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Some(Commands::Check) => check(cli.config).await,
        Some(Commands::Init) => {
            let (_, path) = Config::setup_interactive()?;
            println!();
            println!("Configuration written to {}", path.display());
            Ok(())
        }
    }
}

async fn serve(mut config: Config, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    let service = MonitoringService::from_config(&config)?;
    let app = create_router(AppState::new(service));

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Habitat listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn check(config_override: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let config = match Config::load(config_override) {
        Ok(config) => {
            println!("Configuration: OK");
            config
        }
        Err(e) => {
            println!("Configuration: {}", e);
            std::process::exit(1);
        }
    };
    println!("  Server: {}", config.server.bind_address());
    println!("  Upstream timeout: {}s", config.upstream.timeout_secs);

    let service = MonitoringService::from_config(&config)?;
    let status = service.check_connections().await;
    print_connection_status(&status);

    if !status.all_reachable() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_connection_status(status: &ConnectionStatus) {
    let describe = |state: Option<bool>| match state {
        Some(true) => "OK",
        Some(false) => "OFFLINE",
        None => "not configured (fallback)",
    };

    println!("  OpenWeatherMap: {}", describe(status.openweathermap));
    println!("  ISRIC SoilGrids: {}", describe(status.soilgrids));
    println!("  Global Forest Watch: {}", describe(status.globalforestwatch));
    println!("  Satellite indices: synthetic");

    if !status.any_configured() {
        println!();
        println!("No upstreams configured - every report will use fallback values.");
    }
}
