//! chatrelay entry point.
//!
//! Binary name: `chatrelay`
//!
//! Parses CLI arguments, loads `.env` and configuration, then either starts
//! the HTTP server or prints the resolved configuration.

mod cli;
mod http;
mod state;

use clap::Parser;

use chatrelay_infra::config::{load_dotenv, load_relay_config};
use chatrelay_observe::tracing_setup::{init_tracing, shutdown_tracing};
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads env-backed arguments.
    let dotenv = load_dotenv();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,chatrelay_api=debug,chatrelay_core=debug,chatrelay_infra=debug",
        _ => "trace",
    };
    init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    match &dotenv {
        Ok(Some(path)) => tracing::debug!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => tracing::warn!("Ignoring .env file: {e}"),
    }

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_relay_config(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Config => {
            cli::config::show_config(&config, cli.json)?;
        }

        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            if !static_dir.join("index.html").exists() {
                tracing::warn!(
                    path = %static_dir.display(),
                    "index.html not found; GET / will return 404"
                );
            }

            let state = AppState::init(config, static_dir)?;
            let router = http::router::build_router(state);

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} chatrelay listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("Server stopped");
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
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
                tracing::error!("Failed to install SIGTERM handler: {e}");
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
}
