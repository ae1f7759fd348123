//! Playlist catalog CLI and REST API entry point.
//!
//! Binary name: `playlist`
//!
//! Parses CLI arguments, initializes database and services, then dispatches
//! to the appropriate command handler or starts the REST API server.

use clap::Parser;
use clap_complete::generate;

use playlist_api::cli::{self, Cli, Commands, CreateResource, DeleteResource, ListResource};
use playlist_api::http;
use playlist_api::state::AppState;
use playlist_observe::tracing_setup::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_filter(), cli.otel).map_err(|e| anyhow::anyhow!(e))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "playlist", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (config, DB, service)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Create { resource } => match resource {
            CreateResource::Song(args) => {
                cli::song::create_song(&state, args, cli.json).await?;
            }
        },

        Commands::List { resource } => match resource {
            ListResource::Songs {
                category,
                artist,
                melody_type,
            } => {
                cli::song::list_songs(&state, category, artist, melody_type, cli.json).await?;
            }
        },

        Commands::Show { id, melody } => {
            cli::song::show_song(&state, id, melody, cli.json).await?;
        }

        Commands::Delete { resource } => match resource {
            DeleteResource::Song { id, force } => {
                cli::song::delete_song(&state, id, force, cli.json).await?;
            }
        },

        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, "catalog API listening");
            if !cli.quiet {
                println!(
                    "  {} Playlist API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}/api/songs")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl+C: {e}");
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
                tracing::warn!("failed to install SIGTERM handler: {e}");
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
