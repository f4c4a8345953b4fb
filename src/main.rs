//! Player Sync - a local/remote player registry
//!
//! Serves the registry over HTTP while a background loop keeps the local
//! store mirrored from the remote one.

use std::net::SocketAddr;

use anyhow::Context;
use chrono::NaiveDate;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use player_sync::api::create_router;
use player_sync::models::{Hand, Player};
use player_sync::repository::InMemoryRepository;
use player_sync::{AppState, Config, JsonStorage, Subscription};

/// Main entry point for the registry server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the service around a local store and a seeded remote store
/// 4. Import the configured data file, if any
/// 5. Start the notification logger and, if configured, auto refresh
/// 6. Serve the Axum router on the configured port
/// 7. On SIGINT/SIGTERM export the data file, stop auto refresh and close
///    notifications
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "player_sync=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Player Sync");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_capacity={}, refresh_interval={}ms, auto_refresh={}, port={}",
        config.cache_capacity, config.refresh_interval_ms, config.auto_refresh, config.server_port
    );

    let local = InMemoryRepository::new("local");
    let remote = InMemoryRepository::with_players("remote", seed_players()?);
    let state = AppState::from_config(&config, local, remote)
        .context("failed to build player service")?;

    tokio::spawn(log_notifications(state.service.subscribe()));

    if let Some(path) = &config.data_file {
        match state.service.import_data(&JsonStorage, path).await {
            Ok(count) => info!("Imported {} players from {}", count, path.display()),
            Err(e) => warn!("Skipping import of {}: {}", path.display(), e),
        }
    }

    if config.auto_refresh {
        state.service.enable_auto_refresh();
    }

    let service = state.service.clone();
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(path) = &config.data_file {
        service
            .export_data(&JsonStorage, path, false)
            .await
            .with_context(|| format!("failed to export {}", path.display()))?;
    }
    service.shutdown();
    info!("Server shutdown complete");
    Ok(())
}

/// Logs every published notification until the channel is stopped.
async fn log_notifications(mut subscription: Subscription<Player>) {
    while let Some(notification) = subscription.recv().await {
        info!(
            kind = ?notification.kind,
            at = %notification.timestamp.to_rfc3339(),
            "{}",
            notification.message
        );
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}

fn seed_players() -> anyhow::Result<Vec<Player>> {
    let seed = [
        ("Rafael Nadal", "Spain", 185, 85, 6490, Hand::Left, (1986, 6, 3)),
        ("Roger Federer", "Switzerland", 185, 85, 3160, Hand::Right, (1981, 8, 8)),
        ("Novak Djokovic", "Serbia", 188, 77, 11000, Hand::Right, (1987, 5, 22)),
        ("Dominic Thiem", "Austria", 185, 82, 4950, Hand::Right, (1993, 9, 3)),
        ("Andy Murray", "United Kingdom", 190, 84, 2490, Hand::Right, (1987, 5, 15)),
    ];

    seed.into_iter()
        .map(|(name, country, height, weight, points, hand, (y, m, d))| -> anyhow::Result<Player> {
            let birth = NaiveDate::from_ymd_opt(y, m, d)
                .with_context(|| format!("invalid birth date for {}", name))?;
            Ok(Player::new(name, country, height, weight, points, hand, birth))
        })
        .collect()
}
