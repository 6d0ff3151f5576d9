use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use guessr_api::config::ServerConfig;
use guessr_api::router::build_app_router;
use guessr_api::{background, state};
use guessr_core::clock::SystemClock;
use guessr_game::DailyGame;
use guessr_provider::{ApiFootballSource, HttpImageSource};
use guessr_store::{CacheStore, NameStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "guessr_api=debug,guessr_game=debug,guessr_provider=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        leagues = ?config.provider.leagues,
        season = %config.provider.season,
        "Loaded server configuration"
    );

    // --- Upstreams ---
    let client = guessr_provider::build_client(config.provider.timeout)
        .expect("Failed to build HTTP client");
    let players = ApiFootballSource::new(client.clone(), config.provider.clone());
    let images = HttpImageSource::new(client);

    // --- Game ---
    let game = Arc::new(DailyGame::new(
        Arc::new(SystemClock),
        Arc::new(players),
        Arc::new(images),
        CacheStore::new(&config.cache_file),
        NameStore::new(&config.player_names_file),
    ));

    // Warm up today's player so the first request does not pay for it.
    let warm = Arc::clone(&game);
    tokio::spawn(async move {
        match warm.daily_player().await {
            Some(daily) => {
                tracing::info!(date = %daily.day, player_id = daily.player.player.id, "Today's game ready");
            }
            None => tracing::warn!("No game available at startup"),
        }
    });

    // --- Daily reset ---
    let reset_cancel = tokio_util::sync::CancellationToken::new();
    let reset_handle = tokio::spawn(background::daily_reset::run(
        Arc::clone(&game),
        Duration::from_secs(config.daily_check_interval_secs),
        reset_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState { game };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    reset_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), reset_handle).await;
    tracing::info!("Daily reset task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
