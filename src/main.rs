//! Standings board entrypoint wiring the feed pollers to the animation engine.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use standings_board::{
    config::AppConfig,
    services::{
        feed_client::{HttpScoreFeed, ScoreFeed},
        poller::{run_final_poller, run_scores_poller},
    },
    state::BoardState,
    surface::TracingSurface,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load().board;
    let feed: Arc<dyn ScoreFeed> =
        Arc::new(HttpScoreFeed::new(&config.feed).context("building feed client")?);
    let surface = Arc::new(TracingSurface::new(config.team_count));

    info!(feed = %config.feed.base_url, teams = config.team_count, "starting standings board");
    let state = BoardState::new(config, surface);

    let scores = tokio::spawn(run_scores_poller(state.clone(), feed.clone()));
    let finals = tokio::spawn(run_final_poller(state, feed));

    shutdown_signal().await;
    info!("shutting down");
    scores.abort();
    finals.abort();

    Ok(())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
