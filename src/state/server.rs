use std::sync::Arc;

use tokio::{
    sync::{Mutex, RwLock},
    task::JoinHandle,
};

use crate::{config::FeedServerConfig, state::scoreboard::Scoreboard};

/// Shared handle on the feed server state.
pub type SharedScoreboard = Arc<ScoreboardState>;

/// State of the feed server: the scoreboard and the timer lowering the race flag.
pub struct ScoreboardState {
    config: FeedServerConfig,
    scoreboard: RwLock<Scoreboard>,
    round_reset: Mutex<Option<JoinHandle<()>>>,
}

impl ScoreboardState {
    /// Construct a new [`ScoreboardState`] wrapped in an [`Arc`].
    pub fn new(config: FeedServerConfig) -> SharedScoreboard {
        let scoreboard = Scoreboard::new(&config.teams, config.max_rounds);
        Arc::new(Self {
            config,
            scoreboard: RwLock::new(scoreboard),
            round_reset: Mutex::new(None),
        })
    }

    /// Runtime configuration of the server.
    pub fn config(&self) -> &FeedServerConfig {
        &self.config
    }

    /// Teams, scores and trigger flags.
    pub fn scoreboard(&self) -> &RwLock<Scoreboard> {
        &self.scoreboard
    }

    /// Replace the pending race-flag reset, aborting the previous one.
    pub async fn replace_round_reset(&self, handle: JoinHandle<()>) {
        let mut guard = self.round_reset.lock().await;
        if let Some(previous) = guard.replace(handle) {
            previous.abort();
        }
    }
}
