//! Feed pollers: one cooperative task per endpoint, diffing consecutive
//! snapshots into [`BoardEvent`]s.

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::{
    dto::feed::{FINAL_IDLE, FINAL_START, FinalResponse, ScoresResponse},
    services::{
        board_service::{BoardEvent, handle_event},
        feed_client::ScoreFeed,
    },
    state::{
        SharedBoard,
        standings::{EntryId, ScoreUpdate},
    },
};

/// Remembers the last score snapshot and the state of the race flag.
#[derive(Debug, Default)]
pub struct ScoresWatcher {
    known: HashMap<EntryId, i64>,
    trigger_seen: bool,
}

impl ScoresWatcher {
    /// Watcher that has seen nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `snapshot` with the previous one.
    ///
    /// The race is only announced when the flag goes from lowered to raised.
    pub fn observe(&mut self, snapshot: &ScoresResponse) -> Vec<BoardEvent> {
        let mut updates = Vec::new();
        for team in &snapshot.teams {
            let Some(id) = u32::try_from(team.id).ok().filter(|id| *id > 0) else {
                warn!(id = team.id, "ignoring team with invalid id");
                continue;
            };
            let id = EntryId(id);
            if self.known.insert(id, team.score) != Some(team.score) {
                updates.push(ScoreUpdate {
                    id,
                    score: team.score,
                });
            }
        }

        let mut events = Vec::new();
        if !updates.is_empty() {
            events.push(BoardEvent::ScoresChanged(updates));
        }
        if snapshot.trigger_round && !self.trigger_seen {
            events.push(BoardEvent::RaceTriggered);
        }
        self.trigger_seen = snapshot.trigger_round;
        events
    }
}

/// Remembers the last `final_index` seen on the feed.
#[derive(Debug)]
pub struct FinalWatcher {
    last_index: i64,
}

impl Default for FinalWatcher {
    fn default() -> Self {
        Self {
            last_index: FINAL_IDLE,
        }
    }
}

impl FinalWatcher {
    /// Watcher expecting the idle signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a changed `final_index` into a countdown event.
    pub fn observe(&mut self, snapshot: &FinalResponse) -> Option<BoardEvent> {
        let index = snapshot.final_index;
        if index == self.last_index {
            return None;
        }
        self.last_index = index;

        match index {
            FINAL_START => Some(BoardEvent::RevealStarted),
            FINAL_IDLE => None,
            index => match usize::try_from(index) {
                Ok(index) => Some(BoardEvent::RevealRequested(index)),
                Err(_) => {
                    warn!(index, "ignoring unknown final index");
                    None
                }
            },
        }
    }
}

/// Poll the score feed forever, feeding every observed change to the board.
pub async fn run_scores_poller(state: SharedBoard, feed: Arc<dyn ScoreFeed>) {
    let period = state.config().feed.scores_poll_interval;
    info!(?period, "polling scores");

    let mut watcher = ScoresWatcher::new();
    let mut ticker = ticker(period);
    loop {
        ticker.tick().await;
        match feed.fetch_scores().await {
            Ok(snapshot) => {
                for event in watcher.observe(&snapshot) {
                    debug!(?event, "scores feed event");
                    handle_event(&state, event).await;
                }
            }
            Err(err) => warn!(error = %err, "score poll failed; retrying next tick"),
        }
    }
}

/// Poll the final feed forever, driving the countdown.
pub async fn run_final_poller(state: SharedBoard, feed: Arc<dyn ScoreFeed>) {
    let period = state.config().feed.final_poll_interval;
    info!(?period, "polling final countdown");

    let mut watcher = FinalWatcher::new();
    let mut ticker = ticker(period);
    loop {
        ticker.tick().await;
        match feed.fetch_final().await {
            Ok(snapshot) => {
                if let Some(event) = watcher.observe(&snapshot) {
                    debug!(?event, "final feed event");
                    handle_event(&state, event).await;
                }
            }
            Err(err) => warn!(error = %err, "final poll failed; retrying next tick"),
        }
    }
}

fn ticker(period: Duration) -> tokio::time::Interval {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
