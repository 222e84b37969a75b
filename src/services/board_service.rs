//! Dispatch of feed observations to the board controllers.

use tokio::task::JoinHandle;
use tracing::debug;

use crate::{
    services::{race_service, reveal_service},
    state::{SharedBoard, standings::ScoreUpdate},
};

/// Something the pollers noticed on the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// Scores differ from the previous snapshot.
    ScoresChanged(Vec<ScoreUpdate>),
    /// The race flag went up.
    RaceTriggered,
    /// The final countdown was started.
    RevealStarted,
    /// The final feed requests disclosure of a rank.
    RevealRequested(usize),
}

/// Apply `event` to the board.
///
/// Returns the handle of a sequence spawned in response, if any.
pub async fn handle_event(state: &SharedBoard, event: BoardEvent) -> Option<JoinHandle<()>> {
    match event {
        BoardEvent::ScoresChanged(updates) => {
            let changed = state.standings().write().await.apply_scores(&updates);
            debug!(changed = changed.len(), "scores updated");
            for update in changed {
                state.scheduler().show_score(update.id, update.score);
            }
            None
        }
        BoardEvent::RaceTriggered => race_service::trigger_race(state).await,
        BoardEvent::RevealStarted => reveal_service::start_reveal(state).await,
        BoardEvent::RevealRequested(index) => {
            reveal_service::request_disclosure(state, index).await;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::{BoardConfig, RevealPolicy},
        state::{BoardState, race_machine::RacePhase, standings::EntryId},
        surface::recording::{RecordingSurface, SurfaceCall},
    };

    fn board(rows: usize) -> (Arc<RecordingSurface>, SharedBoard) {
        let surface = Arc::new(RecordingSurface::new(rows));
        let mut config = BoardConfig {
            team_count: rows,
            ..BoardConfig::default()
        };
        config.reveal.policy = RevealPolicy::ExternallyPaced;
        (surface.clone(), BoardState::new(config, surface))
    }

    #[tokio::test(start_paused = true)]
    async fn score_changes_refresh_labels_without_moving_rows() {
        let (surface, state) = board(3);

        let spawned = handle_event(
            &state,
            BoardEvent::ScoresChanged(vec![
                ScoreUpdate { id: EntryId(3), score: 12 },
                ScoreUpdate { id: EntryId(1), score: 0 },
            ]),
        )
        .await;

        assert!(spawned.is_none());
        assert_eq!(
            surface.calls(),
            vec![SurfaceCall::ScoreLabel { id: EntryId(3), score: 12 }]
        );
        assert_eq!(state.standings().read().await.visual_order()[0], EntryId(1));
    }

    #[tokio::test(start_paused = true)]
    async fn race_trigger_spawns_the_simulation() {
        let (_surface, state) = board(3);

        let handle = handle_event(&state, BoardEvent::RaceTriggered)
            .await
            .expect("race spawned");
        assert_eq!(state.race().read().await.phase(), RacePhase::Shuffling);
        handle.await.unwrap();
        assert_eq!(state.race().read().await.phase(), RacePhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn reveal_events_disclose_requested_ranks() {
        let (surface, state) = board(3);
        handle_event(
            &state,
            BoardEvent::ScoresChanged(vec![ScoreUpdate { id: EntryId(2), score: 5 }]),
        )
        .await;

        handle_event(&state, BoardEvent::RevealStarted).await;
        handle_event(&state, BoardEvent::RevealRequested(2)).await;
        handle_event(&state, BoardEvent::RevealRequested(0)).await;

        assert_eq!(surface.disclosed(), vec![EntryId(3), EntryId(2)]);
    }
}
