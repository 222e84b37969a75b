//! Operator commands and feed snapshots of the scoreboard server.

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dto::{
        admin::{
            ActionResponse, LeaderboardEntry, LeaderboardResponse, NextRevealResponse,
            ScoreUpdateResponse,
        },
        feed::{FinalResponse, ScoresResponse, TeamScore},
    },
    error::ServiceError,
    state::{SharedScoreboard, scoreboard::PointsError},
};

const PODIUM_SIZE: usize = 3;

/// Snapshot served on the score feed.
pub async fn scores_snapshot(state: &SharedScoreboard) -> ScoresResponse {
    let board = state.scoreboard().read().await;
    ScoresResponse {
        round: board.round(),
        max_rounds: board.max_rounds(),
        trigger_round: board.trigger_round(),
        teams: board
            .teams()
            .iter()
            .map(|team| TeamScore {
                id: i64::from(team.id),
                name: team.name.clone(),
                score: team.score,
            })
            .collect(),
    }
}

/// Snapshot served on the final feed.
pub async fn final_snapshot(state: &SharedScoreboard) -> FinalResponse {
    FinalResponse {
        final_index: state.scoreboard().read().await.final_index(),
    }
}

/// Add `points` to the team answering to `team`.
pub async fn add_points(
    state: &SharedScoreboard,
    team: &str,
    points: i64,
) -> Result<ScoreUpdateResponse, ServiceError> {
    let mut board = state.scoreboard().write().await;
    let (previous, score) = match board.add_points(team, points) {
        Ok(scores) => scores,
        Err(PointsError::UnknownTeam) => {
            let known: Vec<&str> = board.teams().iter().map(|team| team.name.as_str()).collect();
            return Err(ServiceError::NotFound(format!(
                "unknown team `{team}`; expected one of: {}",
                known.join(", ")
            )));
        }
        Err(err @ PointsError::Overflow { .. }) => {
            warn!(team, points, error = %err, "score adjustment refused");
            return Err(ServiceError::InvalidInput(err.to_string()));
        }
    };

    let name = board
        .find_team(team)
        .map(|team| team.name.clone())
        .unwrap_or_else(|| team.to_string());
    info!(team = %name, points, score, "points added");

    Ok(ScoreUpdateResponse {
        team: name,
        previous,
        score,
    })
}

/// Zero every score.
pub async fn reset_scores(state: &SharedScoreboard) -> ActionResponse {
    state.scoreboard().write().await.reset_scores();
    info!("scores reset");
    ActionResponse::new("scores reset")
}

/// Raise the race flag and schedule it to drop again.
pub async fn trigger_round(state: &SharedScoreboard) -> ActionResponse {
    let round = state.scoreboard().write().await.raise_round_flag();
    let delay = state.config().round_flag_reset;
    info!(round, ?delay, "round triggered");

    let reset_state = state.clone();
    let handle = tokio::spawn(async move {
        sleep(delay).await;
        reset_state.scoreboard().write().await.lower_round_flag();
        info!("round flag lowered");
    });
    state.replace_round_reset(handle).await;

    ActionResponse::new(format!("round {round} started"))
}

/// Start (or restart) the final countdown.
pub async fn start_final(state: &SharedScoreboard) -> ActionResponse {
    state.scoreboard().write().await.start_final();
    info!("final countdown started");
    ActionResponse::new("final countdown started")
}

/// Disclose the next rank of the countdown.
pub async fn next_final(state: &SharedScoreboard) -> Result<NextRevealResponse, ServiceError> {
    let step = state
        .scoreboard()
        .write()
        .await
        .next_final()
        .map_err(|err| {
            warn!(error = %err, "cannot advance final countdown");
            ServiceError::from(err)
        })?;

    info!(position = step.index + 1, team = %step.team.name, "rank disclosed");
    Ok(NextRevealResponse {
        position: step.index + 1,
        team: step.team.name,
        score: step.team.score,
        finished: step.finished,
    })
}

/// Current leaderboard, best first.
pub async fn leaderboard(state: &SharedScoreboard) -> LeaderboardResponse {
    let board = state.scoreboard().read().await;
    let teams = board
        .ranked()
        .into_iter()
        .enumerate()
        .map(|(index, team)| LeaderboardEntry {
            position: index + 1,
            id: team.id,
            name: team.name.clone(),
            score: team.score,
            podium: index < PODIUM_SIZE,
        })
        .collect();

    LeaderboardResponse { teams }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        config::{FeedServerConfig, TeamDefinition},
        state::ScoreboardState,
    };

    fn server() -> SharedScoreboard {
        ScoreboardState::new(FeedServerConfig {
            teams: vec![
                TeamDefinition::new("WILLIAMS", &["вилл"]),
                TeamDefinition::new("MERCEDES", &["мерс"]),
                TeamDefinition::new("FERRARI", &[]),
                TeamDefinition::new("HAAS", &[]),
            ],
            ..FeedServerConfig::default()
        })
    }

    #[tokio::test]
    async fn unknown_team_lists_the_valid_names() {
        let state = server();
        let err = add_points(&state, "lada", 3).await.unwrap_err();
        match err {
            ServiceError::NotFound(message) => {
                assert!(message.contains("WILLIAMS, MERCEDES, FERRARI, HAAS"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn points_show_up_on_the_feed() {
        let state = server();
        let update = add_points(&state, "мерс", 7).await.unwrap();
        assert_eq!((update.team.as_str(), update.previous, update.score), ("MERCEDES", 0, 7));

        let snapshot = scores_snapshot(&state).await;
        assert_eq!(snapshot.teams[1].score, 7);
        assert_eq!(snapshot.teams[1].id, 2);

        reset_scores(&state).await;
        assert!(scores_snapshot(&state).await.teams.iter().all(|team| team.score == 0));
    }

    #[tokio::test]
    async fn overflowing_points_are_invalid_input() {
        let state = server();
        add_points(&state, "haas", i64::MAX).await.unwrap();

        let err = add_points(&state, "haas", 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert_eq!(scores_snapshot(&state).await.teams[3].score, i64::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn round_flag_drops_after_the_reset_delay() {
        let state = server();
        trigger_round(&state).await;
        assert!(scores_snapshot(&state).await.trigger_round);

        sleep(Duration::from_millis(3_000)).await;
        // A second trigger postpones the reset.
        trigger_round(&state).await;
        sleep(Duration::from_millis(3_000)).await;
        assert!(scores_snapshot(&state).await.trigger_round);

        sleep(Duration::from_millis(2_100)).await;
        let snapshot = scores_snapshot(&state).await;
        assert!(!snapshot.trigger_round);
        assert_eq!(snapshot.round, 3);
    }

    #[tokio::test]
    async fn countdown_publishes_the_disclosed_rank() {
        let state = server();
        add_points(&state, "ferrari", 9).await.unwrap();
        add_points(&state, "williams", 4).await.unwrap();

        assert!(matches!(
            next_final(&state).await,
            Err(ServiceError::InvalidState(_))
        ));

        start_final(&state).await;
        assert_eq!(final_snapshot(&state).await.final_index, -2);

        let fourth = next_final(&state).await.unwrap();
        assert_eq!((fourth.position, fourth.team.as_str()), (4, "HAAS"));
        assert_eq!(final_snapshot(&state).await.final_index, 3);

        next_final(&state).await.unwrap();
        next_final(&state).await.unwrap();
        let winner = next_final(&state).await.unwrap();
        assert_eq!((winner.position, winner.team.as_str()), (1, "FERRARI"));
        assert!(winner.finished);
        assert_eq!(final_snapshot(&state).await.final_index, 0);

        assert!(matches!(
            next_final(&state).await,
            Err(ServiceError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn leaderboard_flags_the_podium() {
        let state = server();
        add_points(&state, "haas", 2).await.unwrap();

        let board = leaderboard(&state).await;
        let names: Vec<&str> = board.teams.iter().map(|team| team.name.as_str()).collect();
        assert_eq!(names, vec!["HAAS", "WILLIAMS", "MERCEDES", "FERRARI"]);
        assert_eq!(
            board.teams.iter().filter(|team| team.podium).count(),
            3
        );
        assert!(!board.teams[3].podium);
    }
}
