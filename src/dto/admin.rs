//! DTO definitions used by the admin REST API and documentation layer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::validation::validate_team_name;

/// Request to add (or remove) points to a team.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddPointsRequest {
    /// Team name or one of its aliases.
    #[validate(custom(function = "validate_team_name"))]
    pub team: String,
    /// Points to add; negative values remove points.
    pub points: i64,
}

/// Result of a score adjustment, returning the updated tally.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreUpdateResponse {
    /// Canonical team name.
    pub team: String,
    /// Score before the adjustment.
    pub previous: i64,
    /// Score after the adjustment.
    pub score: i64,
}

/// Generic action acknowledgement used by admin endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl ActionResponse {
    /// Wrap an acknowledgement message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response describing the rank disclosed by a countdown step.
#[derive(Debug, Serialize, ToSchema)]
pub struct NextRevealResponse {
    /// 1-based place that was disclosed.
    pub position: usize,
    /// Team holding that place.
    pub team: String,
    /// Its score.
    pub score: i64,
    /// Whether the winner has now been disclosed.
    pub finished: bool,
}

/// One row of the leaderboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    /// 1-based place.
    pub position: usize,
    /// Team identifier, equal to its board row.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Current score.
    pub score: i64,
    /// Whether the team currently sits on the podium.
    pub podium: bool,
}

/// Current leaderboard, best first.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    /// Teams, best first; ties keep row order.
    pub teams: Vec<LeaderboardEntry>,
}
