//! Payloads of the two polling endpoints.
//!
//! Every field defaults when absent so a partial payload degrades to zeros
//! instead of failing the whole tick.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `final_index` value announcing the start of the countdown.
pub const FINAL_START: i64 = -2;
/// `final_index` value meaning no disclosure is requested.
pub const FINAL_IDLE: i64 = -1;

/// Response of `GET /api/scores`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoresResponse {
    /// Round currently announced.
    #[serde(default)]
    pub round: u32,
    /// Total number of rounds.
    #[serde(default)]
    pub max_rounds: u32,
    /// Whether the board should play the race simulation.
    #[serde(default)]
    pub trigger_round: bool,
    /// Scores, one per board row.
    #[serde(default)]
    pub teams: Vec<TeamScore>,
}

/// Score of one team as published on the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeamScore {
    /// 1-based identifier, equal to the board row drawing the team.
    #[serde(default)]
    pub id: i64,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Current score.
    #[serde(default)]
    pub score: i64,
}

/// Response of `GET /api/final`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FinalResponse {
    /// `-2` start the countdown, `-1` nothing requested, `0..N-1` disclose that rank.
    #[serde(default = "final_idle")]
    pub final_index: i64,
}

impl Default for FinalResponse {
    fn default() -> Self {
        Self {
            final_index: FINAL_IDLE,
        }
    }
}

fn final_idle() -> i64 {
    FINAL_IDLE
}
