use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::feed::{FinalResponse, ScoresResponse},
    services::scoreboard_service,
    state::SharedScoreboard,
};

/// Polling endpoints read by the board clients.
pub fn router() -> Router<SharedScoreboard> {
    Router::new()
        .route("/api/scores", get(scores))
        .route("/api/final", get(final_state))
}

/// Current scores, round and race flag.
#[utoipa::path(
    get,
    path = "/api/scores",
    tag = "feed",
    responses((status = 200, description = "Current scoreboard", body = ScoresResponse))
)]
pub async fn scores(State(state): State<SharedScoreboard>) -> Json<ScoresResponse> {
    Json(scoreboard_service::scores_snapshot(&state).await)
}

/// Current step of the final countdown.
#[utoipa::path(
    get,
    path = "/api/final",
    tag = "feed",
    responses((status = 200, description = "Final countdown signal", body = FinalResponse))
)]
pub async fn final_state(State(state): State<SharedScoreboard>) -> Json<FinalResponse> {
    Json(scoreboard_service::final_snapshot(&state).await)
}
