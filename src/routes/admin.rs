use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::admin::{
        ActionResponse, AddPointsRequest, LeaderboardResponse, NextRevealResponse,
        ScoreUpdateResponse,
    },
    error::AppError,
    services::scoreboard_service,
    state::SharedScoreboard,
};

const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Operator commands driving the scoreboard.
pub fn router(state: SharedScoreboard) -> Router<SharedScoreboard> {
    Router::new()
        .route("/api/admin/points", post(add_points))
        .route("/api/admin/round", post(trigger_round))
        .route("/api/admin/final", post(start_final))
        .route("/api/admin/next", post(next_final))
        .route("/api/admin/reset", post(reset_scores))
        .route("/api/admin/leaderboard", get(leaderboard))
        .route_layer(middleware::from_fn_with_state(state, require_admin_token))
}

/// Add or remove points for a team.
#[utoipa::path(
    post,
    path = "/api/admin/points",
    tag = "admin",
    params(("X-Admin-Token" = Option<String>, Header, description = "Admin token, when one is configured")),
    request_body = AddPointsRequest,
    responses(
        (status = 200, description = "Score updated", body = ScoreUpdateResponse),
        (status = 404, description = "Unknown team")
    )
)]
pub async fn add_points(
    State(state): State<SharedScoreboard>,
    Json(payload): Json<AddPointsRequest>,
) -> Result<Json<ScoreUpdateResponse>, AppError> {
    payload.validate()?;
    let update = scoreboard_service::add_points(&state, &payload.team, payload.points).await?;
    Ok(Json(update))
}

/// Raise the race flag for the next round.
#[utoipa::path(
    post,
    path = "/api/admin/round",
    tag = "admin",
    params(("X-Admin-Token" = Option<String>, Header, description = "Admin token, when one is configured")),
    responses((status = 200, description = "Round started", body = ActionResponse))
)]
pub async fn trigger_round(State(state): State<SharedScoreboard>) -> Json<ActionResponse> {
    Json(scoreboard_service::trigger_round(&state).await)
}

/// Start the final countdown.
#[utoipa::path(
    post,
    path = "/api/admin/final",
    tag = "admin",
    params(("X-Admin-Token" = Option<String>, Header, description = "Admin token, when one is configured")),
    responses((status = 200, description = "Countdown started", body = ActionResponse))
)]
pub async fn start_final(State(state): State<SharedScoreboard>) -> Json<ActionResponse> {
    Json(scoreboard_service::start_final(&state).await)
}

/// Disclose the next rank of the countdown.
#[utoipa::path(
    post,
    path = "/api/admin/next",
    tag = "admin",
    params(("X-Admin-Token" = Option<String>, Header, description = "Admin token, when one is configured")),
    responses(
        (status = 200, description = "Rank disclosed", body = NextRevealResponse),
        (status = 409, description = "Countdown not started or already finished")
    )
)]
pub async fn next_final(
    State(state): State<SharedScoreboard>,
) -> Result<Json<NextRevealResponse>, AppError> {
    Ok(Json(scoreboard_service::next_final(&state).await?))
}

/// Zero every score.
#[utoipa::path(
    post,
    path = "/api/admin/reset",
    tag = "admin",
    params(("X-Admin-Token" = Option<String>, Header, description = "Admin token, when one is configured")),
    responses((status = 200, description = "Scores reset", body = ActionResponse))
)]
pub async fn reset_scores(State(state): State<SharedScoreboard>) -> Json<ActionResponse> {
    Json(scoreboard_service::reset_scores(&state).await)
}

/// Current leaderboard, best first.
#[utoipa::path(
    get,
    path = "/api/admin/leaderboard",
    tag = "admin",
    params(("X-Admin-Token" = Option<String>, Header, description = "Admin token, when one is configured")),
    responses((status = 200, description = "Leaderboard", body = LeaderboardResponse))
)]
pub async fn leaderboard(State(state): State<SharedScoreboard>) -> Json<LeaderboardResponse> {
    Json(scoreboard_service::leaderboard(&state).await)
}

async fn require_admin_token(
    State(state): State<SharedScoreboard>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.config().admin_token.as_deref() else {
        return Ok(next.run(req).await);
    };

    let provided = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::Unauthorized("missing admin token header `X-Admin-Token`".into())
        })?;

    if provided == expected {
        Ok(next.run(req).await)
    } else {
        Err(AppError::Unauthorized("invalid admin token".into()))
    }
}
