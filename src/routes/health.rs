use axum::{Json, Router, routing::get};

use crate::{dto::health::HealthResponse, state::SharedScoreboard};

#[utoipa::path(
    get,
    path = "/healthcheck",
    tag = "health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
/// Return the current health status of the feed server.
pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Configure the health routes subtree.
pub fn router() -> Router<SharedScoreboard> {
    Router::<SharedScoreboard>::new().route("/healthcheck", get(healthcheck))
}
