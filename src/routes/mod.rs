use axum::Router;

use crate::state::SharedScoreboard;

/// Operator commands.
pub mod admin;
/// OpenAPI document and Swagger UI.
pub mod docs;
/// Polling endpoints.
pub mod feed;
/// Health check.
pub mod health;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedScoreboard) -> Router<()> {
    let api_router = health::router()
        .merge(feed::router())
        .merge(admin::router(state.clone()));

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
