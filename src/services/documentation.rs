use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the feed server.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::feed::scores,
        crate::routes::feed::final_state,
        crate::routes::admin::add_points,
        crate::routes::admin::trigger_round,
        crate::routes::admin::start_final,
        crate::routes::admin::next_final,
        crate::routes::admin::reset_scores,
        crate::routes::admin::leaderboard,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::feed::ScoresResponse,
            crate::dto::feed::TeamScore,
            crate::dto::feed::FinalResponse,
            crate::dto::admin::AddPointsRequest,
            crate::dto::admin::ScoreUpdateResponse,
            crate::dto::admin::ActionResponse,
            crate::dto::admin::NextRevealResponse,
            crate::dto::admin::LeaderboardEntry,
            crate::dto::admin::LeaderboardResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "feed", description = "Polling endpoints read by the standings board"),
        (name = "admin", description = "Operator commands"),
    )
)]
pub struct ApiDoc;
