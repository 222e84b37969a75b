use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedScoreboard};

/// Serve the Swagger UI backed by the generated OpenAPI document.
pub fn router(state: SharedScoreboard) -> Router<SharedScoreboard> {
    let ui: Router<SharedScoreboard> = SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", ApiDoc::openapi())
        .into();

    ui.with_state(state)
}
