use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod categories;
pub mod images;
pub mod products;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: catalog routes under the configured
/// prefix, plus `/health` and the Swagger UI at `/docs`.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let prefix = state.catalog.api_prefix.clone();
    let api = Router::new()
        .nest("/category", categories::router())
        .nest("/product", products::router())
        .nest("/images", images::router(state.catalog.max_upload_bytes));

    let public = Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let app = if prefix.is_empty() { public.merge(api) } else { public.nest(&prefix, api) };

    app.with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and connection failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
