use crate::infrastructure::http::controllers::{cinemas, health};
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::observability;
use axum::{
    body::Body,
    routing::{get, post},
    Router,
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

const MAX_BODY_BYTES: usize = 16 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/cinemas", post(cinemas::create_cinema))
        .route("/cinemas/:id", get(cinemas::get_cinema))
        .route("/cinemas/:id/purchase", post(cinemas::purchase_seat))
        .route(
            "/cinemas/:id/purchase/consecutive",
            post(cinemas::purchase_consecutive),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(
            TraceLayer::new_for_http().make_span_with(observability::request_span::<Body>),
        )
        .with_state(state)
}
