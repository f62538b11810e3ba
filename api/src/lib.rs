pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod metrics_handler;
pub mod observability;
pub mod routes;
pub mod state;
pub mod templates;
pub mod validation;

use axum::extract::MatchedPath;
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router with logging and metrics layers
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::wishlist_routes())
        .merge(routes::user_routes())
        .merge(routes::health_routes())
        .merge(routes::observability_routes())
        .fallback(handlers::route_not_found)
        .layer(middleware::from_fn(request_logger))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn request_logger(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    // route template, not the raw URI, keeps label cardinality bounded
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let start = std::time::Instant::now();

    let response = next.run(req).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16();

    metrics::observe_http(method.as_str(), &path, status, elapsed.as_secs_f64());
    tracing::info!("{method} {uri} {status} {}ms", elapsed.as_millis());

    response
}
