use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, metrics_handler, state::AppState};

pub fn observability_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics_handler::metrics_endpoint))
}

pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_wishlist))
        .route("/wishlist", post(handlers::create_item))
        .route("/wishlist/:id/delete", post(handlers::delete_item))
        .route(
            "/wishlist/:id/edit",
            get(handlers::edit_item_form).post(handlers::update_item),
        )
}

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/user", get(handlers::add_user_form).post(handlers::create_user))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health_check))
}
