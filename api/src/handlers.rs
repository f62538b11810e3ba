use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    Json,
};
use serde_json::{json, Value};
use wantbox_shared::{UserForm, WishlistItemForm};

use crate::{
    error::{ApiError, ApiResult},
    metrics,
    state::AppState,
    templates::{self, AddUserPage, EditItemPage, IndexPage},
    validation::ValidatedForm,
};

fn parse_item_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::bad_request("Invalid ID format"))
}

/// Writes always send the browser back to the list
fn back_to_list() -> Redirect {
    Redirect::to("/")
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let uptime = state.started_at.elapsed().as_secs();
    let now = chrono::Utc::now().to_rfc3339();

    let counts = match state.store.ping().await {
        Ok(()) => {
            let items = state
                .store
                .count_items()
                .await
                .map_err(|err| tracing::warn!(error = %err, "health check could not count items"))
                .ok();
            let users = state
                .store
                .count_users()
                .await
                .map_err(|err| tracing::warn!(error = %err, "health check could not count users"))
                .ok();
            Some((items, users))
        }
        Err(err) => {
            tracing::warn!(error = %err, uptime_secs = uptime, "health check degraded, db unreachable");
            None
        }
    };

    match counts {
        Some((items, users)) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": now,
                "uptime_secs": uptime,
                "items": items,
                "users": users,
            })),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": now,
                "uptime_secs": uptime,
            })),
        ),
    }
}

/// Wishlist overview with the add-item form
pub async fn list_wishlist(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let entries = state.store.list_items().await.map_err(|err| {
        ApiError::from_store("list wishlist items", "Failed to retrieve items", err)
    })?;

    let users = state
        .store
        .list_users()
        .await
        .map_err(|err| ApiError::from_store("list users", "Failed to retrieve users", err))?;

    templates::render(&state.templates, templates::INDEX, &IndexPage::new(entries, users))
}

pub async fn create_item(
    State(state): State<AppState>,
    ValidatedForm(item): ValidatedForm<WishlistItemForm>,
) -> ApiResult<Redirect> {
    let id = state.store.create_item(&item).await.map_err(|err| {
        ApiError::from_store("create wishlist item", "Failed to save item", err)
    })?;

    metrics::ITEMS_CREATED.inc();
    tracing::info!(id, user_id = item.user_id, "wishlist item added");
    Ok(back_to_list())
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Redirect> {
    let id = parse_item_id(&id)?;

    state.store.delete_item(id).await.map_err(|err| {
        ApiError::from_store("delete wishlist item", "Failed to delete item", err)
    })?;

    metrics::ITEMS_DELETED.inc();
    tracing::info!(id, "wishlist item deleted");
    Ok(back_to_list())
}

pub async fn edit_item_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let id = parse_item_id(&id)?;

    let item = state.store.get_item(id).await.map_err(|err| {
        ApiError::from_store("get wishlist item", "Failed to retrieve item", err)
    })?;

    let users = state
        .store
        .list_users()
        .await
        .map_err(|err| ApiError::from_store("list users", "Failed to retrieve users", err))?;

    templates::render(&state.templates, templates::EDIT_ITEM, &EditItemPage::new(item, users))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedForm(item): ValidatedForm<WishlistItemForm>,
) -> ApiResult<Redirect> {
    let id = parse_item_id(&id)?;

    state.store.update_item(id, &item).await.map_err(|err| {
        ApiError::from_store("update wishlist item", "Failed to update item", err)
    })?;

    metrics::ITEMS_UPDATED.inc();
    tracing::info!(id, "wishlist item updated");
    Ok(back_to_list())
}

pub async fn add_user_form(State(state): State<AppState>) -> ApiResult<Html<String>> {
    templates::render(&state.templates, templates::ADD_USER, &AddUserPage::default())
}

pub async fn create_user(
    State(state): State<AppState>,
    ValidatedForm(user): ValidatedForm<UserForm>,
) -> ApiResult<Redirect> {
    let id = state
        .store
        .create_user(&user)
        .await
        .map_err(|err| ApiError::from_store("create user", "Failed to add user", err))?;

    metrics::USERS_REGISTERED.inc();
    tracing::info!(id, "user registered");
    Ok(back_to_list())
}

pub async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
