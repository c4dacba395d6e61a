use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{AppState, bookings, items, requests, users};

/// ShareItのAPIルーターを作成する
///
/// 操作ユーザーは `X-Sharer-User-Id` ヘッダーで渡す（/users と /requests/:id を除く）。
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Users
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        // Items
        .route("/items", post(items::create_item).get(items::list_own_items))
        .route("/items/search", get(items::search_items))
        .route(
            "/items/:id",
            get(items::get_item)
                .patch(items::update_item)
                .delete(items::delete_item),
        )
        .route("/items/:id/comment", post(items::add_comment))
        // Bookings
        .route(
            "/bookings",
            post(bookings::create_booking).get(bookings::list_booker_bookings),
        )
        .route("/bookings/owner", get(bookings::list_owner_bookings))
        .route(
            "/bookings/:id",
            get(bookings::get_booking).patch(bookings::respond_to_booking),
        )
        // Item requests
        .route(
            "/requests",
            post(requests::create_request).get(requests::list_own_requests),
        )
        .route("/requests/all", get(requests::list_all_requests))
        .route("/requests/:id", get(requests::get_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
