use crate::application::{
    item,
    views::{CommentView, ItemView},
};
use crate::domain::{
    ItemId,
    commands::{AddComment, CreateItem, UpdateItem},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;

use super::AppState;
use crate::api::{
    error::ApiError,
    extract::SharerUserId,
    types::{CommentBody, CreateItemBody, SearchQuery, UpdateItemBody, require_not_blank},
};

/// POST /items - アイテムを登録
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    SharerUserId(owner_id): SharerUserId,
    Json(req): Json<CreateItemBody>,
) -> Result<(StatusCode, Json<ItemView>), ApiError> {
    req.validate()?;
    let cmd = CreateItem {
        owner_id,
        name: req.name,
        description: req.description,
        available: req.available,
        request_id: req.request_id,
    };
    let view = item::create_item(&state.service_deps, cmd).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /items - 自分のアイテム一覧（直前・直後の予約付き）
pub async fn list_own_items(
    State(state): State<Arc<AppState>>,
    SharerUserId(owner_id): SharerUserId,
) -> Result<Json<Vec<ItemView>>, ApiError> {
    let views = item::list_owner_items(&state.service_deps, owner_id, Utc::now()).await?;
    Ok(Json(views))
}

/// GET /items/search?text= - 貸出可能なアイテムを検索
pub async fn search_items(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ItemView>>, ApiError> {
    Ok(Json(
        item::search_items(&state.service_deps, &query.text).await?,
    ))
}

/// GET /items/:id
///
/// 所有者が閲覧した場合のみ直前・直後の予約を含む。
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    SharerUserId(viewer_id): SharerUserId,
    Path(item_id): Path<i64>,
) -> Result<Json<ItemView>, ApiError> {
    let view = item::get_item(
        &state.service_deps,
        viewer_id,
        ItemId::new(item_id),
        Utc::now(),
    )
    .await?;
    Ok(Json(view))
}

/// PATCH /items/:id - 所有者のみ
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    SharerUserId(user_id): SharerUserId,
    Path(item_id): Path<i64>,
    Json(req): Json<UpdateItemBody>,
) -> Result<Json<ItemView>, ApiError> {
    let cmd = UpdateItem {
        user_id,
        item_id: ItemId::new(item_id),
        patch: req.into(),
    };
    Ok(Json(item::update_item(&state.service_deps, cmd).await?))
}

/// DELETE /items/:id - 所有者のみ
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    SharerUserId(user_id): SharerUserId,
    Path(item_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    item::delete_item(&state.service_deps, user_id, ItemId::new(item_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /items/:id/comment
///
/// 完了した承認済み予約を持つユーザーのみ投稿できる。
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    SharerUserId(author_id): SharerUserId,
    Path(item_id): Path<i64>,
    Json(req): Json<CommentBody>,
) -> Result<(StatusCode, Json<CommentView>), ApiError> {
    require_not_blank("text", &req.text)?;
    let cmd = AddComment {
        author_id,
        item_id: ItemId::new(item_id),
        text: req.text,
        created_at: Utc::now(),
    };
    let view = item::add_comment(&state.service_deps, cmd).await?;
    Ok((StatusCode::CREATED, Json(view)))
}
