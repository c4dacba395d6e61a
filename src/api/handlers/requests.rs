use crate::application::{request, views::ItemRequestView};
use crate::domain::{RequestId, commands::CreateItemRequest};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;

use super::AppState;
use crate::api::{
    error::ApiError,
    extract::SharerUserId,
    types::{NewItemRequestBody, require_not_blank},
};

/// POST /requests - 借りたい物を募集する
pub async fn create_request(
    State(state): State<Arc<AppState>>,
    SharerUserId(requestor_id): SharerUserId,
    Json(req): Json<NewItemRequestBody>,
) -> Result<(StatusCode, Json<ItemRequestView>), ApiError> {
    require_not_blank("description", &req.description)?;
    let cmd = CreateItemRequest {
        requestor_id,
        description: req.description,
        created_at: Utc::now(),
    };
    let view = request::create_request(&state.service_deps, cmd).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /requests - 自分のリクエスト（新しい順）
pub async fn list_own_requests(
    State(state): State<Arc<AppState>>,
    SharerUserId(requestor_id): SharerUserId,
) -> Result<Json<Vec<ItemRequestView>>, ApiError> {
    Ok(Json(
        request::list_own_requests(&state.service_deps, requestor_id).await?,
    ))
}

/// GET /requests/all - 全てのリクエスト（新しい順）
pub async fn list_all_requests(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ItemRequestView>>, ApiError> {
    Ok(Json(request::list_all_requests(&state.service_deps).await?))
}

/// GET /requests/:id
pub async fn get_request(
    State(state): State<Arc<AppState>>,
    Path(request_id): Path<i64>,
) -> Result<Json<ItemRequestView>, ApiError> {
    let view = request::get_request(&state.service_deps, RequestId::new(request_id)).await?;
    Ok(Json(view))
}
