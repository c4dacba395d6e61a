use crate::application::{user, views::UserView};
use crate::domain::{
    UserId,
    commands::{CreateUser, UpdateUser},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::AppState;
use crate::api::{
    error::ApiError,
    types::{CreateUserRequest, UpdateUserRequest},
};

/// POST /users - ユーザーを登録
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    req.validate()?;
    let cmd = CreateUser {
        name: req.name,
        email: req.email,
    };
    let view = user::create_user(&state.service_deps, cmd).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserView>>, ApiError> {
    Ok(Json(user::list_users(&state.service_deps).await?))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserView>, ApiError> {
    let view = user::get_user(&state.service_deps, UserId::new(user_id)).await?;
    Ok(Json(view))
}

/// PATCH /users/:id - 名前・メールアドレスの部分更新
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserView>, ApiError> {
    req.validate()?;
    let cmd = UpdateUser {
        user_id: UserId::new(user_id),
        name: req.name,
        email: req.email,
    };
    Ok(Json(user::update_user(&state.service_deps, cmd).await?))
}

/// DELETE /users/:id
///
/// 所有アイテム・予約・コメント・リクエストも削除される。
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    user::delete_user(&state.service_deps, UserId::new(user_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
