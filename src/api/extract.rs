use crate::domain::UserId;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::error::ApiError;

/// 操作ユーザーIDを運ぶヘッダー
pub const SHARER_USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// `X-Sharer-User-Id` ヘッダーから取り出した操作ユーザー
#[derive(Debug, Clone, Copy)]
pub struct SharerUserId(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for SharerUserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SHARER_USER_ID_HEADER)
            .ok_or_else(|| {
                ApiError::invalid_argument(format!("Missing {SHARER_USER_ID_HEADER} header"))
            })?;

        let id = value
            .to_str()
            .ok()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .ok_or_else(|| {
                ApiError::invalid_argument(format!("Invalid {SHARER_USER_ID_HEADER} header"))
            })?;

        Ok(SharerUserId(UserId::new(id)))
    }
}
