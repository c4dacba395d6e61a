use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::domain::{ItemId, ItemPatch, RequestId};

// ============================================================================
// Request bodies
// ============================================================================

/// ユーザー作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_not_blank("name", &self.name)?;
        require_email(&self.email)
    }
}

/// ユーザー更新リクエスト（部分更新）
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            require_not_blank("name", name)?;
        }
        if let Some(email) = &self.email {
            require_email(email)?;
        }
        Ok(())
    }
}

/// アイテム作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateItemBody {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<RequestId>,
}

impl CreateItemBody {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_not_blank("name", &self.name)?;
        require_not_blank("description", &self.description)
    }
}

/// アイテム更新リクエスト（部分更新）
#[derive(Debug, Deserialize)]
pub struct UpdateItemBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl From<UpdateItemBody> for ItemPatch {
    fn from(body: UpdateItemBody) -> Self {
        ItemPatch {
            name: body.name,
            description: body.description,
            available: body.available,
        }
    }
}

/// コメント投稿リクエスト
#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub text: String,
}

/// 予約作成リクエスト
#[derive(Debug, Deserialize)]
pub struct NewBookingBody {
    pub item_id: ItemId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// アイテムリクエスト作成
#[derive(Debug, Deserialize)]
pub struct NewItemRequestBody {
    pub description: String,
}

// ============================================================================
// Query parameters
// ============================================================================

/// 予約一覧の状態フィルタ（省略時は ALL）
#[derive(Debug, Deserialize)]
pub struct StateQuery {
    pub state: Option<String>,
}

/// 予約への回答
#[derive(Debug, Deserialize)]
pub struct ApprovedQuery {
    pub approved: bool,
}

/// アイテム検索
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
}

// ============================================================================
// Responses
// ============================================================================

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

pub(crate) fn require_not_blank(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::invalid_argument(format!("{field} must not be blank")));
    }
    Ok(())
}

fn require_email(email: &str) -> Result<(), ApiError> {
    require_not_blank("email", email)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ApiError::invalid_argument(format!(
            "{email} is not a valid email"
        ))),
    }
}
