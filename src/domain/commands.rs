use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, BookingState, ItemId, ItemPatch, RequestId, UserId, Viewpoint};

/// コマンド：予約を申し込む
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBooking {
    pub booker_id: UserId,
    pub item_id: ItemId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// コマンド：予約に回答する（承認・却下）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondToBooking {
    pub user_id: UserId,
    pub booking_id: BookingId,
    pub approved: bool,
}

/// クエリ：予約一覧
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBookings {
    pub user_id: UserId,
    pub state: BookingState,
    pub viewpoint: Viewpoint,
    pub now: DateTime<Utc>,
}

/// コマンド：ユーザー登録
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

/// コマンド：ユーザーの部分更新
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUser {
    pub user_id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// コマンド：アイテム登録
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItem {
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<RequestId>,
}

/// コマンド：アイテムの部分更新
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateItem {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub patch: ItemPatch,
}

/// コマンド：コメント投稿
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddComment {
    pub author_id: UserId,
    pub item_id: ItemId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// コマンド：アイテムリクエスト登録
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub requestor_id: UserId,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
