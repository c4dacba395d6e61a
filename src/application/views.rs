use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Booking, BookingId, BookingStatus, Comment, CommentId, Item, ItemId, ItemRequest, RequestId,
    User, UserId,
};

/// ユーザーの表示用ビュー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// 予約ビューに埋め込むアイテム情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedItemView {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: UserId,
}

impl From<&Item> for BookedItemView {
    fn from(item: &Item) -> Self {
        Self {
            id: item.item_id,
            name: item.name.clone(),
            description: item.description.clone(),
            available: item.available,
            owner_id: item.owner_id,
        }
    }
}

/// 予約の読み取り専用ビュー（予約サマリー）
///
/// コアの外に公開される予約の唯一の形。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingView {
    pub id: BookingId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub booker: UserView,
    pub item: BookedItemView,
    pub status: BookingStatus,
}

impl From<&Booking> for BookingView {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.booking_id,
            start: booking.start(),
            end: booking.end(),
            booker: UserView::from(&booking.booker),
            item: BookedItemView::from(&booking.item),
            status: booking.status,
        }
    }
}

/// コメントのビュー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: CommentId,
    pub text: String,
    pub item_id: ItemId,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.comment_id,
            text: comment.text.clone(),
            item_id: comment.item_id,
            author_name: comment.author_name.clone(),
            created: comment.created_at,
        }
    }
}

/// アイテム詳細のビュー
///
/// `last_booking` / `next_booking` は所有者が閲覧した場合のみ埋まる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: UserId,
    pub request_id: Option<RequestId>,
    pub comments: Vec<CommentView>,
    pub last_booking: Option<BookingView>,
    pub next_booking: Option<BookingView>,
}

impl ItemView {
    /// 予約情報なしのビュー
    pub fn without_bookings(item: &Item, comments: &[Comment]) -> Self {
        Self {
            id: item.item_id,
            name: item.name.clone(),
            description: item.description.clone(),
            available: item.available,
            owner_id: item.owner_id,
            request_id: item.request_id,
            comments: comments.iter().map(CommentView::from).collect(),
            last_booking: None,
            next_booking: None,
        }
    }
}

/// リクエストに応えたアイテム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedItemView {
    pub id: ItemId,
    pub name: String,
    pub owner_id: UserId,
}

impl From<&Item> for RequestedItemView {
    fn from(item: &Item) -> Self {
        Self {
            id: item.item_id,
            name: item.name.clone(),
            owner_id: item.owner_id,
        }
    }
}

/// アイテムリクエストのビュー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequestView {
    pub id: RequestId,
    pub description: String,
    pub requestor_id: UserId,
    pub created: DateTime<Utc>,
    pub items: Vec<RequestedItemView>,
}

impl ItemRequestView {
    pub fn new(request: &ItemRequest, items: &[Item]) -> Self {
        Self {
            id: request.request_id,
            description: request.description.clone(),
            requestor_id: request.requestor_id,
            created: request.created_at,
            items: items.iter().map(RequestedItemView::from).collect(),
        }
    }
}
