use crate::domain::{Booking, BookingId, Item, ItemId, User, UserId};
use crate::ports::*;
use std::sync::Arc;

use super::errors::{ApplicationError, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// ユースケースは純粋な関数として実装し、依存関係を引数で受け取る。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub users: Arc<dyn UserRepository>,
    pub items: Arc<dyn ItemRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub requests: Arc<dyn ItemRequestRepository>,
}

/// ユーザーを取得するヘルパー関数
///
/// # エラー
/// - UserNotFound: ユーザーが存在しない
pub(crate) async fn load_user(deps: &ServiceDependencies, user_id: UserId) -> Result<User> {
    deps.users
        .find_by_id(user_id)
        .await
        .map_err(ApplicationError::Repository)?
        .ok_or(ApplicationError::UserNotFound(user_id))
}

/// アイテムを取得するヘルパー関数
///
/// # エラー
/// - ItemNotFound: アイテムが存在しない
pub(crate) async fn load_item(deps: &ServiceDependencies, item_id: ItemId) -> Result<Item> {
    deps.items
        .find_by_id(item_id)
        .await
        .map_err(ApplicationError::Repository)?
        .ok_or(ApplicationError::ItemNotFound(item_id))
}

/// 予約を取得するヘルパー関数
///
/// # エラー
/// - BookingNotFound: 予約が存在しない
pub(crate) async fn load_booking(
    deps: &ServiceDependencies,
    booking_id: BookingId,
) -> Result<Booking> {
    deps.bookings
        .find_by_id(booking_id)
        .await
        .map_err(ApplicationError::Repository)?
        .ok_or(ApplicationError::BookingNotFound(booking_id))
}
