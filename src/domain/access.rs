use super::{Booking, UserId};

/// 予約を閲覧できるか（借り手またはアイテムの所有者）
///
/// ユーザーと予約の解決は呼び出し前に済んでいること。
pub fn can_access_booking(user_id: UserId, booking: &Booking) -> bool {
    user_id == booking.booker_id() || user_id == booking.owner_id()
}

/// 予約に回答できるか（アイテムの所有者のみ）
pub fn is_item_owner(user_id: UserId, booking: &Booking) -> bool {
    user_id == booking.owner_id()
}
