use crate::domain::{
    Booking, BookingId, BookingStatus, BookingWindow, Item, ItemId, RequestId, User, UserId,
};
use crate::ports::Result;
use sqlx::{Row, postgres::PgRow};
use std::str::FromStr;

/// ユーザー行のSELECT列（別名付き）
pub(super) const USER_COLUMNS: &str = "user_id, name AS user_name, email AS user_email";

/// アイテム行のSELECT列（別名付き）
pub(super) const ITEM_COLUMNS: &str = "item_id, name AS item_name, description AS item_description, \
     available AS item_available, owner_id AS item_owner_id, request_id AS item_request_id";

/// 予約・借り手・アイテムを結合したSELECT
///
/// 列の別名は `map_user` / `map_item` と共有する。
pub(super) const BOOKING_SELECT: &str = r#"
    SELECT
        b.booking_id,
        b.start_time,
        b.end_time,
        b.status,
        u.user_id,
        u.name AS user_name,
        u.email AS user_email,
        i.item_id,
        i.name AS item_name,
        i.description AS item_description,
        i.available AS item_available,
        i.owner_id AS item_owner_id,
        i.request_id AS item_request_id
    FROM bookings b
    JOIN users u ON u.user_id = b.booker_id
    JOIN items i ON i.item_id = b.item_id
"#;

fn invalid_data(message: String) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message))
}

pub(super) fn map_user(row: &PgRow) -> User {
    User {
        user_id: UserId::new(row.get("user_id")),
        name: row.get("user_name"),
        email: row.get("user_email"),
    }
}

pub(super) fn map_item(row: &PgRow) -> Item {
    let request_id: Option<i64> = row.get("item_request_id");
    Item {
        item_id: ItemId::new(row.get("item_id")),
        name: row.get("item_name"),
        description: row.get("item_description"),
        available: row.get("item_available"),
        owner_id: UserId::new(row.get("item_owner_id")),
        request_id: request_id.map(RequestId::new),
    }
}

/// PostgreSQLの行データをBookingに変換する
///
/// ステータス文字列と期間の不変条件（start < end）を検証する。
/// スキーマのCHECK制約を通った行であれば失敗しない。
pub(super) fn map_booking(row: &PgRow) -> Result<Booking> {
    let status_str: &str = row.get("status");
    let status = BookingStatus::from_str(status_str).map_err(invalid_data)?;

    let window = BookingWindow::new(row.get("start_time"), row.get("end_time")).map_err(|_| {
        invalid_data(format!(
            "booking {} has start_time not before end_time",
            row.get::<i64, _>("booking_id")
        ))
    })?;

    Ok(Booking {
        booking_id: BookingId::new(row.get("booking_id")),
        window,
        booker: map_user(row),
        item: map_item(row),
        status,
    })
}
