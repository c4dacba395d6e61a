use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    BookingId, BookingWindow, Item, RequestBookingError, RespondBookingError, User, UserId,
};

/// 予約ステータス
///
/// 状態遷移：WAITING → APPROVED、WAITING → REJECTED
/// APPROVED と REJECTED は終端状態。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// 所有者の回答待ち
    Waiting,
    /// 承認済み
    Approved,
    /// 却下済み
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self, BookingStatus::Waiting)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// 予約集約
///
/// 借り手とアイテムはストアから解決済みの状態で保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: BookingId,
    pub window: BookingWindow,
    pub booker: User,
    pub item: Item,
    pub status: BookingStatus,
}

impl Booking {
    pub fn start(&self) -> DateTime<Utc> {
        self.window.start()
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.window.end()
    }

    pub fn booker_id(&self) -> UserId {
        self.booker.user_id
    }

    pub fn owner_id(&self) -> UserId {
        self.item.owner_id
    }
}

/// 未保存の予約（常に WAITING）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub window: BookingWindow,
    pub booker: User,
    pub item: Item,
}

impl NewBooking {
    pub fn status(&self) -> BookingStatus {
        BookingStatus::Waiting
    }

    pub fn persisted(self, booking_id: BookingId) -> Booking {
        Booking {
            booking_id,
            window: self.window,
            booker: self.booker,
            item: self.item,
            status: BookingStatus::Waiting,
        }
    }
}

/// 純粋関数：予約を申し込む
///
/// ビジネスルール（この順で検証する）：
/// - アイテムが貸出可能であること
/// - 所有者自身による予約ではないこと（※）
/// - 開始が終了より前であること
///
/// ※ 貸出可否や期間のような予約そのものの成立条件ではなく、
/// 自分のアイテムへの予約を締め出すために後から加えた制約。
/// アクセス拒否として扱われる。
///
/// 他の予約との重複は作成時には検証しない（承認時に検証する）。
pub fn request_booking(
    booker: &User,
    item: &Item,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<NewBooking, RequestBookingError> {
    if !item.available {
        return Err(RequestBookingError::ItemUnavailable);
    }

    if item.is_owned_by(booker.user_id) {
        return Err(RequestBookingError::OwnItem);
    }

    let window = BookingWindow::new(start, end)?;

    Ok(NewBooking {
        window,
        booker: booker.clone(),
        item: item.clone(),
    })
}

/// 純粋関数：予約に回答する
///
/// ビジネスルール：
/// - WAITING の予約のみ回答できる
/// - 承認：APPROVED に遷移し、アイテムは貸出不可になる
/// - 却下：REJECTED に遷移し、アイテムの状態は変えない
///
/// 権限の確認は呼び出し側（アプリケーション層）の責務。
pub fn respond_to_booking(
    booking: Booking,
    approved: bool,
) -> Result<Booking, RespondBookingError> {
    if !booking.status.is_waiting() {
        return Err(RespondBookingError::AlreadyDecided(booking.status));
    }

    if approved {
        Ok(Booking {
            status: BookingStatus::Approved,
            item: Item {
                available: false,
                ..booking.item
            },
            ..booking
        })
    } else {
        Ok(Booking {
            status: BookingStatus::Rejected,
            ..booking
        })
    }
}
