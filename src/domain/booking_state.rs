use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Booking, BookingStatus, UserId};

/// 予約一覧の状態フィルタ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingState {
    #[default]
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingState::All => "ALL",
            BookingState::Current => "CURRENT",
            BookingState::Past => "PAST",
            BookingState::Future => "FUTURE",
            BookingState::Waiting => "WAITING",
            BookingState::Rejected => "REJECTED",
        }
    }

    /// 時刻 `now` を基準にストアへ渡すフィルタに変換する
    pub fn filter_at(self, now: DateTime<Utc>) -> BookingFilter {
        match self {
            BookingState::All => BookingFilter::All,
            BookingState::Current => BookingFilter::InProgressAt(now),
            BookingState::Past => BookingFilter::EndedBefore(now),
            BookingState::Future => BookingFilter::StartsAfter(now),
            BookingState::Waiting => BookingFilter::Status(BookingStatus::Waiting),
            BookingState::Rejected => BookingFilter::Status(BookingStatus::Rejected),
        }
    }
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知の状態フィルタ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBookingState(pub String);

impl fmt::Display for UnknownBookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown state: {}", self.0)
    }
}

impl std::str::FromStr for BookingState {
    type Err = UnknownBookingState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            _ => Err(UnknownBookingState(s.to_string())),
        }
    }
}

/// 予約一覧の視点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Viewpoint {
    /// 自分の予約（借り手として）
    Booker,
    /// 自分のアイテムへの予約（所有者として）
    Owner,
}

impl Viewpoint {
    /// この視点での絞り込みキー
    pub fn key_of(&self, booking: &Booking) -> UserId {
        match self {
            Viewpoint::Booker => booking.booker_id(),
            Viewpoint::Owner => booking.owner_id(),
        }
    }
}

/// ストアが評価する予約の述語
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingFilter {
    All,
    /// start < now かつ end > now
    InProgressAt(DateTime<Utc>),
    /// end < now
    EndedBefore(DateTime<Utc>),
    /// start > now
    StartsAfter(DateTime<Utc>),
    Status(BookingStatus),
}

impl BookingFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        match *self {
            BookingFilter::All => true,
            BookingFilter::InProgressAt(now) => booking.window.is_in_progress_at(now),
            BookingFilter::EndedBefore(now) => booking.window.has_ended_before(now),
            BookingFilter::StartsAfter(now) => booking.window.starts_after(now),
            BookingFilter::Status(status) => booking.status == status,
        }
    }
}
