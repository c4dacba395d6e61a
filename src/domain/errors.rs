use super::{BookingStatus, BookingWindowError};

/// 予約作成のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBookingError {
    /// アイテムが貸出不可
    ItemUnavailable,
    /// 所有者が自分のアイテムを予約しようとした
    OwnItem,
    /// 開始が終了より前ではない
    StartNotBeforeEnd,
}

impl From<BookingWindowError> for RequestBookingError {
    fn from(err: BookingWindowError) -> Self {
        match err {
            BookingWindowError::StartNotBeforeEnd => RequestBookingError::StartNotBeforeEnd,
        }
    }
}

/// 予約への回答（承認・却下）のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespondBookingError {
    /// 既に承認または却下済み
    AlreadyDecided(BookingStatus),
}
