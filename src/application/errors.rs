use crate::domain::{
    BookingId, BookingStatus, ItemId, RequestBookingError, RequestId, RespondBookingError,
    UnknownBookingState, UserId,
};
use thiserror::Error;

/// エラーの分類
///
/// 呼び出し側（API層）はこの分類でプロトコル上のステータスを決める。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AccessDenied,
    Validation,
    InvalidArgument,
    Conflict,
    Internal,
}

/// アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// ユーザーが存在しない
    #[error("User {0} not found")]
    UserNotFound(UserId),

    /// アイテムが存在しない
    #[error("Item {0} not found")]
    ItemNotFound(ItemId),

    /// 予約が存在しない
    #[error("Booking {0} not found")]
    BookingNotFound(BookingId),

    /// アイテムリクエストが存在しない
    #[error("Item request {0} not found")]
    RequestNotFound(RequestId),

    /// アイテムが貸出不可
    #[error("Item {0} is not available for booking")]
    ItemNotAvailable(ItemId),

    /// 所有者が自分のアイテムを予約しようとした
    #[error("Owner cannot book own item {0}")]
    OwnItemBooking(ItemId),

    /// アイテムの所有者ではない
    #[error("User {0} is not the owner of item {1}")]
    NotItemOwner(UserId, ItemId),

    /// 予約の借り手でもアイテムの所有者でもない
    #[error("User {0} is neither the booker nor the item owner of booking {1}")]
    NotBookingParticipant(UserId, BookingId),

    /// 開始が終了より前ではない
    #[error("Booking start must be before its end")]
    InvalidBookingWindow,

    /// 既に承認または却下済み
    #[error("Booking {0} has already been {1}")]
    BookingAlreadyDecided(BookingId, BookingStatus),

    /// 承認済み予約と期間が重なる
    #[error("Booking {0} overlaps an approved booking of the same item")]
    OverlapsApprovedBooking(BookingId),

    /// 完了した予約がないためコメントできない
    #[error("User {0} has no completed booking of item {1}")]
    NoCompletedBooking(UserId, ItemId),

    /// 未知の状態フィルタ
    #[error("Unknown state: {0}")]
    UnknownState(String),

    /// 入力値が不正（ヘッダー欠落など）
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// メールアドレスの重複
    #[error("Email {0} is already registered")]
    DuplicateEmail(String),

    /// リポジトリのエラー
    #[error("Repository error")]
    Repository(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::UserNotFound(_)
            | ApplicationError::ItemNotFound(_)
            | ApplicationError::BookingNotFound(_)
            | ApplicationError::RequestNotFound(_) => ErrorKind::NotFound,

            ApplicationError::ItemNotAvailable(_)
            | ApplicationError::OwnItemBooking(_)
            | ApplicationError::NotItemOwner(..)
            | ApplicationError::NotBookingParticipant(..) => ErrorKind::AccessDenied,

            ApplicationError::InvalidBookingWindow
            | ApplicationError::BookingAlreadyDecided(..)
            | ApplicationError::NoCompletedBooking(..) => ErrorKind::Validation,

            ApplicationError::UnknownState(_) | ApplicationError::InvalidArgument(_) => {
                ErrorKind::InvalidArgument
            }

            ApplicationError::OverlapsApprovedBooking(_) | ApplicationError::DuplicateEmail(_) => {
                ErrorKind::Conflict
            }

            ApplicationError::Repository(_) => ErrorKind::Internal,
        }
    }

    /// ドメインの予約作成エラーを変換する（アイテムIDを付与）
    pub(crate) fn from_request_booking(err: RequestBookingError, item_id: ItemId) -> Self {
        match err {
            RequestBookingError::ItemUnavailable => ApplicationError::ItemNotAvailable(item_id),
            RequestBookingError::OwnItem => ApplicationError::OwnItemBooking(item_id),
            RequestBookingError::StartNotBeforeEnd => ApplicationError::InvalidBookingWindow,
        }
    }

    /// ドメインの回答エラーを変換する（予約IDを付与）
    pub(crate) fn from_respond_booking(err: RespondBookingError, booking_id: BookingId) -> Self {
        match err {
            RespondBookingError::AlreadyDecided(status) => {
                ApplicationError::BookingAlreadyDecided(booking_id, status)
            }
        }
    }
}

impl From<UnknownBookingState> for ApplicationError {
    fn from(err: UnknownBookingState) -> Self {
        ApplicationError::UnknownState(err.0)
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, ApplicationError>;
