use crate::application::{ApplicationError, ErrorKind};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    /// 入力値エラーを作成する（ヘッダー・ボディの検証用）
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ApiError(ApplicationError::InvalidArgument(message.into()))
    }

    fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::AccessDenied => StatusCode::FORBIDDEN,
            ErrorKind::Validation | ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self.0 {
            ApplicationError::UserNotFound(_) => "USER_NOT_FOUND",
            ApplicationError::ItemNotFound(_) => "ITEM_NOT_FOUND",
            ApplicationError::BookingNotFound(_) => "BOOKING_NOT_FOUND",
            ApplicationError::RequestNotFound(_) => "REQUEST_NOT_FOUND",
            ApplicationError::ItemNotAvailable(_) => "ITEM_NOT_AVAILABLE",
            ApplicationError::OwnItemBooking(_) => "OWN_ITEM_BOOKING",
            ApplicationError::NotItemOwner(..) => "NOT_ITEM_OWNER",
            ApplicationError::NotBookingParticipant(..) => "NOT_BOOKING_PARTICIPANT",
            ApplicationError::InvalidBookingWindow => "INVALID_BOOKING_WINDOW",
            ApplicationError::BookingAlreadyDecided(..) => "BOOKING_ALREADY_DECIDED",
            ApplicationError::OverlapsApprovedBooking(_) => "OVERLAPS_APPROVED_BOOKING",
            ApplicationError::NoCompletedBooking(..) => "NO_COMPLETED_BOOKING",
            ApplicationError::UnknownState(_) => "UNKNOWN_STATE",
            ApplicationError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ApplicationError::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            ApplicationError::Repository(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
        let message = match &self.0 {
            ApplicationError::Repository(e) => {
                tracing::error!("Repository error: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse::new(code, message));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingId, ItemId, UserId};

    #[test]
    fn test_status_follows_error_kind() {
        let cases = [
            (
                ApplicationError::BookingNotFound(BookingId::new(1)),
                StatusCode::NOT_FOUND,
            ),
            (
                ApplicationError::NotItemOwner(UserId::new(1), ItemId::new(2)),
                StatusCode::FORBIDDEN,
            ),
            (
                ApplicationError::InvalidBookingWindow,
                StatusCode::BAD_REQUEST,
            ),
            (
                ApplicationError::UnknownState("SOON".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApplicationError::OverlapsApprovedBooking(BookingId::new(3)),
                StatusCode::CONFLICT,
            ),
            (
                ApplicationError::Repository("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), expected);
        }
    }
}
