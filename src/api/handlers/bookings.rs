use crate::application::{ApplicationError, booking, views::BookingView};
use crate::domain::{
    BookingId, BookingState, Viewpoint,
    commands::{CreateBooking, ListBookings, RespondToBooking},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;

use super::AppState;
use crate::api::{
    error::ApiError,
    extract::SharerUserId,
    types::{ApprovedQuery, NewBookingBody, StateQuery},
};

/// 状態フィルタのクエリ値を解釈する（省略時は ALL）
fn parse_state(query: &StateQuery) -> Result<BookingState, ApiError> {
    match query.state.as_deref() {
        None => Ok(BookingState::default()),
        Some(raw) => raw.parse::<BookingState>().map_err(|e| {
            tracing::warn!(state = %raw, "Rejected unknown booking state filter");
            ApiError::from(ApplicationError::from(e))
        }),
    }
}

/// POST /bookings - 予約を申し込む
///
/// 強制されるビジネスルール:
/// - アイテムが貸出可能であること
/// - 自分のアイテムではないこと
/// - 開始が終了より前であること
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    SharerUserId(booker_id): SharerUserId,
    Json(req): Json<NewBookingBody>,
) -> Result<(StatusCode, Json<BookingView>), ApiError> {
    let cmd = CreateBooking {
        booker_id,
        item_id: req.item_id,
        start: req.start,
        end: req.end,
    };
    let view = booking::create_booking(&state.service_deps, cmd).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// PATCH /bookings/:id?approved= - 所有者が承認・却下する
pub async fn respond_to_booking(
    State(state): State<Arc<AppState>>,
    SharerUserId(user_id): SharerUserId,
    Path(booking_id): Path<i64>,
    Query(query): Query<ApprovedQuery>,
) -> Result<Json<BookingView>, ApiError> {
    let cmd = RespondToBooking {
        user_id,
        booking_id: BookingId::new(booking_id),
        approved: query.approved,
    };
    Ok(Json(
        booking::respond_to_booking(&state.service_deps, cmd).await?,
    ))
}

/// GET /bookings/:id - 借り手と所有者のみ閲覧可能
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    SharerUserId(viewer_id): SharerUserId,
    Path(booking_id): Path<i64>,
) -> Result<Json<BookingView>, ApiError> {
    let view =
        booking::get_booking_by_id(&state.service_deps, viewer_id, BookingId::new(booking_id))
            .await?;
    Ok(Json(view))
}

/// GET /bookings?state= - 自分が申し込んだ予約
pub async fn list_booker_bookings(
    State(state): State<Arc<AppState>>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<StateQuery>,
) -> Result<Json<Vec<BookingView>>, ApiError> {
    let query = ListBookings {
        user_id,
        state: parse_state(&query)?,
        viewpoint: Viewpoint::Booker,
        now: Utc::now(),
    };
    Ok(Json(
        booking::list_booker_bookings(&state.service_deps, query).await?,
    ))
}

/// GET /bookings/owner?state= - 自分のアイテムへの予約
pub async fn list_owner_bookings(
    State(state): State<Arc<AppState>>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<StateQuery>,
) -> Result<Json<Vec<BookingView>>, ApiError> {
    let query = ListBookings {
        user_id,
        state: parse_state(&query)?,
        viewpoint: Viewpoint::Owner,
        now: Utc::now(),
    };
    Ok(Json(
        booking::list_owner_bookings(&state.service_deps, query).await?,
    ))
}
