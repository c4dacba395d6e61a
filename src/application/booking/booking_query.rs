use crate::domain::{Viewpoint, commands::ListBookings};

use crate::application::dependencies::{ServiceDependencies, load_user};
use crate::application::errors::{ApplicationError, Result};
use crate::application::views::BookingView;

/// 状態フィルタで予約一覧を取得する
///
/// 視点が `Booker` なら閲覧者の予約、`Owner` なら閲覧者のアイテムへの予約を返す。
/// 状態フィルタは `now` を基準にストアの述語へ変換される：
///
/// | 状態     | 述語                      |
/// |----------|---------------------------|
/// | ALL      | なし                      |
/// | CURRENT  | start < now かつ end > now |
/// | PAST     | end < now                 |
/// | FUTURE   | start > now               |
/// | WAITING  | status = WAITING          |
/// | REJECTED | status = REJECTED         |
///
/// 並び順はストアの返す順（開始時刻の新しい順）。
///
/// # エラー
/// - UserNotFound: 閲覧者が存在しない
pub async fn list_bookings(
    deps: &ServiceDependencies,
    query: ListBookings,
) -> Result<Vec<BookingView>> {
    load_user(deps, query.user_id).await?;

    let filter = query.state.filter_at(query.now);
    tracing::debug!(
        user_id = %query.user_id,
        state = %query.state,
        viewpoint = ?query.viewpoint,
        "Listing bookings with {:?}",
        filter
    );

    let bookings = deps
        .bookings
        .find_for_user(query.user_id, query.viewpoint, filter)
        .await
        .map_err(ApplicationError::Repository)?;

    Ok(bookings.iter().map(BookingView::from).collect())
}

/// 借り手としての予約一覧
pub async fn list_booker_bookings(
    deps: &ServiceDependencies,
    query: ListBookings,
) -> Result<Vec<BookingView>> {
    list_bookings(
        deps,
        ListBookings {
            viewpoint: Viewpoint::Booker,
            ..query
        },
    )
    .await
}

/// 所有者としての予約一覧（自分のアイテムへの予約）
pub async fn list_owner_bookings(
    deps: &ServiceDependencies,
    query: ListBookings,
) -> Result<Vec<BookingView>> {
    list_bookings(
        deps,
        ListBookings {
            viewpoint: Viewpoint::Owner,
            ..query
        },
    )
    .await
}
