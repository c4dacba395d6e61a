use crate::domain::ItemId;
use chrono::{DateTime, Utc};

use crate::application::dependencies::ServiceDependencies;
use crate::application::errors::{ApplicationError, Result};
use crate::application::views::BookingView;

/// アイテムの直前・直後の承認済み予約
///
/// リクエスト単位で生成される一時的なビューで、永続化しない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingSummary {
    /// `now` より前に開始した承認済み予約のうち、開始が最も遅いもの
    pub last: Option<BookingView>,
    /// `now` より後に開始する承認済み予約のうち、開始が最も早いもの
    pub next: Option<BookingView>,
}

/// アイテムの予約サマリーを作成する
///
/// 閲覧者による制限はかけない。所有者以外に見せないのは呼び出し側の責務。
/// 該当する予約がなければ `None`（エラーではない）。
pub async fn summarize_item_bookings(
    deps: &ServiceDependencies,
    item_id: ItemId,
    now: DateTime<Utc>,
) -> Result<BookingSummary> {
    let (last, next) = futures::future::try_join(
        deps.bookings.find_last_approved(item_id, now),
        deps.bookings.find_next_approved(item_id, now),
    )
    .await
    .map_err(ApplicationError::Repository)?;

    Ok(BookingSummary {
        last: last.as_ref().map(BookingView::from),
        next: next.as_ref().map(BookingView::from),
    })
}
