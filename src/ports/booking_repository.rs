use crate::domain::{Booking, BookingFilter, BookingId, ItemId, NewBooking, UserId, Viewpoint};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::Result;

/// 予約の作成を書き込んだ結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingInsertOutcome {
    /// WAITING の予約を保存した
    Inserted(BookingId),
    /// 書き込み時点でアイテムが貸出不可だった
    ItemUnavailable,
}

/// 予約への回答を書き込んだ結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// ステータスを書き込んだ（承認時はアイテムも貸出不可にした）
    Applied,
    /// 書き込み時点で予約が既に WAITING ではなかった
    AlreadyDecided,
    /// 同じアイテムの承認済み予約と期間が重なる
    OverlapsApproved,
}

/// 予約リポジトリポート
///
/// 読み取りは借り手・アイテム・所有者IDを解決済みの `Booking` を返す。
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// WAITING の予約を1つの作業単位で保存する
    ///
    /// アイテム行を排他したうえで貸出可能であることを再確認してから挿入する。
    async fn insert(&self, booking: &NewBooking) -> Result<BookingInsertOutcome>;

    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>>;

    /// 視点（借り手・所有者）とフィルタで予約を検索する
    ///
    /// 開始時刻の新しい順で返す。
    async fn find_for_user(
        &self,
        user_id: UserId,
        viewpoint: Viewpoint,
        filter: BookingFilter,
    ) -> Result<Vec<Booking>>;

    /// `now` より前に開始した承認済み予約のうち、開始が最も遅いもの
    async fn find_last_approved(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>>;

    /// `now` より後に開始する承認済み予約のうち、開始が最も早いもの
    async fn find_next_approved(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>>;

    /// 回答済みの予約を1つの作業単位で書き込む
    ///
    /// 予約行を排他したうえで WAITING であることを再確認し、
    /// 承認時は同じアイテムの承認済み予約と重ならないことを確認してから
    /// ステータスとアイテムの貸出可否を更新する。
    async fn apply_decision(&self, booking: &Booking) -> Result<DecisionOutcome>;
}
