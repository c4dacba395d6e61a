use super::rows::{BOOKING_SELECT, map_booking};
use crate::domain::{
    Booking, BookingFilter, BookingId, BookingStatus, ItemId, NewBooking, UserId, Viewpoint,
};
use crate::ports::{
    BookingInsertOutcome, BookingRepository as BookingRepositoryTrait, DecisionOutcome, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::str::FromStr;

/// BookingRepositoryのPostgreSQL実装
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// アイテムの承認済み予約から1件を取得する
    ///
    /// `condition` は `b.start_time` と `$2` を比較する述語、`order` は並び順。
    async fn find_approved_edge(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
        condition: &str,
        order: &str,
    ) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!(
            r#"
            {BOOKING_SELECT}
            WHERE b.item_id = $1
              AND b.status = 'APPROVED'
              AND {condition}
            ORDER BY b.start_time {order}, b.booking_id {order}
            LIMIT 1
            "#
        ))
        .bind(item_id.value())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_booking).transpose()
    }
}

#[async_trait]
impl BookingRepositoryTrait for BookingRepository {
    /// アイテム行を FOR UPDATE でロックし、貸出可能な場合のみ挿入する
    ///
    /// 承認（apply_decision）も同じアイテム行をロックするため、
    /// 承認で貸出不可になったアイテムに WAITING の予約が残ることはない。
    async fn insert(&self, booking: &NewBooking) -> Result<BookingInsertOutcome> {
        let mut tx = self.pool.begin().await?;

        let available: bool =
            sqlx::query_scalar("SELECT available FROM items WHERE item_id = $1 FOR UPDATE")
                .bind(booking.item.item_id.value())
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| format!("item {} does not exist", booking.item.item_id))?;

        if !available {
            return Ok(BookingInsertOutcome::ItemUnavailable);
        }

        let booking_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO bookings (start_time, end_time, item_id, booker_id, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING booking_id
            "#,
        )
        .bind(booking.window.start())
        .bind(booking.window.end())
        .bind(booking.item.item_id.value())
        .bind(booking.booker.user_id.value())
        .bind(booking.status().as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(BookingInsertOutcome::Inserted(BookingId::new(booking_id)))
    }

    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!("{BOOKING_SELECT} WHERE b.booking_id = $1"))
            .bind(booking_id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_booking).transpose()
    }

    /// 視点と述語で予約を絞り込む（開始日時の降順）
    async fn find_for_user(
        &self,
        user_id: UserId,
        viewpoint: Viewpoint,
        filter: BookingFilter,
    ) -> Result<Vec<Booking>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(BOOKING_SELECT);

        match viewpoint {
            Viewpoint::Booker => builder.push(" WHERE b.booker_id = "),
            Viewpoint::Owner => builder.push(" WHERE i.owner_id = "),
        };
        builder.push_bind(user_id.value());

        match filter {
            BookingFilter::All => {}
            BookingFilter::InProgressAt(now) => {
                builder.push(" AND b.start_time < ");
                builder.push_bind(now);
                builder.push(" AND b.end_time > ");
                builder.push_bind(now);
            }
            BookingFilter::EndedBefore(now) => {
                builder.push(" AND b.end_time < ");
                builder.push_bind(now);
            }
            BookingFilter::StartsAfter(now) => {
                builder.push(" AND b.start_time > ");
                builder.push_bind(now);
            }
            BookingFilter::Status(status) => {
                builder.push(" AND b.status = ");
                builder.push_bind(status.as_str());
            }
        }

        builder.push(" ORDER BY b.start_time DESC, b.booking_id DESC");

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(map_booking).collect()
    }

    async fn find_last_approved(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>> {
        self.find_approved_edge(item_id, now, "b.start_time < $2", "DESC")
            .await
    }

    async fn find_next_approved(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>> {
        self.find_approved_edge(item_id, now, "b.start_time > $2", "ASC")
            .await
    }

    /// 回答を1トランザクションで書き込む
    ///
    /// 予約行を FOR UPDATE でロックしてから WAITING であることを再確認する。
    /// 承認時はアイテム行もロックし、同じアイテムの承認が直列化されるようにする。
    async fn apply_decision(&self, booking: &Booking) -> Result<DecisionOutcome> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            SELECT status, item_id, start_time, end_time
            FROM bookings
            WHERE booking_id = $1
            FOR UPDATE
            "#,
        )
        .bind(booking.booking_id.value())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| format!("booking {} does not exist", booking.booking_id))?;

        let status_str: &str = row.get("status");
        let current = BookingStatus::from_str(status_str)?;
        if !current.is_waiting() {
            return Ok(DecisionOutcome::AlreadyDecided);
        }

        if booking.status == BookingStatus::Approved {
            let item_id: i64 = row.get("item_id");
            let start: DateTime<Utc> = row.get("start_time");
            let end: DateTime<Utc> = row.get("end_time");

            sqlx::query("SELECT item_id FROM items WHERE item_id = $1 FOR UPDATE")
                .bind(item_id)
                .execute(&mut *tx)
                .await?;

            let overlaps: bool = sqlx::query_scalar(
                r#"
                SELECT EXISTS (
                    SELECT 1 FROM bookings
                    WHERE item_id = $1
                      AND booking_id <> $2
                      AND status = 'APPROVED'
                      AND start_time < $4
                      AND $3 < end_time
                )
                "#,
            )
            .bind(item_id)
            .bind(booking.booking_id.value())
            .bind(start)
            .bind(end)
            .fetch_one(&mut *tx)
            .await?;

            if overlaps {
                return Ok(DecisionOutcome::OverlapsApproved);
            }

            sqlx::query("UPDATE items SET available = FALSE WHERE item_id = $1")
                .bind(item_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("UPDATE bookings SET status = $2 WHERE booking_id = $1")
            .bind(booking.booking_id.value())
            .bind(booking.status.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(DecisionOutcome::Applied)
    }
}
