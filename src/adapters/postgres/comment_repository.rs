use crate::domain::{Comment, CommentId, ItemId, NewComment, UserId};
use crate::ports::{CommentInsertOutcome, CommentRepository as CommentRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_comment(row: &PgRow) -> Comment {
    Comment {
        comment_id: CommentId::new(row.get("comment_id")),
        text: row.get("text"),
        item_id: ItemId::new(row.get("item_id")),
        author_id: UserId::new(row.get("author_id")),
        author_name: row.get("author_name"),
        created_at: row.get("created_at"),
    }
}

/// CommentRepositoryのPostgreSQL実装
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepositoryTrait for CommentRepository {
    /// 完了した承認済み予約がある場合のみ挿入し、投稿者名を結合して返す
    ///
    /// 条件判定と挿入は1つの文で行う。
    async fn insert(&self, comment: NewComment) -> Result<CommentInsertOutcome> {
        let row = sqlx::query(
            r#"
            WITH inserted AS (
                INSERT INTO comments (text, item_id, author_id, created_at)
                SELECT $1, $2, $3, $4
                WHERE EXISTS (
                    SELECT 1 FROM bookings
                    WHERE booker_id = $3
                      AND item_id = $2
                      AND status = 'APPROVED'
                      AND end_time < $4
                )
                RETURNING comment_id, text, item_id, author_id, created_at
            )
            SELECT c.comment_id, c.text, c.item_id, c.author_id, c.created_at,
                   u.name AS author_name
            FROM inserted c
            JOIN users u ON u.user_id = c.author_id
            "#,
        )
        .bind(&comment.text)
        .bind(comment.item_id.value())
        .bind(comment.author_id.value())
        .bind(comment.created_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match row {
            Some(row) => CommentInsertOutcome::Inserted(map_comment(&row)),
            None => CommentInsertOutcome::NoCompletedBooking,
        })
    }

    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            r#"
            SELECT c.comment_id, c.text, c.item_id, c.author_id, c.created_at,
                   u.name AS author_name
            FROM comments c
            JOIN users u ON u.user_id = c.author_id
            WHERE c.item_id = $1
            ORDER BY c.created_at, c.comment_id
            "#,
        )
        .bind(item_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_comment).collect())
    }
}
