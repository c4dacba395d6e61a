use crate::domain::{Comment, ItemId, NewComment};
use async_trait::async_trait;

use super::Result;

/// コメントの投稿を書き込んだ結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentInsertOutcome {
    Inserted(Comment),
    /// 投稿者がこのアイテムの承認済み予約を `created_at` より前に終えていない
    NoCompletedBooking,
}

/// コメントリポジトリポート
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// 投稿条件を確認したうえでコメントを保存する
    ///
    /// 条件の確認と挿入は1つの作業単位で行い、投稿者名を解決したコメントを返す。
    async fn insert(&self, comment: NewComment) -> Result<CommentInsertOutcome>;

    /// アイテムへのコメントを投稿順で取得する
    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Comment>>;
}
