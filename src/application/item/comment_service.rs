use crate::domain::{NewComment, commands::AddComment};
use crate::ports::CommentInsertOutcome;

use crate::application::dependencies::{ServiceDependencies, load_item, load_user};
use crate::application::errors::{ApplicationError, Result};
use crate::application::views::CommentView;

/// アイテムにコメントを投稿する
///
/// ビジネスルール：投稿者がこのアイテムの承認済み予約を
/// `created_at` より前に終えていること（NoCompletedBooking）。
/// 条件の確認と保存はリポジトリが1つの作業単位で行う。
pub async fn add_comment(deps: &ServiceDependencies, cmd: AddComment) -> Result<CommentView> {
    load_user(deps, cmd.author_id).await?;
    load_item(deps, cmd.item_id).await?;

    let outcome = deps
        .comments
        .insert(NewComment {
            text: cmd.text,
            item_id: cmd.item_id,
            author_id: cmd.author_id,
            created_at: cmd.created_at,
        })
        .await
        .map_err(ApplicationError::Repository)?;

    let comment = match outcome {
        CommentInsertOutcome::Inserted(comment) => comment,
        CommentInsertOutcome::NoCompletedBooking => {
            tracing::warn!(
                author_id = %cmd.author_id,
                item_id = %cmd.item_id,
                "Comment refused: no completed booking"
            );
            return Err(ApplicationError::NoCompletedBooking(
                cmd.author_id,
                cmd.item_id,
            ));
        }
    };

    tracing::info!(comment_id = %comment.comment_id, item_id = %comment.item_id, "Comment added");
    Ok(CommentView::from(&comment))
}
