use crate::domain::{NewUser, User, UserId};
use async_trait::async_trait;

use super::Result;

/// メールアドレスの一意制約を伴う書き込みの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserWriteOutcome<T> {
    Saved(T),
    /// 他のユーザーが同じメールアドレスを使用している
    DuplicateEmail,
}

/// ユーザーリポジトリポート
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// IDでユーザーを取得する
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>>;

    /// 全ユーザーをID順で取得する
    async fn find_all(&self) -> Result<Vec<User>>;

    /// メールアドレスが登録済みか確認する
    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    /// 新しいユーザーを保存し、採番済みのユーザーを返す
    async fn insert(&self, user: NewUser) -> Result<UserWriteOutcome<User>>;

    /// 既存ユーザーを上書き保存する
    async fn update(&self, user: &User) -> Result<UserWriteOutcome<()>>;

    /// ユーザーを削除する
    ///
    /// 所有アイテム・予約・コメント・リクエストも削除される。
    /// 削除対象が存在しなかった場合は false を返す。
    async fn delete(&self, user_id: UserId) -> Result<bool>;
}
