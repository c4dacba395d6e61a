use crate::domain::{Item, ItemId, NewItem, RequestId, UserId};
use async_trait::async_trait;

use super::Result;

/// アイテムリポジトリポート
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<Item>>;

    /// 所有者のアイテムをID順で取得する
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Item>>;

    /// 貸出可能なアイテムを名前・説明の部分一致（大文字小文字を区別しない）で検索する
    async fn search_available(&self, text: &str) -> Result<Vec<Item>>;

    /// リクエストに応えて登録されたアイテムを取得する
    async fn find_by_request(&self, request_id: RequestId) -> Result<Vec<Item>>;

    async fn insert(&self, item: NewItem) -> Result<Item>;

    async fn update(&self, item: &Item) -> Result<()>;

    /// 削除対象が存在しなかった場合は false を返す
    async fn delete(&self, item_id: ItemId) -> Result<bool>;
}
