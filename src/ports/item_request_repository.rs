use crate::domain::{ItemRequest, NewItemRequest, RequestId, UserId};
use async_trait::async_trait;

use super::Result;

/// アイテムリクエストリポジトリポート
#[async_trait]
pub trait ItemRequestRepository: Send + Sync {
    async fn insert(&self, request: NewItemRequest) -> Result<ItemRequest>;

    async fn find_by_id(&self, request_id: RequestId) -> Result<Option<ItemRequest>>;

    /// 依頼者のリクエストを新しい順で取得する
    async fn find_by_requestor(&self, requestor_id: UserId) -> Result<Vec<ItemRequest>>;

    /// 全リクエストを新しい順で取得する
    async fn find_all(&self) -> Result<Vec<ItemRequest>>;
}
