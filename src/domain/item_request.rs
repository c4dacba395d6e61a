use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RequestId, UserId};

/// アイテムリクエスト（借りたい物の公開募集）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    pub request_id: RequestId,
    pub description: String,
    pub requestor_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// 未保存のアイテムリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItemRequest {
    pub description: String,
    pub requestor_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl NewItemRequest {
    pub fn persisted(self, request_id: RequestId) -> ItemRequest {
        ItemRequest {
            request_id,
            description: self.description,
            requestor_id: self.requestor_id,
            created_at: self.created_at,
        }
    }
}
