use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CommentId, ItemId, RequestId, UserId};

/// アイテム（貸し出される物）
///
/// `available` は予約の承認によっても書き換わる非正規化された状態。
/// 承認されると false になり、元に戻す経路はない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: ItemId,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: UserId,
    /// このアイテムが応えたリクエスト
    pub request_id: Option<RequestId>,
}

impl Item {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

/// 未保存のアイテム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: UserId,
    pub request_id: Option<RequestId>,
}

impl NewItem {
    pub fn persisted(self, item_id: ItemId) -> Item {
        Item {
            item_id,
            name: self.name,
            description: self.description,
            available: self.available,
            owner_id: self.owner_id,
            request_id: self.request_id,
        }
    }
}

/// アイテムの部分更新
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// 純粋関数：部分更新を適用する
pub fn apply_item_patch(item: Item, patch: ItemPatch) -> Item {
    Item {
        name: patch.name.unwrap_or(item.name),
        description: patch.description.unwrap_or(item.description),
        available: patch.available.unwrap_or(item.available),
        ..item
    }
}

/// 検索語に一致するか（名前または説明、大文字小文字を区別しない）
///
/// 貸出不可のアイテムは一致しない。
pub fn matches_search(item: &Item, text: &str) -> bool {
    if !item.available {
        return false;
    }
    let needle = text.to_lowercase();
    item.name.to_lowercase().contains(&needle) || item.description.to_lowercase().contains(&needle)
}

/// コメント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: CommentId,
    pub text: String,
    pub item_id: ItemId,
    pub author_id: UserId,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

/// 未保存のコメント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub text: String,
    pub item_id: ItemId,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}
