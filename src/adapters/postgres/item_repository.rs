use super::rows::{ITEM_COLUMNS, map_item};
use crate::domain::{Item, ItemId, NewItem, RequestId, UserId};
use crate::ports::{ItemRepository as ItemRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::PgPool;

/// ItemRepositoryのPostgreSQL実装
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepositoryTrait for ItemRepository {
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<Item>> {
        let row = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE item_id = $1"
        ))
        .bind(item_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_item))
    }

    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Item>> {
        let rows = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE owner_id = $1 ORDER BY item_id"
        ))
        .bind(owner_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_item).collect())
    }

    /// 貸出可能なアイテムを名前・説明の部分一致で検索する
    ///
    /// LIKEのワイルドカードを避けるため POSITION で比較する。
    async fn search_available(&self, text: &str) -> Result<Vec<Item>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM items
            WHERE available
              AND (POSITION(LOWER($1) IN LOWER(name)) > 0
                   OR POSITION(LOWER($1) IN LOWER(description)) > 0)
            ORDER BY item_id
            "#
        ))
        .bind(text)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_item).collect())
    }

    async fn find_by_request(&self, request_id: RequestId) -> Result<Vec<Item>> {
        let rows = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE request_id = $1 ORDER BY item_id"
        ))
        .bind(request_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_item).collect())
    }

    async fn insert(&self, item: NewItem) -> Result<Item> {
        let item_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO items (name, description, available, owner_id, request_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING item_id
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .bind(item.owner_id.value())
        .bind(item.request_id.map(|id| id.value()))
        .fetch_one(&self.pool)
        .await?;

        Ok(item.persisted(ItemId::new(item_id)))
    }

    async fn update(&self, item: &Item) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE items
            SET name = $2, description = $3, available = $4
            WHERE item_id = $1
            "#,
        )
        .bind(item.item_id.value())
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, item_id: ItemId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM items WHERE item_id = $1")
            .bind(item_id.value())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
