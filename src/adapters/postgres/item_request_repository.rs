use crate::domain::{ItemRequest, NewItemRequest, RequestId, UserId};
use crate::ports::{ItemRequestRepository as ItemRequestRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_request(row: &PgRow) -> ItemRequest {
    ItemRequest {
        request_id: RequestId::new(row.get("request_id")),
        description: row.get("description"),
        requestor_id: UserId::new(row.get("requestor_id")),
        created_at: row.get("created_at"),
    }
}

/// ItemRequestRepositoryのPostgreSQL実装
pub struct ItemRequestRepository {
    pool: PgPool,
}

impl ItemRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRequestRepositoryTrait for ItemRequestRepository {
    async fn insert(&self, request: NewItemRequest) -> Result<ItemRequest> {
        let request_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO item_requests (description, requestor_id, created_at)
            VALUES ($1, $2, $3)
            RETURNING request_id
            "#,
        )
        .bind(&request.description)
        .bind(request.requestor_id.value())
        .bind(request.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(request.persisted(RequestId::new(request_id)))
    }

    async fn find_by_id(&self, request_id: RequestId) -> Result<Option<ItemRequest>> {
        let row = sqlx::query(
            r#"
            SELECT request_id, description, requestor_id, created_at
            FROM item_requests
            WHERE request_id = $1
            "#,
        )
        .bind(request_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_request))
    }

    async fn find_by_requestor(&self, requestor_id: UserId) -> Result<Vec<ItemRequest>> {
        let rows = sqlx::query(
            r#"
            SELECT request_id, description, requestor_id, created_at
            FROM item_requests
            WHERE requestor_id = $1
            ORDER BY created_at DESC, request_id DESC
            "#,
        )
        .bind(requestor_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_request).collect())
    }

    async fn find_all(&self) -> Result<Vec<ItemRequest>> {
        let rows = sqlx::query(
            r#"
            SELECT request_id, description, requestor_id, created_at
            FROM item_requests
            ORDER BY created_at DESC, request_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_request).collect())
    }
}
