use super::rows::{USER_COLUMNS, map_user};
use crate::domain::{NewUser, User, UserId};
use crate::ports::{Result, UserRepository as UserRepositoryTrait, UserWriteOutcome};
use async_trait::async_trait;
use sqlx::PgPool;

/// 一意制約違反（uq_users_email）を重複メールの結果に変換する
fn duplicate_email_or<T>(
    result: std::result::Result<T, sqlx::Error>,
) -> Result<UserWriteOutcome<T>> {
    match result {
        Ok(value) => Ok(UserWriteOutcome::Saved(value)),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Ok(UserWriteOutcome::DuplicateEmail)
        }
        Err(e) => Err(e.into()),
    }
}

/// UserRepositoryのPostgreSQL実装
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_user))
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY user_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_user).collect())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert(&self, user: NewUser) -> Result<UserWriteOutcome<User>> {
        let inserted = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING user_id",
        )
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await;

        Ok(match duplicate_email_or(inserted)? {
            UserWriteOutcome::Saved(user_id) => {
                UserWriteOutcome::Saved(user.persisted(UserId::new(user_id)))
            }
            UserWriteOutcome::DuplicateEmail => UserWriteOutcome::DuplicateEmail,
        })
    }

    async fn update(&self, user: &User) -> Result<UserWriteOutcome<()>> {
        let updated = sqlx::query("UPDATE users SET name = $2, email = $3 WHERE user_id = $1")
            .bind(user.user_id.value())
            .bind(&user.name)
            .bind(&user.email)
            .execute(&self.pool)
            .await
            .map(|_| ());

        duplicate_email_or(updated)
    }

    /// アイテム・予約・コメント・リクエストは外部キーで連鎖削除される
    async fn delete(&self, user_id: UserId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.value())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
