//! PostgreSQL 用户集合
//!
//! `seq` 记录插入顺序，列表按它倒序；全文检索走 `name` 上的 GIN 索引。

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;

use super::model::{NewUser, User, UserUpdate};
use super::repository::{parse_id, search_terms, skip_for, StoreResult, UserRepository};

pub struct PgUserRepository {
    pool: PgPool,
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 建表和全文索引，可重复执行
    pub async fn ensure_collection(&self) -> StoreResult<()> {
        info!("Ensuring users collection exists");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                seq BIGSERIAL NOT NULL,
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name TEXT NOT NULL DEFAULT '',
                age DOUBLE PRECISION,
                file TEXT NOT NULL DEFAULT '',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS users_seq_idx ON users (seq)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS users_name_text_idx ON users USING GIN (to_tsvector('simple', name))",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn count(&self) -> StoreResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn list(&self, page: u64, per_page: u64) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, age, file, created_at, updated_at
            FROM users
            ORDER BY seq DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(to_i64(per_page))
        .bind(to_i64(skip_for(page, per_page)))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let id = parse_id(id)?;
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, age, file, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, age, file, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, age, file, created_at, updated_at
            "#,
        )
        .bind(&user.name)
        .bind(user.age)
        .bind(&user.file)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update_by_id(&self, id: &str, update: UserUpdate) -> StoreResult<bool> {
        let id = parse_id(id)?;
        let result =
            sqlx::query("UPDATE users SET name = $1, age = $2, updated_at = $3 WHERE id = $4")
                .bind(&update.name)
                .bind(update.age)
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        let id = parse_id(id)?;
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM users")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn search(&self, text: &str) -> StoreResult<Vec<User>> {
        // 词已经只含字母数字，可以直接拼成 tsquery
        let terms = search_terms(text);
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        let query = terms.join(" | ");

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, age, file, created_at, updated_at
            FROM users
            WHERE to_tsvector('simple', name) @@ to_tsquery('simple', $1)
            ORDER BY ts_rank(to_tsvector('simple', name), to_tsquery('simple', $1)) DESC, seq DESC
            "#,
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }
}
