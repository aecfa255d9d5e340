//! 用户集合的数据访问接口
//!
//! 两个实现：`PgUserRepository`（PostgreSQL，`database` feature）和
//! `MemoryUserRepository`（进程内，未配置数据库时和测试中使用）。

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::model::{NewUser, User, UserUpdate};
use crate::core::error::CoreError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed id: {0:?}")]
    MalformedId(String),

    #[cfg(feature = "database")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::DataAccess(err.to_string())
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn count(&self) -> StoreResult<u64>;

    /// 按插入顺序倒序，跳过 `per_page * (page - 1)` 条，取 `per_page` 条
    async fn list(&self, page: u64, per_page: u64) -> StoreResult<Vec<User>>;

    /// 不存在返回 `Ok(None)`；id 格式错误返回 `StoreError::MalformedId`
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>>;

    async fn create(&self, user: NewUser) -> StoreResult<User>;

    /// 返回是否命中记录，未命中不算错误
    async fn update_by_id(&self, id: &str, update: UserUpdate) -> StoreResult<bool>;

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool>;

    /// 返回删除条数
    async fn delete_all(&self) -> StoreResult<u64>;

    /// 任一查询词与 name 中的某个词匹配即命中（不区分大小写）
    async fn search(&self, text: &str) -> StoreResult<Vec<User>>;

    async fn close(&self) {}
}

pub fn parse_id(id: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| StoreError::MalformedId(id.to_string()))
}

pub fn skip_for(page: u64, per_page: u64) -> u64 {
    per_page.saturating_mul(page.saturating_sub(1))
}

/// 按非字母数字字符切词并转小写
pub fn search_terms(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(|term| term.to_lowercase())
        .collect()
}
