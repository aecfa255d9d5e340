//! 用户业务服务

use std::sync::Arc;
use tracing::info;

use super::model::{NewUser, User, UserFields, UserUpdate};
use super::repository::UserRepository;
use crate::core::error::CoreError;
use crate::infrastructure::uploads::UploadStore;

/// multipart 中的文件部分
#[derive(Debug, Clone, Default)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// 浏览器在未选择文件时也会发送一个空的文件部分
    pub fn is_empty(&self) -> bool {
        self.file_name.is_empty() && self.bytes.is_empty()
    }
}

/// 一页列表数据
#[derive(Debug, Clone)]
pub struct UserPage {
    pub users: Vec<User>,
    pub current: u64,
    pub pages: u64,
}

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    uploads: UploadStore,
    per_page: u64,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, uploads: UploadStore, per_page: u64) -> Self {
        Self {
            repo,
            uploads,
            per_page: per_page.max(1),
        }
    }

    pub async fn page(&self, page: u64) -> Result<UserPage, CoreError> {
        if page == 0 {
            return Err(CoreError::BadRequest("Page numbers start at 1".to_string()));
        }

        let total = self.repo.count().await?;
        let users = self.repo.list(page, self.per_page).await?;

        Ok(UserPage {
            users,
            current: page,
            pages: total.div_ceil(self.per_page),
        })
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, CoreError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    /// 先把文件落盘，再写库
    pub async fn create_user(
        &self,
        fields: UserFields,
        upload: Option<Upload>,
    ) -> Result<User, CoreError> {
        let file = match upload.filter(|upload| !upload.is_empty()) {
            Some(upload) => {
                let stored = self.uploads.persist(&upload.file_name, &upload.bytes).await?;
                info!(
                    file_name = %stored.file_name,
                    size = upload.bytes.len(),
                    "Stored upload"
                );
                stored.data_uri
            }
            None => String::new(),
        };

        let user = self
            .repo
            .create(NewUser {
                name: fields.name,
                age: fields.age,
                file,
            })
            .await?;

        info!(id = %user.id, name = %user.name, "Created user");
        Ok(user)
    }

    pub async fn update_user(&self, id: &str, fields: UserFields) -> Result<bool, CoreError> {
        let matched = self.repo.update_by_id(id, UserUpdate::from(fields)).await?;
        info!(%id, matched, "Updated user");
        Ok(matched)
    }

    pub async fn remove_user(&self, id: &str) -> Result<bool, CoreError> {
        let removed = self.repo.delete_by_id(id).await?;
        info!(%id, removed, "Removed user");
        Ok(removed)
    }

    pub async fn remove_all(&self) -> Result<u64, CoreError> {
        let removed = self.repo.delete_all().await?;
        info!(removed, "Removed all users");
        Ok(removed)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<User>, CoreError> {
        let users = self.repo.search(query).await?;
        info!(%query, hits = users.len(), "Searched users");
        Ok(users)
    }

    pub async fn close(&self) {
        self.repo.close().await;
    }
}
