//! 进程内用户集合

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{NewUser, User, UserUpdate};
use super::repository::{parse_id, search_terms, skip_for, StoreResult, UserRepository};

/// 按插入顺序保存记录
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn count(&self) -> StoreResult<u64> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn list(&self, page: u64, per_page: u64) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .rev()
            .skip(to_usize(skip_for(page, per_page)))
            .take(to_usize(per_page))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let id = parse_id(id)?;
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            age: user.age,
            file: user.file,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn update_by_id(&self, id: &str, update: UserUpdate) -> StoreResult<bool> {
        let id = parse_id(id)?;
        let mut users = self.users.write().await;
        match users.iter_mut().find(|user| user.id == id) {
            Some(user) => {
                user.name = update.name;
                user.age = update.age;
                user.updated_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        let id = parse_id(id)?;
        let mut users = self.users.write().await;
        match users.iter().position(|user| user.id == id) {
            Some(index) => {
                users.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        let mut users = self.users.write().await;
        let removed = users.len() as u64;
        users.clear();
        Ok(removed)
    }

    async fn search(&self, text: &str) -> StoreResult<Vec<User>> {
        let terms = search_terms(text);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let users = self.users.read().await;
        Ok(users
            .iter()
            .rev()
            .filter(|user| {
                search_terms(&user.name)
                    .iter()
                    .any(|word| terms.contains(word))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::users::repository::StoreError;

    fn new_user(name: &str, age: f64) -> NewUser {
        NewUser {
            name: name.to_string(),
            age: Some(age),
            file: format!("data:image/png;base64,{}", name),
        }
    }

    async fn seeded(n: usize) -> MemoryUserRepository {
        let repo = MemoryUserRepository::new();
        for i in 0..n {
            repo.create(new_user(&format!("user-{:02}", i), i as f64))
                .await
                .unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_list_pages_are_disjoint_and_newest_first() {
        let repo = seeded(25).await;

        let page1 = repo.list(1, 10).await.unwrap();
        let page2 = repo.list(2, 10).await.unwrap();
        let page3 = repo.list(3, 10).await.unwrap();

        assert_eq!(page1.len(), 10);
        assert_eq!(page2.len(), 10);
        assert_eq!(page3.len(), 5);
        assert_eq!(page1[0].name, "user-24");
        assert_eq!(page2[0].name, "user-14");
        assert_eq!(page3[4].name, "user-00");
        assert!(page2.iter().all(|u| !page1.contains(u)));
        assert!(repo.list(4, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_after_create() {
        let repo = MemoryUserRepository::new();
        let created = repo.create(new_user("Alice", 30.0)).await.unwrap();

        let found = repo
            .find_by_id(&created.id.to_string())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found, created);
        assert_eq!(found.name, "Alice");
        assert_eq!(found.age, Some(30.0));
        assert_eq!(found.file, "data:image/png;base64,Alice");
        assert!(found.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_find_missing_and_malformed() {
        let repo = seeded(3).await;

        let missing = repo.find_by_id(&Uuid::new_v4().to_string()).await.unwrap();
        assert!(missing.is_none());

        assert!(matches!(
            repo.find_by_id("nope").await,
            Err(StoreError::MalformedId(_))
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_file_and_created_at() {
        let repo = MemoryUserRepository::new();
        let created = repo.create(new_user("Alice", 30.0)).await.unwrap();
        let id = created.id.to_string();

        let matched = repo
            .update_by_id(
                &id,
                UserUpdate {
                    name: "Alicia".to_string(),
                    age: Some(31.0),
                },
            )
            .await
            .unwrap();
        assert!(matched);

        let updated = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.age, Some(31.0));
        assert_eq!(updated.file, created.file);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_missing_is_noop() {
        let repo = seeded(2).await;
        let matched = repo
            .update_by_id(
                &Uuid::new_v4().to_string(),
                UserUpdate {
                    name: "ghost".to_string(),
                    age: None,
                },
            )
            .await
            .unwrap();
        assert!(!matched);
        assert_eq!(repo.search("ghost").await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let repo = seeded(3).await;
        let victim = repo.list(1, 1).await.unwrap().remove(0);
        let id = victim.id.to_string();

        assert!(repo.delete_by_id(&id).await.unwrap());
        assert!(repo.find_by_id(&id).await.unwrap().is_none());
        assert!(!repo.delete_by_id(&id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let repo = seeded(7).await;
        assert_eq!(repo.delete_all().await.unwrap(), 7);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_matches_any_word() {
        let repo = MemoryUserRepository::new();
        repo.create(new_user("Alice Smith", 30.0)).await.unwrap();
        repo.create(new_user("Bob", 40.0)).await.unwrap();
        repo.create(new_user("alice", 22.0)).await.unwrap();
        repo.create(new_user("Alicea", 50.0)).await.unwrap();

        let hits = repo.search("ALICE").await.unwrap();
        let names: Vec<_> = hits.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "Alice Smith"]);

        let hits = repo.search("bob smith").await.unwrap();
        assert_eq!(hits.len(), 2);

        assert!(repo.search("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_hyphenated_names() {
        let repo = MemoryUserRepository::new();
        repo.create(new_user("user-07", 7.0)).await.unwrap();
        repo.create(new_user("user08", 8.0)).await.unwrap();

        assert_eq!(repo.search("07").await.unwrap().len(), 1);
        assert_eq!(repo.search("user-07").await.unwrap().len(), 1);
        assert_eq!(repo.search("user").await.unwrap().len(), 1);
    }
}
