use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserChanges, UserId};

#[derive(Debug, Default)]
struct UserTable {
    rows: BTreeMap<UserId, User>,
    last_id: i64,
}

impl UserTable {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.rows
            .values()
            .any(|user| user.email == email && Some(user.id) != except)
    }
}

/// Mutex-guarded user store with store-assigned, monotonically increasing ids.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Mutex<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, UserTable>, UserPersistenceError> {
        self.table
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .rows
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut table = self.lock()?;
        if table.email_taken(&user.email, None) {
            return Err(UserPersistenceError::conflict());
        }
        let id = UserId::new(table.last_id + 1)
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let stored = User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            followers: user.followers,
            is_active: user.is_active,
            created_at: Some(user.created_at.unwrap_or_else(Utc::now)),
        };
        table.last_id = id.get();
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut table = self.lock()?;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if table.email_taken(&changes.email, Some(id)) {
            return Err(UserPersistenceError::conflict());
        }
        Ok(table.rows.get_mut(&id).map(|user| {
            user.name.clone_from(&changes.name);
            user.email.clone_from(&changes.email);
            user.clone()
        }))
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.rows.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_owned(),
            email: email.to_owned(),
            followers: None,
            is_active: None,
            created_at: None,
        }
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn assigns_increasing_ids_and_lists_in_insertion_order(repo: InMemoryUserRepository) {
        let first = repo.create(&new_user("Zed", "z@example.com")).await.expect("create");
        let second = repo.create(&new_user("Amy", "a@example.com")).await.expect("create");

        assert_eq!((first.id.get(), second.id.get()), (1, 2));
        assert!(first.created_at.is_some());
        let names: Vec<_> = repo
            .find_all()
            .await
            .expect("list")
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Zed", "Amy"]);
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_duplicate_email_on_create(repo: InMemoryUserRepository) {
        repo.create(&new_user("Ada", "ada@example.com")).await.expect("first create");
        let result = repo.create(&new_user("Ada Two", "ada@example.com")).await;
        assert_eq!(result, Err(UserPersistenceError::Conflict));
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_own_email_but_rejects_anothers(repo: InMemoryUserRepository) {
        let ada = repo.create(&new_user("Ada", "ada@example.com")).await.expect("create");
        repo.create(&new_user("Bob", "bob@example.com")).await.expect("create");

        let renamed = repo
            .update(
                ada.id,
                &UserChanges {
                    name: "Augusta".into(),
                    email: "ada@example.com".into(),
                },
            )
            .await
            .expect("update")
            .expect("present");
        assert_eq!(renamed.name, "Augusta");

        let clash = repo
            .update(
                ada.id,
                &UserChanges {
                    name: "Augusta".into(),
                    email: "bob@example.com".into(),
                },
            )
            .await;
        assert_eq!(clash, Err(UserPersistenceError::Conflict));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_is_terminal_and_ids_are_not_reused(repo: InMemoryUserRepository) {
        let ada = repo.create(&new_user("Ada", "ada@example.com")).await.expect("create");

        assert_eq!(repo.delete(ada.id).await.expect("delete"), Some(ada.clone()));
        assert_eq!(repo.delete(ada.id).await.expect("delete"), None);

        let next = repo.create(&new_user("Ada", "ada@example.com")).await.expect("create");
        assert_eq!(next.id.get(), 2);
    }
}
