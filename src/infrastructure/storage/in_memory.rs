use crate::core::errors::UserbaseError;
use crate::core::models::user::{NewUser, User, UserChanges};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

// Emails are not unique: several rows may share one.
#[derive(Clone)]
pub struct InMemoryStorage {
    users: Arc<RwLock<BTreeMap<i64, User>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            users: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user(&self, user: NewUser) -> Result<User, UserbaseError> {
        let mut users = self.users.write().await;
        let now = Utc::now();
        let created = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            full_name: user.full_name,
            email: user.email,
            password: user.password,
            created_at: now,
            updated_at: now,
        };
        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserbaseError> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>, UserbaseError> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    async fn update_user(&self, user_id: i64, changes: UserChanges) -> Result<Option<User>, UserbaseError> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&user_id).map(|user| {
            changes.apply_to(user);
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete_user(&self, user_id: i64) -> Result<bool, UserbaseError> {
        let mut users = self.users.write().await;
        Ok(users.remove(&user_id).is_some())
    }

    async fn reset(&self) -> Result<(), UserbaseError> {
        let mut users = self.users.write().await;
        users.clear();
        self.next_id.store(1, Ordering::SeqCst);
        Ok(())
    }
}
