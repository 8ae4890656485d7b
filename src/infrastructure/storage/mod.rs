use crate::core::errors::UserbaseError;
use crate::core::models::user::{NewUser, User, UserChanges};
use async_trait::async_trait;

/// Persistence collaborator for user rows.
///
/// Every method is a single-row operation and is atomic with respect to the
/// store. Lookups that miss return `Ok(None)` / `Ok(false)`; the service turns
/// those into [`UserbaseError::UserNotFound`].
#[async_trait]
pub trait Storage: Send + Sync {
    /// Assigns the next id and both timestamps.
    async fn create_user(&self, user: NewUser) -> Result<User, UserbaseError>;
    /// All rows in ascending id order.
    async fn list_users(&self) -> Result<Vec<User>, UserbaseError>;
    async fn get_user(&self, user_id: i64) -> Result<Option<User>, UserbaseError>;
    /// Applies the supplied fields and refreshes `updated_at`.
    async fn update_user(&self, user_id: i64, changes: UserChanges) -> Result<Option<User>, UserbaseError>;
    async fn delete_user(&self, user_id: i64) -> Result<bool, UserbaseError>;
    /// Drops every row and restarts the id sequence.
    async fn reset(&self) -> Result<(), UserbaseError>;
}

pub mod in_memory;
