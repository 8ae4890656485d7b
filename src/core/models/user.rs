use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub password: String, // stored as given
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a row that has not been persisted yet; the store assigns
/// `id` and the timestamps.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Partial update. Only `Some` fields overwrite the stored values.
#[derive(Clone, Debug, Default)]
pub struct UserChanges {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UserChanges {
    pub fn apply_to(self, user: &mut User) {
        if let Some(full_name) = self.full_name {
            user.full_name = full_name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
    }
}
