use crate::core::constants::{MAX_FIELD_LENGTH, USER_CREATED, USER_DELETED, USER_UPDATED};
use crate::core::errors::{FieldError, UserbaseError};
use crate::core::models::{
    audit::AppLog,
    user::{NewUser, User, UserChanges},
};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use serde_json::json;
use tracing::{debug, info, warn};

pub struct UserbaseService<L: LoggingService, S: Storage> {
    storage: S,
    logging: L,
}

impl<L: LoggingService, S: Storage> UserbaseService<L, S> {
    pub fn new(storage: S, logging: L) -> Self {
        UserbaseService { storage, logging }
    }

    /// Direct access to the store, for fixtures and schema resets.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Path ids arrive as text. Anything that is not a valid row id cannot
    /// resolve to a row, so it is reported as not found.
    fn parse_user_id(user_id: &str) -> Result<i64, UserbaseError> {
        user_id
            .trim()
            .parse::<i64>()
            .map_err(|_| UserbaseError::UserNotFound(user_id.to_string()))
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), UserbaseError> {
        if value.trim().is_empty() {
            return Err(UserbaseError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.chars().count() > max_length {
            return Err(UserbaseError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        if value.chars().any(char::is_control) {
            return Err(UserbaseError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} contains invalid characters", field),
                },
            ));
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<(), UserbaseError> {
        self.validate_string_input("email", email, MAX_FIELD_LENGTH)?;
        if !email.contains('@') {
            return Err(UserbaseError::InvalidInput(
                "email".to_string(),
                FieldError {
                    field: "email".to_string(),
                    title: "Invalid email".to_string(),
                    description: format!("{} is not a valid email address", email),
                },
            ));
        }
        Ok(())
    }

    fn validate_changes(&self, changes: &UserChanges) -> Result<(), UserbaseError> {
        if let Some(full_name) = &changes.full_name {
            self.validate_string_input("full_name", full_name, MAX_FIELD_LENGTH)?;
        }
        if let Some(email) = &changes.email {
            self.validate_email(email)?;
        }
        if let Some(password) = &changes.password {
            self.validate_string_input("password", password, MAX_FIELD_LENGTH)?;
        }
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, UserbaseError> {
        let users = self.storage.list_users().await?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, UserbaseError> {
        let id = Self::parse_user_id(user_id)?;
        self.storage
            .get_user(id)
            .await?
            .ok_or_else(|| UserbaseError::UserNotFound(user_id.to_string()))
    }

    // The store change has already committed when this runs, so a failing
    // action log must not turn a successful mutation into an error.
    async fn record(&self, action: &str, details: serde_json::Value, user_id: i64) {
        if let Err(e) = self.logging.log_action(action, details, Some(user_id)).await {
            warn!(action, user_id, error = %e, "failed to record action");
        }
    }

    pub async fn create_user(&self, user: NewUser) -> Result<User, UserbaseError> {
        self.validate_string_input("full_name", &user.full_name, MAX_FIELD_LENGTH)?;
        self.validate_email(&user.email)?;
        self.validate_string_input("password", &user.password, MAX_FIELD_LENGTH)?;

        let created = self.storage.create_user(user).await?;
        self.record(
            USER_CREATED,
            json!({ "full_name": created.full_name, "email": created.email }),
            created.id,
        )
        .await;
        info!(user_id = created.id, "user created");
        Ok(created)
    }

    /// Resolves the row before looking at `changes`: an unknown id is
    /// reported as not found whatever the payload holds.
    pub async fn update_user(&self, user_id: &str, changes: UserChanges) -> Result<User, UserbaseError> {
        let id = self.get_user(user_id).await?.id;
        self.validate_changes(&changes)?;

        let changed_fields: Vec<&str> = [
            changes.full_name.as_ref().map(|_| "full_name"),
            changes.email.as_ref().map(|_| "email"),
            changes.password.as_ref().map(|_| "password"),
        ]
        .into_iter()
        .flatten()
        .collect();

        let updated = self
            .storage
            .update_user(id, changes)
            .await?
            .ok_or_else(|| UserbaseError::UserNotFound(user_id.to_string()))?;
        self.record(USER_UPDATED, json!({ "fields": changed_fields }), updated.id)
            .await;
        info!(user_id = updated.id, ?changed_fields, "user updated");
        Ok(updated)
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<(), UserbaseError> {
        let id = Self::parse_user_id(user_id)?;
        if !self.storage.delete_user(id).await? {
            return Err(UserbaseError::UserNotFound(user_id.to_string()));
        }
        self.record(USER_DELETED, json!({}), id).await;
        info!(user_id = id, "user deleted");
        Ok(())
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, UserbaseError> {
        self.logging.get_logs().await
    }
}
