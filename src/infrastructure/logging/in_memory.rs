use crate::core::errors::UserbaseError;
use crate::core::models::audit::AppLog;
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Append-only action log held in process memory, oldest entry first.
#[derive(Clone, Default)]
pub struct InMemoryLogging {
    entries: Arc<RwLock<Vec<AppLog>>>,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(&self, action: &str, details: Value, user_id: Option<i64>) -> Result<(), UserbaseError> {
        let fields = match details {
            Value::Object(fields) => fields,
            other => {
                return Err(UserbaseError::LoggingError(format!(
                    "details for {} must be a JSON object, got {}",
                    action, other
                )));
            }
        };
        let entry = AppLog {
            id: Uuid::new_v4().to_string(),
            action: action.to_owned(),
            user_id,
            details: fields.into_iter().collect(),
            timestamp: Utc::now(),
        };
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, UserbaseError> {
        Ok(self.entries.read().await.clone())
    }
}
