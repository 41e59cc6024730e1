use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::notification_models::reminder_times;
use super::notification_repository::NotificationStore;
use crate::error::{AppError, Result};

/// Registration-facing operations over the store: scheduling a reminder pair
/// and cancelling one.
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Schedule both reminders for one registration and return their ids in
    /// (day-before, two-hours-before) order.
    ///
    /// The two inserts are not wrapped in a transaction. If the second one
    /// fails the first row stays behind and the caller sees an error with no
    /// ids; the orphan row still fires on its own.
    pub async fn create_notification(
        &self,
        user_email: &str,
        event_name: &str,
        event_time: DateTime<Utc>,
    ) -> Result<[i64; 2]> {
        let [day_before, two_hours_before] = reminder_times(event_time).ok_or_else(|| {
            AppError::BadRequest("event_time is too early for reminder offsets".into())
        })?;

        let first_id = self
            .store
            .insert_reminder(user_email, event_name, event_time, day_before)
            .await?;

        let second_id = match self
            .store
            .insert_reminder(user_email, event_name, event_time, two_hours_before)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(
                    orphan_id = first_id,
                    user_email,
                    "Second reminder insert failed, first row left behind"
                );
                return Err(e);
            }
        };

        Ok([first_id, second_id])
    }

    /// Cancel both reminders of a registration. The second deletion is
    /// attempted even when the first id is missing, so one stale id never
    /// blocks the other row's removal; any missing id is then reported as
    /// `NotFound`, naming it. Deletions that succeeded are not undone.
    pub async fn delete_notifications(&self, id1: i64, id2: i64) -> Result<()> {
        let mut missing = Vec::new();

        for id in [id1, id2] {
            if !self.store.delete_reminder(id).await? {
                missing.push(id.to_string());
            }
        }

        if !missing.is_empty() {
            return Err(AppError::NotFound(format!(
                "No notification found with id(s): {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }
}
