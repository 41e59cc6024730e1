use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::notification_models::Notification;
use crate::error::Result;

/// Storage seam for pending reminders. Every operation is a single
/// independently-committed statement; there is no multi-row transaction
/// across the two rows of a registration.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Insert one reminder row, returning the store-assigned id.
    async fn insert_reminder(
        &self,
        user_email: &str,
        event_name: &str,
        event_time: DateTime<Utc>,
        notify_time: DateTime<Utc>,
    ) -> Result<i64>;

    /// Delete one row by id. Returns `false` when no such row exists.
    async fn delete_reminder(&self, id: i64) -> Result<bool>;

    /// Snapshot of every row whose fire time has passed, in arbitrary order.
    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Notification>>;

    /// Delete one row after successful delivery. An already-absent row is
    /// success: a concurrent cancellation may have removed it first.
    async fn remove_delivered(&self, id: i64) -> Result<()>;
}

#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for PgNotificationRepository {
    async fn insert_reminder(
        &self,
        user_email: &str,
        event_name: &str,
        event_time: DateTime<Utc>,
        notify_time: DateTime<Utc>,
    ) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO notifications (user_email, event_name, event_time, notify_time)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(user_email)
        .bind(event_name)
        .bind(event_time)
        .bind(notify_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn delete_reminder(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT id, user_email, event_name, event_time, notify_time
             FROM notifications
             WHERE notify_time <= $1",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    async fn remove_delivered(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
