//! In-memory doubles for the storage and mail seams, with injectable
//! failures, so sweep and batch semantics can be tested against an explicit
//! clock instead of a live database and relay.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::notification_models::Notification;
use super::notification_repository::NotificationStore;
use crate::error::{AppError, Result};
use crate::mailer::{MailError, ReminderMailer};

fn storage_error() -> AppError {
    AppError::Database(sqlx::Error::PoolClosed)
}

pub struct MemoryStore {
    rows: Mutex<BTreeMap<i64, Notification>>,
    next_id: AtomicI64,
    // Remaining inserts that will succeed; usize::MAX means unlimited.
    allowed_inserts: AtomicUsize,
    fail_removes: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            allowed_inserts: AtomicUsize::new(usize::MAX),
            fail_removes: AtomicBool::new(false),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_after_inserts(&self, allowed: usize) {
        self.allowed_inserts.store(allowed, Ordering::SeqCst);
    }

    pub fn fail_removes(&self, fail: bool) {
        self.fail_removes.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, id: i64) -> bool {
        self.rows.lock().unwrap().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn get(&self, id: i64) -> Option<Notification> {
        self.rows.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn insert_reminder(
        &self,
        user_email: &str,
        event_name: &str,
        event_time: DateTime<Utc>,
        notify_time: DateTime<Utc>,
    ) -> Result<i64> {
        let remaining = self.allowed_inserts.load(Ordering::SeqCst);
        if remaining == 0 {
            return Err(storage_error());
        }
        if remaining != usize::MAX {
            self.allowed_inserts.store(remaining - 1, Ordering::SeqCst);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.rows.lock().unwrap().insert(
            id,
            Notification {
                id,
                user_email: user_email.to_string(),
                event_name: event_name.to_string(),
                event_time,
                notify_time,
            },
        );
        Ok(id)
    }

    async fn delete_reminder(&self, id: i64) -> Result<bool> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Notification>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|n| n.notify_time <= now)
            .cloned()
            .collect())
    }

    async fn remove_delivered(&self, id: i64) -> Result<()> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(storage_error());
        }
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    failing: AtomicBool,
    sent: Mutex<Vec<(Vec<String>, String, String)>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(Vec<String>, String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ReminderMailer for RecordingMailer {
    async fn send_reminder(
        &self,
        recipients: &[String],
        event_name: &str,
        event_time_text: &str,
    ) -> std::result::Result<(), MailError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailError::Build("relay unavailable".to_string()));
        }
        self.sent.lock().unwrap().push((
            recipients.to_vec(),
            event_name.to_string(),
            event_time_text.to_string(),
        ));
        Ok(())
    }
}
