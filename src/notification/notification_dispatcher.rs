use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{error, info, warn};

use super::notification_models::format_event_time;
use super::notification_repository::NotificationStore;
use crate::mailer::ReminderMailer;

/// Start the once-a-minute delivery sweep. The returned scheduler handle is
/// held by the caller and shut down on process termination.
pub async fn start_notification_dispatcher(
    store: Arc<dyn NotificationStore>,
    mailer: Arc<dyn ReminderMailer>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _l| {
        let store = store.clone();
        let mailer = mailer.clone();

        Box::pin(async move {
            sweep(store.as_ref(), mailer.as_ref(), Utc::now()).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!("Notification dispatcher started");
    Ok(scheduler)
}

/// One delivery pass: every row due at `now` gets one send attempt, and only
/// delivered rows are removed. A failed send leaves the row for the next
/// tick, so delivery retries until it succeeds or the pair is cancelled. A
/// failed removal after a successful send also leaves the row, which is the
/// one place a reminder can go out twice.
pub async fn sweep(store: &dyn NotificationStore, mailer: &dyn ReminderMailer, now: DateTime<Utc>) {
    let due = match store.find_due(now).await {
        Ok(due) => due,
        Err(e) => {
            error!("Failed to query due notifications: {:?}", e);
            return;
        }
    };

    for notification in due {
        let recipients = [notification.user_email.clone()];
        let event_time_text = format_event_time(notification.event_time);

        if let Err(e) = mailer
            .send_reminder(&recipients, &notification.event_name, &event_time_text)
            .await
        {
            warn!(
                id = notification.id,
                recipient = %notification.user_email,
                "Failed to send reminder: {:?}",
                e
            );
            continue;
        }

        if let Err(e) = store.remove_delivered(notification.id).await {
            warn!(
                id = notification.id,
                "Failed to remove delivered notification: {:?}",
                e
            );
            continue;
        }

        info!(
            id = notification.id,
            event_name = %notification.event_name,
            "Reminder delivered"
        );
    }
}
