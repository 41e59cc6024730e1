use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One pending reminder. A row exists in storage iff the reminder has not
/// been delivered or cancelled — there is no status column.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: i64,
    pub user_email: String,
    pub event_name: String,
    pub event_time: DateTime<Utc>,
    pub notify_time: DateTime<Utc>,
}

/// Fire times for one registration, in (day-before, two-hours-before) order.
///
/// Both are strictly earlier than the event time. Returns `None` when the
/// event time sits so close to chrono's lower bound that subtracting an
/// offset would leave the representable range.
pub fn reminder_times(event_time: DateTime<Utc>) -> Option<[DateTime<Utc>; 2]> {
    Some([
        event_time.checked_sub_signed(Duration::hours(24))?,
        event_time.checked_sub_signed(Duration::hours(2))?,
    ])
}

/// Format used in the reminder email body, UTC.
pub fn format_event_time(event_time: DateTime<Utc>) -> String {
    event_time.format("%Y-%m-%d %H:%M:%S").to_string()
}
