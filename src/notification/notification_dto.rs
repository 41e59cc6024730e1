use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNotificationRequest {
    #[validate(email)]
    pub user_email: String,
    #[validate(length(min = 1, max = 500))]
    pub event_name: String,
    /// Event start, unix seconds (UTC).
    pub event_time: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateNotificationResponse {
    /// Exactly two ids, in (day-before, two-hours-before) order.
    pub notification_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteNotificationsRequest {
    /// The two ids returned by the corresponding create call.
    pub notification_ids: Vec<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteNotificationsResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_rejects_bad_email() {
        let req = CreateNotificationRequest {
            user_email: "not-an-email".to_string(),
            event_name: "Gala".to_string(),
            event_time: 1_741_600_800,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_empty_name() {
        let req = CreateNotificationRequest {
            user_email: "a@x.com".to_string(),
            event_name: String::new(),
            event_time: 1_741_600_800,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_accepts_valid_input() {
        let req = CreateNotificationRequest {
            user_email: "a@x.com".to_string(),
            event_name: "Gala".to_string(),
            event_time: 1_741_600_800,
        };
        assert!(req.validate().is_ok());
    }
}
