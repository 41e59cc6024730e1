use crate::notification::NotificationService;

#[derive(Clone)]
pub struct AppState {
    pub notification_service: NotificationService,
}
