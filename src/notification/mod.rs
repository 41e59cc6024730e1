// Declare submodules
pub mod notification_dispatcher;
pub mod notification_dto;
pub mod notification_handlers;
pub mod notification_models;
pub mod notification_repository;
pub mod notification_service;

#[cfg(test)]
pub mod test_support;

// Re-export public items
pub use notification_dispatcher::start_notification_dispatcher;
pub use notification_repository::{NotificationStore, PgNotificationRepository};
pub use notification_service::NotificationService;
