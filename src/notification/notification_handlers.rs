use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::DateTime;
use validator::Validate;

use super::notification_dto::{
    CreateNotificationRequest, CreateNotificationResponse, DeleteNotificationsRequest,
    DeleteNotificationsResponse,
};
use crate::{
    error::{AppError, Result},
    state::AppState,
};

/// Schedule the reminder pair for one registration
#[utoipa::path(
    post,
    path = "/api/notifications",
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, description = "Both reminders scheduled", body = CreateNotificationResponse),
        (status = 400, description = "Invalid email, event name or timestamp"),
        (status = 500, description = "Storage failure, no ids returned")
    ),
    tag = "notifications"
)]
pub async fn create_notification(
    State(state): State<AppState>,
    Json(payload): Json<CreateNotificationRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let event_time = DateTime::from_timestamp(payload.event_time, 0)
        .ok_or_else(|| AppError::BadRequest("event_time is not a valid unix timestamp".into()))?;

    let ids = state
        .notification_service
        .create_notification(&payload.user_email, &payload.event_name, event_time)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateNotificationResponse {
            notification_ids: ids.to_vec(),
        }),
    ))
}

/// Cancel both reminders of a registration
#[utoipa::path(
    delete,
    path = "/api/notifications",
    request_body = DeleteNotificationsRequest,
    responses(
        (status = 200, description = "Both reminders cancelled", body = DeleteNotificationsResponse),
        (status = 400, description = "Exactly two notification ids are required"),
        (status = 404, description = "A referenced notification id does not exist"),
        (status = 500, description = "Storage failure")
    ),
    tag = "notifications"
)]
pub async fn delete_notifications(
    State(state): State<AppState>,
    Json(payload): Json<DeleteNotificationsRequest>,
) -> Result<Json<DeleteNotificationsResponse>> {
    let [id1, id2]: [i64; 2] = payload
        .notification_ids
        .as_slice()
        .try_into()
        .map_err(|_| AppError::BadRequest("exactly two notification ids are required".into()))?;

    state
        .notification_service
        .delete_notifications(id1, id2)
        .await?;

    Ok(Json(DeleteNotificationsResponse { success: true }))
}
