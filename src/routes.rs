use axum::{routing::post, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::notification::notification_dto::{
    CreateNotificationRequest, CreateNotificationResponse, DeleteNotificationsRequest,
    DeleteNotificationsResponse,
};
use crate::notification::notification_handlers;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        notification_handlers::create_notification,
        notification_handlers::delete_notifications,
    ),
    components(
        schemas(
            CreateNotificationRequest,
            CreateNotificationResponse,
            DeleteNotificationsRequest,
            DeleteNotificationsResponse,
        )
    ),
    tags(
        (name = "notifications", description = "Event reminder scheduling endpoints")
    )
)]
struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let notification_routes = Router::new().route(
        "/",
        post(notification_handlers::create_notification)
            .delete(notification_handlers::delete_notifications),
    );

    let api_routes = Router::new().nest("/notifications", notification_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
