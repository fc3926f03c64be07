//! Notification read-state handlers.
//!
//! ```text
//! POST /api/v1/notifications/{id}/read
//! POST /api/v1/notifications/read-all
//! ```

use actix_web::{HttpResponse, post, web};
use serde::Serialize;

use crate::domain::{ApiResult, Error, NotificationId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Mark one notification read.
#[utoipa::path(
    post,
    path = "/api/v1/notifications/{id}/read",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification marked read"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown or foreign notification", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead"
)]
#[post("/notifications/{id}/read")]
pub async fn mark_notification_read(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = NotificationId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(format!("invalid notification id: {err}")))?;
    state.notifications.mark_read(&id, &owner).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({})))
}

/// Response body for `POST /api/v1/notifications/read-all`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ReadAllResponse {
    /// Number of notifications flipped from unread to read.
    pub updated: u64,
}

/// Mark every unread notification for the caller read.
#[utoipa::path(
    post,
    path = "/api/v1/notifications/read-all",
    responses(
        (status = 200, description = "Unread notifications marked read", body = ReadAllResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "markAllNotificationsRead"
)]
#[post("/notifications/read-all")]
pub async fn mark_all_notifications_read(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ReadAllResponse>> {
    let owner = session.require_user_id()?;
    let updated = state.notifications.mark_all_read(&owner).await?;
    Ok(web::Json(ReadAllResponse { updated }))
}
