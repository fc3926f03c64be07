//! Connection-request handlers.
//!
//! ```text
//! POST /api/v1/users/{id}/connect
//! POST /api/v1/users/{id}/connect/respond {"requesterId":"...","action":"accept"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{ApiResult, ConnectionAction, Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

fn parse_path_user(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| Error::invalid_request(format!("invalid user id: {err}")))
}

/// Send a connection request to the user in the path.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/connect",
    params(("id" = String, Path, description = "Target user id")),
    responses(
        (status = 200, description = "Request sent or already pending"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 409, description = "Crossed request or already connected", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["connections"],
    operation_id = "sendConnectionRequest"
)]
#[post("/users/{id}/connect")]
pub async fn send_connection_request(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let requester = session.require_user_id()?;
    let target = parse_path_user(&path.into_inner())?;
    state.connections.send_request(&requester, &target).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({})))
}

/// Request body for `POST /api/v1/users/{id}/connect/respond`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    /// Must match the `{id}` path segment.
    pub requester_id: String,
    pub action: ConnectionAction,
}

/// Accept or decline the pending request from the user in the path.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/connect/respond",
    params(("id" = String, Path, description = "Requesting user id")),
    request_body = RespondRequest,
    responses(
        (status = 200, description = "Request resolved"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No pending request from this user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["connections"],
    operation_id = "respondToConnectionRequest"
)]
#[post("/users/{id}/connect/respond")]
pub async fn respond_to_connection_request(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RespondRequest>,
) -> ApiResult<HttpResponse> {
    let target = session.require_user_id()?;
    let path_requester = parse_path_user(&path.into_inner())?;
    let payload = payload.into_inner();
    let body_requester = UserId::new(&payload.requester_id)
        .map_err(|err| Error::invalid_request(format!("invalid requester id: {err}")))?;
    if body_requester != path_requester {
        return Err(Error::invalid_request(
            "requesterId must match the user id in the path",
        ));
    }
    state
        .connections
        .respond(&target, &path_requester, payload.action)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({})))
}
