//! Login and current-user handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"ada","password":"secret"}
//! GET  /api/v1/auth/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    ApiResult, Error, LoginCredentials, LoginValidationError, Notification, RelationshipSummary,
    User,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Verify credentials and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Response body for `GET /api/v1/auth/me`.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub user: User,
    pub relationships: RelationshipSummary,
    pub notifications: Vec<Notification>,
}

/// The caller's profile, relationship lists, and recent notifications.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user profile", body = CurrentUserResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn current_user(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<CurrentUserResponse>> {
    let user_id = session.require_user_id()?;
    let profile = state.profile.profile(&user_id).await?;
    Ok(web::Json(CurrentUserResponse {
        user: profile.user,
        relationships: profile.relationships,
        notifications: profile.notifications,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    use crate::test_support::seeded_backend;

    fn test_app(
        state: web::Data<crate::inbound::http::state::HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(state).service(
            web::scope("/api/v1")
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .service(login)
                .service(current_user),
        )
    }

    #[rstest]
    #[case("   ", "password", "username", "empty_username")]
    #[case("ada", "", "password", "empty_password")]
    #[actix_web::test]
    async fn login_rejects_blank_fields(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] detail_code: &str,
    ) {
        let backend = seeded_backend();
        let app = actix_test::init_service(test_app(web::Data::new(backend.state))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(&LoginRequest {
                    username: username.into(),
                    password: password.into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["code"], "invalid_request");
        assert_eq!(value["details"]["field"], field);
        assert_eq!(value["details"]["code"], detail_code);
    }

    #[actix_web::test]
    async fn unknown_username_is_unauthorised() {
        let backend = seeded_backend();
        let app = actix_test::init_service(test_app(web::Data::new(backend.state))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(&LoginRequest {
                    username: "nobody".into(),
                    password: "password".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["message"], "invalid credentials");
    }
}
