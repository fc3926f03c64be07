//! Cookie-session access for handlers.
//!
//! Handlers need exactly two things from the session: write the caller's id
//! at login, and demand one everywhere else. `SessionContext` exposes only
//! those, translating session failures into domain errors so handler
//! signatures stay `Result<_, Error>`.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Extractor granting handlers scoped access to the session cookie.
pub struct SessionContext {
    inner: Session,
}

impl SessionContext {
    /// Store the authenticated caller's id, starting the session.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.inner
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("session write failed: {error}")))
    }

    /// Resolve the authenticated caller or fail with `401 Unauthorized`.
    ///
    /// A stored id that no longer parses as a UUID is treated the same as
    /// an absent session rather than surfacing a server error to whoever
    /// supplied the cookie.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        let stored = self
            .inner
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("session read failed: {error}")))?;
        let Some(raw) = stored else {
            return Err(Error::unauthorized("login required"));
        };
        UserId::new(raw).map_err(|error| {
            warn!("discarding session with malformed user id: {error}");
            Error::unauthorized("login required")
        })
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let inner = Session::from_request(req, payload);
        Box::pin(async move { inner.await.map(|inner| Self { inner }) })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use serde_json::{Value, json};

    use super::*;
    use crate::inbound::http::state::HttpState;
    use crate::inbound::http::test_utils::test_session_middleware;
    use crate::inbound::http::users::{current_user, login};
    use crate::test_support::{TEST_PASSWORD, ada_id, seeded_backend};

    fn session_app(
        state: web::Data<HttpState>,
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
                .wrap(test_session_middleware())
                .service(login)
                .service(current_user)
                // Writes garbage under the session key so tests can cover a
                // cookie whose stored id stopped being a UUID.
                .route(
                    "/corrupt",
                    web::post().to(|session: Session| async move {
                        session
                            .insert(USER_ID_KEY, "not-a-uuid")
                            .expect("write corrupt id");
                        HttpResponse::Ok()
                    }),
                ),
        )
    }

    fn session_cookie(res: &actix_web::dev::ServiceResponse) -> Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    #[actix_web::test]
    async fn login_cookie_identifies_the_caller_on_later_requests() {
        let backend = seeded_backend();
        let app = test::init_service(session_app(web::Data::new(backend.state))).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "username": "ada", "password": TEST_PASSWORD }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/auth/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let profile: Value = test::read_body_json(res).await;
        assert_eq!(profile["user"]["id"], ada_id().to_string());
    }

    #[actix_web::test]
    async fn absent_session_yields_the_login_required_envelope() {
        let backend = seeded_backend();
        let app = test::init_service(session_app(web::Data::new(backend.state))).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/auth/me").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
        assert_eq!(body["message"], "login required");
    }

    #[actix_web::test]
    async fn malformed_stored_id_counts_as_logged_out() {
        let backend = seeded_backend();
        let app = test::init_service(session_app(web::Data::new(backend.state))).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post().uri("/api/v1/corrupt").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/auth/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
