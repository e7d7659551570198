//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Handlers see the authenticated caller as a domain [`Principal`]. The
//! session cookie is private (encrypted), so a value that fails to decode
//! means a stale or foreign cookie and is treated as logged out.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Principal, Role, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLE_KEY: &str = "role";
pub(crate) const LOGIN_REQUIRED: &str = "login required";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated caller, rotating the session first.
    pub fn persist_principal(&self, principal: &Principal) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, principal.user_id().get())
            .and_then(|()| self.0.insert(ROLE_KEY, principal.role().as_str()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current caller from the session, if present and well formed.
    pub fn principal(&self) -> Result<Option<Principal>, Error> {
        let read_error = |error: actix_session::SessionGetError| {
            Error::internal(format!("failed to read session: {error}"))
        };
        let id = self.0.get::<i64>(USER_ID_KEY).map_err(read_error)?;
        let role = self.0.get::<String>(ROLE_KEY).map_err(read_error)?;
        let (Some(id), Some(role)) = (id, role) else {
            return Ok(None);
        };

        let user_id = match UserId::new(id) {
            Ok(user_id) => user_id,
            Err(error) => {
                warn!("invalid user id in session cookie: {error}");
                return Ok(None);
            }
        };
        match role.parse::<Role>() {
            Ok(role) => Ok(Some(Principal::new(user_id, role))),
            Err(error) => {
                warn!("invalid role in session cookie: {error}");
                Ok(None)
            }
        }
    }

    /// Require an authenticated caller or return `401 Unauthorized`.
    pub fn require_principal(&self) -> Result<Principal, Error> {
        self.principal()?
            .ok_or_else(|| Error::unauthorized(LOGIN_REQUIRED))
    }

    /// Drop all session state and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/require",
                web::get().to(|session: SessionContext| async move {
                    let principal = session.require_principal()?;
                    Ok::<_, Error>(HttpResponse::Ok().body(format!(
                        "{}:{}",
                        principal.user_id(),
                        principal.role()
                    )))
                }),
            )
    }

    fn session_cookie(res: &actix_web::dev::ServiceResponse) -> actix_web::cookie::Cookie<'static> {
        crate::inbound::http::test_utils::session_cookie(res).expect("session cookie set")
    }

    #[actix_web::test]
    async fn round_trips_principal() {
        let app = test::init_service(session_test_app().route(
            "/set",
            web::get().to(|session: SessionContext| async move {
                let id = UserId::new(42).expect("fixture id");
                session.persist_principal(&Principal::new(id, Role::Mentee))?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res);

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, "42:mentee");
    }

    #[actix_web::test]
    async fn missing_principal_is_unauthorised() {
        let app = test::init_service(session_test_app()).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/require").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case::non_positive_id(0_i64, "mentee")]
    #[case::unknown_role(7_i64, "admin")]
    #[actix_web::test]
    async fn tampered_session_is_unauthorised(#[case] id: i64, #[case] role: &'static str) {
        let app = test::init_service(session_test_app().route(
            "/set-invalid",
            web::get().to(move |session: Session| async move {
                session.insert(USER_ID_KEY, id).expect("set user id");
                session.insert(ROLE_KEY, role).expect("set role");
                HttpResponse::Ok()
            }),
        ))
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = session_cookie(&set_res);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
