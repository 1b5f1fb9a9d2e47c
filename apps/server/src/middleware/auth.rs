//! Session authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::LocalBoxFuture;

use papyr_core::ports::WriteAccess;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Name of the session cookie set on login.
pub const SESSION_COOKIE: &str = "session";

/// Authenticated session extractor.
///
/// Resolves the `session` cookie against the session store and yields the
/// [`WriteAccess`] capability mutating handlers pass down to the content
/// store. Missing or invalid sessions fail with 401, which stays distinct
/// from any 404 the handler itself might return.
pub struct SessionIdentity {
    pub access: WriteAccess,
}

impl FromRequest for SessionIdentity {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                tracing::error!("AppState not found in app data");
                AppError::Internal("Server configuration error".to_string())
            })?;
            let token = token.ok_or(AppError::Unauthorized)?;

            match state.sessions.validate(&token).await? {
                Some(access) => Ok(SessionIdentity { access }),
                None => Err(AppError::Unauthorized),
            }
        })
    }
}

/// Optional session extractor - doesn't fail if not authenticated.
pub struct OptionalSession(pub Option<SessionIdentity>);

impl FromRequest for OptionalSession {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let inner = SessionIdentity::from_request(req, payload);
        Box::pin(async move {
            match inner.await {
                Ok(identity) => Ok(OptionalSession(Some(identity))),
                Err(AppError::Unauthorized) => Ok(OptionalSession(None)),
                Err(other) => Err(other),
            }
        })
    }
}
