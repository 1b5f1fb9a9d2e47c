//! Authentication handlers - admin login, session check, logout.

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::{HttpRequest, HttpResponse, web};

use papyr_shared::dto::{AckResponse, AuthCheckResponse, LoginRequest};
use papyr_store::sessions::SESSION_TTL;

use crate::middleware::auth::{OptionalSession, SESSION_COOKIE};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let Some(admin_hash) = state.admin_password_hash.as_deref() else {
        return Err(AppError::Internal(
            "Admin password not configured".to_string(),
        ));
    };

    let valid = state
        .passwords
        .verify(&req.password, admin_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = state.sessions.issue().await?;

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(SESSION_TTL.as_secs() as i64))
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).json(AckResponse::ok()))
}

/// GET /api/auth/check
pub async fn check(session: OptionalSession) -> HttpResponse {
    let authenticated = session.0.is_some();
    let body = AuthCheckResponse { authenticated };

    if authenticated {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::Unauthorized().json(body)
    }
}

/// POST /api/auth/logout
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        state.sessions.revoke(cookie.value()).await?;
    }

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    Ok(HttpResponse::Ok().cookie(removal).json(AckResponse::ok()))
}
