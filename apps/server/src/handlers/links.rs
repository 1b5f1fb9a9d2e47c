//! Friend-link directory handlers.

use actix_web::{HttpResponse, web};

use papyr_core::domain::FriendLink;
use papyr_shared::dto::AckResponse;

use crate::middleware::auth::SessionIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/links
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let links = state.links.list().await?;
    Ok(HttpResponse::Ok().json(links))
}

/// PUT /api/links - replace the whole directory.
pub async fn replace(
    state: web::Data<AppState>,
    identity: SessionIdentity,
    body: web::Json<Vec<FriendLink>>,
) -> AppResult<HttpResponse> {
    state.links.replace(&body.into_inner(), &identity.access).await?;
    Ok(HttpResponse::Ok().json(AckResponse::ok()))
}
