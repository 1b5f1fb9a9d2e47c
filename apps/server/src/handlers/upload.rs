//! Media upload handler - stores raw bytes through the object store port and
//! returns the public URL.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{Datelike, Utc};

use papyr_core::id;
use papyr_shared::dto::{UploadQuery, UploadResponse};

use crate::middleware::auth::SessionIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/upload?filename=name.ext
///
/// The body is the raw file content; the original filename is only consulted
/// for its extension. Objects land under `yyyy/mm/{id}.{ext}`.
pub async fn upload(
    state: web::Data<AppState>,
    _identity: SessionIdentity,
    query: web::Query<UploadQuery>,
    req: HttpRequest,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    if body.is_empty() {
        return Err(AppError::BadRequest("No file provided".to_string()));
    }

    let ext = query
        .filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or("bin");

    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream");

    let now = Utc::now();
    let key = format!("{}/{:02}/{}.{}", now.year(), now.month(), id::new_id(), ext);

    state
        .objects
        .put(&key, body.to_vec(), content_type)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(key = %key, "stored upload");

    let url = format!("{}/{}", state.media_public_base, key);
    Ok(HttpResponse::Ok().json(UploadResponse { url }))
}
