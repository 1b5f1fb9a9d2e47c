//! Health check handler.

use actix_web::HttpResponse;

/// GET /api/health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "papyr-server",
    }))
}
