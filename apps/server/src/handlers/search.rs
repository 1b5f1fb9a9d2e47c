//! Keyword search handler.

use actix_web::{HttpResponse, web};

use papyr_shared::dto::SearchQuery;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/search?q=keyword
///
/// A bounded linear scan over recent published posts; an empty keyword
/// short-circuits to an empty result.
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let hits = state.content.search(&query.q).await?;
    Ok(HttpResponse::Ok().json(hits))
}
