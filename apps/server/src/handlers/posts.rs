//! Post handlers - listing, lookup, create/update/delete, view counting.

use actix_web::{HttpResponse, web};

use papyr_core::domain::PostDraft;
use papyr_shared::dto::{AckResponse, ListPostsQuery};
use papyr_store::content::ListQuery;

use crate::middleware::auth::{OptionalSession, SessionIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts
///
/// Public paginated listing; `all=true` switches to the unfiltered,
/// unpaginated admin traversal and requires a valid session.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
    session: OptionalSession,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    let page = if query.all {
        if session.0.is_none() {
            return Err(AppError::Unauthorized);
        }
        state.content.list_all(true).await?
    } else {
        state
            .content
            .list(ListQuery {
                page: query.page(),
                page_size: query.limit(),
                include_drafts: false,
            })
            .await?
    };

    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/post/{slug_or_id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let slug_or_id = path.into_inner();

    match state.content.get(&slug_or_id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(post)),
        None => Err(AppError::NotFound("Post not found".to_string())),
    }
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: SessionIdentity,
    body: web::Json<PostDraft>,
) -> AppResult<HttpResponse> {
    let post = state
        .content
        .create(body.into_inner(), &identity.access)
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /api/post/{slug_or_id}
pub async fn update(
    state: web::Data<AppState>,
    identity: SessionIdentity,
    path: web::Path<String>,
    body: web::Json<PostDraft>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state
        .content
        .update(&post_id, body.into_inner(), &identity.access)
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/post/{slug_or_id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: SessionIdentity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    if !state.content.delete(&post_id, &identity.access).await? {
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(AckResponse::ok()))
}

/// POST /api/post/{slug_or_id}/view
///
/// Always acknowledges; a missing post is not worth surfacing to the
/// reader-side beacon that calls this.
pub async fn view(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let slug_or_id = path.into_inner();

    if let Some(post) = state.content.get(&slug_or_id).await? {
        state.content.increment_views(&post.id).await?;
    }

    Ok(HttpResponse::Ok().json(AckResponse::ok()))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, cookie::Cookie, http::StatusCode, test, web};

    use crate::config::AppConfig;
    use crate::middleware::auth::SESSION_COOKIE;
    use crate::state::AppState;

    async fn in_memory_state() -> AppState {
        AppState::new(&AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            redis_url: None,
            admin_password_hash: None,
            site_name: "Papyr".to_string(),
            media_public_base: "/media".to_string(),
        })
        .await
    }

    #[actix_web::test]
    async fn admin_listing_without_session_is_unauthorized() {
        let state = in_memory_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::handlers::configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/posts?all=true")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn public_listing_needs_no_session() {
        let state = in_memory_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::handlers::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn missing_session_and_missing_post_stay_distinct() {
        let state = in_memory_state().await;
        let token = state.sessions.issue().await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::handlers::configure_routes),
        )
        .await;

        // Without a cookie the request never reaches the record lookup.
        let req = test::TestRequest::delete().uri("/api/post/ghost").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // With a live session it is the post that is missing.
        let req = test::TestRequest::delete()
            .uri("/api/post/ghost")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
