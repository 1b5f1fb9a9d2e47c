//! HTTP handlers and route configuration.

mod auth;
mod feed;
mod health;
mod links;
mod posts;
mod search;
mod upload;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/check", web::get().to(auth::check))
                    .route("/logout", web::post().to(auth::logout)),
            )
            // Posts
            .route("/posts", web::get().to(posts::list))
            .route("/posts", web::post().to(posts::create))
            .route("/post/{slug_or_id}", web::get().to(posts::get))
            .route("/post/{slug_or_id}", web::put().to(posts::update))
            .route("/post/{slug_or_id}", web::delete().to(posts::delete))
            .route("/post/{slug_or_id}/view", web::post().to(posts::view))
            // Friend links
            .route("/links", web::get().to(links::list))
            .route("/links", web::put().to(links::replace))
            // Search & upload
            .route("/search", web::get().to(search::search))
            .route("/upload", web::post().to(upload::upload)),
    )
    .route("/rss.xml", web::get().to(feed::rss));
}
