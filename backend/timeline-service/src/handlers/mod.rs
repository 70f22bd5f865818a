/// HTTP handlers for timeline-service
///
/// Thin actix endpoints that extract the caller, delegate to the
/// services layer, and shape the JSON responses. `routes` is the full
/// route table, shared by main and the integration tests.
use actix_web::web;

pub mod comments;
pub mod follows;
pub mod health;
pub mod likes;
pub mod posts;

use crate::middleware::JwtAuth;

/// Mount the health endpoint and the authenticated `/api` surface.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health)).service(
        web::scope("/api")
            .wrap(JwtAuth)
            .service(
                web::scope("/posts")
                    .service(
                        web::resource("")
                            .route(web::post().to(posts::create_post))
                            .route(web::get().to(posts::get_all_posts)),
                    )
                    .service(
                        web::resource("/{post_id}/file")
                            .route(web::get().to(posts::download_post_file)),
                    )
                    .service(
                        web::resource("/{post_id}")
                            .route(web::get().to(posts::get_post_by_id))
                            .route(web::delete().to(posts::delete_post)),
                    ),
            )
            .service(
                web::scope("/comments")
                    .service(web::resource("").route(web::post().to(comments::create_comment)))
                    .service(
                        web::resource("/{comment_id}")
                            .route(web::delete().to(comments::delete_comment)),
                    ),
            )
            .service(
                web::scope("/likes")
                    .service(web::resource("").route(web::post().to(likes::create_like)))
                    .service(
                        web::resource("/{post_id}").route(web::delete().to(likes::delete_like)),
                    ),
            )
            .route("/follow", web::post().to(follows::create_follow))
            .route(
                "/unfollow/{user_id}",
                web::delete().to(follows::delete_follow),
            ),
    );
}
