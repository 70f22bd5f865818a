/// Like handlers - HTTP endpoints for like operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::LikeService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLikeRequest {
    pub post_id: Uuid,
}

/// Like a post
pub async fn create_like(
    pool: web::Data<PgPool>,
    user: UserId,
    payload: web::Json<CreateLikeRequest>,
) -> Result<HttpResponse> {
    let service = LikeService::new((**pool).clone());
    let like = service.like_post(user.0, payload.post_id).await?;

    Ok(HttpResponse::Ok().json(like))
}

/// Remove the caller's like from a post; the path carries the post id
pub async fn delete_like(
    pool: web::Data<PgPool>,
    user: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = LikeService::new((**pool).clone());
    service.unlike_post(user.0, *post_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "unliked": *post_id })))
}
