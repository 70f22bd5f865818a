/// Follow handlers - HTTP endpoints for the follow graph
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::FollowService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFollowRequest {
    pub following_id: Uuid,
}

/// Follow another user
pub async fn create_follow(
    pool: web::Data<PgPool>,
    user: UserId,
    payload: web::Json<CreateFollowRequest>,
) -> Result<HttpResponse> {
    let service = FollowService::new((**pool).clone());
    let follow = service.follow_user(user.0, payload.following_id).await?;

    Ok(HttpResponse::Ok().json(follow))
}

/// Stop following a user; the path carries the followed user's id
pub async fn delete_follow(
    pool: web::Data<PgPool>,
    user: UserId,
    following_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = FollowService::new((**pool).clone());
    service.unfollow_user(user.0, *following_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "unfollowed": *following_id })))
}
