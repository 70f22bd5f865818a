/// Comment handlers - HTTP endpoints for comment operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::CommentService;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub post_id: Uuid,
    #[validate(length(min = 1, max = 2000, message = "content is required"))]
    pub content: String,
}

/// Create a new comment
pub async fn create_comment(
    pool: web::Data<PgPool>,
    user: UserId,
    payload: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    // Trim first so whitespace-only content fails validation
    let req = CreateCommentRequest {
        post_id: payload.post_id,
        content: payload.content.trim().to_string(),
    };
    req.validate()?;

    let service = CommentService::new((**pool).clone());
    let comment = service
        .create_comment(user.0, req.post_id, &req.content)
        .await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// Delete a comment the caller authored
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    user: UserId,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comment = service.delete_comment(*comment_id, user.0).await?;

    Ok(HttpResponse::Ok().json(json!({ "deleted": comment.id })))
}
