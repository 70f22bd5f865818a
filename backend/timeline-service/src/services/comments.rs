/// Comment service - commenting on posts
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::Comment;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a comment on an existing post
    pub async fn create_comment(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        content: &str,
    ) -> Result<Comment> {
        post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        let comment = comment_repo::create_comment(&self.pool, post_id, user_id, content).await?;
        Ok(comment)
    }

    /// Delete a comment the caller authored, returning the removed row
    ///
    /// Existence is checked before ownership so unknown ids read as 404.
    pub async fn delete_comment(&self, comment_id: Uuid, user_id: Uuid) -> Result<Comment> {
        let comment = comment_repo::find_comment_by_id(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("comment not found".to_string()))?;

        if comment.user_id != user_id {
            return Err(AppError::Forbidden("access denied".to_string()));
        }

        comment_repo::delete_comment(&self.pool, comment_id).await?;
        Ok(comment)
    }
}
