/// Like service - like/unlike with duplicate protection
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{like_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::Like;

pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Like a post; liking twice is a conflict
    pub async fn like_post(&self, user_id: Uuid, post_id: Uuid) -> Result<Like> {
        post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        like_repo::create_like(&self.pool, post_id, user_id)
            .await?
            .ok_or_else(|| AppError::Conflict("post already liked".to_string()))
    }

    /// Remove the caller's like from a post
    pub async fn unlike_post(&self, user_id: Uuid, post_id: Uuid) -> Result<()> {
        let removed = like_repo::delete_like(&self.pool, post_id, user_id).await?;
        if removed == 0 {
            return Err(AppError::NotFound("like not found".to_string()));
        }
        Ok(())
    }
}
