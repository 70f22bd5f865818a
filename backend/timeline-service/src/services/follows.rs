/// Follow service - the follow graph
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{follow_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::Follow;

pub struct FollowService {
    pool: PgPool,
}

impl FollowService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Follow another user
    ///
    /// Following yourself is rejected up front; a duplicate edge is a
    /// conflict, and the target must exist.
    pub async fn follow_user(&self, follower_id: Uuid, following_id: Uuid) -> Result<Follow> {
        if follower_id == following_id {
            return Err(AppError::Validation(
                "cannot follow yourself".to_string(),
            ));
        }

        user_repo::find_user_by_id(&self.pool, following_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        follow_repo::create_follow(&self.pool, follower_id, following_id)
            .await?
            .ok_or_else(|| AppError::Conflict("already following this user".to_string()))
    }

    /// Stop following a user
    pub async fn unfollow_user(&self, follower_id: Uuid, following_id: Uuid) -> Result<()> {
        let removed = follow_repo::delete_follow(&self.pool, follower_id, following_id).await?;
        if removed == 0 {
            return Err(AppError::NotFound("follow not found".to_string()));
        }
        Ok(())
    }
}
