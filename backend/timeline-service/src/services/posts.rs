/// Post service - timeline assembly and the post lifecycle
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::{comment_repo, like_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{
    CommentDetail, DeletionSummary, Like, Post, PostAttachment, PostDetail, PostFile, User,
};

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a post for the author, with an optional attachment
    pub async fn create_post(
        &self,
        author_id: Uuid,
        content: &str,
        attachment: Option<PostAttachment>,
    ) -> Result<Post> {
        let post =
            post_repo::create_post(&self.pool, author_id, content, attachment.as_ref()).await?;
        Ok(post)
    }

    /// Load the whole timeline, newest first, with authors, comments,
    /// likes, and the viewer's like flag attached
    ///
    /// Associations come from three batched queries stitched in memory,
    /// so the query count stays flat regardless of timeline length.
    pub async fn list_posts(&self, viewer_id: Uuid) -> Result<Vec<PostDetail>> {
        let posts = post_repo::list_posts(&self.pool).await?;
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
        let comments = comment_repo::get_comments_by_posts(&self.pool, &post_ids).await?;
        let likes = like_repo::get_likes_by_posts(&self.pool, &post_ids).await?;

        let mut author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors = user_repo::find_users_by_ids(&self.pool, &author_ids).await?;
        let authors_by_id: HashMap<Uuid, User> =
            authors.into_iter().map(|u| (u.id, u)).collect();

        let mut comments_by_post: HashMap<Uuid, Vec<CommentDetail>> = HashMap::new();
        for comment in comments {
            comments_by_post
                .entry(comment.post_id)
                .or_default()
                .push(CommentDetail::new(comment, None));
        }

        let mut likes_by_post: HashMap<Uuid, Vec<Like>> = HashMap::new();
        for like in likes {
            likes_by_post.entry(like.post_id).or_default().push(like);
        }

        let details = posts
            .into_iter()
            .map(|post| {
                let author = authors_by_id.get(&post.author_id).cloned();
                let comments = comments_by_post.remove(&post.id).unwrap_or_default();
                let likes = likes_by_post.remove(&post.id).unwrap_or_default();
                PostDetail::assemble(post, author, comments, likes, viewer_id)
            })
            .collect();

        Ok(details)
    }

    /// Load one post with its author, likes, and comments including the
    /// comment authors
    pub async fn get_post(&self, post_id: Uuid, viewer_id: Uuid) -> Result<PostDetail> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        let comments = comment_repo::get_comments_by_posts(&self.pool, &[post_id]).await?;
        let likes = like_repo::get_likes_by_post(&self.pool, post_id).await?;

        // One lookup covers the post author and every commenter.
        let mut user_ids: Vec<Uuid> = comments.iter().map(|c| c.user_id).collect();
        user_ids.push(post.author_id);
        user_ids.sort_unstable();
        user_ids.dedup();
        let users = user_repo::find_users_by_ids(&self.pool, &user_ids).await?;
        let users_by_id: HashMap<Uuid, User> = users.into_iter().map(|u| (u.id, u)).collect();

        let author = users_by_id.get(&post.author_id).cloned();
        let comment_details = comments
            .into_iter()
            .map(|c| {
                let user = users_by_id.get(&c.user_id).cloned();
                CommentDetail::new(c, user)
            })
            .collect();

        Ok(PostDetail::assemble(
            post,
            author,
            comment_details,
            likes,
            viewer_id,
        ))
    }

    /// Fetch the stored attachment for download
    ///
    /// A missing post and a post without an attachment look the same to
    /// the caller: there is no file to download.
    pub async fn get_post_file(&self, post_id: Uuid) -> Result<PostAttachment> {
        match post_repo::find_post_file(&self.pool, post_id).await? {
            Some(PostFile {
                file_data: Some(data),
                file_name: Some(name),
                file_type: Some(mime),
            }) => Ok(PostAttachment {
                data,
                file_name: name,
                file_type: mime,
            }),
            _ => Err(AppError::NotFound("file not found".to_string())),
        }
    }

    /// Delete a post the caller owns, cascading comments and likes
    ///
    /// The existence check runs before the ownership check so unknown
    /// ids always read as 404, never 403. The three deletes share one
    /// transaction and commit or roll back together.
    pub async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<DeletionSummary> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        if post.author_id != user_id {
            return Err(AppError::Forbidden("access denied".to_string()));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("delete_post: begin failed: {}", e)))?;

        let comments_deleted = sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Internal(format!("delete_post: comment cascade failed: {}", e)))?
            .rows_affected();

        let likes_deleted = sqlx::query("DELETE FROM likes WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Internal(format!("delete_post: like cascade failed: {}", e)))?
            .rows_affected();

        let posts_deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Internal(format!("delete_post: post delete failed: {}", e)))?
            .rows_affected();

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("delete_post: commit failed: {}", e)))?;

        Ok(DeletionSummary {
            comments_deleted,
            likes_deleted,
            posts_deleted,
        })
    }
}
