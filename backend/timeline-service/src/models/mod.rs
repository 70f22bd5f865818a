/// Data models for timeline-service
///
/// Row types map 1:1 onto the social schema; response shapes carry the
/// eager-loaded associations the API returns. All JSON is camelCase.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - provisioned by the identity service, read-only here
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Post entity without its attachment bytes
///
/// `file_data` is deliberately absent: timeline JSON only carries the
/// attachment metadata, the bytes are served by the download endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Stored attachment columns, fetched only for downloads
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostFile {
    pub file_data: Option<Vec<u8>>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
}

/// Attachment captured from a multipart upload
#[derive(Debug, Clone)]
pub struct PostAttachment {
    pub data: Vec<u8>,
    pub file_name: String,
    pub file_type: String,
}

/// Comment entity - represents a comment on a post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Like entity - represents a user liking a post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Follow entity - follower_id follows following_id
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub following_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Comment with its author attached
///
/// The author is only loaded on the single-post view; timeline listings
/// leave it out, so serialization skips the empty case.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDetail {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl CommentDetail {
    pub fn new(comment: Comment, user: Option<User>) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            content: comment.content,
            created_at: comment.created_at,
            user,
        }
    }
}

/// Post with its eager-loaded associations and the caller-derived like flag
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author: Option<User>,
    pub comments: Vec<CommentDetail>,
    pub likes: Vec<Like>,
    pub liked_by_user: bool,
}

impl PostDetail {
    /// Assemble the response shape from loaded rows. `liked_by_user` is
    /// derived from the likes for the requesting user, never stored.
    pub fn assemble(
        post: Post,
        author: Option<User>,
        comments: Vec<CommentDetail>,
        likes: Vec<Like>,
        viewer_id: Uuid,
    ) -> Self {
        let liked_by_user = likes.iter().any(|like| like.user_id == viewer_id);
        Self {
            id: post.id,
            author_id: post.author_id,
            content: post.content,
            file_name: post.file_name,
            file_type: post.file_type,
            created_at: post.created_at,
            author,
            comments,
            likes,
            liked_by_user,
        }
    }
}

/// Result of a post deletion cascade: affected row counts per table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeletionSummary {
    pub comments_deleted: u64,
    pub likes_deleted: u64,
    pub posts_deleted: u64,
}
