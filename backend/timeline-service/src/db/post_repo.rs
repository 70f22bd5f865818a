use crate::models::{Post, PostAttachment, PostFile};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new post, with or without an attachment
/// Returns the created post (attachment bytes excluded)
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    content: &str,
    attachment: Option<&PostAttachment>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (author_id, content, file_data, file_name, file_type)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, author_id, content, file_name, file_type, created_at
        "#,
    )
    .bind(author_id)
    .bind(content)
    .bind(attachment.map(|a| a.data.as_slice()))
    .bind(attachment.map(|a| a.file_name.as_str()))
    .bind(attachment.map(|a| a.file_type.as_str()))
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, content, file_name, file_type, created_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// List every post, newest first
pub async fn list_posts(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, content, file_name, file_type, created_at
        FROM posts
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Fetch only the stored attachment columns for a post
///
/// Returns `None` when the post itself does not exist; a post without an
/// attachment comes back with all three fields null.
pub async fn find_post_file(pool: &PgPool, post_id: Uuid) -> Result<Option<PostFile>, sqlx::Error> {
    let file = sqlx::query_as::<_, PostFile>(
        r#"
        SELECT file_data, file_name, file_type
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(file)
}
