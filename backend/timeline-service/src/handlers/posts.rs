/// Post handlers - HTTP endpoints for the post lifecycle
use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::PostAttachment;
use crate::services::PostService;

/// Create a new post from a multipart form
///
/// Fields: `content` (required text) and `file` (optional attachment,
/// buffered whole into memory). An empty file part counts as no
/// attachment, so a plain text post and a post with a file go through
/// the same form.
pub async fn create_post(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    user: UserId,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let max_bytes = config.upload.max_bytes;
    let mut content: Option<String> = None;
    let mut attachment: Option<PostAttachment> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::Validation(format!("Invalid multipart payload: {}", e)))?;

        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("content") => {
                let mut buf = Vec::new();
                while let Some(chunk) = field.next().await {
                    let bytes = chunk.map_err(|e| {
                        AppError::Validation(format!("Invalid multipart payload: {}", e))
                    })?;
                    if buf.len() + bytes.len() > max_bytes {
                        return Err(AppError::Validation(format!(
                            "content exceeds the {} byte limit",
                            max_bytes
                        )));
                    }
                    buf.extend_from_slice(&bytes);
                }
                let text = String::from_utf8(buf)
                    .map_err(|_| AppError::Validation("content must be valid UTF-8".to_string()))?;
                content = Some(text);
            }
            Some("file") => {
                let file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or("file")
                    .to_string();
                let file_type = field
                    .content_type()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());

                let mut data = Vec::new();
                while let Some(chunk) = field.next().await {
                    let bytes = chunk.map_err(|e| {
                        AppError::Validation(format!("Invalid multipart payload: {}", e))
                    })?;
                    if data.len() + bytes.len() > max_bytes {
                        return Err(AppError::Validation(format!(
                            "file exceeds the {} byte upload limit",
                            max_bytes
                        )));
                    }
                    data.extend_from_slice(&bytes);
                }

                if !data.is_empty() {
                    attachment = Some(PostAttachment {
                        data,
                        file_name,
                        file_type,
                    });
                }
            }
            _ => {
                // Drain unrecognized fields so the stream can proceed.
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|e| {
                        AppError::Validation(format!("Invalid multipart payload: {}", e))
                    })?;
                }
            }
        }
    }

    let content = match content {
        Some(c) if !c.trim().is_empty() => c,
        _ => return Err(AppError::Validation("content is required".to_string())),
    };

    let service = PostService::new((**pool).clone());
    let post = service.create_post(user.0, &content, attachment).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// List the whole timeline for the caller, newest first
pub async fn get_all_posts(pool: web::Data<PgPool>, user: UserId) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service.list_posts(user.0).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Get a single post with comments, likes, and authors
pub async fn get_post_by_id(
    pool: web::Data<PgPool>,
    user: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service.get_post(*post_id, user.0).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Download a post's attachment as raw bytes
///
/// The stored MIME type becomes Content-Type and the original filename
/// rides in an attachment Content-Disposition.
pub async fn download_post_file(
    pool: web::Data<PgPool>,
    _user: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let file = service.get_post_file(*post_id).await?;

    Ok(HttpResponse::Ok()
        .content_type(file.file_type.as_str())
        .insert_header((
            header::CONTENT_DISPOSITION,
            attachment_disposition(&file.file_name),
        ))
        .body(file.data))
}

/// Build the attachment Content-Disposition, escaping backslashes and
/// double quotes so a stored filename cannot break the header quoting.
fn attachment_disposition(file_name: &str) -> String {
    let escaped = file_name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("attachment; filename=\"{}\"", escaped)
}

/// Delete an owned post together with its comments and likes
pub async fn delete_post(
    pool: web::Data<PgPool>,
    user: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let summary = service.delete_post(*post_id, user.0).await?;

    Ok(HttpResponse::Ok().json(summary))
}

#[cfg(test)]
mod tests {
    use super::attachment_disposition;

    #[test]
    fn test_plain_filename_is_quoted() {
        assert_eq!(
            attachment_disposition("a.png"),
            "attachment; filename=\"a.png\""
        );
    }

    #[test]
    fn test_quotes_and_backslashes_are_escaped() {
        assert_eq!(
            attachment_disposition("we\"ird.png"),
            "attachment; filename=\"we\\\"ird.png\""
        );
        assert_eq!(
            attachment_disposition("back\\slash.png"),
            "attachment; filename=\"back\\\\slash.png\""
        );
    }
}
