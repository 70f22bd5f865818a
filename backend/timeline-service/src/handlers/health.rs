/// Liveness endpoint, mounted outside the authenticated scope
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

pub async fn health(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "timeline-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => {
            tracing::error!("health check: database probe failed: {}", e);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "error": "service unavailable"
            }))
        }
    }
}
