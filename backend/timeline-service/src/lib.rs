/// Timeline Service Library
///
/// Posts with optional file attachments, comments, likes, and follows,
/// served as a REST API over PostgreSQL. Token issuance belongs to the
/// identity service; this service only validates bearer tokens.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and the route table
/// - `models`: Row types and response shapes
/// - `services`: Business logic layer
/// - `db`: Connection pooling and repositories
/// - `middleware`: JWT authentication middleware
/// - `auth`: JWT validation against the identity service's public key
/// - `error`: Error types and response mapping
/// - `config`: Configuration management
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
