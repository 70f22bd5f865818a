/// Business logic layer for timeline-service
///
/// One service per entity:
/// - Post service: creation, timeline assembly, downloads, deletion cascade
/// - Comment service: commenting on posts
/// - Like service: like/unlike with duplicate protection
/// - Follow service: the follow graph
pub mod comments;
pub mod follows;
pub mod likes;
pub mod posts;

// Re-export commonly used services
pub use comments::CommentService;
pub use follows::FollowService;
pub use likes::LikeService;
pub use posts::PostService;
