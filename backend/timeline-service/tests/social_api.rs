/// Integration tests for the comment, like, and follow endpoints.
mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use sqlx::PgPool;
use uuid::Uuid;

const BOUNDARY: &str = "----timeline-test-boundary";

macro_rules! build_app {
    ($pool:expr, $config:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .app_data(web::Data::new($config.clone()))
                .configure(timeline_service::handlers::routes),
        )
        .await
    };
}

macro_rules! create_post {
    ($app:expr, $author:expr, $content:expr) => {{
        let body = common::multipart_body(BOUNDARY, Some($content), None);
        let resp = test::call_service(
            $app,
            test::TestRequest::post()
                .uri("/api/posts")
                .insert_header(common::bearer($author))
                .insert_header((
                    "Content-Type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                ))
                .set_payload(body)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let post: serde_json::Value = test::read_body_json(resp).await;
        post["id"].as_str().unwrap().to_string()
    }};
}

async fn like_count(pool: &PgPool, post_id: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
        .bind(Uuid::parse_str(post_id).unwrap())
        .fetch_one(pool)
        .await
        .unwrap()
}

#[actix_web::test]
async fn comment_on_missing_post_returns_404() {
    let (_pg, pool, config) = common::setup().await;
    let caller = common::seed_user(&pool, "alice").await;
    let app = build_app!(pool, config);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/comments")
            .insert_header(common::bearer(caller))
            .set_json(serde_json::json!({ "postId": Uuid::new_v4(), "content": "hello" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn blank_comment_returns_400() {
    let (_pg, pool, config) = common::setup().await;
    let caller = common::seed_user(&pool, "alice").await;
    let app = build_app!(pool, config);
    let post_id = create_post!(&app, caller, "discuss");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/comments")
            .insert_header(common::bearer(caller))
            .set_json(serde_json::json!({ "postId": post_id, "content": "   " }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn comment_delete_is_author_only() {
    let (_pg, pool, config) = common::setup().await;
    let author = common::seed_user(&pool, "alice").await;
    let commenter = common::seed_user(&pool, "bob").await;
    let app = build_app!(pool, config);
    let post_id = create_post!(&app, author, "discuss");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/comments")
            .insert_header(common::bearer(commenter))
            .set_json(serde_json::json!({ "postId": post_id, "content": "mine" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let comment: serde_json::Value = test::read_body_json(resp).await;
    let comment_id = comment["id"].as_str().unwrap().to_string();

    // Even the post author may not delete someone else's comment
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/comments/{comment_id}"))
            .insert_header(common::bearer(author))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/comments/{comment_id}"))
            .insert_header(common::bearer(commenter))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["deleted"], comment_id);

    // Gone now
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/comments/{comment_id}"))
            .insert_header(common::bearer(commenter))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn duplicate_like_returns_409_without_a_second_row() {
    let (_pg, pool, config) = common::setup().await;
    let author = common::seed_user(&pool, "alice").await;
    let liker = common::seed_user(&pool, "bob").await;
    let app = build_app!(pool, config);
    let post_id = create_post!(&app, author, "like me");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/likes")
            .insert_header(common::bearer(liker))
            .set_json(serde_json::json!({ "postId": post_id }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/likes")
            .insert_header(common::bearer(liker))
            .set_json(serde_json::json!({ "postId": post_id }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let err: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(err["error"], "post already liked");

    assert_eq!(like_count(&pool, &post_id).await, 1);
}

#[actix_web::test]
async fn like_on_missing_post_returns_404() {
    let (_pg, pool, config) = common::setup().await;
    let caller = common::seed_user(&pool, "alice").await;
    let app = build_app!(pool, config);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/likes")
            .insert_header(common::bearer(caller))
            .set_json(serde_json::json!({ "postId": Uuid::new_v4() }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn unlike_removes_only_the_callers_row() {
    let (_pg, pool, config) = common::setup().await;
    let author = common::seed_user(&pool, "alice").await;
    let liker_a = common::seed_user(&pool, "bob").await;
    let liker_b = common::seed_user(&pool, "carol").await;
    let app = build_app!(pool, config);
    let post_id = create_post!(&app, author, "popular");

    for liker in [liker_a, liker_b] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/likes")
                .insert_header(common::bearer(liker))
                .set_json(serde_json::json!({ "postId": post_id }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/likes/{post_id}"))
            .insert_header(common::bearer(liker_a))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(like_count(&pool, &post_id).await, 1);

    // Unliking again finds nothing
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/likes/{post_id}"))
            .insert_header(common::bearer(liker_a))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn self_follow_returns_400() {
    let (_pg, pool, config) = common::setup().await;
    let caller = common::seed_user(&pool, "alice").await;
    let app = build_app!(pool, config);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/follow")
            .insert_header(common::bearer(caller))
            .set_json(serde_json::json!({ "followingId": caller }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(err["error"], "cannot follow yourself");
}

#[actix_web::test]
async fn follow_missing_user_returns_404() {
    let (_pg, pool, config) = common::setup().await;
    let caller = common::seed_user(&pool, "alice").await;
    let app = build_app!(pool, config);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/follow")
            .insert_header(common::bearer(caller))
            .set_json(serde_json::json!({ "followingId": Uuid::new_v4() }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn follow_then_unfollow_round_trip() {
    let (_pg, pool, config) = common::setup().await;
    let follower = common::seed_user(&pool, "alice").await;
    let followee = common::seed_user(&pool, "bob").await;
    let app = build_app!(pool, config);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/follow")
            .insert_header(common::bearer(follower))
            .set_json(serde_json::json!({ "followingId": followee }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let follow: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(follow["followerId"], follower.to_string());
    assert_eq!(follow["followingId"], followee.to_string());

    // Following twice is a conflict
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/follow")
            .insert_header(common::bearer(follower))
            .set_json(serde_json::json!({ "followingId": followee }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/unfollow/{followee}"))
            .insert_header(common::bearer(follower))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    // Unfollowing again finds nothing
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/unfollow/{followee}"))
            .insert_header(common::bearer(follower))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
