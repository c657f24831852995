mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use common::{client::TestClient, TestContext};
use entity::invitation::InviteStatus;
use serde_json::json;
use tablemate::db::Store as _;

#[tokio::test]
async fn test_expired_invite_is_gone_and_persisted() {
    let ctx = TestContext::new();
    let client = TestClient::new(ctx.store.clone());
    let app = test::init_service(client.create_app()).await;

    let (admin_id, admin_token) = client.create_test_user(None).await;
    let (_user_id, user_token) = client.create_test_user(None).await;
    let group_id = client.create_group_with_admin(admin_id).await;

    // Deadline passed a day ago.
    let invite = client
        .seed_invite(group_id, admin_id, Utc::now() - Duration::days(1))
        .await;

    let req = test::TestRequest::post()
        .uri(&format!("/invite/accept/{}", invite.invite_code))
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::GONE);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "EXPIRED");

    // The failed accept wrote the derived state back.
    let stored = ctx.store.invite_by_id(invite.id).await.unwrap().unwrap();
    assert_eq!(stored.status, InviteStatus::Expired);

    // And it stays expired on the next try.
    let req = test::TestRequest::post()
        .uri(&format!("/invite/accept/{}", invite.invite_code))
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::GONE);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "EXPIRED");
}

#[tokio::test]
async fn test_expired_invite_shows_in_history_without_mutation() {
    let ctx = TestContext::new();
    let client = TestClient::new(ctx.store.clone());
    let app = test::init_service(client.create_app()).await;

    let (admin_id, admin_token) = client.create_test_user(None).await;
    let group_id = client.create_group_with_admin(admin_id).await;
    let invite = client
        .seed_invite(group_id, admin_id, Utc::now() - Duration::days(1))
        .await;

    let req = test::TestRequest::get()
        .uri(&format!("/group/{}/invites", group_id))
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["status"], "expired");

    // Listing is read-only; the stored row still says pending.
    let stored = ctx.store.invite_by_id(invite.id).await.unwrap().unwrap();
    assert_eq!(stored.status, InviteStatus::Pending);
}

#[tokio::test]
async fn test_revoke_flow() {
    let ctx = TestContext::new();
    let client = TestClient::new(ctx.store.clone());
    let app = test::init_service(client.create_app()).await;

    let (admin_id, admin_token) = client.create_test_user(None).await;
    let (_user_id, user_token) = client.create_test_user(None).await;
    let group_id = client.create_group_with_admin(admin_id).await;
    let invite = client
        .seed_invite(group_id, admin_id, Utc::now() + Duration::days(7))
        .await;

    // Only a group admin may revoke.
    let req = test::TestRequest::post()
        .uri(&format!("/invite/{}/revoke", invite.id))
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/invite/{}/revoke", invite.id))
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Revoked wins over anything else the accept path could report.
    let req = test::TestRequest::post()
        .uri(&format!("/invite/accept/{}", invite.invite_code))
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::GONE);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "REVOKED");

    // Revoking twice is an invalid transition.
    let req = test::TestRequest::post()
        .uri(&format!("/invite/{}/revoke", invite.id))
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_STATE");
}

#[tokio::test]
async fn test_unknown_code_and_unknown_invite() {
    let ctx = TestContext::new();
    let client = TestClient::new(ctx.store.clone());
    let app = test::init_service(client.create_app()).await;

    let (_user_id, user_token) = client.create_test_user(None).await;

    let req = test::TestRequest::post()
        .uri("/invite/accept/definitely-not-a-code")
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&format!("/invite/{}/revoke", uuid::Uuid::new_v4()))
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_auth_required_on_invite_surface() {
    let ctx = TestContext::new();
    let client = TestClient::new(ctx.store.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/invite/accept/some-code")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/invite/accept/some-code")
        .insert_header(("Authorization", "Bearer not-a-real-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri(&format!("/group/{}/invite", uuid::Uuid::new_v4()))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_open() {
    let ctx = TestContext::new();
    let client = TestClient::new(ctx.store.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
