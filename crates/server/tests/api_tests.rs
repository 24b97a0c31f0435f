//! End-to-end tests driving the router directly. Each test skips
//! itself when no database is reachable so the suite stays green on
//! machines without Postgres.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use server::routes::ServerState;
use service::media::mock::MockMediaStore;

async fn test_router() -> Option<(Router, sea_orm::DatabaseConnection)> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match models::db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    let auth_cfg = configs::AuthConfig {
        jwt_secret: "integration-test-secret".into(),
        token_ttl_hours: 24,
    };
    let state = ServerState::with_media(
        db.clone(),
        &auth_cfg,
        Arc::new(MockMediaStore::default()),
        "localhands".into(),
    );
    Some((server::build_router(state), db))
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value, Option<String>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value, set_cookie)
}

fn unique_email(tag: &str) -> String {
    format!("{}_{}@example.com", tag, Uuid::new_v4())
}

/// Register an account and return its session cookie plus user id.
async fn register(router: &Router, tag: &str) -> (String, Uuid, String) {
    let email = unique_email(tag);
    let (status, body, cookie) = send(
        router,
        Method::POST,
        "/api/user/register",
        None,
        Some(json!({
            "name": "Test User",
            "email": email,
            "phone_number": "0501112222",
            "password": "longenoughpw",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    let id = body["user"]["id"].as_str().unwrap().parse().unwrap();
    (cookie.expect("register sets a cookie"), id, email)
}

/// Promote an account to provider and return its profile id.
async fn become_provider(router: &Router, cookie: &str, categories: &[&str]) -> Uuid {
    let (status, body, _) = send(
        router,
        Method::POST,
        "/api/provider-profile/become-provider",
        Some(cookie),
        Some(json!({
            "bio": "experienced local professional",
            "experience": 4,
            "service_categories": categories,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "become-provider failed: {}", body);
    body["profile"]["id"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let Some((router, _db)) = test_router().await else { return };
    let (status, body, _) = send(&router, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_login_and_check_auth_flow() {
    let Some((router, _db)) = test_router().await else { return };
    let (cookie, _, email) = register(&router, "flow").await;

    let (status, body, _) =
        send(&router, Method::GET, "/api/user/check-auth", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], email.as_str());

    let (status, _, _) = send(&router, Method::GET, "/api/user/check-auth", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(
        &router,
        Method::POST,
        "/api/user/login",
        None,
        Some(json!({ "email": email, "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, cookie2) = send(
        &router,
        Method::POST,
        "/api/user/login",
        None,
        Some(json!({ "email": email, "password": "longenoughpw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(cookie2.is_some());

    let (status, _, _) = send(
        &router,
        Method::POST,
        "/api/user/register",
        None,
        Some(json!({
            "name": "Dup",
            "email": email,
            "phone_number": "0501112223",
            "password": "longenoughpw",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn booking_status_workflow_over_http() {
    let Some((router, _db)) = test_router().await else { return };
    let (customer_cookie, _, _) = register(&router, "bk_cust").await;
    let (provider_cookie, _, _) = register(&router, "bk_prov").await;
    let profile_id = become_provider(&router, &provider_cookie, &["Tutoring"]).await;

    let (status, body, _) = send(
        &router,
        Method::POST,
        &format!("/api/bookings/{}", profile_id),
        Some(&customer_cookie),
        Some(json!({
            "service_category": "Tutoring",
            "scheduled_date": chrono::Utc::now().to_rfc3339(),
            "notes": "weekly session",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "booking failed: {}", body);
    assert_eq!(body["booking"]["status"], "pending");
    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();

    // Provider accepts.
    let (status, body, _) = send(
        &router,
        Method::PUT,
        &format!("/api/bookings/update-status/{}", booking_id),
        Some(&provider_cookie),
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["booking"]["status"], "accepted");

    // Customer may not accept.
    let (status, _, _) = send(
        &router,
        Method::PUT,
        &format!("/api/bookings/update-status/{}", booking_id),
        Some(&customer_cookie),
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // An unrelated user may do nothing.
    let (stranger_cookie, _, _) = register(&router, "bk_stranger").await;
    let (status, _, _) = send(
        &router,
        Method::PUT,
        &format!("/api/bookings/update-status/{}", booking_id),
        Some(&stranger_cookie),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Unknown status is a bad request.
    let (status, _, _) = send(
        &router,
        Method::PUT,
        &format!("/api/bookings/update-status/{}", booking_id),
        Some(&provider_cookie),
        Some(json!({ "status": "done" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Customer cancels.
    let (status, body, _) = send(
        &router,
        Method::PUT,
        &format!("/api/bookings/update-status/{}", booking_id),
        Some(&customer_cookie),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["booking"]["status"], "cancelled");

    // Listings are scoped.
    let (status, body, _) = send(
        &router,
        Method::GET,
        "/api/bookings/my-bookings",
        Some(&customer_cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookings"].as_array().unwrap().len(), 1);

    let (status, body, _) = send(
        &router,
        Method::GET,
        "/api/bookings/my-requests",
        Some(&provider_cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookings"].as_array().unwrap().len(), 1);

    // my-requests is provider-gated.
    let (status, _, _) = send(
        &router,
        Method::GET,
        "/api/bookings/my-requests",
        Some(&customer_cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn booking_rejects_unoffered_category() {
    let Some((router, _db)) = test_router().await else { return };
    let (customer_cookie, _, _) = register(&router, "cat_cust").await;
    let (provider_cookie, _, _) = register(&router, "cat_prov").await;
    let profile_id = become_provider(&router, &provider_cookie, &["Tutoring"]).await;

    let (status, _, _) = send(
        &router,
        Method::POST,
        &format!("/api/bookings/{}", profile_id),
        Some(&customer_cookie),
        Some(json!({
            "service_category": "Home Cleaning",
            "scheduled_date": chrono::Utc::now().to_rfc3339(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn incomplete_json_bodies_answer_bad_request() {
    let Some((router, _db)) = test_router().await else { return };
    let (customer_cookie, _, _) = register(&router, "body_cust").await;
    let (provider_cookie, _, _) = register(&router, "body_prov").await;
    let profile_id = become_provider(&router, &provider_cookie, &["Tutoring"]).await;

    // No scheduled_date.
    let (status, body, _) = send(
        &router,
        Method::POST,
        &format!("/api/bookings/{}", profile_id),
        Some(&customer_cookie),
        Some(json!({ "service_category": "Tutoring" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    // No status.
    let (status, body, _) = send(
        &router,
        Method::PUT,
        &format!("/api/bookings/update-status/{}", Uuid::new_v4()),
        Some(&customer_cookie),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    // No password.
    let (status, body, _) = send(
        &router,
        Method::POST,
        "/api/user/register",
        None,
        Some(json!({
            "name": "No Password",
            "email": unique_email("body_reg"),
            "phone_number": "0501112224",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn comments_enforce_self_guard_and_ownership() {
    let Some((router, _db)) = test_router().await else { return };
    let (provider_cookie, _, _) = register(&router, "cm_prov").await;
    let profile_id = become_provider(&router, &provider_cookie, &["Tutoring"]).await;
    let (customer_cookie, _, _) = register(&router, "cm_cust").await;

    // Provider cannot comment on their own profile.
    let (status, _, _) = send(
        &router,
        Method::POST,
        &format!("/api/comments/create-comment/{}", profile_id),
        Some(&provider_cookie),
        Some(json!({ "body": "self praise" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body, _) = send(
        &router,
        Method::POST,
        &format!("/api/comments/create-comment/{}", profile_id),
        Some(&customer_cookie),
        Some(json!({ "body": "punctual and friendly" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let comment_id = body["comment"]["id"].as_str().unwrap().to_string();

    // Reading is public.
    let (status, body, _) = send(
        &router,
        Method::GET,
        &format!("/api/comments/get-comments/{}", profile_id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["comments"].as_array().unwrap().is_empty());

    // Only the author edits.
    let (status, _, _) = send(
        &router,
        Method::PUT,
        &format!("/api/comments/update-comment/{}", comment_id),
        Some(&provider_cookie),
        Some(json!({ "body": "hijack attempt" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_routes_are_role_gated() {
    let Some((router, db)) = test_router().await else { return };
    let (customer_cookie, customer_id, _) = register(&router, "adm").await;

    let (status, _, _) = send(
        &router,
        Method::GET,
        "/api/admin/dashboard-stats",
        Some(&customer_cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Promote directly in the database; the middleware reloads roles
    // per request so the existing cookie now passes the gate.
    models::user::set_role(&db, customer_id, models::role::Role::Admin)
        .await
        .expect("promote admin");

    let (status, body, _) = send(
        &router,
        Method::GET,
        "/api/admin/dashboard-stats",
        Some(&customer_cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "admin stats failed: {}", body);
    assert!(body["stats"]["status_counts"]["pending"].is_u64());

    let (status, body, _) = send(
        &router,
        Method::GET,
        "/api/admin/all-bookings",
        Some(&customer_cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["bookings"].is_array());
}

#[tokio::test]
async fn provider_dashboard_requires_provider_role() {
    let Some((router, _db)) = test_router().await else { return };
    let (customer_cookie, _, _) = register(&router, "pd").await;

    let (status, _, _) = send(
        &router,
        Method::GET,
        "/api/provider-profile/provider-dashboard-stats",
        Some(&customer_cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (provider_cookie, _, _) = register(&router, "pd_prov").await;
    become_provider(&router, &provider_cookie, &["Tutoring"]).await;
    let (status, body, _) = send(
        &router,
        Method::GET,
        "/api/provider-profile/provider-dashboard-stats",
        Some(&provider_cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["total_bookings"], 0);
}
