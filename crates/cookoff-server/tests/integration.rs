#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use cookoff_core::Roster;
use cookoff_server::storage::RatingsDatabase;
use cookoff_server::{AppState, build_router};

async fn app() -> Router {
    let db = RatingsDatabase::open_in_memory().await.unwrap();
    let state = AppState::new(db, Roster::parse("Alice,Bob,Carol"), "letmein");
    build_router(state, "test-secret")
}

/// Send a request and return the raw response.
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Body,
) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    for &(name, value) in headers {
        builder = builder.header(name, value);
    }
    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// POST a JSON body from the given device; returns (status, parsed body).
async fn rate_as(app: &Router, device: &str, payload: Value) -> (StatusCode, Value) {
    let resp = send(
        app,
        "POST",
        "/api/rate",
        &[
            ("content-type", "application/json"),
            ("cookie", &format!("device_id={device}")),
        ],
        Body::from(payload.to_string()),
    )
    .await;
    let status = resp.status();
    let body: Value = serde_json::from_str(&body_text(resp).await).unwrap();
    (status, body)
}

async fn get_json(app: &Router, uri: &str, device: &str) -> (StatusCode, Value) {
    let resp = send(
        app,
        "GET",
        uri,
        &[("cookie", &format!("device_id={device}"))],
        Body::empty(),
    )
    .await;
    let status = resp.status();
    let body: Value = serde_json::from_str(&body_text(resp).await).unwrap();
    (status, body)
}

// =========================================================================
// Rating submission & own-rating lookup
// =========================================================================

#[tokio::test]
async fn rate_then_read_back() {
    let app = app().await;

    let (status, body) = rate_as(
        &app,
        "dev-1",
        json!({"entrant_index": 0, "taste": 5, "presentation": 4, "easy": 3}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));

    let (status, body) = get_json(&app, "/api/my-rating?entrant_index=0", "dev-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"]["taste"], json!(5));
    assert_eq!(body["rating"]["presentation"], json!(4));
    assert_eq!(body["rating"]["easy"], json!(3));
    assert_eq!(body["rating"]["judge"], json!(null));

    // Another device has no rating for the same entrant.
    let (status, body) = get_json(&app, "/api/my-rating?entrant_index=0", "dev-2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "rating": null}));
}

#[tokio::test]
async fn resubmission_overwrites_without_duplicating() {
    let app = app().await;

    rate_as(
        &app,
        "dev-1",
        json!({"entrant_index": 1, "taste": 1, "presentation": 1, "easy": 1, "judge": "Pat"}),
    )
    .await;
    rate_as(
        &app,
        "dev-1",
        json!({"entrant_index": 1, "taste": 5, "presentation": 5, "easy": 4}),
    )
    .await;

    let (_, body) = get_json(&app, "/api/my-rating?entrant_index=1", "dev-1").await;
    assert_eq!(body["rating"]["taste"], json!(5));
    assert_eq!(body["rating"]["judge"], json!(null));

    let (_, board) = get_json(&app, "/api/leaderboard", "dev-1").await;
    assert_eq!(board[0]["votes"], json!(1));
}

#[tokio::test]
async fn invalid_submissions_are_rejected() {
    let app = app().await;

    // Out-of-roster entrant
    let (status, body) = rate_as(
        &app,
        "dev-1",
        json!({"entrant_index": 99, "taste": 3, "presentation": 3, "easy": 3}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], json!(false));

    // Scores outside 1..=5
    for bad in [0, 6] {
        let (status, _) = rate_as(
            &app,
            "dev-1",
            json!({"entrant_index": 0, "taste": bad, "presentation": 3, "easy": 3}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // Non-numeric and missing fields
    let (status, _) = rate_as(
        &app,
        "dev-1",
        json!({"entrant_index": 0, "taste": "five", "presentation": 3, "easy": 3}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = rate_as(&app, "dev-1", json!({"entrant_index": 0, "taste": 3})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was stored.
    let (_, board) = get_json(&app, "/api/leaderboard", "dev-1").await;
    assert_eq!(board, json!([]));
}

#[tokio::test]
async fn my_rating_edge_cases() {
    let app = app().await;

    // Out-of-range and absent indexes are "no rating", not errors.
    let (status, body) = get_json(&app, "/api/my-rating?entrant_index=99", "dev-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "rating": null}));

    let (status, body) = get_json(&app, "/api/my-rating", "dev-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "rating": null}));

    // A present but non-integer index is an error.
    let (status, _) = get_json(&app, "/api/my-rating?entrant_index=abc", "dev-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =========================================================================
// Leaderboard
// =========================================================================

#[tokio::test]
async fn leaderboard_matches_spec_example() {
    let app = app().await;

    rate_as(
        &app,
        "fresh-device",
        json!({"entrant_index": 0, "taste": 5, "presentation": 4, "easy": 3}),
    )
    .await;

    let (status, board) = get_json(&app, "/api/leaderboard", "fresh-device").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board.as_array().unwrap().len(), 1);
    assert_eq!(board[0]["name"], json!("Alice"));
    assert_eq!(board[0]["votes"], json!(1));
    assert_eq!(board[0]["avg_total"], json!(12.0));
}

#[tokio::test]
async fn leaderboard_orders_and_rounds() {
    let app = app().await;

    // Bob: one perfect vote. Alice: two votes averaging 10.5 total.
    rate_as(&app, "dev-1", json!({"entrant_index": 1, "taste": 5, "presentation": 5, "easy": 5})).await;
    rate_as(&app, "dev-1", json!({"entrant_index": 0, "taste": 3, "presentation": 3, "easy": 3})).await;
    rate_as(&app, "dev-2", json!({"entrant_index": 0, "taste": 4, "presentation": 4, "easy": 4})).await;

    let (_, board) = get_json(&app, "/api/leaderboard", "dev-1").await;
    assert_eq!(board[0]["name"], json!("Bob"));
    assert_eq!(board[1]["name"], json!("Alice"));
    assert_eq!(board[1]["votes"], json!(2));
    assert_eq!(board[1]["avg_taste"], json!(3.5));
    assert_eq!(board[1]["avg_total"], json!(10.5));
}

// =========================================================================
// CSV export
// =========================================================================

#[tokio::test]
async fn export_has_header_even_when_empty() {
    let app = app().await;

    let resp = send(&app, "GET", "/export.csv", &[], Body::empty()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv"
    );
    let text = body_text(resp).await;
    assert_eq!(
        text,
        "id,entrant_name,taste,presentation,easy,judge,device_id,created_at\n"
    );
}

#[tokio::test]
async fn export_row_count_and_quoting() {
    let app = app().await;

    rate_as(
        &app,
        "dev-1",
        json!({"entrant_index": 0, "taste": 5, "presentation": 4, "easy": 3, "judge": "Jo \"Q\" Smith"}),
    )
    .await;
    rate_as(
        &app,
        "dev-2",
        json!({"entrant_index": 1, "taste": 2, "presentation": 2, "easy": 2}),
    )
    .await;

    let resp = send(&app, "GET", "/export.csv", &[], Body::empty()).await;
    let text = body_text(resp).await;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3, "header plus one line per rating");
    assert!(text.contains(r#""Jo ""Q"" Smith""#));
    assert!(text.contains("\"Alice\""));
    assert!(text.contains("\"dev-2\""));
}

// =========================================================================
// Device identity cookie
// =========================================================================

#[tokio::test]
async fn home_issues_device_cookie_once() {
    let app = app().await;

    let resp = send(&app, "GET", "/", &[], Body::empty()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(set_cookie.starts_with("device_id="));
    assert!(set_cookie.contains("Max-Age=31536000"));
    assert!(set_cookie.contains("SameSite=Lax"));

    // A returning device keeps its identifier.
    let resp = send(
        &app,
        "GET",
        "/",
        &[("cookie", "device_id=dev-1")],
        Body::empty(),
    )
    .await;
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn cookieless_clients_share_the_anonymous_slot() {
    let app = app().await;

    // Two submissions without any cookie collapse into one rating.
    for taste in [2, 4] {
        let resp = send(
            &app,
            "POST",
            "/api/rate",
            &[("content-type", "application/json")],
            Body::from(
                json!({"entrant_index": 2, "taste": taste, "presentation": 3, "easy": 3})
                    .to_string(),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let (_, board) = get_json(&app, "/api/leaderboard", "dev-x").await;
    assert_eq!(board[0]["name"], json!("Carol"));
    assert_eq!(board[0]["votes"], json!(1));
    assert_eq!(board[0]["avg_taste"], json!(4.0));
}

// =========================================================================
// Admin gate
// =========================================================================

/// POST the login form; returns (status, session cookie if any, body).
async fn login(app: &Router, password: &str) -> (StatusCode, Option<String>, String) {
    let resp = send(
        app,
        "POST",
        "/admin",
        &[("content-type", "application/x-www-form-urlencoded")],
        Body::from(format!("password={password}")),
    )
    .await;
    let status = resp.status();
    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(String::from);
    (status, cookie, body_text(resp).await)
}

async fn get_admin(app: &Router, cookie: Option<&str>) -> (StatusCode, String) {
    let headers: Vec<(&str, &str)> = cookie.map(|c| ("cookie", c)).into_iter().collect();
    let resp = send(app, "GET", "/admin", &headers, Body::empty()).await;
    (resp.status(), body_text(resp).await)
}

#[tokio::test]
async fn admin_requires_password() {
    let app = app().await;

    let (status, text) = get_admin(&app, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("Password"), "should render the prompt");
    assert!(!text.contains("All Ratings"));
}

#[tokio::test]
async fn wrong_password_keeps_the_gate_closed() {
    let app = app().await;

    let (status, cookie, text) = login(&app, "wrong").await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("Incorrect password"));
    assert!(cookie.is_none(), "no session should be created");
}

#[tokio::test]
async fn login_view_logout_flow() {
    let app = app().await;

    rate_as(
        &app,
        "dev-1",
        json!({"entrant_index": 0, "taste": 5, "presentation": 4, "easy": 3, "judge": "Pat"}),
    )
    .await;

    let (status, cookie, _) = login(&app, "letmein").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let cookie = cookie.expect("login should establish a session");

    let (status, text) = get_admin(&app, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("All Ratings"));
    assert!(text.contains("Alice"));
    assert!(text.contains("Pat"));
    assert!(text.contains("12"), "total column should show 5+4+3");

    // Logout revokes access immediately.
    let resp = send(
        &app,
        "GET",
        "/admin/logout",
        &[("cookie", &cookie)],
        Body::empty(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let (_, text) = get_admin(&app, Some(&cookie)).await;
    assert!(text.contains("Password"), "gate should be closed again");
    assert!(!text.contains("All Ratings"));
}
