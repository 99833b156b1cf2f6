use super::*;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use serde_json::{Value, json};

const TOKEN: &str = "token-abc";

/// Requests seen by the fake backend: (method + path, authorization, body).
type Seen = Arc<Mutex<Vec<(String, Option<String>, Value)>>>;

fn record(seen: &Seen, what: String, headers: &HeaderMap, body: Value) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    seen.lock().expect("seen mutex should lock").push((what, auth, body));
}

fn fake_backend(seen: Seen) -> Router {
    Router::new()
        .route(
            "/accounts",
            post(|State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                record(&seen, "POST /accounts".into(), &headers, body);
                Json(json!({ "jwt": "registered" }))
            }),
        )
        .route(
            "/accounts/jwt",
            post(|State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                let ok = body["password"] == "right";
                record(&seen, "POST /accounts/jwt".into(), &headers, body);
                if ok {
                    Ok(Json(json!({ "jwt": "logged-in" })))
                } else {
                    Err((StatusCode::UNAUTHORIZED, "bad credentials"))
                }
            }),
        )
        .route(
            "/games",
            get(|State(seen): State<Seen>, headers: HeaderMap| async move {
                record(&seen, "GET /games".into(), &headers, Value::Null);
                Json(json!([{
                    "id": "g-1",
                    "authorAccountId": "acct-1",
                    "title": "Chess",
                    "description": "Classic",
                    "comments": []
                }]))
            })
            .post(|State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                record(&seen, "POST /games".into(), &headers, body);
                StatusCode::CREATED
            }),
        )
        .route(
            "/games/{id}/comments",
            get(|State(seen): State<Seen>, Path(id): Path<String>, headers: HeaderMap| async move {
                record(&seen, format!("GET /games/{id}/comments"), &headers, Value::Null);
                Json(json!([{ "comment": "gg", "author": "ann" }]))
            })
            .post(
                |State(seen): State<Seen>, Path(id): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    record(&seen, format!("POST /games/{id}/comments"), &headers, body);
                    StatusCode::CREATED
                },
            ),
        )
        .route(
            "/games/{id}/scores",
            get(|State(seen): State<Seen>, Path(id): Path<String>, headers: HeaderMap| async move {
                record(&seen, format!("GET /games/{id}/scores"), &headers, Value::Null);
                Json(json!({ "average": 3.5, "count": 2 }))
            })
            .post(
                |State(seen): State<Seen>, Path(id): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    record(&seen, format!("POST /games/{id}/scores"), &headers, body);
                    StatusCode::CREATED
                },
            ),
        )
        .route("/broken/games", get(|| async { "not json" }))
        .with_state(seen)
}

async fn spawn_backend() -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind should succeed");
    let addr = listener.local_addr().expect("local addr");
    let app = fake_backend(seen.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), seen)
}

fn client(base_url: &str) -> HttpGameApi {
    HttpGameApi::new(base_url, ApiTimeouts { request_secs: 5, connect_secs: 1 }).expect("client should build")
}

fn last(seen: &Seen) -> (String, Option<String>, Value) {
    seen.lock()
        .expect("seen mutex should lock")
        .last()
        .cloned()
        .expect("at least one request")
}

// =============================================================================
// URL building
// =============================================================================

#[test]
fn new_rejects_unparsable_base_url() {
    let err = HttpGameApi::new("not a url", ApiTimeouts { request_secs: 1, connect_secs: 1 })
        .err()
        .expect("should fail");
    assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let api = client("http://api.local/v1/");
    assert_eq!(api.endpoint(&["games", "g-1", "scores"]).as_str(), "http://api.local/v1/games/g-1/scores");
}

#[test]
fn endpoint_percent_encodes_game_ids() {
    let api = client("http://api.local");
    assert_eq!(api.endpoint(&["games", "a/b c", "comments"]).as_str(), "http://api.local/games/a%2Fb%20c/comments");
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn login_posts_credentials_without_bearer() {
    let (base, seen) = spawn_backend().await;
    let creds = Credentials { username: "ann".into(), password: "right".into() };

    let jwt = client(&base).login(&creds).await.expect("login should succeed");

    assert_eq!(jwt.jwt, "logged-in");
    let (what, auth, body) = last(&seen);
    assert_eq!(what, "POST /accounts/jwt");
    assert_eq!(auth, None);
    assert_eq!(body, json!({ "username": "ann", "password": "right" }));
}

#[tokio::test]
async fn login_rejection_is_unauthorized_status() {
    let (base, _seen) = spawn_backend().await;
    let creds = Credentials { username: "ann".into(), password: "wrong".into() };

    let err = client(&base).login(&creds).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(matches!(err, ApiError::Status { ref body, .. } if body == "bad credentials"));
}

#[tokio::test]
async fn register_posts_to_accounts() {
    let (base, seen) = spawn_backend().await;
    let creds = Credentials { username: "bo".into(), password: "pw".into() };

    let jwt = client(&base).register(&creds).await.expect("register should succeed");

    assert_eq!(jwt.jwt, "registered");
    assert_eq!(last(&seen).0, "POST /accounts");
}

// =============================================================================
// Games, comments, scores
// =============================================================================

#[tokio::test]
async fn list_games_sends_bearer_and_decodes_bundles() {
    let (base, seen) = spawn_backend().await;

    let games = client(&base).list_games(TOKEN).await.expect("list should succeed");

    assert_eq!(games.len(), 1);
    assert_eq!(games[0].author_id, "acct-1");
    assert_eq!(last(&seen).1.as_deref(), Some("Bearer token-abc"));
}

#[tokio::test]
async fn create_game_posts_title_and_description() {
    let (base, seen) = spawn_backend().await;
    let game = NewGame::new("Go", "Stones").unwrap();

    client(&base).create_game(TOKEN, &game).await.expect("create should succeed");

    let (what, auth, body) = last(&seen);
    assert_eq!(what, "POST /games");
    assert_eq!(auth.as_deref(), Some("Bearer token-abc"));
    assert_eq!(body, json!({ "title": "Go", "description": "Stones" }));
}

#[tokio::test]
async fn list_comments_maps_comment_field_to_text() {
    let (base, seen) = spawn_backend().await;

    let comments = client(&base).list_comments(TOKEN, "g-7").await.expect("comments should load");

    assert_eq!(comments, vec![Comment { text: "gg".into(), author: "ann".into() }]);
    assert_eq!(last(&seen).0, "GET /games/g-7/comments");
}

#[tokio::test]
async fn post_comment_sends_comment_body() {
    let (base, seen) = spawn_backend().await;
    let comment = CommentText::new("well played").unwrap();

    client(&base).post_comment(TOKEN, "g-7", &comment).await.expect("post should succeed");

    let (what, _, body) = last(&seen);
    assert_eq!(what, "POST /games/g-7/comments");
    assert_eq!(body, json!({ "comment": "well played" }));
}

#[tokio::test]
async fn score_and_post_score_round_trip() {
    let (base, seen) = spawn_backend().await;
    let api = client(&base);

    api.post_score(TOKEN, "g-2", Score::new(5).unwrap())
        .await
        .expect("score post should succeed");
    assert_eq!(last(&seen).2, json!({ "score": 5 }));

    let agg = api.score(TOKEN, "g-2").await.expect("score should load");
    assert!((agg.average - 3.5).abs() < f64::EPSILON);
    assert_eq!(agg.count, 2);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn undecodable_body_is_decode_error() {
    let (base, _seen) = spawn_backend().await;
    let api = client(&format!("{base}/broken"));

    let err = api.list_games(TOKEN).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn missing_route_is_status_error() {
    let (base, _seen) = spawn_backend().await;
    let api = client(&format!("{base}/nowhere"));

    let err = api.score(TOKEN, "g-1").await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 404, .. }));
}

#[tokio::test]
async fn unreachable_backend_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let err = client(&format!("http://{addr}")).list_games(TOKEN).await.unwrap_err();

    assert!(matches!(err, ApiError::Request(_)));
}
