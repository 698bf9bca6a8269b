//! Handler tests for the note endpoints, run against in-memory adapters.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::{NOTE_NOT_FOUND_MESSAGE, TITLE_MAX};
use crate::inbound::http::auth::TOKEN_MISSING_MESSAGE;
use crate::inbound::http::test_utils::{api_app, memory_state};

use super::*;

trait TestApp:
    Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
}

impl<S> TestApp for S where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
}

async fn send(app: &impl TestApp, req: test::TestRequest) -> (StatusCode, Value) {
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, body)
}

async fn token_for(app: &impl TestApp, username: &str) -> String {
    let register = test::TestRequest::post().uri("/api/register").set_json(json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": "pw",
    }));
    let (status, _) = send(app, register).await;
    assert_eq!(status, StatusCode::CREATED);

    let login = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({"username": username, "password": "pw"}));
    let (status, body) = send(app, login).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("token").to_owned()
}

fn authed(req: test::TestRequest, token: &str) -> test::TestRequest {
    req.insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
}

async fn create(app: &impl TestApp, token: &str, title: &str, content: &str) -> Value {
    let req = authed(test::TestRequest::post().uri("/api/notes"), token)
        .set_json(json!({"title": title, "content": content}));
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[rstest]
#[actix_web::test]
async fn created_note_reads_back_unchanged() {
    let app = test::init_service(api_app(memory_state())).await;
    let token = token_for(&app, "alice").await;

    let created = create(&app, &token, "T", "C").await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["created_at"], created["updated_at"]);

    let (status, fetched) = send(&app, authed(test::TestRequest::get().uri("/api/notes/1"), &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["title"], "T");
    assert_eq!(fetched["content"], "C");
}

#[rstest]
#[actix_web::test]
async fn list_is_scoped_to_owner_and_ordered() {
    let app = test::init_service(api_app(memory_state())).await;
    let alice = token_for(&app, "alice").await;
    let bob = token_for(&app, "bob").await;

    let (_, empty) = send(&app, authed(test::TestRequest::get().uri("/api/notes"), &alice)).await;
    assert_eq!(empty, json!([]));

    create(&app, &alice, "first", "a").await;
    create(&app, &bob, "theirs", "b").await;
    create(&app, &alice, "second", "c").await;

    let (status, listed) = send(&app, authed(test::TestRequest::get().uri("/api/notes"), &alice)).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = listed
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|note| note["title"].as_str())
        .collect();
    assert_eq!(titles, ["first", "second"]);
}

#[rstest]
#[case(test::TestRequest::get())]
#[case(test::TestRequest::put().set_json(json!({"title": "stolen"})))]
#[case(test::TestRequest::delete())]
#[actix_web::test]
async fn foreign_note_is_not_found(#[case] req: test::TestRequest) {
    let app = test::init_service(api_app(memory_state())).await;
    let alice = token_for(&app, "alice").await;
    let bob = token_for(&app, "bob").await;
    create(&app, &alice, "T", "C").await;

    let (status, body) = send(&app, authed(req.uri("/api/notes/1"), &bob)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], NOTE_NOT_FOUND_MESSAGE);

    let (status, untouched) = send(&app, authed(test::TestRequest::get().uri("/api/notes/1"), &alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(untouched["title"], "T");
}

#[rstest]
#[actix_web::test]
async fn partial_update_keeps_other_fields() {
    let app = test::init_service(api_app(memory_state())).await;
    let token = token_for(&app, "alice").await;
    let created = create(&app, &token, "T", "C").await;

    let req = authed(test::TestRequest::put().uri("/api/notes/1"), &token)
        .set_json(json!({"content": "C2"}));
    let (status, updated) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "T");
    assert_eq!(updated["content"], "C2");
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[rstest]
#[actix_web::test]
async fn whitespace_title_is_stored_verbatim() {
    let app = test::init_service(api_app(memory_state())).await;
    let token = token_for(&app, "alice").await;
    create(&app, &token, "T", "C").await;

    let req = authed(test::TestRequest::put().uri("/api/notes/1"), &token)
        .set_json(json!({"title": "   "}));
    let (status, updated) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "   ");
}

#[rstest]
#[case(json!({"title": ""}), "title", "empty")]
#[case(json!({"title": "t".repeat(TITLE_MAX + 1)}), "title", "too_long")]
#[case(json!({"content": ""}), "content", "empty")]
#[actix_web::test]
async fn invalid_update_is_rejected(
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = test::init_service(api_app(memory_state())).await;
    let token = token_for(&app, "alice").await;
    create(&app, &token, "T", "C").await;

    let req = authed(test::TestRequest::put().uri("/api/notes/1"), &token).set_json(body);
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[case(json!({"content": "C"}), &["title"][..])]
#[case(json!({"title": "T", "content": ""}), &["content"][..])]
#[case(json!({}), &["title", "content"][..])]
#[actix_web::test]
async fn create_requires_title_and_content(#[case] body: Value, #[case] fields: &[&str]) {
    let app = test::init_service(api_app(memory_state())).await;
    let token = token_for(&app, "alice").await;

    let req = authed(test::TestRequest::post().uri("/api/notes"), &token).set_json(body);
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], MISSING_FIELDS_MESSAGE);
    assert_eq!(body["details"]["fields"], json!(fields));
}

#[rstest]
#[actix_web::test]
async fn delete_removes_note_once() {
    let app = test::init_service(api_app(memory_state())).await;
    let token = token_for(&app, "alice").await;
    create(&app, &token, "T", "C").await;

    let (status, body) = send(&app, authed(test::TestRequest::delete().uri("/api/notes/1"), &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], NOTE_DELETED_MESSAGE);

    let (status, _) = send(&app, authed(test::TestRequest::delete().uri("/api/notes/1"), &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, authed(test::TestRequest::get().uri("/api/notes/1"), &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn non_numeric_id_is_not_found() {
    let app = test::init_service(api_app(memory_state())).await;
    let token = token_for(&app, "alice").await;
    let (status, body) = send(&app, authed(test::TestRequest::get().uri("/api/notes/abc"), &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], NOTE_NOT_FOUND_MESSAGE);
}

#[rstest]
#[case(test::TestRequest::get().uri("/api/notes"))]
#[case(test::TestRequest::get().uri("/api/notes/1"))]
#[case(test::TestRequest::post().uri("/api/notes").set_json(json!({"title": "T", "content": "C"})))]
#[case(test::TestRequest::delete().uri("/api/notes/1"))]
#[actix_web::test]
async fn note_routes_require_token(#[case] req: test::TestRequest) {
    let app = test::init_service(api_app(memory_state())).await;
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], TOKEN_MISSING_MESSAGE);
}

#[rstest]
#[case(test::TestRequest::post().uri("/api/notes"))]
#[case(test::TestRequest::put().uri("/api/notes/1"))]
#[case(test::TestRequest::put().uri("/api/notes/abc"))]
#[actix_web::test]
async fn missing_token_wins_over_malformed_request(#[case] req: test::TestRequest) {
    let app = test::init_service(api_app(memory_state())).await;
    let req = req
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json");
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], TOKEN_MISSING_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn malformed_header_wins_over_malformed_body() {
    let app = test::init_service(api_app(memory_state())).await;
    let req = test::TestRequest::post()
        .uri("/api/notes")
        .insert_header((header::AUTHORIZATION, "Token abc"))
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json");
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
