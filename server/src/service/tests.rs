use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::{router, AppState};
use crate::persistence::sqlite::Database;

async fn app() -> (Database, Router) {
    let db = Database::new_in_memory().await.unwrap();
    let app = router(AppState::new(&db));
    (db, app)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            req = req.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(req.body(body).expect("request build should succeed"))
        .await
        .expect("router should respond");

    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

fn submission(name: &str, total_score: i64) -> Value {
    json!({
        "name": name,
        "time": 120,
        "timeScore": 300,
        "questionScore": total_score - 300,
        "totalScore": total_score,
        "details": [
            {
                "choiceId": "c1",
                "choiceText": "Check airway",
                "questionText": "First step?",
                "scenario": "S1",
                "isCorrect": true,
                "wasClicked": true,
                "attemptNo": 1
            },
            {
                "choiceId": "c2",
                "choiceText": "Call family",
                "questionText": "First step?",
                "scenario": "S1",
                "patientIndex": 2,
                "isCorrect": false,
                "wasClicked": true,
                "attemptNo": 2
            }
        ]
    })
}

#[tokio::test]
async fn create_then_fetch_session() {
    let (_db, app) = app().await;

    let (status, created) = send(&app, Method::POST, "/score", Some(submission("Alice", 850))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Alice");
    assert_eq!(created["details"].as_array().unwrap().len(), 2);
    assert_eq!(created["details"][0]["patientIndex"], 0);
    assert_eq!(created["details"][1]["patientIndex"], 2);

    let (status, fetched) = send(&app, Method::GET, &format!("/score/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn missing_session_is_null() {
    let (_db, app) = app().await;
    let (status, body) = send(&app, Method::GET, "/score/42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::DELETE, "/score/42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

fn assert_json_error(status: StatusCode, body: &Value) {
    assert!(status.is_client_error(), "expected 4xx, got {status}");
    let message = body["error"].as_str().unwrap_or_default();
    assert!(!message.is_empty(), "expected {{\"error\": ...}}, got {body}");
}

#[tokio::test]
async fn create_rejects_malformed_body() {
    let (_db, app) = app().await;

    let (status, body) = send(&app, Method::POST, "/score", Some(json!({ "name": "x" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_json_error(status, &body);
    assert!(body["error"].as_str().unwrap().contains("time"));

    let mut fractional = submission("Alice", 850);
    fractional["time"] = json!(12.5);
    let (status, body) = send(&app, Method::POST, "/score", Some(fractional)).await;
    assert_json_error(status, &body);

    let (_, page) = send(&app, Method::GET, "/score", None).await;
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn unparseable_json_is_json_error() {
    let (_db, app) = app().await;
    let req = Request::builder()
        .method(Method::POST)
        .uri("/score/bulk-delete")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(status, &body);
}

#[tokio::test]
async fn missing_content_type_is_json_error() {
    let (_db, app) = app().await;
    let req = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .body(Body::from(r#"{"username":"a","password":"b"}"#))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_json_error(status, &body);
}

#[tokio::test]
async fn bad_path_and_query_are_json_errors() {
    let (_db, app) = app().await;

    let (status, body) = send(&app, Method::GET, "/score/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(status, &body);

    let (status, body) = send(&app, Method::DELETE, "/admin/abc", None).await;
    assert_json_error(status, &body);

    let (status, body) = send(&app, Method::GET, "/score?page=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(status, &body);

    let (status, body) = send(&app, Method::GET, "/score?limit=ten", None).await;
    assert_json_error(status, &body);
}

#[tokio::test]
async fn list_is_paged_by_score() {
    let (_db, app) = app().await;
    for (name, score) in [("low", 400), ("high", 900), ("mid", 650)] {
        send(&app, Method::POST, "/score", Some(submission(name, score))).await;
    }

    let (status, page) = send(&app, Method::GET, "/score?page=1&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 3);
    assert_eq!(page["page"], 1);
    assert_eq!(page["limit"], 2);
    let names: Vec<&str> = page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["high", "mid"]);

    let (_, defaults) = send(&app, Method::GET, "/score", None).await;
    assert_eq!(defaults["page"], 1);
    assert_eq!(defaults["limit"], 10);
    assert_eq!(defaults["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn delete_single_and_bulk() {
    let (_db, app) = app().await;
    let mut ids = Vec::new();
    for i in 0..4 {
        let (_, created) = send(
            &app,
            Method::POST,
            "/score",
            Some(submission(&format!("p{i}"), 500 + i)),
        )
        .await;
        ids.push(created["id"].as_i64().unwrap());
    }

    let (status, removed) = send(&app, Method::DELETE, &format!("/score/{}", ids[0]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["id"], ids[0]);

    let (status, removed) = send(
        &app,
        Method::POST,
        "/score/bulk-delete",
        Some(json!({ "ids": [ids[1], ids[2]] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed.as_array().unwrap().len(), 2);

    let (_, removed) = send(
        &app,
        Method::POST,
        "/score/bulk-delete",
        Some(json!({ "ids": [] })),
    )
    .await;
    assert_eq!(removed, json!([]));

    let (_, removed) = send(
        &app,
        Method::POST,
        "/score/bulk-delete",
        Some(json!({ "deleteAll": true })),
    )
    .await;
    assert_eq!(removed.as_array().unwrap().len(), 1);

    let (_, page) = send(&app, Method::GET, "/score", None).await;
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn dashboard_stats_shape() {
    let (_db, app) = app().await;
    send(&app, Method::POST, "/score", Some(submission("Alice,Bob", 850))).await;
    send(&app, Method::POST, "/score", Some(submission("Carol", 450))).await;

    let (status, stats) = send(&app, Method::GET, "/score/dashboard/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["overview"]["totalParticipants"], 3);
    assert_eq!(stats["overview"]["avgTime"], 120);
    assert_eq!(stats["overview"]["avgQuestionScore"], 350);
    assert_eq!(
        stats["performance"],
        json!({ "excellent": 1, "average": 0, "needImprove": 1 })
    );
    assert_eq!(stats["trend"].as_array().unwrap().len(), 1);
    assert_eq!(stats["trend"][0]["avgScore"], 650.0);
    assert_eq!(
        stats["questionAnalysis"],
        json!([{ "scenario": "S1", "question": "First step?", "correct": 2, "wrong": 2 }])
    );
}

#[tokio::test]
async fn dashboard_stats_empty_store() {
    let (_db, app) = app().await;
    let (status, stats) = send(&app, Method::GET, "/score/dashboard/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stats["overview"],
        json!({ "totalParticipants": 0, "avgTime": 0, "avgQuestionScore": 0 })
    );
    assert_eq!(stats["trend"], json!([]));
    assert_eq!(stats["questionAnalysis"], json!([]));
}

#[tokio::test]
async fn login_checks_credentials() {
    let (_db, app) = app().await;
    send(
        &app,
        Method::POST,
        "/admin",
        Some(json!({ "username": "admin", "password": "secret" })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        Some(json!({ "username": "admin", "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["username"], "admin");
    assert!(body["user"].get("passwordHash").is_none());

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        Some(json!({ "username": "admin", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn admin_management() {
    let (_db, app) = app().await;
    let creds = json!({ "username": "ops", "password": "pw" });

    let (status, created) = send(&app, Method::POST, "/admin", Some(creds.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(&app, Method::POST, "/admin", Some(creds)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/admin/{id}/password"),
        Some(json!({ "password": "new" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/admin/{}/password", id + 1),
        Some(json!({ "password": "new" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/admin/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&app, Method::GET, "/admin", None).await;
    assert_eq!(list, json!([]));
}
