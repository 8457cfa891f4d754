use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

use server::{startup::{build_app, with_timeout}, AppState};

fn build(default_limit: i64) -> anyhow::Result<Router> {
    let state = AppState::in_memory(default_limit)?;
    Ok(build_app(state, Duration::from_secs(5)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v)?)
        }
        None => Body::empty(),
    };
    let resp = app.clone().call(req.body(body)?).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

async fn create_user(app: &Router, first: &str, last: &str) -> anyhow::Result<String> {
    let (status, body) = send(app, "POST", "/users", Some(json!({"first_name": first, "last_name": last, "email": "x@example.com", "phone": "1"}))).await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    Ok(body["data"]["id"].as_str().unwrap_or_default().to_string())
}

async fn create_course(app: &Router, name: &str) -> anyhow::Result<String> {
    let (status, body) = send(app, "POST", "/curses", Some(json!({"name": name, "start_date": "2024-01-10", "end_date": "2024-05-20"}))).await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    Ok(body["data"]["id"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn health_reports_ok() -> anyhow::Result<()> {
    let app = build(10)?;
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn user_lifecycle() -> anyhow::Result<()> {
    let app = build(10)?;
    let id = create_user(&app, "Ada", "Lovelace").await?;

    let (status, body) = send(&app, "GET", &format!("/users/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"]["first_name"], "Ada");
    assert!(body.get("error").is_none());

    let (status, body) = send(&app, "PATCH", &format!("/users/{id}"), Some(json!({"phone": "555-0199"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["phone"], "555-0199");
    assert_eq!(body["data"]["last_name"], "Lovelace");

    let (status, body) = send(&app, "DELETE", &format!("/users/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "success");

    let (status, body) = send(&app, "GET", &format!("/users/{id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"status": 404, "error": "user not found"}));
    Ok(())
}

#[tokio::test]
async fn missing_first_name_is_400_with_message() -> anyhow::Result<()> {
    let app = build(10)?;
    let (status, body) = send(&app, "POST", "/users", Some(json!({"last_name": "Lovelace"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"status": 400, "error": "first name is required"}));
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_invalid_request_format() -> anyhow::Result<()> {
    let app = build(10)?;
    let req = Request::builder()
        .method("POST")
        .uri("/curses")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["error"], "invalid request format");
    assert_eq!(body["status"], 400);
    Ok(())
}

#[tokio::test]
async fn course_date_errors_are_400() -> anyhow::Result<()> {
    let app = build(10)?;
    let (status, body) = send(&app, "POST", "/curses", Some(json!({"name": "Algebra", "start_date": "not-a-date", "end_date": "2024-05-20"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("start_date"));

    let id = create_course(&app, "Algebra").await?;
    let (status, body) = send(&app, "GET", &format!("/curses/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["start_date"], "2024-01-10");
    Ok(())
}

#[tokio::test]
async fn enrollment_checks_references() -> anyhow::Result<()> {
    let app = build(10)?;
    let user_id = create_user(&app, "Ada", "Lovelace").await?;
    let course_id = create_course(&app, "Algebra").await?;

    let (status, body) = send(&app, "POST", "/enrollments", Some(json!({"user_id": user_id, "course_id": "missing"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "course id doesn't exist");

    let (status, body) = send(&app, "POST", "/enrollments", Some(json!({"user_id": "missing", "course_id": "missing"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "user id doesn't exist");

    // legacy field name
    let (status, body) = send(&app, "POST", "/enrollments", Some(json!({"user_id": user_id, "curse_id": course_id}))).await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["course_id"], course_id.as_str());

    let (status, body) = send(&app, "GET", &format!("/enrollments?user_id={user_id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total_count"], 1);
    Ok(())
}

#[tokio::test]
async fn list_pagination_and_filters() -> anyhow::Result<()> {
    let app = build(2)?;
    for name in ["Linear Algebra", "Calculus", "Abstract Algebra", "Algebraic Topology", "Statistics"] {
        create_course(&app, name).await?;
    }

    let (status, body) = send(&app, "GET", "/curses?name=ALGEBRA", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"], json!({"total_count": 3, "page": 1, "per_page": 2, "page_count": 2}));
    let names: Vec<&str> = body["data"].as_array().map(|a| a.iter().filter_map(|c| c["name"].as_str()).collect()).unwrap_or_default();
    assert_eq!(names, vec!["Algebraic Topology", "Abstract Algebra"]);

    let (_, body) = send(&app, "GET", "/curses?name=algebra&page=2", None).await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (_, body) = send(&app, "GET", "/curses?limit=abc&page=-3", None).await?;
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["per_page"], 2);
    assert_eq!(body["meta"]["total_count"], 5);

    let (status, body) = send(&app, "GET", "/curses?page=9&limit=10", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["page"], 9);
    Ok(())
}

#[tokio::test]
async fn metrics_count_matched_routes() -> anyhow::Result<()> {
    let app = build(10)?;
    send(&app, "GET", "/users/does-not-exist", None).await?;
    let resp = app.clone().call(Request::builder().uri("/metrics").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let text = String::from_utf8(bytes.to_vec())?;
    assert!(text.contains(r#"route="/users/:id""#), "{text}");
    assert!(text.contains(r#"status="404""#));
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let app = build(10)?;
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/enrollments").is_some());
    Ok(())
}

#[tokio::test]
async fn unknown_route_uses_the_envelope() -> anyhow::Result<()> {
    let app = build(10)?;
    let (status, body) = send(&app, "GET", "/nope", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"status": 404, "error": "route not found"}));
    Ok(())
}

#[tokio::test]
async fn wrong_method_uses_the_envelope() -> anyhow::Result<()> {
    let app = build(10)?;
    let (status, body) = send(&app, "PUT", "/users", Some(json!({"first_name": "Ada"}))).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"status": 405, "error": "method not allowed"}));

    let (status, body) = send(&app, "DELETE", "/enrollments/abc", None).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["status"], 405);
    Ok(())
}

#[tokio::test]
async fn slow_request_times_out_with_envelope() -> anyhow::Result<()> {
    let slow = Router::new().route(
        "/slow",
        axum::routing::get(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            "late"
        }),
    );
    let app = with_timeout(slow, Duration::from_millis(20));
    let (status, body) = send(&app, "GET", "/slow", None).await?;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body, json!({"status": 408, "error": "request timed out"}));
    Ok(())
}
