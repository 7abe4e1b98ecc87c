use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use staffdir_core::Store;
use staffdir_server::{router, AppState};
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_app() -> Router {
    let store = Arc::new(Store::open_in_memory().unwrap());
    router(AppState::new(store))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let app = create_test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn department_crud_flow() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/departments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(
        &app,
        "POST",
        "/departments",
        Some(json!({"id": "d1", "name": "Eng"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": "d1", "name": "Eng"}));

    let (status, body) = send(
        &app,
        "PUT",
        "/departments/d1",
        Some(json!({"id": "ignored", "name": "Engineering"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "d1", "name": "Engineering"}));

    let (status, body) = send(&app, "GET", "/departments/d1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Engineering");

    let (status, _) = send(&app, "DELETE", "/departments/d1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "DELETE", "/departments/d1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "NOT_FOUND");
}

#[tokio::test]
async fn employee_flow_with_department_listing() {
    let app = create_test_app();

    for (id, dept) in [("e2", "d1"), ("e1", "d1"), ("e3", "d2")] {
        let (status, _) = send(
            &app,
            "POST",
            "/employees",
            Some(json!({"id": id, "name": "N", "position": "Dev", "department:id": dept})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/employees/department/d1", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|employee| employee["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["e1", "e2"]);

    let (status, body) = send(
        &app,
        "PUT",
        "/employees/e1",
        Some(json!({"name": "B", "position": "Lead", "department:id": "d2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": "e1", "name": "B", "position": "Lead", "department:id": "d2"})
    );

    let (_, body) = send(&app, "GET", "/employees/department/d2", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(&app, "GET", "/employees/department/unknown", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (_, body) = send(&app, "GET", "/employees", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn missing_ids_map_to_not_found() {
    let app = create_test_app();

    let (status, _) = send(&app, "GET", "/employees/e404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        "/employees/e404",
        Some(json!({"name": "x", "position": "y", "department:id": "z"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/employees/e404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_body_and_empty_id_map_to_bad_request() {
    let app = create_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/departments")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "POST", "/employees", Some(json!({"id": 42}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "BAD_REQUEST");

    let (status, _) = send(&app, "POST", "/departments", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
