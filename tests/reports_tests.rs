mod common;

use axum::http::{Method, StatusCode};
use campusdesk::domain::Role;
use common::spawn_app;
use serde_json::{Value, json};

const DESCRIPTION: &str = "Broken window on the second floor";

async fn file_report(app: &common::TestApp, token: &str, body: Value) -> (StatusCode, Value) {
    app.post("/api/reports", Some(token), body).await
}

#[tokio::test]
async fn test_reference_data_is_seeded() {
    let app = spawn_app().await;
    let student = app.register("Student", "student@campus.edu").await;

    let (status, body) = app.get("/api/facilities", &student.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);

    let (status, body) = app.get("/api/reports/priorities", &student.token).await;
    assert_eq!(status, StatusCode::OK);
    let priorities = body["data"].as_array().unwrap();
    assert_eq!(priorities.len(), 4);
    let critical = priorities
        .iter()
        .find(|p| p["priority"] == "critical")
        .unwrap();
    assert_eq!(critical["responseHours"], 4);
}

#[tokio::test]
async fn test_create_report_defaults() {
    let app = spawn_app().await;
    let student = app.register("Student", "student@campus.edu").await;

    let (status, body) = file_report(
        &app,
        &student.token,
        json!({"facilityId": 1, "description": DESCRIPTION}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    let report = &body["data"];
    assert_eq!(report["status"], "pending");
    assert_eq!(report["priority"], "medium");
    assert_eq!(report["userId"], student.id);
    assert_eq!(report["facilityName"], "Main Library");
    assert_eq!(report["overdue"], false);
    assert!(report["dueAt"].as_str().unwrap() > report["createdAt"].as_str().unwrap());
}

#[tokio::test]
async fn test_create_report_rejections() {
    let app = spawn_app().await;
    let student = app.register("Student", "student@campus.edu").await;

    let (status, _) = file_report(
        &app,
        &student.token,
        json!({"facilityId": 999, "description": DESCRIPTION}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = file_report(
        &app,
        &student.token,
        json!({"facilityId": 1, "description": "short"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "description");

    let (status, body) = file_report(
        &app,
        &student.token,
        json!({"facilityId": 1, "priority": "urgent", "description": DESCRIPTION}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "priority");

    let (status, body) = file_report(
        &app,
        &student.token,
        json!({"facilityId": 0, "description": DESCRIPTION}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "facilityId");

    let (_, body) = app.get("/api/reports", &student.token).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_status_updates_are_staff_only() {
    let app = spawn_app().await;
    let student = app.register("Student", "student@campus.edu").await;
    let maintenance = app
        .user_with_roles("fixit@campus.edu", &[Role::Maintenance])
        .await;

    let (_, body) = file_report(
        &app,
        &student.token,
        json!({"facilityId": 2, "priority": "high", "description": DESCRIPTION}),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/reports/{id}/status");

    let (status, _) = app
        .request(
            Method::PATCH,
            &uri,
            Some(&student.token),
            Some(json!({"status": "resolved"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request(
            Method::PATCH,
            &uri,
            Some(&maintenance.token),
            Some(json!({"status": "bogus"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "status");

    let (status, body) = app
        .request(
            Method::PATCH,
            &uri,
            Some(&maintenance.token),
            Some(json!({"status": "in_progress"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "in_progress");

    let (_, body) = app.get("/api/notifications", &student.token).await;
    let kinds: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["report_status_changed"]);

    let (status, _) = app
        .request(
            Method::PATCH,
            "/api/reports/4242/status",
            Some(&maintenance.token),
            Some(json!({"status": "resolved"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_new_reports_notify_maintenance() {
    let app = spawn_app().await;
    let student = app.register("Student", "student@campus.edu").await;
    let maintenance = app
        .user_with_roles("fixit@campus.edu", &[Role::Maintenance])
        .await;
    let teacher = app
        .user_with_roles("teacher@campus.edu", &[Role::Teacher])
        .await;

    let (status, _) = file_report(
        &app,
        &student.token,
        json!({"facilityId": 3, "description": DESCRIPTION}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = app.get("/api/notifications", &maintenance.token).await;
    let notes = body["data"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["kind"], "report_created");
    assert_eq!(notes[0]["read"], false);

    let (_, body) = app.get("/api/notifications", &teacher.token).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_report_visibility() {
    let app = spawn_app().await;
    let alice = app.register("Alice", "alice@campus.edu").await;
    let bob = app.register("Bob", "bob@campus.edu").await;
    let maintenance = app
        .user_with_roles("fixit@campus.edu", &[Role::Maintenance])
        .await;

    let (_, body) = file_report(
        &app,
        &alice.token,
        json!({"facilityId": 1, "description": DESCRIPTION}),
    )
    .await;
    let alice_report = body["data"]["id"].as_i64().unwrap();
    file_report(
        &app,
        &bob.token,
        json!({"facilityId": 4, "description": "Leaking tap in the kitchen"}),
    )
    .await;

    // Students only ever see their own, whatever they filter on.
    let (_, body) = app
        .get(&format!("/api/reports?userId={}", bob.id), &alice.token)
        .await;
    let seen = body["data"].as_array().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["userId"], alice.id);

    let (status, _) = app
        .get(&format!("/api/reports/{alice_report}"), &bob.token)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .get(&format!("/api/reports/{alice_report}"), &alice.token)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/reports", &maintenance.token).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = app
        .get("/api/reports?facilityId=4", &maintenance.token)
        .await;
    let filtered = body["data"].as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["userId"], bob.id);

    let (_, body) = app
        .get("/api/reports?status=resolved", &maintenance.token)
        .await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, _) = app.get("/api/reports/999", &maintenance.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_facility_management_is_admin_only() {
    let app = spawn_app().await;
    let admin = app.admin().await;
    let student = app.register("Student", "student@campus.edu").await;

    let (status, body) = app
        .post(
            "/api/facilities",
            Some(&admin.token),
            json!({"name": "Art Studio", "location": "East wing"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Art Studio");

    let (status, _) = app
        .post(
            "/api/facilities",
            Some(&admin.token),
            json!({"name": "Art Studio"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post(
            "/api/facilities",
            Some(&student.token),
            json!({"name": "Secret Lab"}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = app.get("/api/facilities", &student.token).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 6);
}
