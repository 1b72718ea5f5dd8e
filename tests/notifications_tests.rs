mod common;

use axum::http::{Method, StatusCode};
use campusdesk::domain::Role;
use common::spawn_app;
use serde_json::json;

async fn seed_notifications(app: &common::TestApp, reporter: &str, count: usize) {
    for i in 0..count {
        let (status, _) = app
            .post(
                "/api/reports",
                Some(reporter),
                json!({"facilityId": 1, "description": format!("Flickering light number {i}")}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_list_and_unread_filter() {
    let app = spawn_app().await;
    let student = app.register("Student", "student@campus.edu").await;
    let maintenance = app
        .user_with_roles("fixit@campus.edu", &[Role::Maintenance])
        .await;
    seed_notifications(&app, &student.token, 3).await;

    let (status, body) = app.get("/api/notifications", &maintenance.token).await;
    assert_eq!(status, StatusCode::OK);
    let notes = body["data"].as_array().unwrap();
    assert_eq!(notes.len(), 3);
    assert!(notes.iter().all(|n| n["userId"] == maintenance.id));
    let first = notes[0]["id"].as_i64().unwrap();

    let (status, body) = app
        .request(
            Method::PATCH,
            &format!("/api/notifications/{first}/read"),
            Some(&maintenance.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["read"], true);

    let (_, body) = app
        .get("/api/notifications?unread=true", &maintenance.token)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = app.get("/api/notifications", &maintenance.token).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_cannot_touch_other_users_notifications() {
    let app = spawn_app().await;
    let student = app.register("Student", "student@campus.edu").await;
    let maintenance = app
        .user_with_roles("fixit@campus.edu", &[Role::Maintenance])
        .await;
    seed_notifications(&app, &student.token, 1).await;

    let (_, body) = app.get("/api/notifications", &maintenance.token).await;
    let id = body["data"][0]["id"].as_i64().unwrap();

    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/notifications/{id}/read"),
            Some(&student.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app
        .get("/api/notifications?unread=true", &maintenance.token)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .request(
            Method::PATCH,
            "/api/notifications/9999/read",
            Some(&maintenance.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mark_all_read() {
    let app = spawn_app().await;
    let student = app.register("Student", "student@campus.edu").await;
    let maintenance = app
        .user_with_roles("fixit@campus.edu", &[Role::Maintenance])
        .await;
    seed_notifications(&app, &student.token, 2).await;

    let (status, body) = app
        .post("/api/notifications/read-all", Some(&maintenance.token), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["updated"], 2);

    let (_, body) = app
        .get("/api/notifications?unread=true", &maintenance.token)
        .await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (_, body) = app
        .post("/api/notifications/read-all", Some(&maintenance.token), json!({}))
        .await;
    assert_eq!(body["data"]["updated"], 0);
}
