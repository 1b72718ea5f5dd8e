mod common;

use axum::http::StatusCode;
use campusdesk::domain::Role;
use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn test_create_record() {
    let app = spawn_app().await;
    let student = app.register("Student", "student@campus.edu").await;

    let (status, body) = app
        .post(
            "/api/wellness/records",
            Some(&student.token),
            json!({"stressLevel": 3, "sleepHours": 7, "dietQuality": "good"}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    let record = &body["data"];
    assert!(record["id"].as_i64().unwrap() > 0);
    assert!(record["createdAt"].is_string());
    assert_eq!(record["userId"], student.id);
    assert_eq!(record["stressLevel"], 3);
    assert_eq!(record["sleepHours"], 7.0);
    assert_eq!(record["dietQuality"], "good");
}

#[tokio::test]
async fn test_invalid_records_are_not_persisted() {
    let app = spawn_app().await;
    let student = app.register("Student", "student@campus.edu").await;

    let cases = [
        (json!({"stressLevel": 9, "sleepHours": 7, "dietQuality": "good"}), "stressLevel"),
        (json!({"stressLevel": -1, "sleepHours": 7, "dietQuality": "good"}), "stressLevel"),
        (json!({"stressLevel": 99999999999_i64, "sleepHours": 7, "dietQuality": "good"}), "stressLevel"),
        (json!({"stressLevel": 2.5, "sleepHours": 7, "dietQuality": "good"}), "stressLevel"),
        (json!({"stressLevel": 2, "sleepHours": "lots", "dietQuality": "good"}), "sleepHours"),
        (json!({"sleepHours": 7, "dietQuality": "good"}), "stressLevel"),
        (json!({"stressLevel": 2, "sleepHours": 25, "dietQuality": "good"}), "sleepHours"),
        (json!({"stressLevel": 2, "sleepHours": 7, "dietQuality": "amazing"}), "dietQuality"),
    ];

    for (payload, field) in cases {
        let (status, body) = app
            .post("/api/wellness/records", Some(&student.token), payload)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body["field"], field, "{body}");
    }

    let (_, body) = app.get("/api/wellness/records", &student.token).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_and_summary() {
    let app = spawn_app().await;
    let student = app.register("Student", "student@campus.edu").await;

    let (_, body) = app.get("/api/wellness/summary", &student.token).await;
    assert_eq!(body["data"]["recordCount"], 0);
    assert!(body["data"]["averageStress"].is_null());

    for (stress, sleep) in [(1, 8.0), (2, 6.0), (3, 7.0)] {
        let (status, _) = app
            .post(
                "/api/wellness/records",
                Some(&student.token),
                json!({"stressLevel": stress, "sleepHours": sleep, "dietQuality": "fair"}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = app.get("/api/wellness/records", &student.token).await;
    let records = body["data"].as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["stressLevel"], 3);

    let (_, body) = app
        .get("/api/wellness/records?limit=2", &student.token)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let other = app.register("Other", "other@campus.edu").await;
    app.post(
        "/api/wellness/records",
        Some(&other.token),
        json!({"stressLevel": 5, "sleepHours": 2, "dietQuality": "poor"}),
    )
    .await;

    let (_, body) = app.get("/api/wellness/summary", &student.token).await;
    let summary = &body["data"];
    assert_eq!(summary["recordCount"], 3);
    assert_eq!(summary["averageStress"], 2.0);
    assert_eq!(summary["averageSleep"], 7.0);
    assert_eq!(summary["latestAt"], records[0]["createdAt"]);
}

#[tokio::test]
async fn test_staff_views_other_users() {
    let app = spawn_app().await;
    let student = app.register("Student", "student@campus.edu").await;
    let other = app.register("Other", "other@campus.edu").await;
    let counselor = app
        .user_with_roles("counselor@campus.edu", &[Role::Wellness])
        .await;

    app.post(
        "/api/wellness/records",
        Some(&student.token),
        json!({"stressLevel": 2, "sleepHours": 8, "dietQuality": "excellent"}),
    )
    .await;

    let records_uri = format!("/api/wellness/users/{}/records", student.id);
    let summary_uri = format!("/api/wellness/users/{}/summary", student.id);

    let (status, body) = app.get(&records_uri, &counselor.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = app.get(&summary_uri, &counselor.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["recordCount"], 1);

    let (status, _) = app.get(&records_uri, &other.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get(&summary_uri, &other.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .get("/api/wellness/users/9999/records", &counselor.token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_high_stress_alerts_wellness_staff() {
    let app = spawn_app().await;
    let student = app.register("Student", "student@campus.edu").await;
    let counselor = app
        .user_with_roles("counselor@campus.edu", &[Role::Wellness])
        .await;

    app.post(
        "/api/wellness/records",
        Some(&student.token),
        json!({"stressLevel": 2, "sleepHours": 8, "dietQuality": "good"}),
    )
    .await;

    let (_, body) = app.get("/api/notifications", &counselor.token).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    app.post(
        "/api/wellness/records",
        Some(&student.token),
        json!({"stressLevel": 5, "sleepHours": 3.5, "dietQuality": "poor"}),
    )
    .await;

    let (_, body) = app.get("/api/notifications", &counselor.token).await;
    let notes = body["data"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["kind"], "high_stress");

    let (_, body) = app.get("/api/notifications", &student.token).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}
