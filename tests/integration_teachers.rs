mod common;

use axum::http::StatusCode;

use common::setup_test_app;

#[tokio::test]
async fn test_list_teachers_ordered_by_id() {
    let app = setup_test_app();
    let (_, token) = app.login_as("yoga@studio.com").await;
    let margot = app.create_teacher("Margot", "Delahaye").await;
    let helene = app.create_teacher("Hélène", "Thiercelin").await;

    let (status, body) = app.send("GET", "/api/teacher", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    let teachers = body.as_array().unwrap();
    assert_eq!(teachers.len(), 2);
    assert_eq!(teachers[0]["id"], margot.id);
    assert_eq!(teachers[0]["firstName"], "Margot");
    assert_eq!(teachers[0]["lastName"], "Delahaye");
    assert_eq!(teachers[1]["id"], helene.id);
    assert!(teachers[1]["createdAt"].is_string());
}

#[tokio::test]
async fn test_get_teacher() {
    let app = setup_test_app();
    let (_, token) = app.login_as("yoga@studio.com").await;
    let margot = app.create_teacher("Margot", "Delahaye").await;

    let (status, body) = app
        .send("GET", &format!("/api/teacher/{}", margot.id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "Margot");

    let (status, _) = app.send("GET", "/api/teacher/999", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send("GET", "/api/teacher/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
