mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{TestApp, setup_test_app};

fn session_body(teacher_id: i64) -> Value {
    json!({
        "name": "Morning flow",
        "date": "2025-01-20T08:00:00",
        "teacher_id": teacher_id,
        "description": "Gentle vinyasa for early risers"
    })
}

async fn create_session(app: &TestApp, token: &str, body: Value) -> Value {
    let (status, created) = app.send("POST", "/api/session", Some(token), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    created
}

#[tokio::test]
async fn test_create_and_get_session() {
    let app = setup_test_app();
    let (_, token) = app.login_as("yoga@studio.com").await;
    let teacher = app.create_teacher("Margot", "Delahaye").await;

    let created = create_session(&app, &token, session_body(teacher.id)).await;
    assert_eq!(created["name"], "Morning flow");
    assert_eq!(created["date"], "2025-01-20T08:00:00");
    assert_eq!(created["teacher_id"], teacher.id);
    assert_eq!(created["users"], json!([]));
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = app
        .send("GET", &format!("/api/session/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_session_not_found_and_bad_id() {
    let app = setup_test_app();
    let (_, token) = app.login_as("yoga@studio.com").await;

    let (status, _) = app.send("GET", "/api/session/999", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send("GET", "/api/session/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_sessions() {
    let app = setup_test_app();
    let (_, token) = app.login_as("yoga@studio.com").await;
    let teacher = app.create_teacher("Margot", "Delahaye").await;

    let (status, body) = app.send("GET", "/api/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    create_session(&app, &token, session_body(teacher.id)).await;
    let mut second = session_body(teacher.id);
    second["name"] = json!("Evening yin");
    create_session(&app, &token, second).await;

    let (_, body) = app.send("GET", "/api/session", Some(&token), None).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Morning flow", "Evening yin"]);
}

#[tokio::test]
async fn test_create_session_validation() {
    let app = setup_test_app();
    let (_, token) = app.login_as("yoga@studio.com").await;
    let teacher = app.create_teacher("Margot", "Delahaye").await;

    let mut blank_name = session_body(teacher.id);
    blank_name["name"] = json!("  ");
    let mut long_description = session_body(teacher.id);
    long_description["description"] = json!("x".repeat(2501));
    let mut no_date = session_body(teacher.id);
    no_date.as_object_mut().unwrap().remove("date");
    let mut no_teacher = session_body(teacher.id);
    no_teacher.as_object_mut().unwrap().remove("teacher_id");

    for body in [blank_name, long_description, no_date, no_teacher] {
        let (status, _) = app.send("POST", "/api/session", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _) = app
        .send("POST", "/api/session", Some(&token), Some(session_body(999)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.send("GET", "/api/session", Some(&token), None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_session_with_participants() {
    let app = setup_test_app();
    let (user, token) = app.login_as("yoga@studio.com").await;
    let other = app.create_user("toto@toto.com", false).await;
    let teacher = app.create_teacher("Margot", "Delahaye").await;

    let mut body = session_body(teacher.id);
    body["users"] = json!([other.id, 999, user.id, other.id]);
    let created = create_session(&app, &token, body).await;

    assert_eq!(created["users"], json!([user.id, other.id]));
}

#[tokio::test]
async fn test_update_session() {
    let app = setup_test_app();
    let (user, token) = app.login_as("yoga@studio.com").await;
    let teacher = app.create_teacher("Margot", "Delahaye").await;
    let other_teacher = app.create_teacher("Hélène", "Thiercelin").await;

    let created = create_session(&app, &token, session_body(teacher.id)).await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/session/{id}");
    app.send("POST", &format!("{uri}/participate/{}", user.id), Some(&token), None)
        .await;

    let mut changes = session_body(other_teacher.id);
    changes["name"] = json!("Evening yin");
    changes["date"] = json!("2025-02-01");
    let (status, updated) = app.send("PUT", &uri, Some(&token), Some(changes)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Evening yin");
    assert_eq!(updated["date"], "2025-02-01T00:00:00");
    assert_eq!(updated["teacher_id"], other_teacher.id);
    assert_eq!(updated["users"], json!([user.id]));

    let mut clear = session_body(teacher.id);
    clear["users"] = json!([]);
    let (_, cleared) = app.send("PUT", &uri, Some(&token), Some(clear)).await;
    assert_eq!(cleared["users"], json!([]));
}

#[tokio::test]
async fn test_update_session_errors() {
    let app = setup_test_app();
    let (_, token) = app.login_as("yoga@studio.com").await;
    let teacher = app.create_teacher("Margot", "Delahaye").await;

    let (status, _) = app
        .send("PUT", "/api/session/999", Some(&token), Some(session_body(teacher.id)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send("PUT", "/api/session/abc", Some(&token), Some(session_body(teacher.id)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let created = create_session(&app, &token, session_body(teacher.id)).await;
    let uri = format!("/api/session/{}", created["id"]);
    let (status, _) = app
        .send("PUT", &uri, Some(&token), Some(session_body(999)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_session() {
    let app = setup_test_app();
    let (_, token) = app.login_as("yoga@studio.com").await;
    let teacher = app.create_teacher("Margot", "Delahaye").await;
    let created = create_session(&app, &token, session_body(teacher.id)).await;
    let uri = format!("/api/session/{}", created["id"]);

    let (status, body) = app.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, _) = app.send("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send("DELETE", "/api/session/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_participate() {
    let app = setup_test_app();
    let (user, token) = app.login_as("yoga@studio.com").await;
    let teacher = app.create_teacher("Margot", "Delahaye").await;
    let created = create_session(&app, &token, session_body(teacher.id)).await;
    let id = created["id"].as_i64().unwrap();

    let uri = format!("/api/session/{id}/participate/{}", user.id);
    let (status, _) = app.send("POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, session) = app
        .send("GET", &format!("/api/session/{id}"), Some(&token), None)
        .await;
    assert_eq!(session["users"], json!([user.id]));

    let (status, _) = app.send("POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send("POST", &format!("/api/session/999/participate/{}", user.id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send("POST", &format!("/api/session/{id}/participate/999"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send("POST", &format!("/api/session/{id}/participate/abc"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_no_longer_participate() {
    let app = setup_test_app();
    let (user, token) = app.login_as("yoga@studio.com").await;
    let teacher = app.create_teacher("Margot", "Delahaye").await;
    let created = create_session(&app, &token, session_body(teacher.id)).await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/session/{id}/participate/{}", user.id);

    let (status, _) = app.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.send("POST", &uri, Some(&token), None).await;
    let (status, _) = app.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, session) = app
        .send("GET", &format!("/api/session/{id}"), Some(&token), None)
        .await;
    assert_eq!(session["users"], json!([]));

    let (status, _) = app
        .send("DELETE", &format!("/api/session/999/participate/{}", user.id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
