#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use studio::router::init_router;
use studio::state::AppState;
use studio_auth::create_token;
use studio_config::{CorsConfig, JwtConfig, RateLimitConfig};
use studio_core::hash_password_with_cost;
use studio_db::Repositories;
use studio_models::{NewTeacher, NewUser, Teacher, User};

pub const TEST_PASSWORD: &str = "test!1234";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-at-least-32-characters".to_string(),
        expiration_secs: 3600,
    }
}

/// Full router over fresh in-memory repositories, rate limiting off.
pub fn setup_test_app() -> TestApp {
    let state = AppState::new(
        Repositories::in_memory(),
        jwt_config(),
        CorsConfig::from_origins("http://localhost:4200"),
        RateLimitConfig::disabled(),
    );
    TestApp {
        router: init_router(state.clone()),
        state,
    }
}

impl TestApp {
    pub async fn create_user(&self, email: &str, admin: bool) -> User {
        self.state
            .users
            .create(NewUser {
                email: email.to_string(),
                first_name: "Toto".to_string(),
                last_name: "Toto".to_string(),
                password_hash: hash_password_with_cost(TEST_PASSWORD, 4).unwrap(),
                admin,
            })
            .await
            .unwrap()
    }

    pub async fn create_teacher(&self, first_name: &str, last_name: &str) -> Teacher {
        self.state
            .teachers
            .create(NewTeacher {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            })
            .await
            .unwrap()
    }

    /// A user plus a valid bearer token for them.
    pub async fn login_as(&self, email: &str) -> (User, String) {
        let user = self.create_user(email, false).await;
        let token = create_token(email, &self.state.jwt_config).unwrap();
        (user, token)
    }

    /// Sends a request and returns the status with the JSON body (`Null` when empty).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
