#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use hackgroups::{AppState, build_router, config::Config, database::MemoryStore, utils};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-jwt-secret";

pub fn test_config() -> Config {
    Config {
        database_url: None,
        redis_url: None,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        api_base_uri: "/api".to_string(),
        allowed_email_domain: "viit.ac.in".to_string(),
        admin_role: "Admin".to_string(),
        max_members_limit: 10,
        rate_limit_window_secs: 60,
        rate_limit_requests: 100,
    }
}

pub struct TestApp {
    app: Router,
    config: Config,
}

impl TestApp {
    pub fn new() -> Self {
        let config = test_config();
        let state = AppState {
            store: Arc::new(MemoryStore::new()),
            config: config.clone(),
        };

        Self {
            app: build_router(state),
            config,
        }
    }

    /// Token for `<user_id>@viit.ac.in`.
    pub fn token(&self, user_id: &str) -> String {
        self.token_for(user_id, &format!("{}@viit.ac.in", user_id), None)
    }

    pub fn token_for(&self, user_id: &str, email: &str, role: Option<&str>) -> String {
        utils::generate_token(user_id, email, role, &self.config, chrono::Duration::hours(1))
            .expect("failed to mint test token")
    }

    pub async fn post_json(&self, path: &str, body: Value, bearer: Option<&str>) -> (StatusCode, Value) {
        self.request_json(Method::POST, path, Some(body), bearer).await
    }

    /// POST without a body or content type.
    pub async fn post_empty(&self, path: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        self.request_json(Method::POST, path, None, bearer).await
    }

    pub async fn get_json(&self, path: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        self.request_json(Method::GET, path, None, bearer).await
    }

    /// Creates a group as `creator` and returns its id.
    pub async fn create_group(&self, creator: &str, name: &str, max_members: Option<u32>) -> String {
        let (status, body) = self
            .post_json(
                "/api/groups",
                serde_json::json!({
                    "groupName": name,
                    "description": "team up",
                    "maxMembers": max_members,
                }),
                Some(&self.token(creator)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");

        body["respData"]["groupId"]
            .as_str()
            .expect("create response misses groupId")
            .to_string()
    }

    pub async fn group(&self, group_id: &str, as_user: &str) -> Value {
        let (status, body) = self
            .get_json(&format!("/api/groups/{group_id}"), Some(&self.token(as_user)))
            .await;
        assert_eq!(status, StatusCode::OK);
        body["respData"].clone()
    }

    async fn request_json(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut req_builder = Request::builder().method(method).uri(path);

        if let Some(token) = bearer {
            req_builder = req_builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = match body {
            Some(body) => {
                req_builder = req_builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&body).expect("failed to serialize request body"))
            }
            None => Body::empty(),
        };

        let req = req_builder.body(body).expect("failed to build request");
        let response = self
            .app
            .clone()
            .oneshot(req)
            .await
            .expect("request execution failed");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("failed to read response body");

        if bytes.is_empty() {
            return (status, Value::Null);
        }

        let value = serde_json::from_slice(&bytes).expect("response is not valid json");
        (status, value)
    }
}

pub fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("expected a json array")
        .iter()
        .map(|v| v.as_str().expect("expected a string").to_string())
        .collect()
}
