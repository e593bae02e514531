mod common;

use axum::http::StatusCode;

use crate::common::{TestApp, strings};

fn menu_titles(body: &serde_json::Value) -> Vec<String> {
    body["respData"]["menu"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn admin_session_includes_admin_menu() {
    let app = TestApp::new();
    let admin = app.token_for("root", "root@viit.ac.in", Some("Admin"));

    let (status, body) = app.get_json("/api/session", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["respData"]["isAdmin"], true);
    assert_eq!(body["respData"]["user"]["email"], "root@viit.ac.in");
    assert!(menu_titles(&body).contains(&"Admin-Event".to_string()));
}

#[tokio::test]
async fn student_session_lists_joined_groups() {
    let app = TestApp::new();
    let bob = app.token("bob");
    let group_id = app.create_group("bob", "HackX", None).await;

    let (status, body) = app.get_json("/api/session", Some(&bob)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["respData"]["isAdmin"], false);
    assert_eq!(body["respData"]["user"]["id"], "bob");
    assert_eq!(body["respData"]["user"]["status"], "active");
    assert_eq!(strings(&body["respData"]["groups"]), vec![group_id]);

    let titles = menu_titles(&body);
    assert_eq!(titles.len(), 5);
    assert!(!titles.contains(&"Admin-Event".to_string()));

    // resolving again does not duplicate or reset the profile
    let (_, again) = app.get_json("/api/session", Some(&bob)).await;
    assert_eq!(
        again["respData"]["user"]["createdAt"],
        body["respData"]["user"]["createdAt"]
    );
}

#[tokio::test]
async fn session_follows_email_change_for_same_subject() {
    let app = TestApp::new();
    let before = app.token_for("u1", "ana@viit.ac.in", None);
    let after = app.token_for("u1", "Ana.New@viit.ac.in", None);

    let (status, first) = app.get_json("/api/session", Some(&before)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, second) = app.get_json("/api/session", Some(&after)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["respData"]["user"]["id"], "u1");
    assert_eq!(second["respData"]["user"]["email"], "ana.new@viit.ac.in");
    assert_eq!(
        second["respData"]["user"]["createdAt"],
        first["respData"]["user"]["createdAt"]
    );
}
