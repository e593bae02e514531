mod common;

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{TestApp, strings};

#[tokio::test]
async fn hackx_membership_flow() {
    let app = TestApp::new();
    let alice = app.token("alice");
    let bob = app.token("bob");
    let carol = app.token("carol");

    let group_id = app.create_group("alice", "HackX", Some(2)).await;
    let group = app.group(&group_id, "alice").await;
    assert_eq!(strings(&group["members"]), vec!["alice"]);
    assert_eq!(group["memberCount"], 1);
    assert_eq!(group["status"], "open");

    let join = format!("/api/groups/{group_id}/join");
    let (status, body) = app.post_json(&join, json!({}), Some(&bob)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["respData"]["success"], true);

    let (status, _) = app.post_json(&join, json!({ "userId": "carol" }), Some(&carol)).await;
    assert_eq!(status, StatusCode::OK);

    let group = app.group(&group_id, "alice").await;
    assert_eq!(strings(&group["pendingMembers"]), vec!["bob", "carol"]);

    let approve = format!("/api/groups/{group_id}/approve");
    let (status, _) = app
        .post_json(&approve, json!({ "userId": "bob", "creatorId": "alice" }), Some(&alice))
        .await;
    assert_eq!(status, StatusCode::OK);

    let group = app.group(&group_id, "alice").await;
    assert_eq!(strings(&group["members"]), vec!["alice", "bob"]);
    assert_eq!(strings(&group["pendingMembers"]), vec!["carol"]);
    assert_eq!(strings(&group["approvedMembers"]), vec!["bob"]);

    let (status, body) = app
        .post_json(&approve, json!({ "userId": "carol" }), Some(&alice))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1006);

    let group = app.group(&group_id, "alice").await;
    assert_eq!(group["memberCount"], 2);
    assert_eq!(strings(&group["pendingMembers"]), vec!["carol"]);

    let dave = app.token("dave");
    let (status, _) = app.post_json(&join, json!({}), Some(&dave)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_group_validates_input() {
    let app = TestApp::new();
    let alice = app.token("alice");

    let (status, body) = app
        .post_json("/api/groups", json!({ "groupName": "" }), Some(&alice))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1000);

    let (status, _) = app
        .post_json(
            "/api/groups",
            json!({ "groupName": "HackX", "maxMembers": 0 }),
            Some(&alice),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.get_json("/api/groups", Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["respData"]["groups"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn body_identity_must_match_token() {
    let app = TestApp::new();
    let mallory = app.token("mallory");

    let (status, _) = app
        .post_json(
            "/api/groups",
            json!({ "groupName": "Fake", "creatorId": "alice" }),
            Some(&mallory),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let group_id = app.create_group("alice", "HackX", None).await;
    app.post_json(
        &format!("/api/groups/{group_id}/join"),
        json!({}),
        Some(&app.token("bob")),
    )
    .await;

    // claiming to be the creator does not help
    let (status, _) = app
        .post_json(
            &format!("/api/groups/{group_id}/approve"),
            json!({ "userId": "bob", "creatorId": "alice" }),
            Some(&mallory),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // neither does omitting the field
    let (status, _) = app
        .post_json(
            &format!("/api/groups/{group_id}/approve"),
            json!({ "userId": "bob" }),
            Some(&mallory),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let group = app.group(&group_id, "alice").await;
    assert_eq!(strings(&group["pendingMembers"]), vec!["bob"]);
    assert_eq!(strings(&group["members"]), vec!["alice"]);
}

#[tokio::test]
async fn duplicate_join_requests_are_collapsed() {
    let app = TestApp::new();
    let bob = app.token("bob");
    let group_id = app.create_group("alice", "HackX", Some(4)).await;
    let join = format!("/api/groups/{group_id}/join");

    for _ in 0..3 {
        let (status, _) = app.post_json(&join, json!({}), Some(&bob)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let group = app.group(&group_id, "alice").await;
    assert_eq!(strings(&group["pendingMembers"]), vec!["bob"]);

    let (status, _) = app
        .post_json(&join, json!({}), Some(&app.token("alice")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn reject_cancel_and_close() {
    let app = TestApp::new();
    let alice = app.token("alice");
    let bob = app.token("bob");
    let group_id = app.create_group("alice", "HackX", None).await;
    let join = format!("/api/groups/{group_id}/join");

    app.post_json(&join, json!({}), Some(&bob)).await;
    let (status, _) = app
        .post_json(
            &format!("/api/groups/{group_id}/reject"),
            json!({ "userId": "bob" }),
            Some(&alice),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    app.post_json(&join, json!({}), Some(&bob)).await;
    let cancel = format!("/api/groups/{group_id}/cancel");
    let (status, _) = app.post_json(&cancel, json!({}), Some(&bob)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.post_json(&cancel, json!({}), Some(&bob)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let close = format!("/api/groups/{group_id}/close");
    let (status, _) = app.post_json(&close, json!({}), Some(&bob)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.post_json(&close, json!({}), Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.post_json(&join, json!({}), Some(&bob)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let group = app.group(&group_id, "alice").await;
    assert_eq!(group["status"], "closed");
    assert!(strings(&group["pendingMembers"]).is_empty());
}

#[tokio::test]
async fn list_endpoints_filter_groups() {
    let app = TestApp::new();
    let alice = app.token("alice");
    let bob = app.token("bob");

    let hackx = app.create_group("alice", "HackX", Some(3)).await;
    let other = app.create_group("bob", "Other", None).await;

    app.post_json(&format!("/api/groups/{other}/join"), json!({}), Some(&alice))
        .await;
    app.post_json(
        &format!("/api/groups/{other}/approve"),
        json!({ "userId": "alice" }),
        Some(&bob),
    )
    .await;

    let (status, body) = app.get_json("/api/groups", Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["respData"]["success"], true);
    assert_eq!(body["respData"]["groups"].as_array().unwrap().len(), 2);

    let (_, body) = app.get_json("/api/groups/created", Some(&alice)).await;
    let created = body["respData"]["groups"].as_array().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["id"], hackx.as_str());
    assert_eq!(created[0]["memberCount"], 1);

    let (_, body) = app
        .get_json("/api/groups/created?userId=bob", Some(&alice))
        .await;
    let created = body["respData"]["groups"].as_array().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["id"], other.as_str());
    assert_eq!(created[0]["memberCount"], 2);

    let (_, body) = app.get_json("/api/groups/joined", Some(&alice)).await;
    assert_eq!(body["respData"]["groups"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_group_is_not_found() {
    let app = TestApp::new();
    let bob = app.token("bob");

    let (status, body) = app.get_json("/api/groups/nope", Some(&bob)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1004);

    let (status, _) = app
        .post_json("/api/groups/nope/join", json!({}), Some(&bob))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn caller_only_commands_accept_an_empty_body() {
    let app = TestApp::new();
    let alice = app.token("alice");
    let bob = app.token("bob");
    let group_id = app.create_group("alice", "HackX", None).await;

    let (status, body) = app
        .post_empty(&format!("/api/groups/{group_id}/join"), Some(&bob))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["respData"]["success"], true);
    let group = app.group(&group_id, "alice").await;
    assert_eq!(strings(&group["pendingMembers"]), vec!["bob"]);

    let (status, _) = app
        .post_empty(&format!("/api/groups/{group_id}/cancel"), Some(&bob))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post_empty(&format!("/api/groups/{group_id}/close"), Some(&alice))
        .await;
    assert_eq!(status, StatusCode::OK);

    let group = app.group(&group_id, "alice").await;
    assert_eq!(group["status"], "closed");
    assert!(strings(&group["pendingMembers"]).is_empty());
}
