//! Tree CRUD, cycle detection, cascade, and export integration tests.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_chain_materializes_paths() {
    let app = TestApp::new().await;
    let token = app.register_and_login("alice", "hunter2hunter2").await;

    let a = app.create_node(&token, "a", None).await;
    let b = app.create_node(&token, "b", Some(a)).await;
    let c = app.create_node(&token, "c", Some(b)).await;

    assert_eq!(app.path_of(a).await.unwrap(), a.to_string());
    assert_eq!(app.path_of(b).await.unwrap(), format!("{a}/{b}"));
    assert_eq!(app.path_of(c).await.unwrap(), format!("{a}/{b}/{c}"));
}

#[tokio::test]
async fn test_get_node_and_not_found() {
    let app = TestApp::new().await;
    let token = app.register_and_login("alice", "hunter2hunter2").await;

    let a = app.create_node(&token, "a", None).await;

    let (status, body) = app.get(&format!("/api/tree/nodes/{a}"), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "a");

    let missing = Uuid::new_v4();
    let (status, body) = app
        .get(&format!("/api/tree/nodes/{missing}"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_roots_ordered_by_name() {
    let app = TestApp::new().await;
    let token = app.register_and_login("alice", "hunter2hunter2").await;

    app.create_node(&token, "zebra", None).await;
    app.create_node(&token, "apple", None).await;
    let parent = app.create_node(&token, "mango", None).await;
    app.create_node(&token, "nested", Some(parent)).await;

    let (status, body) = app.get("/api/tree/nodes", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["apple", "mango", "zebra"]);
}

#[tokio::test]
async fn test_update_and_delete_are_admin_only() {
    let app = TestApp::new().await;
    let user_token = app.register_and_login("alice", "hunter2hunter2").await;

    let a = app.create_node(&user_token, "a", None).await;

    let (status, _) = app
        .put(
            &format!("/api/tree/nodes/{a}"),
            Some(&user_token),
            json!({ "name": "renamed" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .delete(&format!("/api/tree/nodes/{a}"), Some(&user_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin_token = app.seed_admin("admin", "admin-password").await;
    let (status, body) = app
        .put(
            &format!("/api/tree/nodes/{a}"),
            Some(&admin_token),
            json!({ "name": "renamed", "description": "now with text" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "renamed");
    assert_eq!(body["data"]["description"], "now with text");
}

#[tokio::test]
async fn test_cycle_detection_leaves_paths_unchanged() {
    let app = TestApp::new().await;
    let admin_token = app.seed_admin("admin", "admin-password").await;

    let a = app.create_node(&admin_token, "a", None).await;
    let b = app.create_node(&admin_token, "b", Some(a)).await;
    let c = app.create_node(&admin_token, "c", Some(b)).await;

    // A under its own descendant C.
    let (status, body) = app
        .put(
            &format!("/api/tree/nodes/{a}"),
            Some(&admin_token),
            json!({ "parent_id": c }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CYCLE_DETECTED");

    // A under itself.
    let (status, _) = app
        .put(
            &format!("/api/tree/nodes/{a}"),
            Some(&admin_token),
            json!({ "parent_id": a }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    assert_eq!(app.path_of(a).await.unwrap(), a.to_string());
    assert_eq!(app.path_of(b).await.unwrap(), format!("{a}/{b}"));
    assert_eq!(app.path_of(c).await.unwrap(), format!("{a}/{b}/{c}"));
}

#[tokio::test]
async fn test_reparenting_cascades_to_descendants() {
    let app = TestApp::new().await;
    let admin_token = app.seed_admin("admin", "admin-password").await;

    let a = app.create_node(&admin_token, "a", None).await;
    let b = app.create_node(&admin_token, "b", Some(a)).await;
    let c = app.create_node(&admin_token, "c", Some(b)).await;
    let d = app.create_node(&admin_token, "d", None).await;

    let (status, _) = app
        .put(
            &format!("/api/tree/nodes/{b}"),
            Some(&admin_token),
            json!({ "parent_id": d }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(app.path_of(b).await.unwrap(), format!("{d}/{b}"));
    assert_eq!(app.path_of(c).await.unwrap(), format!("{d}/{b}/{c}"));
    assert_eq!(app.path_of(a).await.unwrap(), a.to_string());
}

#[tokio::test]
async fn test_delete_removes_exactly_the_subtree() {
    let app = TestApp::new().await;
    let admin_token = app.seed_admin("admin", "admin-password").await;

    let a = app.create_node(&admin_token, "a", None).await;
    let b = app.create_node(&admin_token, "b", Some(a)).await;
    let c = app.create_node(&admin_token, "c", Some(b)).await;

    let (status, _) = app
        .delete(&format!("/api/tree/nodes/{b}"), Some(&admin_token))
        .await;
    assert_eq!(status, StatusCode::OK);

    assert!(app.path_of(b).await.is_none());
    assert!(app.path_of(c).await.is_none());
    assert!(app.path_of(a).await.is_some());

    // Deleting again is a 404.
    let (status, _) = app
        .delete(&format!("/api/tree/nodes/{b}"), Some(&admin_token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_tree_full_forest_and_rooted() {
    let app = TestApp::new().await;
    let token = app.register_and_login("alice", "hunter2hunter2").await;

    let a = app.create_node(&token, "a", None).await;
    let b = app.create_node(&token, "b", Some(a)).await;
    let _c = app.create_node(&token, "c", Some(b)).await;
    let d = app.create_node(&token, "d", None).await;

    // Forest under the synthetic root.
    let (status, body) = app.get("/api/tree/tree", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Root");
    assert_eq!(body["data"]["id"], Uuid::nil().to_string());
    assert_eq!(body["data"]["children"].as_array().unwrap().len(), 2);

    // Rooted tree.
    let (status, body) = app
        .get(&format!("/api/tree/tree?root_id={a}"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], a.to_string());
    let children = body["data"]["children"].as_array().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0]["id"], b.to_string());
    assert_eq!(children[0]["children"].as_array().unwrap().len(), 1);

    // A root with no descendants.
    let (status, body) = app
        .get(&format!("/api/tree/tree?root_id={d}"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["children"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_tree_with_unknown_root_is_bad_request() {
    let app = TestApp::new().await;
    let token = app.register_and_login("alice", "hunter2hunter2").await;

    let missing = Uuid::new_v4();
    let (status, body) = app
        .get(&format!("/api/tree/tree?root_id={missing}"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_ROOT");
}

#[tokio::test]
async fn test_get_subtree_returns_children_only() {
    let app = TestApp::new().await;
    let token = app.register_and_login("alice", "hunter2hunter2").await;

    let a = app.create_node(&token, "a", None).await;
    let b = app.create_node(&token, "b", Some(a)).await;

    let (status, body) = app
        .get(&format!("/api/tree/nodes/{a}/subtree"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    let subtree = body["data"].as_array().unwrap();
    assert_eq!(subtree.len(), 1);
    assert_eq!(subtree[0]["id"], b.to_string());

    let missing = Uuid::new_v4();
    let (status, _) = app
        .get(&format!("/api/tree/nodes/{missing}/subtree"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_export_returns_pretty_json() {
    let app = TestApp::new().await;
    let token = app.register_and_login("alice", "hunter2hunter2").await;

    let a = app.create_node(&token, "a", None).await;
    let _b = app.create_node(&token, "b", Some(a)).await;

    let (status, body) = app
        .get(&format!("/api/tree/export?root_id={a}"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    // The export payload is the bare tree, not the success envelope.
    assert_eq!(body["id"], a.to_string());
    assert_eq!(body["children"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_with_missing_parent_is_not_found() {
    let app = TestApp::new().await;
    let token = app.register_and_login("alice", "hunter2hunter2").await;

    let missing = Uuid::new_v4();
    let (status, _) = app
        .post(
            "/api/tree/nodes",
            Some(&token),
            json!({ "name": "dangling", "parent_id": missing }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_with_blank_name_is_rejected() {
    let app = TestApp::new().await;
    let token = app.register_and_login("alice", "hunter2hunter2").await;

    let (status, _) = app
        .post("/api/tree/nodes", Some(&token), json!({ "name": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/api/tree/nodes", Some(&token), json!({ "name": "   " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
