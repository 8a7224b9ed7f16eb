//! 项目接口测试
//!
//! 使用内存仓库构建完整的路由，通过 `oneshot` 直接发送请求，不需要启动HTTP服务。

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use common::{InMemoryProjectRepository, ALICE, BOB, ORG_ID};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use shared_lib::UnknownVisibility;
use std::sync::Arc;
use tower::ServiceExt;
use web_service::routes::create_app_router;

fn app(repo: &Arc<InMemoryProjectRepository>, policy: UnknownVisibility) -> Router {
    create_app_router(common::app_state(repo.clone(), policy))
}

/// 发送请求，返回状态码和json body（body不是json时为Null）
async fn send(app: &Router, method: Method, uri: &str, caller: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(caller) = caller {
        builder = builder.header("x-user-id", caller);
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn user(id: i64) -> Option<&'static str> {
    match id {
        ALICE => Some("3"),
        BOB => Some("4"),
        _ => None,
    }
}

#[tokio::test]
async fn public_project_is_previewed_by_anonymous_caller() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    let id = repo.insert("Sales Dashboard", ALICE, Some(true));
    let app = app(&repo, UnknownVisibility::Private);

    let (status, json) = send(&app, Method::GET, &format!("/api/v1/projects/{id}"), None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], json!(id));
    assert_eq!(json["name"], "Sales Dashboard");
    assert_eq!(json["orgId"], json!(ORG_ID));
    assert_eq!(json["visibility"], json!(true));
    assert_eq!(json["description"], Value::Null);
    assert_eq!(json["permission"]["vizPermission"], 1);
    assert_eq!(json["permission"]["viewPermission"], 0);
    assert_eq!(json["permission"]["isProjectAdmin"], false);
    assert_eq!(json["createBy"]["id"], json!(ALICE));
    assert_eq!(json["createBy"]["username"], "alice");
}

#[tokio::test]
async fn creator_gets_admin_permission_on_private_project() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    let id = repo.insert("Finance", ALICE, Some(false));
    let app = app(&repo, UnknownVisibility::Private);

    let (status, json) = send(&app, Method::GET, &format!("/api/v1/projects/{id}"), user(ALICE), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["permission"]["sourcePermission"], 3);
    assert_eq!(json["permission"]["sharePermission"], true);
    assert_eq!(json["permission"]["isProjectAdmin"], true);
}

#[tokio::test]
async fn private_project_is_forbidden_for_other_users() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    let id = repo.insert("Finance", ALICE, Some(false));
    let app = app(&repo, UnknownVisibility::Private);

    let (status, _) = send(&app, Method::GET, &format!("/api/v1/projects/{id}"), user(BOB), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn missing_project_returns_404() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    let app = app(&repo, UnknownVisibility::Private);

    let (status, _) = send(&app, Method::GET, "/api/v1/projects/999", user(ALICE), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_visibility_follows_configured_policy() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    let id = repo.insert("Draft", ALICE, None);
    let uri = format!("/api/v1/projects/{id}");

    let private = app(&repo, UnknownVisibility::Private);
    let (status, json) = send(&private, Method::GET, &uri, user(ALICE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["visibility"], Value::Null);

    let (status, _) = send(&private, Method::GET, &uri, user(BOB), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let public = app(&repo, UnknownVisibility::Public);
    let (status, json) = send(&public, Method::GET, &uri, user(BOB), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["visibility"], Value::Null);
    assert_eq!(json["permission"]["isProjectAdmin"], false);
}

#[tokio::test]
async fn search_returns_only_visible_projects() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    repo.insert("Alice private", ALICE, Some(false));
    let public_id = repo.insert("Alice public", ALICE, Some(true));
    let bob_id = repo.insert("Bob private", BOB, Some(false));
    let app = app(&repo, UnknownVisibility::Private);

    let body = json!({ "page_query": { "page_index": 1, "page_size": 20 } });
    let (status, json) = send(&app, Method::POST, "/api/v1/search-projects", user(BOB), Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);
    assert_eq!(json["page_index"], 1);
    assert_eq!(json["page_size"], 20);

    let data = json["data"].as_array().unwrap();
    let ids: Vec<i64> = data.iter().map(|p| p["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![public_id, bob_id]);
    assert_eq!(data[0]["permission"]["isProjectAdmin"], false);
    assert_eq!(data[1]["permission"]["isProjectAdmin"], true);
}

#[tokio::test]
async fn search_filters_by_name_and_pages() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    repo.insert("Sales 2024", ALICE, Some(true));
    let second = repo.insert("Sales 2025", ALICE, Some(true));
    repo.insert("Marketing", ALICE, Some(true));
    let app = app(&repo, UnknownVisibility::Private);

    let body = json!({
        "project_name": "Sales",
        "org_id": ORG_ID,
        "page_query": { "page_index": 2, "page_size": 1 }
    });
    let (status, json) = send(&app, Method::POST, "/api/v1/search-projects", None, Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["id"], json!(second));
}

#[tokio::test]
async fn search_past_last_page_keeps_total() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    repo.insert("Sales", ALICE, Some(true));
    repo.insert("Marketing", ALICE, Some(true));
    repo.insert("Ops", ALICE, Some(true));
    let app = app(&repo, UnknownVisibility::Private);

    let body = json!({ "page_query": { "page_index": 5, "page_size": 1 } });
    let (status, json) = send(&app, Method::POST, "/api/v1/search-projects", None, Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 3);
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn search_matches_wildcards_literally() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    let discount = repo.insert("50% off", ALICE, Some(true));
    repo.insert("Sales", ALICE, Some(true));
    repo.insert("q_1 report", ALICE, Some(true));
    let app = app(&repo, UnknownVisibility::Private);

    let body = json!({ "project_name": "%", "page_query": { "page_index": 1, "page_size": 20 } });
    let (status, json) = send(&app, Method::POST, "/api/v1/search-projects", None, Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["id"], json!(discount));

    let body = json!({ "project_name": "_", "page_query": { "page_index": 1, "page_size": 20 } });
    let (_, json) = send(&app, Method::POST, "/api/v1/search-projects", None, Some(body)).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["name"], "q_1 report");
}

#[tokio::test]
async fn search_rejects_invalid_page() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    let app = app(&repo, UnknownVisibility::Private);

    let body = json!({ "page_query": { "page_index": 1, "page_size": 0 } });
    let (status, _) = send(&app, Method::POST, "/api/v1/search-projects", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_project_makes_caller_admin() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    let app = app(&repo, UnknownVisibility::Private);

    let body = json!({ "name": "Sales Dashboard", "org_id": ORG_ID, "visibility": true });
    let (status, json) = send(&app, Method::POST, "/api/v1/projects", user(ALICE), Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    let project = &json["data"];
    assert!(project["id"].as_i64().is_some());
    assert_eq!(project["name"], "Sales Dashboard");
    assert_eq!(project["orgId"], json!(ORG_ID));
    assert_eq!(project["pic"], Value::Null);
    assert_eq!(project["permission"]["isProjectAdmin"], true);
    assert_eq!(project["createBy"]["username"], "alice");
    assert!(repo.contains(project["id"].as_i64().unwrap()));
}

#[tokio::test]
async fn create_project_requires_caller() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    let app = app(&repo, UnknownVisibility::Private);

    let body = json!({ "name": "Sales Dashboard", "org_id": ORG_ID });
    let (status, _) = send(&app, Method::POST, "/api/v1/projects", None, Some(body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_project_in_unknown_organization_returns_404() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    let app = app(&repo, UnknownVisibility::Private);

    let body = json!({ "name": "Sales Dashboard", "org_id": 99 });
    let (status, _) = send(&app, Method::POST, "/api/v1/projects", user(ALICE), Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_project_validates_name() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    let app = app(&repo, UnknownVisibility::Private);

    let body = json!({ "name": "", "org_id": ORG_ID });
    let (status, _) = send(&app, Method::POST, "/api/v1/projects", user(ALICE), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn only_admin_can_update_project() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    let id = repo.insert("Sales", ALICE, Some(true));
    let app = app(&repo, UnknownVisibility::Private);
    let uri = format!("/api/v1/projects/{id}");

    let body = json!({ "name": "Hijacked" });
    let (status, _) = send(&app, Method::PATCH, &uri, user(BOB), Some(body)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let body = json!({ "name": "Sales 2025", "visibility": false });
    let (status, json) = send(&app, Method::PATCH, &uri, user(ALICE), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Sales 2025");
    assert_eq!(json["visibility"], false);
    assert_eq!(json["description"], Value::Null);
}

#[tokio::test]
async fn admin_deletes_project() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    let id = repo.insert("Sales", ALICE, Some(true));
    let app = app(&repo, UnknownVisibility::Private);
    let uri = format!("/api/v1/projects/{id}");

    let (status, _) = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(repo.contains(id));

    let (status, json) = send(&app, Method::DELETE, &uri, user(ALICE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], json!(id));
    assert!(!repo.contains(id));
}

#[tokio::test]
async fn malformed_caller_header_is_rejected() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    let id = repo.insert("Sales", ALICE, Some(true));
    let app = app(&repo, UnknownVisibility::Private);

    let (status, _) = send(&app, Method::GET, &format!("/api/v1/projects/{id}"), Some("alice"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_check_reports_healthy() {
    let repo = Arc::new(InMemoryProjectRepository::seeded());
    let app = app(&repo, UnknownVisibility::Private);

    let (status, json) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}
