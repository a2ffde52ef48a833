//! End-to-end tests driving the axum router in-process.
//!
//! The assistant runs with the gateway disabled so no network is involved;
//! the hosted-model round-trip itself is covered by the assistant's own
//! mock-server tests.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use estudio::api::handlers::ServerState;
use estudio::api::routes::create_router;
use estudio::assistant::{Assistant, Gateway};
use estudio::store::Store;
use estudio::workspace::Workspace;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router over an in-memory store and a temp-dir workspace. The TempDir must
/// stay alive for the duration of the test.
async fn test_app() -> (TempDir, Router) {
    let store = Store::open_in_memory().await.unwrap();
    let dir = TempDir::new().unwrap();
    let state = Arc::new(ServerState {
        store,
        assistant: Assistant::new(Gateway::Disabled),
        workspace: Workspace::new(dir.path()),
        cors_origins: None,
    });
    (dir, create_router(state))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_status_reports_services() {
    let (_dir, app) = test_app().await;

    let response = app.oneshot(get("/api/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "funcionando");
    assert_eq!(body["database"], "conectado");
    assert_eq!(body["ia"], "não configurado");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_project_and_file_lifecycle() {
    let (_dir, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/projetos", json!({"name": "Demo"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let projeto = body_json(response).await;
    let id = projeto["id"].as_i64().unwrap();
    assert_eq!(projeto["name"], "Demo");
    assert_eq!(projeto["language"], "javascript");
    assert_eq!(projeto["path"], "/projetos/demo");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/arquivos",
            json!({"name": "main.js", "projectId": id, "content": "x=1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let arquivo = body_json(response).await;
    assert_eq!(arquivo["language"], "javascript");
    assert_eq!(arquivo["size"], 3);
    let arquivo_id = arquivo["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/projetos/{id}/arquivos")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let arquivos = body_json(response).await;
    assert_eq!(arquivos.as_array().unwrap().len(), 1);
    assert_eq!(arquivos[0]["content"], "x=1");

    // Content update recomputes size
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/arquivos/{arquivo_id}"),
            json!({"content": "console.log(1)"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let atualizado = body_json(response).await;
    assert_eq!(atualizado["size"], "console.log(1)".len());

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/projetos/{id}"),
            json!({"name": "Renomeado"}),
        ))
        .await
        .unwrap();
    let renomeado = body_json(response).await;
    assert_eq!(renomeado["name"], "Renomeado");

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/projetos/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone, and the file went with it
    let response = app
        .clone()
        .oneshot(get(&format!("/api/projetos/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = app
        .oneshot(get(&format!("/api/arquivos/{arquivo_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_errors_list_fields() {
    let (_dir, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/projetos", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Dados inválidos");
    assert_eq!(body["details"][0], "name é obrigatório");

    let response = app
        .oneshot(json_request("POST", "/api/arquivos", json!({"content": "x"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_missing_resources_return_404() {
    let (_dir, app) = test_app().await;

    let response = app.clone().oneshot(get("/api/projetos/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Projeto não encontrado");

    // File creation against an unknown project
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/arquivos",
            json!({"name": "a.js", "projectId": 999}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chat_disabled_still_answers_and_records_history() {
    let (_dir, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/chat", json!({"mensagem": "oi"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["resposta"]
        .as_str()
        .unwrap()
        .contains("não está configurado"));

    let response = app.clone().oneshot(get("/api/chat/messages")).await.unwrap();
    let messages = body_json(response).await;
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "oi");
    assert_eq!(messages[1]["role"], "assistant");

    let response = app.clone().oneshot(delete("/api/chat/clear")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = app.oneshot(get("/api/chat/messages")).await.unwrap();
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_requires_message() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(json_request("POST", "/api/chat", json!({"mensagem": "  "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ai_utilities_when_disabled() {
    let (_dir, app) = test_app().await;

    // analyze/explain refuse without a credential
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/ai/analyze", json!({"code": "x=1"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // generate degrades to a commented string the editor can insert
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/ai/generate",
            json!({"prompt": "uma função", "language": "python"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["code"].as_str().unwrap().starts_with("//"));
    assert_eq!(body["language"], "python");
}

#[tokio::test]
async fn test_settings_default_then_upsert() {
    let (_dir, app) = test_app().await;

    let response = app.clone().oneshot(get("/api/settings")).await.unwrap();
    let defaults = body_json(response).await;
    assert_eq!(defaults["theme"], "dark");
    assert_eq!(defaults["fontSize"], 14);
    assert_eq!(defaults["autoSave"], true);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/settings", json!({"theme": "light"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/settings")).await.unwrap();
    let saved = body_json(response).await;
    assert_eq!(saved["theme"], "light");
    // Unspecified fields keep their defaults
    assert_eq!(saved["fontSize"], 14);
}

#[tokio::test]
async fn test_workspace_bridge_roundtrip() {
    let (_dir, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/files/create",
            json!({"path": "src/app.ts", "content": "let x = 1;"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get("/api/files/content?path=src/app.ts"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["content"], "let x = 1;");
    assert_eq!(body["language"], "typescript");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/files/save",
            json!({"path": "src/app.ts", "content": "let x = 2;"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/api/files/tree")).await.unwrap();
    let tree = body_json(response).await;
    assert_eq!(tree[0]["name"], "src");
    assert_eq!(tree[0]["isDirectory"], true);

    let response = app
        .clone()
        .oneshot(delete("/api/files?path=src/app.ts"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get("/api/files/content?path=src/app.ts"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_workspace_rejects_traversal() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(get("/api/files/content?path=../outside.txt"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
