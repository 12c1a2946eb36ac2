use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::common::spawn_app;

#[tokio::test]
async fn chat_without_credentials_returns_setup_notice() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/chat"))
        .json(&json!({
            "message": "What is this document about?",
            "history": [],
            "context": {
                "filename": "report.pdf",
                "currentPage": 3,
                "totalPages": 10,
                "selectedText": ""
            }
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body["response"].as_str().unwrap().contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn chat_accepts_minimal_request_body() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/chat"))
        .json(&json!({"message": "hello"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body["response"].is_string());
}

#[tokio::test]
async fn chat_rejects_malformed_body() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/chat"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
