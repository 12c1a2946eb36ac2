use reqwest::StatusCode;

use crate::common::{TEST_MAX_UPLOAD, flash_message, spawn_app};

#[tokio::test]
async fn upload_view_serve_round_trip() {
    let app = spawn_app().await;
    let body = b"%PDF-1.4 round trip content".to_vec();

    let response = app.upload("report.pdf", body.clone()).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let key = response.headers()["location"]
        .to_str()
        .unwrap()
        .strip_prefix("/view/")
        .unwrap()
        .to_string();

    // The viewer page renders with the display name.
    let view = app.client.get(app.url(&format!("/view/{key}"))).send().await.unwrap();
    assert_eq!(view.status(), StatusCode::OK);
    let html = view.text().await.unwrap();
    assert!(html.contains("report.pdf"));

    // Raw bytes come back unchanged with the PDF content type.
    let pdf = app.client.get(app.url(&format!("/pdf/{key}"))).send().await.unwrap();
    assert_eq!(pdf.status(), StatusCode::OK);
    assert_eq!(pdf.headers()["content-type"], "application/pdf");
    assert_eq!(pdf.bytes().await.unwrap().as_ref(), body.as_slice());
}

#[tokio::test]
async fn same_name_uploads_stay_distinct() {
    let app = spawn_app().await;
    let key_a = app.upload_ok("dupe.pdf").await;
    let key_b = app.upload_ok("dupe.pdf").await;
    assert_ne!(key_a, key_b);

    for key in [&key_a, &key_b] {
        let pdf = app.client.get(app.url(&format!("/pdf/{key}"))).send().await.unwrap();
        assert_eq!(pdf.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn non_pdf_upload_is_rejected_with_flash() {
    let app = spawn_app().await;

    let response = app.upload("notes.txt", b"plain text".to_vec()).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");
    let message = flash_message(&response).unwrap();
    assert!(message.contains("Invalid file type"));
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn oversized_upload_persists_nothing() {
    let app = spawn_app().await;

    let body = vec![0u8; TEST_MAX_UPLOAD as usize + 1024];
    let response = app.upload("big.pdf", body).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");
    let message = flash_message(&response).unwrap();
    assert!(message.contains("too large"));
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn missing_file_field_redirects_with_message() {
    let app = spawn_app().await;

    let form = reqwest::multipart::Form::new().text("other", "value");
    let response = app
        .client
        .post(app.url("/"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");
    let message = flash_message(&response).unwrap();
    assert!(message.contains("No file selected"));
}

#[tokio::test]
async fn unknown_view_key_redirects_home() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/view/550e8400-e29b-41d4-a716-446655440000_gone.pdf"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");
    assert_eq!(flash_message(&response).as_deref(), Some("File not found"));
}

#[tokio::test]
async fn unknown_pdf_key_is_json_not_found() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/pdf/550e8400-e29b-41d4-a716-446655440000_gone.pdf"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "NOT_FOUND");
}
