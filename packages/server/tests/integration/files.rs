use reqwest::StatusCode;

use crate::common::spawn_app;

#[tokio::test]
async fn index_lists_recent_files_with_display_names() {
    let app = spawn_app().await;
    app.upload_ok("first report.pdf").await;

    let response = app.client.get(app.url("/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();

    // Sanitized display name, without the generated id prefix.
    assert!(html.contains("first_report.pdf"));
    assert!(!html.contains("550e8400"));
}

#[tokio::test]
async fn index_caps_recent_files_at_five() {
    let app = spawn_app().await;

    let mut keys = Vec::new();
    for i in 0..6 {
        keys.push(app.upload_ok(&format!("doc{i}.pdf")).await);
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    let html = app
        .client
        .get(app.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    let listed = keys.iter().filter(|key| html.contains(key.as_str())).count();
    assert_eq!(listed, 5);
    // The oldest upload fell off the list.
    assert!(!html.contains(keys[0].as_str()));
    assert!(html.contains(keys[5].as_str()));
}

#[tokio::test]
async fn index_shows_flash_once_then_clears() {
    let app = spawn_app().await;

    let rejected = app.upload("nope.txt", b"not a pdf".to_vec()).await;
    let cookie = rejected.headers()["set-cookie"].to_str().unwrap().to_string();
    let flash_pair = cookie.split(';').next().unwrap().to_string();

    let with_flash = app
        .client
        .get(app.url("/"))
        .header("cookie", &flash_pair)
        .send()
        .await
        .unwrap();
    // The page shows the message and clears the cookie.
    let clearing = with_flash.headers()["set-cookie"].to_str().unwrap().to_string();
    assert!(clearing.starts_with("flash="));
    let html = with_flash.text().await.unwrap();
    assert!(html.contains("Invalid file type"));

    let without = app.client.get(app.url("/")).send().await.unwrap();
    let html = without.text().await.unwrap();
    assert!(!html.contains("Invalid file type"));
}
