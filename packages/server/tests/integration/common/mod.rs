use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use ::common::storage::FilesystemDocumentStore;
use server::chat::ChatProxy;
use server::config::{AppConfig, ChatConfig, ServerConfig, StorageConfig};
use server::state::AppState;
use server::templates;

/// Upload limit used by the test server; small enough to exercise
/// oversize rejection without large request bodies.
pub const TEST_MAX_UPLOAD: u64 = 256 * 1024;

pub struct TestApp {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    pub upload_dir: PathBuf,
    _tmp: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// POST a multipart upload with the given filename and bytes.
    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> reqwest::Response {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")
            .unwrap();
        let form = reqwest::multipart::Form::new().part("file", part);
        self.client
            .post(self.url("/"))
            .multipart(form)
            .send()
            .await
            .unwrap()
    }

    /// Upload a small valid PDF and return its stored key.
    pub async fn upload_ok(&self, filename: &str) -> String {
        let response = self.upload(filename, b"%PDF-1.4 test".to_vec()).await;
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
        let location = response
            .headers()
            .get("location")
            .unwrap()
            .to_str()
            .unwrap();
        location
            .strip_prefix("/view/")
            .unwrap_or_else(|| panic!("unexpected redirect target: {location}"))
            .to_string()
    }

    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(&self.upload_dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name() != ".tmp")
            .count()
    }
}

/// Boot the real router on an ephemeral port with a throwaway upload
/// directory and no chat credential.
pub async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let upload_dir = tmp.path().join("uploads");

    let config = AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        storage: StorageConfig {
            upload_dir: upload_dir.clone(),
            max_upload_size: TEST_MAX_UPLOAD,
        },
        chat: ChatConfig {
            api_key: None,
            api_base: "http://127.0.0.1:9".into(),
            model: "gpt-3.5-turbo".into(),
            max_tokens: 500,
            temperature: 0.7,
        },
    };

    let store = FilesystemDocumentStore::new(upload_dir.clone(), config.storage.max_upload_size)
        .await
        .unwrap();

    let state = AppState {
        chat: Arc::new(ChatProxy::from_config(&config.chat)),
        store: Arc::new(store),
        templates: Arc::new(templates::environment().unwrap()),
        config: Arc::new(config),
    };

    let router = server::build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        upload_dir,
        _tmp: tmp,
    }
}

/// The decoded flash message set by a redirect response, if any.
pub fn flash_message(response: &reqwest::Response) -> Option<String> {
    let header = response.headers().get("set-cookie")?.to_str().ok()?;
    let value = header.strip_prefix("flash=")?.split(';').next()?;
    urlencoding::decode(value).ok().map(|s| s.into_owned())
}
