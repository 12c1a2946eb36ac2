use std::sync::Arc;

use common::storage::FilesystemDocumentStore;
use tracing::{Level, info, warn};

use server::chat::ChatProxy;
use server::config::AppConfig;
use server::state::AppState;
use server::templates;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let store = FilesystemDocumentStore::new(
        config.storage.upload_dir.clone(),
        config.storage.max_upload_size,
    )
    .await?;

    if config.chat.api_key.is_none() {
        warn!("no completion API key configured; chat replies with a setup notice");
    }

    let chat = ChatProxy::from_config(&config.chat);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let upload_dir = config.storage.upload_dir.clone();

    let state = AppState {
        store: Arc::new(store),
        chat: Arc::new(chat),
        templates: Arc::new(templates::environment()?),
        config: Arc::new(config),
    };

    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("PDF viewer running at http://{}", listener.local_addr()?);
    info!("upload folder: {}", upload_dir.display());

    axum::serve(listener, app).await?;

    Ok(())
}
