use std::sync::Arc;

use common::storage::DocumentStore;

use crate::chat::ChatProxy;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub chat: Arc<ChatProxy>,
    pub templates: Arc<minijinja::Environment<'static>>,
}
