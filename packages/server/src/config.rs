use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Flat directory holding `{uuid}_{name}.pdf` files.
    pub upload_dir: PathBuf,
    /// Maximum accepted upload size in bytes.
    pub max_upload_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    /// Completion API credential. Absence degrades chat to a setup
    /// notice instead of failing requests.
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub chat: ChatConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("storage.upload_dir", "./uploads")?
            .set_default("storage.max_upload_size", 50i64 * 1024 * 1024)?
            .set_default("chat.api_base", "https://api.openai.com/v1")?
            .set_default("chat.model", "gpt-3.5-turbo")?
            .set_default("chat.max_tokens", 500)?
            .set_default("chat.temperature", 0.7)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., PDFVIEWER__SERVER__PORT)
            .add_source(Environment::with_prefix("PDFVIEWER").separator("__"))
            .build()?;

        let mut cfg: Self = s.try_deserialize()?;

        // The credential source the original deployment docs name.
        if cfg.chat.api_key.is_none()
            && let Ok(key) = std::env::var("OPENAI_API_KEY")
            && !key.is_empty()
        {
            cfg.chat.api_key = Some(key);
        }

        Ok(cfg)
    }
}
