use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Lifetime of the session cookie and its embedded token, in days.
    pub session_ttl_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Root directory of the filesystem object store.
    pub root: PathBuf,
    /// Bucket photos are uploaded into.
    pub bucket: String,
    /// Public base URL photos are served from; persisted photo URLs are
    /// `{base_url}/{bucket}/{key}`.
    pub base_url: String,
    /// Maximum accepted object size in bytes.
    pub max_object_size: u64,
    /// Hard bound on a single upload call. A store that hangs past this is
    /// treated as a failed upload.
    pub upload_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("auth.session_ttl_days", 7)?
            .set_default("storage.root", "./data/objects")?
            .set_default("storage.bucket", "catcollector")?
            .set_default("storage.base_url", "http://localhost:3000/media")?
            .set_default("storage.max_object_size", 16 * 1024 * 1024)?
            .set_default("storage.upload_timeout_secs", 30)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., CATCOLLECTOR__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("CATCOLLECTOR").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
