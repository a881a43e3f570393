use common::config::StorageConfig;
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
    /// HS256 secret shared with the identity provider that issues tokens.
    pub jwt_secret: String,
}

/// Limits and serving policy for hosted websites.
#[derive(Debug, Deserialize, Clone)]
pub struct SitesConfig {
    /// Document served at `/sites/{id}`. Default: "index.html".
    #[serde(default = "default_root_document")]
    pub root_document: String,
    /// Maximum number of files in one upload. Default: 200.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    /// Maximum request body size for an upload, in bytes. Default: 50 MiB.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
    /// Serve hosted HTML under a CSP sandbox so it runs with an opaque origin. Default: true.
    #[serde(default = "default_sandbox")]
    pub sandbox: bool,
}

fn default_root_document() -> String {
    crate::sites::DEFAULT_ROOT_DOCUMENT.into()
}
fn default_max_files() -> usize {
    200
}
fn default_max_upload_size() -> usize {
    50 * 1024 * 1024
}
fn default_sandbox() -> bool {
    true
}

impl Default for SitesConfig {
    fn default() -> Self {
        Self {
            root_document: default_root_document(),
            max_files: default_max_files(),
            max_upload_size: default_max_upload_size(),
            sandbox: default_sandbox(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub sites: SitesConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., WEBHOSTER__AUTH__JWT_SECRET)
            .add_source(
                Environment::with_prefix("WEBHOSTER")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins"),
            )
            .build()?;

        s.try_deserialize()
    }
}
