use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;
use std::fmt;

/// Process-wide configuration, built once at startup and shared with handlers.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Memory,
    #[default]
    File,
    Blob,
    Database,
}

impl std::str::FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" | "fs" => Ok(Self::File),
            "blob" => Ok(Self::Blob),
            "database" | "db" => Ok(Self::Database),
            other => Err(anyhow!("unknown storage backend: {other}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub blob: BlobConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: default_data_dir(),
            blob: BlobConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

fn default_data_dir() -> String {
    "data".into()
}

#[derive(Clone, Deserialize, Default)]
pub struct BlobConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub token: String,
}

impl fmt::Debug for BlobConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobConfig")
            .field("base_url", &self.base_url)
            .field("token", &redact(&self.token))
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 {
    10
}
fn default_connect_timeout() -> u64 {
    30
}

/// Shared secrets. Absent values are legal here; handlers report them as
/// configuration errors when an operation needs them.
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub admin_token: Option<String>,
    #[serde(default)]
    pub bot_secret: Option<String>,
    #[serde(default = "default_blog_salt")]
    pub blog_salt: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { admin_token: None, bot_secret: None, blog_salt: default_blog_salt() }
    }
}

fn default_blog_salt() -> String {
    "default_salt_change_me".into()
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_token", &self.admin_token.as_deref().map(redact))
            .field("bot_secret", &self.bot_secret.as_deref().map(redact))
            .field("blog_salt", &redact(&self.blog_salt))
            .finish()
    }
}

fn redact(s: &str) -> &'static str {
    if s.is_empty() { "<empty>" } else { "<redacted>" }
}

/// Load from `CONFIG_PATH` (default `config.toml`); a missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !std::path::Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// File (if any) + process environment, normalized and validated.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_env_with(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay values from an environment lookup. Environment wins over the file.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port.parse().map_err(|_| anyhow!("SERVER_PORT must be a port number"))?;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(backend) = lookup("STORAGE_BACKEND") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(dir) = lookup("DATA_DIR") {
            self.storage.data_dir = dir;
        }
        if let Some(url) = lookup("BLOB_BASE_URL") {
            self.storage.blob.base_url = url;
        }
        if let Some(token) = lookup("BLOB_READ_WRITE_TOKEN") {
            self.storage.blob.token = token;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.storage.database.url = url;
        }
        if let Some(token) = lookup("ADMIN_TOKEN") {
            self.auth.admin_token = Some(token);
        }
        if let Some(secret) = lookup("BOT_SECRET") {
            self.auth.bot_secret = Some(secret);
        }
        if let Some(salt) = lookup("BLOG_SALT") {
            self.auth.blog_salt = salt;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.auth.normalize();
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl AuthConfig {
    /// Blank secrets count as unset.
    fn normalize(&mut self) {
        if self.admin_token.as_deref().is_some_and(|t| t.is_empty()) {
            self.admin_token = None;
        }
        if self.bot_secret.as_deref().is_some_and(|t| t.is_empty()) {
            self.bot_secret = None;
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        match self.backend {
            BackendKind::Memory => Ok(()),
            BackendKind::File => {
                if self.data_dir.trim().is_empty() {
                    return Err(anyhow!("storage.data_dir must not be empty for the file backend"));
                }
                Ok(())
            }
            BackendKind::Blob => {
                let url = self.blob.base_url.to_lowercase();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(anyhow!("storage.blob.base_url must start with http(s); set BLOB_BASE_URL"));
                }
                if self.blob.token.trim().is_empty() {
                    return Err(anyhow!("Blob storage not configured; set BLOB_READ_WRITE_TOKEN"));
                }
                Ok(())
            }
            BackendKind::Database => self.database.validate(),
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; provide it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.max_connections == 0 {
            return Err(anyhow!("database.max_connections must be >= 1"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(anyhow!("database.connect_timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}
