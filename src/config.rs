use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 默认必备文档 (供应商验证)
pub const DEFAULT_REQUIRED_DOCUMENTS: [&str; 5] = [
    "NPWP_FILE",
    "KTP_DIREKTUR_FILE",
    "SURAT_PERNYATAAN_FILE",
    "AKTA_PENDIRIAN_FILE",
    "NIB_FILE",
];

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadConfig,
    pub cors: CorsConfig,
    pub verification: VerificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// 以下字段覆盖 url 中的对应部分 (兼容 DB_HOST / DB_USER 等旧变量)
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: String,
    pub max_body_bytes: usize,
    pub max_files: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    pub required_documents: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3001,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/procurement".to_string(),
                max_connections: 20,
                acquire_timeout_secs: 10,
                host: None,
                port: None,
                user: None,
                password: None,
                name: None,
            },
            uploads: UploadConfig {
                dir: "uploads".to_string(),
                max_body_bytes: 20 * 1024 * 1024,
                max_files: 10,
            },
            cors: CorsConfig {
                allowed_origin: "http://127.0.0.1:5500".to_string(),
            },
            verification: VerificationConfig {
                required_documents: DEFAULT_REQUIRED_DOCUMENTS
                    .iter()
                    .map(|d| d.to_string())
                    .collect(),
            },
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置 (.env → APP_* → 兼容旧变量)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load(None)
    }

    /// 分层加载: 默认值 → 环境变量
    ///
    /// `source` 为 `None` 时读取进程环境变量, 测试中可以传入固定的变量表。
    pub fn load(source: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let legacy = |key: &str| match &source {
            Some(map) => map.get(key).cloned(),
            None => std::env::var(key).ok(),
        };
        let defaults = Self::default();

        Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("database.url", defaults.database.url)?
            .set_default(
                "database.max_connections",
                i64::from(defaults.database.max_connections),
            )?
            .set_default(
                "database.acquire_timeout_secs",
                defaults.database.acquire_timeout_secs as i64,
            )?
            .set_default("uploads.dir", defaults.uploads.dir)?
            .set_default("uploads.max_body_bytes", defaults.uploads.max_body_bytes as i64)?
            .set_default("uploads.max_files", defaults.uploads.max_files as i64)?
            .set_default("cors.allowed_origin", defaults.cors.allowed_origin)?
            .set_default(
                "verification.required_documents",
                defaults.verification.required_documents,
            )?
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("verification.required_documents")
                    .try_parsing(true)
                    .source(source.clone()),
            )
            // 旧版变量名仍然有效
            .set_override_option("database.url", legacy("DATABASE_URL"))?
            .set_override_option("database.host", legacy("DB_HOST"))?
            .set_override_option("database.port", legacy("DB_PORT"))?
            .set_override_option("database.user", legacy("DB_USER"))?
            .set_override_option("database.password", legacy("DB_PASSWORD"))?
            .set_override_option("database.name", legacy("DB_DATABASE"))?
            .set_override_option("server.host", legacy("SERVER_HOST"))?
            .set_override_option("server.port", legacy("PORT"))?
            .set_override_option("server.port", legacy("SERVER_PORT"))?
            .build()?
            .try_deserialize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
