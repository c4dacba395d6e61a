use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// `url` が無い場合はインメモリストアで起動する
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub filter: String,
}

/// アプリケーション設定
///
/// 優先順位（後勝ち）：既定値 → `config/default` → `SHAREIT__*` 環境変数 → `DATABASE_URL` / `PORT`
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 設定ファイルと環境変数から設定を読み込む
    pub fn load() -> Result<Self, ConfigError> {
        // .env があれば環境変数に展開する（無くてもよい）
        dotenvy::dotenv().ok();

        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("SHAREIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option("server.port", env::var("PORT").ok())?
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.max_connections", 5)?
            .set_default("logging.filter", "shareit=debug,tower_http=debug")
    }

    /// サーバーの待ち受けアドレス
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
