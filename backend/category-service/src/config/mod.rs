use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub ranking: RankingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    /// JSON file of categories used to seed the in-memory store.
    #[serde(default)]
    pub catalog_path: Option<String>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            catalog_path: None,
        }
    }
}

impl RankingConfig {
    /// Resolve a requested page size against the configured bounds.
    pub fn clamp_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }
}

fn default_env() -> String {
    "development".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_limit() -> usize {
    20
}

fn default_max_limit() -> usize {
    100
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        Ok(Config {
            app: envy::prefixed("APP_").from_env::<AppConfig>()?,
            ranking: envy::prefixed("RANKING_").from_env::<RankingConfig>()?,
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.ranking.default_limit == 0 {
            return Err("RANKING_DEFAULT_LIMIT must be positive".to_string());
        }
        if self.ranking.default_limit > self.ranking.max_limit {
            return Err(format!(
                "RANKING_DEFAULT_LIMIT ({}) exceeds RANKING_MAX_LIMIT ({})",
                self.ranking.default_limit, self.ranking.max_limit
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}
