use crate::utils::error::{MathError, Result};
use crate::utils::validation::{self, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

static ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
    /// 題型標籤 -> 人工解題秒數，覆寫或追加預設表
    pub benchmarks: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub json: bool,
    pub level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MathError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MathError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PORT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_range("server.port", self.server.port, 1, u16::MAX)?;

        if self.cors.allow_origins.is_empty() {
            return Err(MathError::InvalidConfigValueError {
                field: "cors.allow_origins".to_string(),
                value: "[]".to_string(),
                reason: "At least one origin (or \"*\") is required".to_string(),
            });
        }
        for origin in &self.cors.allow_origins {
            validation::validate_origin("cors.allow_origins", origin)?;
        }

        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(MathError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
                });
            }
        }

        for (name, seconds) in &self.benchmarks {
            validation::validate_non_empty_string("benchmarks", name)?;
            validation::validate_range(&format!("benchmarks.{}", name), *seconds, 1, u64::MAX)?;
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
