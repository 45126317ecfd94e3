//! Runtime configuration loaded from the environment

use std::time::Duration;

use anyhow::Context;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Environment::Development),
            "production" | "prod" => Some(Environment::Production),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

/// Provider defaults used when a module has no `ai_configs` row or an
/// unusable key.
#[derive(Debug, Clone)]
pub struct AiDefaults {
    pub qwen_api_key: Option<String>,
    pub qwen_model: String,
    pub qwen_base_url: Option<String>,
    pub deepseek_api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for AiDefaults {
    fn default() -> Self {
        Self {
            qwen_api_key: None,
            qwen_model: "qwen-max".to_string(),
            qwen_base_url: None,
            deepseek_api_key: None,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub ai: AiDefaults,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections = parse_var("DATABASE_MAX_CONNECTIONS", 10)?;
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var("PORT", 3000)?;

        let environment = match non_empty_var("APP_ENV") {
            Some(value) => Environment::parse(&value)
                .with_context(|| format!("APP_ENV has unknown value '{}'", value))?,
            None => Environment::Development,
        };

        let ai = AiDefaults {
            qwen_api_key: non_empty_var("QWEN_API_KEY"),
            qwen_model: non_empty_var("QWEN_MODEL").unwrap_or_else(|| "qwen-max".to_string()),
            qwen_base_url: non_empty_var("QWEN_BASE_URL"),
            deepseek_api_key: non_empty_var("DEEPSEEK_API_KEY"),
            timeout: Duration::from_secs(parse_var("AI_TIMEOUT_SECS", 60)?),
        };

        Ok(Self {
            database_url,
            max_connections,
            host,
            port,
            environment,
            ai,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty_var(name) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} has invalid value '{}'", name, value)),
        None => Ok(default),
    }
}
