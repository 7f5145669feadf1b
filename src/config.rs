//! Environment-driven configuration.
//!
//! Each optional subsystem (LLM, SMTP, persistence) has a `from_env` that
//! returns `None` when its gating variable is absent. A missing subsystem
//! degrades behavior (fallback rules, log-only persistence, no email) —
//! it never aborts startup.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("WELFARE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match std::env::var("WELFARE_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "WELFARE_PORT".to_string(),
                message: format!("expected a port number, got {raw:?}"),
            })?,
            Err(_) => 8003,
        };
        Ok(Self { host, port })
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Eligibility-service (LLM) configuration.
///
/// Gated on `OPENAI_API_KEY`; without it the evaluator runs on fallback
/// rules only.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: SecretString,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl LlmConfig {
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(api_key) = std::env::var("OPENAI_API_KEY") else {
            return Ok(None);
        };

        let model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let timeout_secs: u64 = match std::env::var("OPENAI_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "OPENAI_TIMEOUT_SECS".to_string(),
                message: format!("expected seconds, got {raw:?}"),
            })?,
            Err(_) => 30,
        };

        Ok(Some(Self {
            api_key: SecretString::from(api_key),
            model,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }))
    }
}

/// SMTP configuration for the notification sink.
///
/// Gated on `SMTP_USERNAME`; without it no eligibility email is sent.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
}

impl EmailConfig {
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(username) = std::env::var("SMTP_USERNAME") else {
            return Ok(None);
        };

        let smtp_host =
            std::env::var("SMTP_SERVER").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let smtp_port: u16 = match std::env::var("SMTP_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SMTP_PORT".to_string(),
                message: format!("expected a port number, got {raw:?}"),
            })?,
            Err(_) => 587,
        };
        let password = std::env::var("SMTP_PASSWORD").unwrap_or_default();
        let from_address = std::env::var("FROM_EMAIL").unwrap_or_else(|_| username.clone());

        Ok(Some(Self {
            smtp_host,
            smtp_port,
            username,
            password: SecretString::from(password),
            from_address,
        }))
    }
}

/// REST persistence-sink configuration.
///
/// Gated on both `SUPABASE_URL` and `SUPABASE_KEY`; without them records
/// are logged instead of written.
#[derive(Debug, Clone)]
pub struct PersistConfig {
    pub base_url: String,
    pub service_key: SecretString,
}

impl PersistConfig {
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("SUPABASE_URL").ok()?;
        let service_key = std::env::var("SUPABASE_KEY").ok()?;
        Some(Self {
            base_url,
            service_key: SecretString::from(service_key),
        })
    }
}

/// Aggregated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: Option<LlmConfig>,
    pub email: Option<EmailConfig>,
    pub persist: Option<PersistConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            llm: LlmConfig::from_env()?,
            email: EmailConfig::from_env()?,
            persist: PersistConfig::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults() {
        // SAFETY: tests touching env vars run single-threaded per variable here.
        unsafe {
            std::env::remove_var("WELFARE_HOST");
            std::env::remove_var("WELFARE_PORT");
        }
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8003);
        assert_eq!(config.socket_addr(), "0.0.0.0:8003");
    }

    #[test]
    fn llm_config_absent_without_key() {
        unsafe { std::env::remove_var("OPENAI_API_KEY") };
        assert!(LlmConfig::from_env().unwrap().is_none());
    }

    #[test]
    fn email_config_absent_without_username() {
        unsafe { std::env::remove_var("SMTP_USERNAME") };
        assert!(EmailConfig::from_env().unwrap().is_none());
    }

    #[test]
    fn persist_config_requires_both_vars() {
        unsafe {
            std::env::remove_var("SUPABASE_URL");
            std::env::remove_var("SUPABASE_KEY");
        }
        assert!(PersistConfig::from_env().is_none());
    }
}
