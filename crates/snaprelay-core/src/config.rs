//! Configuration module
//!
//! Process-wide settings for the HTTP server and the SMTP relay. Everything is read
//! once at startup (a `.env` file is honoured through `dotenvy`) and then handed to the
//! application state explicitly; request handling never touches the environment.

use std::env;
use std::fmt;

use crate::constants::{DEFAULT_RECIPIENT, DEFAULT_SUBJECT};
use crate::smtp_types::{LogFormat, SmtpTls};
use crate::validation::is_valid_email;

// Common constants
const SERVER_PORT: u16 = 3000;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;
const SMTP_HOST: &str = "smtp.gmail.com";
/// Gmail rejects messages above 25 MB, so larger images could never be relayed.
const MAX_UPLOAD_SIZE_MB: usize = 25;

/// HTTP server configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub log_format: LogFormat,
    pub http_concurrency_limit: usize,
}

/// Upload relay configuration
#[derive(Clone)]
pub struct RelayServiceConfig {
    pub base: BaseConfig,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_tls: SmtpTls,
    /// Service account login; also the address shown in the From header.
    pub smtp_user: String,
    pub smtp_password: Option<String>,
    pub recipient: String,
    pub subject: String,
    pub max_upload_size_bytes: usize,
    pub strict_email_validation: bool,
}

impl fmt::Debug for RelayServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayServiceConfig")
            .field("base", &self.base)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_tls", &self.smtp_tls)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_password", &self.smtp_password.as_ref().map(|_| "<redacted>"))
            .field("recipient", &self.recipient)
            .field("subject", &self.subject)
            .field("max_upload_size_bytes", &self.max_upload_size_bytes)
            .field("strict_email_validation", &self.strict_email_validation)
            .finish()
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<RelayServiceConfig>);

impl Config {
    fn as_relay(&self) -> &RelayServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.as_relay().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = RelayServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    /// Build the configuration from an arbitrary key lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = RelayServiceConfig::from_lookup(lookup)?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_relay().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_relay().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_relay().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_relay().base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.as_relay().base.log_format
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_relay().base.http_concurrency_limit
    }

    pub fn smtp_host(&self) -> &str {
        &self.as_relay().smtp_host
    }

    pub fn smtp_port(&self) -> u16 {
        self.as_relay().smtp_port
    }

    pub fn smtp_tls(&self) -> SmtpTls {
        self.as_relay().smtp_tls
    }

    pub fn smtp_user(&self) -> &str {
        &self.as_relay().smtp_user
    }

    pub fn smtp_password(&self) -> Option<&str> {
        self.as_relay().smtp_password.as_deref()
    }

    pub fn recipient(&self) -> &str {
        &self.as_relay().recipient
    }

    pub fn subject(&self) -> &str {
        &self.as_relay().subject
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.as_relay().max_upload_size_bytes
    }

    pub fn strict_email_validation(&self) -> bool {
        self.as_relay().strict_email_validation
    }
}

fn is_production_env(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

impl RelayServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset.
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = var("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_env(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_format = match var("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        let base = BaseConfig {
            server_port: var("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            log_format,
            http_concurrency_limit: var("HTTP_CONCURRENCY_LIMIT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT),
        };

        let smtp_tls: SmtpTls = match var("SMTP_TLS") {
            Some(raw) => raw.parse()?,
            None => SmtpTls::Implicit,
        };

        let smtp_port = match var("SMTP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .ok()
                .filter(|&p| p > 0)
                .ok_or_else(|| anyhow::anyhow!("SMTP_PORT must be a valid port number"))?,
            None => smtp_tls.default_port(),
        };

        let max_upload_size_mb = var("MAX_UPLOAD_SIZE_MB")
            .map(|raw| {
                raw.parse::<usize>()
                    .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a valid number"))
            })
            .transpose()?
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let config = RelayServiceConfig {
            base,
            smtp_host: var("SMTP_HOST").unwrap_or_else(|| SMTP_HOST.to_string()),
            smtp_port,
            smtp_tls,
            smtp_user: var("EMAIL_USER")
                .or_else(|| var("SMTP_USER"))
                .ok_or_else(|| {
                    anyhow::anyhow!("EMAIL_USER must be set to the SMTP service account address")
                })?,
            smtp_password: var("EMAIL_PASS").or_else(|| var("SMTP_PASSWORD")),
            recipient: var("UPLOAD_RECIPIENT").unwrap_or_else(|| DEFAULT_RECIPIENT.to_string()),
            subject: var("UPLOAD_SUBJECT").unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            max_upload_size_bytes: max_upload_size_mb.saturating_mul(1024 * 1024),
            strict_email_validation: parse_bool(var("STRICT_EMAIL_VALIDATION"), false),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !is_valid_email(&self.smtp_user) {
            return Err(anyhow::anyhow!(
                "EMAIL_USER must be a valid email address (it is used as the From address)"
            ));
        }

        if !is_valid_email(&self.recipient) {
            return Err(anyhow::anyhow!(
                "UPLOAD_RECIPIENT must be a valid email address"
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.base.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT cannot be 0"));
        }

        if self.smtp_host.trim().is_empty() {
            return Err(anyhow::anyhow!("SMTP_HOST cannot be empty"));
        }

        Ok(())
    }
}
