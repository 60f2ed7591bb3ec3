use crate::core::{AppError, Result};
use crate::modules::payments::services::{UpfrontPolicy, DEFAULT_MINIMUM_PERCENT};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

pub mod server;

pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub payments: PaymentsConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// "json" switches the subscriber to JSON lines
    pub log_format: String,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Browser origin allowed to call the API; any origin when unset
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PaymentsConfig {
    /// Share of the invoice total the first payment must cover
    pub upfront_minimum_percent: Decimal,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let upfront_minimum_percent = match lookup("UPFRONT_MINIMUM_PERCENT") {
            Some(raw) => Decimal::from_str(raw.trim()).map_err(|_| {
                AppError::Configuration(format!("Invalid UPFRONT_MINIMUM_PERCENT: {}", raw))
            })?,
            None => Decimal::from(DEFAULT_MINIMUM_PERCENT),
        };

        Ok(Config {
            app: AppConfig {
                env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
                log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "debug".to_string()),
                log_format: lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),
            },
            server: ServerConfig::from_lookup(&lookup)?,
            cors: CorsConfig {
                allowed_origin: lookup("CORS_ALLOWED_ORIGIN").filter(|o| !o.trim().is_empty()),
            },
            payments: PaymentsConfig {
                upfront_minimum_percent,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Configuration(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "Server workers must be greater than 0".to_string(),
            ));
        }

        self.upfront_policy().map(|_| ())
    }

    pub fn upfront_policy(&self) -> Result<UpfrontPolicy> {
        UpfrontPolicy::new(self.payments.upfront_minimum_percent).map_err(|e| {
            AppError::Configuration(format!("Invalid UPFRONT_MINIMUM_PERCENT: {}", e))
        })
    }

    pub fn json_logs(&self) -> bool {
        self.app.log_format.eq_ignore_ascii_case("json")
    }
}
