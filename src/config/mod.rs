use std::env;
use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::core::{AccessPolicy, AppError, Result};
use crate::modules::documents::{AmountPolicy, DocumentSettings};

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub billing: BillingConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// `pretty` or `json`
    pub log_format: String,
}

/// Business rules of the quotation and invoice lifecycles
#[derive(Debug, Clone)]
pub struct BillingConfig {
    pub access_policy: AccessPolicy,
    pub amount_policy: AmountPolicy,
    pub amount_tolerance: Decimal,
    pub default_vat_rate: Decimal,
    pub quotation_validity_days: i64,
    pub invoice_payment_days: i64,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub rate_limit_per_minute: u32,
    /// Browser origin allowed by CORS; any origin when unset
    pub cors_allowed_origin: Option<String>,
}

/// Parse `value` or fall back to `default` when absent
pub(crate) fn parse_or<T>(key: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Configuration(format!("Invalid {}: {}", key, e))),
    }
}

/// Read and parse an environment variable with a default
pub(crate) fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    parse_or(key, env::var(key).ok(), default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            billing: BillingConfig::from_env()?,
            security: SecurityConfig {
                rate_limit_per_minute: env_or("RATE_LIMIT_PER_MINUTE", 1000)?,
                cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                    .ok()
                    .filter(|origin| !origin.trim().is_empty()),
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.security.rate_limit_per_minute == 0 {
            return Err(AppError::Configuration(
                "Rate limit must be greater than 0".to_string(),
            ));
        }

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "Server workers must be greater than 0".to_string(),
            ));
        }

        self.billing.validate()
    }
}

impl BillingConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = DocumentSettings::default();

        Ok(Self {
            access_policy: env_or("ACCESS_POLICY", AccessPolicy::Mandatory)?,
            amount_policy: env_or("ITEM_AMOUNT_POLICY", defaults.amount_policy)?,
            amount_tolerance: env_or("ITEM_AMOUNT_TOLERANCE", defaults.amount_tolerance)?,
            default_vat_rate: env_or("DEFAULT_VAT_RATE", defaults.default_vat_rate)?,
            quotation_validity_days: env_or(
                "QUOTATION_VALIDITY_DAYS",
                defaults.quotation_validity_days,
            )?,
            invoice_payment_days: env_or("INVOICE_PAYMENT_DAYS", defaults.invoice_payment_days)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_vat_rate < Decimal::ZERO || self.default_vat_rate > Decimal::ONE_HUNDRED {
            return Err(AppError::Configuration(
                "DEFAULT_VAT_RATE must be between 0 and 100".to_string(),
            ));
        }

        if self.amount_tolerance < Decimal::ZERO {
            return Err(AppError::Configuration(
                "ITEM_AMOUNT_TOLERANCE cannot be negative".to_string(),
            ));
        }

        if self.quotation_validity_days <= 0 || self.invoice_payment_days <= 0 {
            return Err(AppError::Configuration(
                "Document day offsets must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Settings handed to the quotation and invoice services
    pub fn document_settings(&self) -> DocumentSettings {
        DocumentSettings {
            amount_policy: self.amount_policy,
            amount_tolerance: self.amount_tolerance,
            default_vat_rate: self.default_vat_rate,
            quotation_validity_days: self.quotation_validity_days,
            invoice_payment_days: self.invoice_payment_days,
        }
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        let defaults = DocumentSettings::default();
        Self {
            access_policy: AccessPolicy::Mandatory,
            amount_policy: defaults.amount_policy,
            amount_tolerance: defaults.amount_tolerance,
            default_vat_rate: defaults.default_vat_rate,
            quotation_validity_days: defaults.quotation_validity_days,
            invoice_payment_days: defaults.invoice_payment_days,
        }
    }
}
