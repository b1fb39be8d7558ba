//! # تنظیمات سرویس
//!
//! آدرس سرور، آدرس بک‌اند REST، timeout و دیتابیس تنظیمات کاربر.
//!
//! ## منابع تنظیمات (به ترتیب اولویت)
//! 1. متغیرهای محیطی با پیشوند `DASHBOARD_` (مثلا `DASHBOARD_PORT=8080`)
//! 2. فایل `.env` که `dotenvy` قبل از همه چیز لودش میکنه
//! 3. مقادیر پیش‌فرض
//!
//! لایه‌بندی منابع با crate `config` انجام میشه؛ تست‌ها به جای محیط
//! واقعی از [`Config::from_vars`] یا [`ConfigBuilder`] استفاده میکنن.

use std::{collections::HashMap, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// پیشوند متغیرهای محیطی
pub const ENV_PREFIX: &str = "DASHBOARD";

/// تنظیمات سرویس
///
/// ```rust
/// use admin_dashboard::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.server_addr(), "127.0.0.1:3000");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// آدرسی که سرور روش bind میشه
    pub host: String,

    /// پورت سرور
    pub port: u16,

    /// آدرس پایه‌ی بک‌اند REST (مثلا `http://localhost:8080/api`)
    pub api_base_url: String,

    /// timeout درخواست‌ها به بک‌اند و درخواست‌های ورودی (ثانیه)
    pub request_timeout_secs: u64,

    /// دیتابیس تنظیمات کاربر
    pub database_url: String,

    /// در production لاگ‌ها JSON هستن
    pub environment: Environment,
}

/// محیط اجرای برنامه
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Environment {
    /// محیط توسعه - با قابلیت‌های دیباگ
    #[default]
    Development,

    /// محیط تست
    Testing,

    /// محیط تولید - بهینه‌سازی شده
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// مقدار ناشناخته → development
impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "testing" | "test" => Environment::Testing,
            _ => Environment::Development,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_base_url: "http://localhost:8080/api".to_string(),
            request_timeout_secs: 30,
            database_url: "sqlite://data/dashboard.db?mode=rwc".to_string(),
            environment: Environment::Development,
        }
    }
}

impl Config {
    /// ساخت تنظیمات از متغیرهای محیطی
    ///
    /// # Errors
    /// مقدار غیرقابل پارس (مثلا `DASHBOARD_PORT=abc`)
    ///
    /// # مثال
    /// ```rust,no_run
    /// use admin_dashboard::config::Config;
    ///
    /// let config = Config::from_env().expect("Failed to load config");
    /// ```
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// مثل [`Config::from_env`] ولی از یه map به جای محیط واقعی
    ///
    /// کلیدها همون نام متغیر محیطی هستن، مثلا `DASHBOARD_PORT`.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::load(Some(vars))
    }

    fn load(vars: Option<HashMap<String, String>>) -> Result<Self> {
        let defaults = Self::default();

        let source = ::config::Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(vars);

        let config = ::config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .set_default("database_url", defaults.database_url)?
            .set_default("environment", "development")?
            .add_source(source)
            .build()?
            .try_deserialize::<Self>()?;

        Ok(config)
    }

    /// اعتبارسنجی تنظیمات
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(AppError::Config("PORT cannot be 0".to_string()));
        }

        let api = url::Url::parse(&self.api_base_url)
            .map_err(|e| AppError::Config(format!("API_BASE_URL is invalid: {}", e)))?;
        if !matches!(api.scheme(), "http" | "https") {
            return Err(AppError::Config(
                "API_BASE_URL must be an http(s) URL".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "REQUEST_TIMEOUT_SECS must be positive".to_string(),
            ));
        }

        if self.database_url.trim().is_empty() {
            return Err(AppError::Config("DATABASE_URL is required".to_string()));
        }

        Ok(())
    }

    /// `host:port` برای bind کردن listener
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// =====================================
// Builder Pattern
// =====================================
/// ساخت Config در تست‌ها، بدون خوندن محیط
///
/// # مثال
/// ```rust
/// use admin_dashboard::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .port(8080)
///     .host("0.0.0.0")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// تنظیم پورت
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// تنظیم هاست
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// تنظیم آدرس بک‌اند
    #[must_use]
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = url.into();
        self
    }

    #[must_use]
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    /// تنظیم محیط
    #[must_use]
    pub fn environment(mut self, env: Environment) -> Self {
        self.config.environment = env;
        self
    }

    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }

    /// ساخت Config با اعتبارسنجی
    ///
    /// # Errors
    /// خطا برمیگردونه اگه اعتبارسنجی fail بشه
    pub fn build_validated(self) -> Result<Config> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_defaults_from_empty_env() {
        let config = Config::from_vars(HashMap::new()).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_load_from_prefixed_vars() {
        let config = Config::from_vars(vars(&[
            ("DASHBOARD_PORT", "8081"),
            ("DASHBOARD_API_BASE_URL", "https://shop.example.com/api"),
            ("DASHBOARD_REQUEST_TIMEOUT_SECS", "5"),
            ("DASHBOARD_ENVIRONMENT", "prod"),
            ("PORT", "9999"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.api_base_url, "https://shop.example.com/api");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_unparseable_port_is_an_error() {
        let result = Config::from_vars(vars(&[("DASHBOARD_PORT", "not-a-port")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .host("0.0.0.0")
            .api_base_url("http://backend:8080/api")
            .environment(Environment::Testing)
            .build();

        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.api_base_url, "http://backend:8080/api");
        assert!(!config.environment.is_production());
    }

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from("production".to_string()), Environment::Production);
        assert_eq!(Environment::from("PROD".to_string()), Environment::Production);
        assert_eq!(Environment::from("development".to_string()), Environment::Development);
        assert_eq!(Environment::from("unknown".to_string()), Environment::Development);
    }

    #[test]
    fn test_validation() {
        assert!(ConfigBuilder::new().port(0).build_validated().is_err());
        assert!(ConfigBuilder::new().api_base_url("not a url").build_validated().is_err());
        assert!(ConfigBuilder::new().api_base_url("ftp://files.example.com").build_validated().is_err());
        assert!(ConfigBuilder::new().request_timeout_secs(0).build_validated().is_err());
    }
}
