//! # ماژول سرویس‌ها (Business Logic Layer)
//!
//! ## لایه‌بندی معماری
//!
//! ```text
//! ┌──────────────────────┐
//! │      API Layer       │  <-- HTTP handlers (axum)
//! ├──────────────────────┤
//! │    Service Layer     │  <-- موتور فیلتر، سرویس داده، تنظیمات (اینجا!)
//! ├───────────┬──────────┤
//! │ REST API  │  SQLite  │  <-- بک‌اند فروشگاه / تنظیمات محلی
//! └───────────┴──────────┘
//! ```
//!
//! ## مفاهیم Rust:
//! - **Dependency Injection**: تزریق وابستگی‌ها
//! - **Traits برای Abstraction**: `KeyValueStore` و `ProductValues`
//! - **Arc<T>**: اشتراک امن بین threads

mod data_service;
mod preferences;
pub mod product_filter;

pub use data_service::*;
pub use preferences::*;

use std::{sync::Arc, time::Instant};

use crate::{
    config::Config,
    database::{Database, SqliteStore},
    error::Result,
};

// =====================================
// Application State
// =====================================
/// وضعیت برنامه که بین همه handlers اشتراک‌گذاری میشه
///
/// # مفاهیم:
/// - `Arc<T>`: Reference counting برای thread-safe sharing
/// - `Clone`: کپی کردن (فقط Arc clone میشه، نه داده)
#[derive(Clone)]
pub struct AppState {
    /// تنظیمات برنامه
    pub config: Arc<Config>,

    /// دیتابیس تنظیمات (برای health check)
    pub database: Database,

    /// تنظیمات کاربر
    pub preferences: Preferences,

    /// کلاینت بک‌اند REST
    pub data_service: Arc<RemoteDataService>,

    /// زمان شروع برنامه
    pub started_at: Instant,
}

impl AppState {
    /// ساخت AppState جدید
    ///
    /// # Errors
    /// آدرس بک‌اند نامعتبر
    pub fn new(db: Database, config: Config) -> Result<Self> {
        let preferences = Preferences::new(Arc::new(SqliteStore::new(db.clone())));
        Self::with_preferences(db, config, preferences)
    }

    /// مثل [`AppState::new`] با store تنظیمات دلخواه
    pub fn with_preferences(db: Database, config: Config, preferences: Preferences) -> Result<Self> {
        let data_service = Arc::new(RemoteDataService::new(&config, preferences.clone())?);

        Ok(Self {
            config: Arc::new(config),
            database: db,
            preferences,
            data_service,
            started_at: Instant::now(),
        })
    }

    /// دسترسی به config
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// =====================================
// Service Trait
// =====================================
/// Trait پایه برای services
///
/// همه services باید Send + Sync باشن تا در `AppState` بین
/// handlers اشتراک‌گذاری بشن.
pub trait Service: Send + Sync {}
