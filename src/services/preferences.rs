//! # سرویس تنظیمات کاربر (Preferences)
//!
//! توکن ورود، حالت تم و رنگ accent در یه key/value store ذخیره میشن
//! که بعد از restart هم باقی میمونه. خود store از بیرون تزریق میشه
//! ([`KeyValueStore`])؛ در برنامه SQLite و در تست‌ها حافظه یا mock.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::Service;
use crate::{
    error::{AppError, Result},
    models::PreferencesResponse,
    theme::{self, ThemeMode, DEFAULT_ACCENT},
};

/// کلید توکن ورود
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// کلید حالت تم
pub const THEME_KEY: &str = "theme_mode";

/// کلید رنگ accent
pub const ACCENT_KEY: &str = "accent_color";

// =====================================
// Store Trait
// =====================================
/// ذخیره‌ساز key/value
///
/// # مفاهیم:
/// - `#[async_trait]`: متد async در trait object (`Arc<dyn KeyValueStore>`)
/// - `automock`: در تست‌ها `MockKeyValueStore` ساخته میشه
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// خوندن مقدار؛ کلید ناموجود → `None`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// نوشتن (یا جایگزین کردن) مقدار
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// حذف کلید؛ `true` اگه وجود داشت
    async fn remove(&self, key: &str) -> Result<bool>;
}

/// store در حافظه؛ با بسته شدن برنامه پاک میشه
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.entries.write().await.remove(key).is_some())
    }
}

// =====================================
// Preferences Service
// =====================================
/// دسترسی تایپ‌شده به تنظیمات ذخیره‌شده
///
/// مقدار خراب یا ناشناخته در store خطا نمیده؛ پیش‌فرض برگردونده میشه
/// و یه warning لاگ میشه.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Service for Preferences {}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}

impl Preferences {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// تنظیمات در حافظه، برای تست و اجرای موقت
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    // ----------------------------------------
    // Session
    // ----------------------------------------

    pub async fn auth_token(&self) -> Result<Option<String>> {
        let token = self.store.get(AUTH_TOKEN_KEY).await?;
        Ok(token.filter(|t| !t.is_empty()))
    }

    /// ذخیره‌ی توکن بعد از ورود موفق
    ///
    /// # Errors
    /// `Validation` برای توکن خالی
    #[instrument(skip_all)]
    pub async fn set_auth_token(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::Validation("Token cannot be empty".to_string()));
        }

        self.store.set(AUTH_TOKEN_KEY, token).await?;
        info!("Auth token stored");
        Ok(())
    }

    /// خروج؛ `true` اگه توکنی وجود داشت
    #[instrument(skip_all)]
    pub async fn clear_auth_token(&self) -> Result<bool> {
        let removed = self.store.remove(AUTH_TOKEN_KEY).await?;
        info!(removed, "Auth token cleared");
        Ok(removed)
    }

    // ----------------------------------------
    // Theme
    // ----------------------------------------

    pub async fn theme(&self) -> Result<ThemeMode> {
        let Some(stored) = self.store.get(THEME_KEY).await? else {
            return Ok(ThemeMode::default());
        };

        Ok(ThemeMode::parse(&stored).unwrap_or_else(|| {
            warn!(value = %stored, "Ignoring unknown stored theme mode");
            ThemeMode::default()
        }))
    }

    pub async fn set_theme(&self, mode: ThemeMode) -> Result<()> {
        self.store.set(THEME_KEY, mode.as_str()).await?;
        debug!(mode = mode.as_str(), "Theme mode updated");
        Ok(())
    }

    /// رنگ accent ذخیره‌شده یا [`DEFAULT_ACCENT`]
    pub async fn accent_color(&self) -> Result<String> {
        let Some(stored) = self.store.get(ACCENT_KEY).await? else {
            return Ok(DEFAULT_ACCENT.to_string());
        };

        Ok(theme::normalize_hex(&stored).unwrap_or_else(|_| {
            warn!(value = %stored, "Ignoring invalid stored accent color");
            DEFAULT_ACCENT.to_string()
        }))
    }

    /// ذخیره‌ی رنگ accent؛ مقدار یکدست‌شده (`#rrggbb`) برگردونده میشه
    ///
    /// # Errors
    /// `Theme(InvalidHex)` برای رنگ نامعتبر
    pub async fn set_accent_color(&self, color: &str) -> Result<String> {
        let normalized = theme::normalize_hex(color)?;
        self.store.set(ACCENT_KEY, &normalized).await?;
        debug!(color = %normalized, "Accent color updated");
        Ok(normalized)
    }

    /// همه‌ی تنظیمات با هم، برای پاسخ API
    pub async fn snapshot(&self) -> Result<PreferencesResponse> {
        Ok(PreferencesResponse {
            theme: self.theme().await?,
            accent_color: self.accent_color().await?,
            authenticated: self.auth_token().await?.is_some(),
        })
    }
}
