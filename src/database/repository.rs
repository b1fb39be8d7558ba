//! # Repository تنظیمات
//!
//! پیاده‌سازی [`KeyValueStore`] روی جدول `preferences` در SQLite.
//!
//! ## مفاهیم Rust:
//! - **async_trait**: امکان async در traits
//! - **UPSERT**: `INSERT ... ON CONFLICT DO UPDATE` برای نوشتن اتمی

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::debug;

use super::Database;
use crate::{error::Result, services::KeyValueStore};

/// یک ردیف از جدول `preferences`
#[derive(Debug, Clone, FromRow)]
pub struct PreferenceRow {
    pub key: String,
    pub value: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// store دائمی تنظیمات روی SQLite
///
/// # مفاهیم:
/// - Database به عنوان dependency تزریق میشه
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// همه‌ی ردیف‌ها، مرتب بر اساس کلید
    pub async fn entries(&self) -> Result<Vec<PreferenceRow>> {
        let rows = sqlx::query_as::<_, PreferenceRow>(
            "SELECT key, value, updated_at FROM preferences ORDER BY key",
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(self.db.pool())
        .await?;

        debug!(key, "Preference stored");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM preferences WHERE key = ?")
            .bind(key)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteStore {
        SqliteStore::new(Database::in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = store().await;
        assert_eq!(store.get("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = store().await;
        store.set("theme_mode", "light").await.unwrap();
        store.set("theme_mode", "dark").await.unwrap();

        assert_eq!(store.get("theme_mode").await.unwrap().as_deref(), Some("dark"));

        let rows = store.entries().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].updated_at.is_some());
    }

    #[tokio::test]
    async fn test_updated_at_is_a_timestamp() {
        let store = store().await;
        let before = Utc::now();
        store.set("accent_color", "#1976d2").await.unwrap();

        let rows = store.entries().await.unwrap();
        let updated_at = rows[0].updated_at.expect("updated_at is written on set");
        assert!(updated_at >= before - chrono::Duration::seconds(1));
        assert!(updated_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = store().await;
        store.set("auth_token", "abc").await.unwrap();

        assert!(store.remove("auth_token").await.unwrap());
        assert!(!store.remove("auth_token").await.unwrap());
        assert_eq!(store.get("auth_token").await.unwrap(), None);
    }
}
