//! # خطاهای برنامه
//!
//! یه enum واحد برای کل سرویس که هر حالتش به یک status code نگاشت میشه.
//! handler‌ها فقط `Result<T>` برمیگردونن و `?` بقیه‌ی کار رو میکنه.
//!
//! ## دو دسته خطا
//! - خطاهای ماژول‌های خالص (`CalendarError`، `ThemeError`) که مستقل از
//!   HTTP هستن و اینجا فقط به status code نگاشت میشن
//! - خطاهای سرویس (دیتابیس، بک‌اند REST، تنظیمات)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{calendar::CalendarError, theme::ThemeError};

// =====================================
// Result Type Alias
// =====================================
/// `Result<Product>` به جای `Result<Product, AppError>`
pub type Result<T, E = AppError> = std::result::Result<T, E>;

// =====================================
// Custom Error Enum
// =====================================
/// همه‌ی خطاهای داشبورد؛ هر variant یک status HTTP مشخص داره
#[derive(Debug, Error)]
pub enum AppError {
    // ----------------------------------------
    // خطاهای کاربر (4xx)
    // ----------------------------------------

    /// درخواست نامعتبر - 400
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// توکن نداریم یا بک‌اند قبولش نکرد - 401
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// دسترسی ممنوع - 403
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// پیدا نشد - 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// خطای اعتبارسنجی - 422
    #[error("Validation error: {0}")]
    Validation(String),

    /// تاریخ نامعتبر یا خارج از محدوده - 400
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// رنگ نامعتبر - 422
    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),

    // ----------------------------------------
    // خطاهای سرور (5xx)
    // ----------------------------------------

    /// بک‌اند REST جواب غیرمنتظره داد - 502
    #[error("Upstream error{}: {message}", status_suffix(.status))]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// اتصال به بک‌اند REST برقرار نشد - 502
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// خطای داخلی سرور - 500
    #[error("Internal server error: {0}")]
    Internal(String),

    /// خطای تنظیمات
    #[error("Configuration error: {0}")]
    Config(String),

    // ----------------------------------------
    // خطاهای تبدیل شده از کتابخانه‌ها
    // ----------------------------------------

    /// خطای دیتابیس تنظیمات
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// خطای IO
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// خطای JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// خطای URL
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

impl AppError {
    /// گرفتن HTTP status code متناسب با خطا
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 4xx Client Errors
            Self::BadRequest(_) | Self::Calendar(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::Theme(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // 5xx Server Errors
            Self::Upstream { .. } | Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_)
            | Self::Config(_)
            | Self::Database(_)
            | Self::Migration(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::UrlParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// آیا این یه خطای سرور هست؟
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// ساخت خطای Not Found برای یک entity از بک‌اند
    #[must_use]
    pub fn resource_not_found(resource: &str, id: &str) -> Self {
        Self::NotFound(format!("{} '{}' not found", resource, id))
    }

    /// نگاشت پاسخ ناموفق بک‌اند REST به خطای برنامه
    ///
    /// | status | خطا |
    /// |--------|-----|
    /// | 400 | `BadRequest` |
    /// | 401 | `Unauthorized` |
    /// | 403 | `Forbidden` |
    /// | 404 | `NotFound` |
    /// | 422 | `Validation` |
    /// | بقیه | `Upstream` |
    #[must_use]
    pub fn from_upstream(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest(message),
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::UNPROCESSABLE_ENTITY => Self::Validation(message),
            other => Self::Upstream {
                status: Some(other.as_u16()),
                message,
            },
        }
    }
}

// =====================================
// Error Body
// =====================================
/// بدنه‌ی JSON همه‌ی پاسخ‌های ناموفق
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// عنوان استاندارد status، مثلا `Bad Gateway`
    pub error: String,

    /// متن کامل خطا
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status_code = Some(status.as_u16());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

// =====================================
// IntoResponse Implementation
// =====================================
/// بدنه‌ی JSON خطا؛ خطاهای 5xx لاگ هم میشن.
/// برای خطای بک‌اند، status اصلی در `details.upstream_status` میاد.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            error!(error = %self, "Server error occurred");
        }

        let status = self.status_code();

        let mut error_response = ErrorResponse::new(
            status.canonical_reason().unwrap_or("Error"),
            self.to_string(),
        )
        .with_status(status);

        if let Self::Upstream {
            status: Some(upstream),
            ..
        } = &self
        {
            error_response = error_response.with_details(json!({ "upstream_status": upstream }));
        }

        (status, Json(error_response)).into_response()
    }
}

// =====================================
// From Implementations
// =====================================
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<::config::ConfigError> for AppError {
    fn from(err: ::config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::Validation("per_page".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::Unauthorized("token".into()), StatusCode::UNAUTHORIZED),
            (AppError::resource_not_found("product", "p1"), StatusCode::NOT_FOUND),
            (AppError::Config("port".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                AppError::Upstream {
                    status: None,
                    message: "refused".into(),
                },
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{}", err);
        }
    }

    #[test]
    fn test_domain_errors() {
        let calendar: AppError = CalendarError::InvalidMonth(13).into();
        assert_eq!(calendar.status_code(), StatusCode::BAD_REQUEST);

        let theme: AppError = ThemeError::InvalidHex("blue".into()).into();
        assert_eq!(theme.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_upstream_mapping() {
        let cases = [
            (StatusCode::BAD_REQUEST, StatusCode::BAD_REQUEST),
            (StatusCode::UNAUTHORIZED, StatusCode::UNAUTHORIZED),
            (StatusCode::FORBIDDEN, StatusCode::FORBIDDEN),
            (StatusCode::NOT_FOUND, StatusCode::NOT_FOUND),
            (StatusCode::UNPROCESSABLE_ENTITY, StatusCode::UNPROCESSABLE_ENTITY),
            (StatusCode::INTERNAL_SERVER_ERROR, StatusCode::BAD_GATEWAY),
            (StatusCode::CONFLICT, StatusCode::BAD_GATEWAY),
        ];

        for (upstream, ours) in cases {
            assert_eq!(AppError::from_upstream(upstream, "x").status_code(), ours);
        }
    }

    #[test]
    fn test_upstream_message() {
        let err = AppError::from_upstream(StatusCode::SERVICE_UNAVAILABLE, "down");
        assert_eq!(err.to_string(), "Upstream error (503): down");
    }

    #[test]
    fn test_upstream_status_in_details() {
        let response = AppError::from_upstream(StatusCode::CONFLICT, "duplicate").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = ErrorResponse::new("Bad Gateway", "x")
            .with_status(StatusCode::BAD_GATEWAY)
            .with_details(json!({ "upstream_status": 409 }));
        assert_eq!(body.status_code, Some(502));
        assert_eq!(body.details, Some(json!({ "upstream_status": 409 })));
    }
}
