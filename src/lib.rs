//! # Admin Dashboard Library
//!
//! هسته‌ی پنل مدیریت فروشگاه: تقویم جلالی، فیلتر و مرتب‌سازی محصولات،
//! تنظیمات کاربر (تم، رنگ، توکن) و یک API کوچک JSON روی بک‌اند REST.
//!
//! ## ساختار پروژه
//!
//! ```text
//! src/
//! ├── lib.rs          # نقطه ورود کتابخانه
//! ├── main.rs         # نقطه ورود باینری
//! ├── calendar/       # تقویم جلالی و date picker
//! ├── config/         # مدیریت تنظیمات
//! ├── error/          # تعریف خطاها
//! ├── database/       # ذخیره‌ی تنظیمات کاربر
//! ├── models/         # مدل‌های داده
//! ├── services/       # فیلتر محصولات، کلاینت REST، تنظیمات
//! ├── theme/          # پالت رنگ
//! ├── api/            # لایه API
//! └── utils/          # توابع کمکی
//! ```
//!
//! ## مثال استفاده
//!
//! ```rust,no_run
//! use admin_dashboard::calendar::JalaaliDate;
//! use chrono::NaiveDate;
//!
//! let nowruz = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
//! let date = JalaaliDate::from_gregorian(nowruz).unwrap();
//! assert_eq!((date.year(), date.month(), date.day()), (1403, 1, 1));
//! ```

// =====================================
// Module Declarations
// =====================================

pub mod calendar;
pub mod config;
pub mod error;
pub mod database;
pub mod models;
pub mod services;
pub mod theme;
pub mod api;
pub mod utils;

// =====================================
// Re-exports
// =====================================

pub use error::{AppError, Result};

// =====================================
// Prelude Module
// =====================================
/// ماژول prelude برای import راحت‌تر آیتم‌های پرکاربرد
///
/// ```rust
/// use admin_dashboard::prelude::*;
/// ```
pub mod prelude {
    pub use crate::calendar::{JalaaliDate, MonthGrid};
    pub use crate::config::Config;
    pub use crate::database::Database;
    pub use crate::error::{AppError, Result};
    pub use crate::models::*;
    pub use crate::services::product_filter::{
        FilterCriteria, ProductFilter, SortCriteria, SortDirection, SortField, StockStatus,
    };
    pub use crate::services::*;
    pub use crate::theme::{Palette, ThemeMode};
}
