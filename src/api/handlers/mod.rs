//! Handler‌های HTTP، یک فایل برای هر گروه مسیر

pub mod calendar;
pub mod health;
pub mod preferences;
pub mod products;
