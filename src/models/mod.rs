//! # مدل‌های فروشگاه
//!
//! رکوردهای بک‌اند REST (محصول، برند، دسته، کاربر و ...) با فیلدهای
//! camelCase میان؛ DTO‌های `dto` شکل snake_case خروجی API خودمون هستن.
//! هر منبع با `Resource::PATH` به endpoint خودش وصله.

mod catalog;
mod dto;
mod product;

// Re-export همه مدل‌ها
pub use catalog::*;
pub use dto::*;
pub use product::*;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use validator::Validate;

// =====================================
// Remote Resource
// =====================================
/// هر entity که بک‌اند REST براش یه مجموعه endpoint داره
///
/// # مفاهیم:
/// - Associated const: مسیر endpoint بخشی از نوع هست، نه یه رشته‌ی پراکنده
/// - `DeserializeOwned`: نتیجه مالک داده‌ست و به buffer وابسته نیست
///
/// # مثال
/// ```rust
/// use admin_dashboard::models::{Category, Resource};
///
/// assert_eq!(Category::PATH, "categories");
/// ```
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// مسیر نسبی endpoint، مثلا `products`
    const PATH: &'static str;

    /// نام قابل خواندن برای لاگ و پیام خطا
    const NAME: &'static str;
}

/// بدنه‌ی درخواست PATCH برای فعال/غیرفعال کردن یه entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPatch {
    pub is_active: bool,
}

// =====================================
// Pagination
// =====================================
/// صفحه‌بندی لیست محصولات (`page` از ۱، حداکثر ۱۰۰ در صفحه)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Pagination {
    /// شماره صفحه (از 1 شروع میشه)
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page starts from 1"))]
    pub page: u32,

    /// تعداد آیتم در صفحه
    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = 100, message = "per_page must be 1-100"))]
    pub per_page: u32,
}

fn default_page() -> u32 { 1 }
fn default_per_page() -> u32 { 20 }

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

impl Pagination {
    /// محاسبه offset
    #[must_use]
    pub fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)) * self.limit()
    }

    /// محاسبه limit
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.per_page.clamp(1, 100) // حداکثر 100
    }
}

/// یک برش از لیست به همراه اطلاعات صفحه
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    /// داده‌ها
    pub data: Vec<T>,

    /// اطلاعات صفحه‌بندی
    pub pagination: PaginationInfo,
}

/// اطلاعات صفحه‌بندی
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub current_page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationInfo {
    /// ساخت اطلاعات صفحه‌بندی
    #[must_use]
    pub fn new(pagination: &Pagination, total_items: u64) -> Self {
        let per_page = u64::from(pagination.limit());
        let total_pages = total_items.div_ceil(per_page) as u32;

        Self {
            current_page: pagination.page,
            per_page: pagination.limit(),
            total_items,
            total_pages,
            has_next: pagination.page < total_pages,
            has_prev: pagination.page > 1,
        }
    }
}

impl<T> PaginatedResult<T> {
    /// ساخت نتیجه صفحه‌بندی شده
    pub fn new(data: Vec<T>, pagination: &Pagination, total_items: u64) -> Self {
        Self {
            data,
            pagination: PaginationInfo::new(pagination, total_items),
        }
    }

    /// برش یک صفحه از لیست کامل (صفحه‌بندی سمت سرویس)
    pub fn from_items(items: Vec<T>, pagination: &Pagination) -> Self {
        let total = items.len() as u64;
        let data = items
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();

        Self::new(data, pagination, total)
    }

    /// تبدیل داده‌ها با حفظ اطلاعات صفحه‌بندی
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_offset() {
        let page1 = Pagination { page: 1, per_page: 20 };
        let page3 = Pagination { page: 3, per_page: 10 };

        assert_eq!(page1.offset(), 0);
        assert_eq!(page3.offset(), 20);
    }

    #[test]
    fn test_from_items() {
        let items: Vec<u32> = (1..=35).collect();
        let page = PaginatedResult::from_items(items, &Pagination { page: 4, per_page: 10 });

        assert_eq!(page.data, vec![31, 32, 33, 34, 35]);
        assert_eq!(page.pagination.total_pages, 4);
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = PaginatedResult::from_items(vec![1, 2, 3], &Pagination { page: 9, per_page: 10 });
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total_items, 3);
    }
}
