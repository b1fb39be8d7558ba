//! بدنه‌های ورودی و خروجی API: تاریخ جلالی، جدول ماه، تنظیمات و محصولات

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Pagination, PaginationInfo, Product, ProductValues};
use crate::{
    calendar::{self, JalaaliDate, MonthGrid, Week, WEEKDAY_NAMES},
    services::product_filter::{
        CatalogFacets, FilterCriteria, PriceRange, SortCriteria, SortDirection, SortField,
        StockStatus,
    },
    theme::ThemeMode,
    utils,
};

// =====================================
// Generic API Responses
// =====================================
/// پوشش `{success, data, message}` برای پاسخ‌های موفق
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// ساخت پاسخ موفق
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    /// اضافه کردن پیام
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// پاسخ خالی برای عملیات‌هایی که داده برنمیگردونن
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptyResponse {
    pub success: bool,
    pub message: String,
}

impl EmptyResponse {
    /// ساخت پاسخ خالی موفق
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

// =====================================
// Health Check
// =====================================
/// پاسخ health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_seconds: Option<u64>,
}

impl HealthResponse {
    /// ساخت پاسخ healthy
    #[must_use]
    pub fn healthy(database_ok: bool) -> Self {
        Self {
            status: if database_ok { "healthy" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database_ok,
            uptime_seconds: None,
        }
    }

    #[must_use]
    pub fn with_uptime(mut self, seconds: u64) -> Self {
        self.uptime_seconds = Some(seconds);
        self
    }
}

// =====================================
// Products
// =====================================
/// پارامترهای لیست محصولات
///
/// همه‌ی فیلدها اختیاری هستن؛ فیلد خالی یعنی مقدار پیش‌فرض فیلتر.
/// صفحه‌بندی جدا تعریف شده چون `serde(flatten)` با query string
/// عددها رو درست پارس نمیکنه.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProductQuery {
    #[serde(default)]
    #[validate(length(max = 200, message = "Search text is too long"))]
    pub search: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "min_price cannot be negative"))]
    pub min_price: Option<f64>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "max_price cannot be negative"))]
    pub max_price: Option<f64>,

    #[serde(default)]
    pub stock: Option<StockStatus>,

    #[serde(default)]
    pub sort: Option<SortField>,

    #[serde(default)]
    pub direction: Option<SortDirection>,

    #[serde(default)]
    #[validate(range(min = 1, message = "Page starts from 1"))]
    pub page: Option<u32>,

    #[serde(default)]
    #[validate(range(min = 1, max = 100, message = "per_page must be 1-100"))]
    pub per_page: Option<u32>,
}

impl ProductQuery {
    /// تبدیل پارامترها به معیار فیلتر
    ///
    /// حد بالای قیمت اگه داده نشده باشه سقف قیمت مشاهده‌شده‌ست.
    #[must_use]
    pub fn criteria(&self, price_ceiling: f64) -> FilterCriteria {
        FilterCriteria {
            search: self.search.clone().unwrap_or_default(),
            category: self.category.clone().filter(|c| !c.trim().is_empty()),
            brand: self.brand.clone().filter(|b| !b.trim().is_empty()),
            price_range: PriceRange {
                min: self.min_price.unwrap_or(0.0),
                max: self.max_price.unwrap_or(price_ceiling),
            },
            stock_status: self.stock.unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn sort_criteria(&self) -> SortCriteria {
        SortCriteria {
            field: self.sort.unwrap_or_default(),
            direction: self.direction.unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        Pagination {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
    }
}

/// یک ردیف از لیست محصولات با مقادیر محاسبه‌شده
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    pub current_price: f64,
    pub current_stock: u64,
    pub stock_status: StockStatus,
    pub is_active: bool,

    /// تاریخ ساخت به شمسی، مثلا «۹ فروردین ۱۴۰۳»
    pub created_at: String,
}

impl ProductView {
    /// ساخت ردیف از محصول؛ توضیحات برای لیست کوتاه میشه
    pub fn from_product(product: &Product, values: &dyn ProductValues) -> Self {
        let stock = values.current_stock(product);

        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product
                .description
                .as_deref()
                .map(|d| utils::truncate(d, None)),
            category: product.category_name().map(str::to_string),
            brand: product.brand_name().map(str::to_string),
            current_price: values.current_price(product),
            current_stock: stock,
            stock_status: StockStatus::of(stock),
            is_active: product.is_active,
            created_at: calendar::format_date(product.created_at.as_deref()),
        }
    }
}

/// پاسخ لیست محصولات
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub items: Vec<ProductView>,
    pub facets: CatalogFacets,
    pub has_active_filters: bool,
    pub pagination: PaginationInfo,
}

// =====================================
// Calendar
// =====================================
/// `?date=2024-03-20`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConvertQuery {
    #[validate(length(min = 1, max = 64, message = "date is required"))]
    pub date: String,
}

/// `?year=1403&month=1&day=1`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GregorianQuery {
    pub year: i32,

    #[validate(range(min = 1, max = 12, message = "month must be 1-12"))]
    pub month: u8,

    #[validate(range(min = 1, max = 31, message = "day must be 1-31"))]
    pub day: u8,
}

/// یک تاریخ با هر دو نمایش
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JalaaliDateResponse {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub month_name: String,
    pub weekday: u8,
    pub weekday_name: String,
    pub is_leap_year: bool,
    pub month_length: u8,
    pub gregorian: NaiveDate,

    /// «۱ فروردین ۱۴۰۳»
    pub formatted: String,

    /// «۱۴۰۳/۰۱/۰۱»
    pub numeric: String,
}

impl From<JalaaliDate> for JalaaliDateResponse {
    fn from(date: JalaaliDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            month_name: date.month_name().to_string(),
            weekday: date.weekday(),
            weekday_name: calendar::weekday_name(date.weekday())
                .unwrap_or_default()
                .to_string(),
            is_leap_year: date.is_leap_year(),
            month_length: date.days_in_month(),
            gregorian: date.to_gregorian(),
            formatted: calendar::format_jalaali(&date),
            numeric: calendar::format_jalaali_numeric(&date),
        }
    }
}

/// ماه قبل/بعد برای صفحه‌بندی date picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u8,
}

/// جدول یک ماه برای date picker
#[derive(Debug, Clone, Serialize)]
pub struct MonthGridResponse {
    pub year: i32,
    pub month: u8,
    pub month_name: String,
    pub month_length: u8,
    pub weekday_names: [&'static str; 7],
    pub weeks: Vec<Week>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<YearMonth>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<YearMonth>,
}

impl From<MonthGrid> for MonthGridResponse {
    fn from(grid: MonthGrid) -> Self {
        let to_year_month = |(year, month): (i32, u8)| YearMonth { year, month };

        Self {
            year: grid.year,
            month: grid.month,
            month_name: calendar::month_name(grid.month)
                .unwrap_or_default()
                .to_string(),
            month_length: grid.days().count() as u8,
            weekday_names: WEEKDAY_NAMES,
            previous: calendar::previous_month(grid.year, grid.month).map(to_year_month),
            next: calendar::next_month(grid.year, grid.month).map(to_year_month),
            weeks: grid.weeks,
        }
    }
}

// =====================================
// Preferences & Session
// =====================================
/// تنظیمات فعلی کاربر
///
/// توکن هیچوقت برگردونده نمیشه؛ فقط اینکه وجود داره یا نه.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub theme: ThemeMode,
    pub accent_color: String,
    pub authenticated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ThemeRequest {
    pub mode: ThemeMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AccentRequest {
    #[validate(regex(path = *crate::utils::VALID_HEX_COLOR, message = "Color must look like #1976d2"))]
    pub color: String,
}

/// ذخیره‌ی توکن بعد از ورود
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SessionRequest {
    #[validate(length(min = 1, max = 4096, message = "Token is required"))]
    pub token: String,
}

/// `?mode=dark&accent=%23ff5722`؛ مقدار خالی یعنی تنظیمات ذخیره‌شده
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PaletteQuery {
    #[serde(default)]
    pub mode: Option<ThemeMode>,

    #[serde(default)]
    #[validate(regex(path = *crate::utils::VALID_HEX_COLOR, message = "Color must look like #1976d2"))]
    pub accent: Option<String>,
}
