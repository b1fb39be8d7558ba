//! # موتور فیلتر و مرتب‌سازی محصولات
//!
//! از لیست کامل محصولات و معیارهای فعلی، زیرمجموعه‌ی قابل نمایش رو
//! به ترتیب درست میسازه. خود موتور (`filter_products`) تابع خالص هست؛
//! وضعیت UI در [`ProductFilter`] نگهداری میشه.
//!
//! ## ترتیب مراحل
//! 1. جستجوی متنی در نام و توضیحات (بدون حساسیت به حروف بزرگ/کوچک)
//! 2. دسته‌بندی (برابری دقیق)
//! 3. برند (برابری دقیق)
//! 4. بازه‌ی قیمت (شامل دو سر)
//! 5. وضعیت موجودی
//! 6. مرتب‌سازی پایدار
//!
//! قیمت و موجودی هر محصول در هر بار اجرا فقط یک بار از
//! [`ProductValues`] پرسیده میشه و هیچ چیزی بین دو اجرا cache نمیشه.

use std::{cmp::Ordering, collections::BTreeSet};

use feruca::Collator;
use serde::{Deserialize, Serialize};

use crate::models::{Product, ProductValues};

/// موجودی‌های ۱ تا این عدد «کم» حساب میشن
pub const LOW_STOCK_THRESHOLD: u64 = 5;

// =====================================
// Criteria
// =====================================
/// وضعیت موجودی برای فیلتر
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    #[default]
    All,
    /// موجودی بیشتر از صفر
    InStock,
    /// بین ۱ و [`LOW_STOCK_THRESHOLD`]
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// آیا موجودی داده‌شده با این وضعیت جور درمیاد؟
    #[must_use]
    pub fn matches(&self, stock: u64) -> bool {
        match self {
            Self::All => true,
            Self::InStock => stock > 0,
            Self::LowStock => (1..=LOW_STOCK_THRESHOLD).contains(&stock),
            Self::OutOfStock => stock == 0,
        }
    }

    /// دقیق‌ترین وضعیت برای نمایش کنار محصول (هیچوقت `All` نیست)
    #[must_use]
    pub fn of(stock: u64) -> Self {
        match stock {
            0 => Self::OutOfStock,
            s if s <= LOW_STOCK_THRESHOLD => Self::LowStock,
            _ => Self::InStock,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    Price,
    StockQuantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// معیار مرتب‌سازی؛ پیش‌فرض: نام، صعودی
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortCriteria {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortCriteria {
    #[must_use]
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// بازه‌ی قیمت، شامل هر دو سر
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// `[0, ceiling]`
    #[must_use]
    pub fn up_to(ceiling: f64) -> Self {
        Self { min: 0.0, max: ceiling }
    }

    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::up_to(f64::INFINITY)
    }
}

/// معیارهای فیلتر
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub search: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price_range: PriceRange,
    pub stock_status: StockStatus,
}

impl FilterCriteria {
    /// معیار پیش‌فرض با سقف قیمت مشاهده‌شده
    #[must_use]
    pub fn with_ceiling(ceiling: f64) -> Self {
        Self {
            price_range: PriceRange::up_to(ceiling),
            ..Self::default()
        }
    }
}

// =====================================
// Engine
// =====================================
/// مقایسه‌ی نام با الگوریتم collation یونیکد (جدول ریشه‌ی CLDR)
///
/// حروف بزرگ/کوچک فقط در سطح سوم فرق دارن و کوچک اول میاد؛
/// «پ» بعد از «ب» و قبل از «ت» قرار میگیره.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    name_order(&mut Collator::default(), a, b)
}

fn name_order(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| b.cmp(a))
}

/// یک محصول همراه مقادیر محاسبه‌شده در این اجرا
struct Row<'a> {
    product: &'a Product,
    price: f64,
    stock: u64,
}

fn matches_search(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    product.name.to_lowercase().contains(needle)
        || product
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

fn compare_rows(collator: &mut Collator, a: &Row<'_>, b: &Row<'_>, field: SortField) -> Ordering {
    match field {
        SortField::Name => name_order(collator, &a.product.name, &b.product.name),
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::StockQuantity => a.stock.cmp(&b.stock),
    }
}

/// اعمال فیلتر و مرتب‌سازی
///
/// هیچوقت خطا نمیده؛ معیار نامعقول (مثلا بازه‌ی قیمت برعکس) فقط
/// نتیجه‌ی خالی میده. مرتب‌سازی پایداره، پس دو اجرا با ورودی یکسان
/// خروجی یکسان دارن.
///
/// # مثال
/// ```rust
/// use admin_dashboard::models::{EffectiveValues, Product};
/// use admin_dashboard::services::product_filter::{filter_products, FilterCriteria, SortCriteria};
///
/// let products = vec![Product::new("1", "Widget B"), Product::new("2", "Widget A")];
/// let visible = filter_products(&products, &FilterCriteria::default(), &SortCriteria::default(), &EffectiveValues::today());
///
/// assert_eq!(visible[0].name, "Widget A");
/// ```
pub fn filter_products<'a, V>(
    products: &'a [Product],
    criteria: &FilterCriteria,
    sort: &SortCriteria,
    values: &V,
) -> Vec<&'a Product>
where
    V: ProductValues + ?Sized,
{
    // فقط حروف کوچک میشن؛ فاصله‌ها دست نمیخورن
    let needle = criteria.search.to_lowercase();

    let mut rows: Vec<Row<'a>> = products
        .iter()
        .filter(|p| matches_search(p, &needle))
        .filter(|p| {
            criteria
                .category
                .as_deref()
                .map_or(true, |c| p.category_name() == Some(c))
        })
        .filter(|p| {
            criteria
                .brand
                .as_deref()
                .map_or(true, |b| p.brand_name() == Some(b))
        })
        .map(|product| Row {
            product,
            price: values.current_price(product),
            stock: values.current_stock(product),
        })
        .filter(|row| criteria.price_range.contains(row.price))
        .filter(|row| criteria.stock_status.matches(row.stock))
        .collect();

    let mut collator = Collator::default();

    // sort_by پایداره
    rows.sort_by(|a, b| {
        let ordering = compare_rows(&mut collator, a, b, sort.field);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    rows.into_iter().map(|row| row.product).collect()
}

// =====================================
// Facets
// =====================================
/// گزینه‌های قابل انتخاب در فرم فیلتر
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogFacets {
    /// نام دسته‌بندی‌های موجود، مرتب و بدون تکرار
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    /// بیشترین قیمت فعلی؛ برای لیست خالی صفر
    pub max_price: f64,
}

impl CatalogFacets {
    pub fn collect<V>(products: &[Product], values: &V) -> Self
    where
        V: ProductValues + ?Sized,
    {
        let categories: BTreeSet<&str> = products.iter().filter_map(Product::category_name).collect();
        let brands: BTreeSet<&str> = products.iter().filter_map(Product::brand_name).collect();

        let max_price = products
            .iter()
            .map(|p| values.current_price(p))
            .fold(0.0_f64, f64::max);

        Self {
            categories: categories.into_iter().map(str::to_string).collect(),
            brands: brands.into_iter().map(str::to_string).collect(),
            max_price,
        }
    }
}

// =====================================
// Filter State
// =====================================
/// وضعیت فیلتر صفحه‌ی لیست محصولات
///
/// # مفاهیم:
/// - معیارها فیلد خصوصی هستن و فقط با setter عوض میشن
/// - `reset` همه چیز رو در یک قدم برمیگردونه
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductFilter {
    criteria: FilterCriteria,
    sort: SortCriteria,
    price_ceiling: f64,
}

impl ProductFilter {
    /// فیلتر پیش‌فرض با سقف قیمت داده‌شده
    #[must_use]
    pub fn new(price_ceiling: f64) -> Self {
        Self {
            criteria: FilterCriteria::with_ceiling(price_ceiling),
            sort: SortCriteria::default(),
            price_ceiling,
        }
    }

    /// بازسازی وضعیت از معیارهای ذخیره‌شده (مثلا پارامترهای URL)
    #[must_use]
    pub fn with_criteria(criteria: FilterCriteria, sort: SortCriteria, price_ceiling: f64) -> Self {
        Self {
            criteria,
            sort,
            price_ceiling,
        }
    }

    /// ساخت فیلتر از روی محصولات بارگذاری‌شده
    pub fn for_products<V>(products: &[Product], values: &V) -> Self
    where
        V: ProductValues + ?Sized,
    {
        Self::new(CatalogFacets::collect(products, values).max_price)
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn sort(&self) -> SortCriteria {
        self.sort
    }

    #[must_use]
    pub fn price_ceiling(&self) -> f64 {
        self.price_ceiling
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.criteria.category = category;
    }

    pub fn set_brand(&mut self, brand: Option<String>) {
        self.criteria.brand = brand;
    }

    pub fn set_price_range(&mut self, min: f64, max: f64) {
        self.criteria.price_range = PriceRange { min, max };
    }

    pub fn set_stock_status(&mut self, status: StockStatus) {
        self.criteria.stock_status = status;
    }

    pub fn set_sort(&mut self, sort: SortCriteria) {
        self.sort = sort;
    }

    /// کلیک روی ستون: همون ستون → برعکس کردن جهت، ستون جدید → صعودی
    pub fn sort_by(&mut self, field: SortField) {
        self.sort = if self.sort.field == field {
            SortCriteria::new(field, self.sort.direction.toggled())
        } else {
            SortCriteria::new(field, SortDirection::Asc)
        };
    }

    /// بروزرسانی سقف قیمت بعد از بارگذاری دوباره‌ی محصولات
    ///
    /// اگه کاربر حد بالا رو دستی کم نکرده بود، حد بالا هم با سقف
    /// جدید جابجا میشه.
    pub fn observe<V>(&mut self, products: &[Product], values: &V)
    where
        V: ProductValues + ?Sized,
    {
        let ceiling = CatalogFacets::collect(products, values).max_price;
        if self.criteria.price_range.max >= self.price_ceiling {
            self.criteria.price_range.max = ceiling;
        }
        self.price_ceiling = ceiling;
    }

    /// برگردوندن همه‌ی معیارها به پیش‌فرض
    pub fn reset(&mut self) {
        *self = Self::new(self.price_ceiling);
    }

    /// آیا نیاز به دکمه‌ی «حذف فیلترها» هست؟
    ///
    /// متن جستجو حساب نمیشه؛ جعبه‌ی جستجو دکمه‌ی پاک کردن خودش رو داره.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        let range = self.criteria.price_range;

        self.criteria.category.is_some()
            || self.criteria.brand.is_some()
            || self.sort.field != SortField::Name
            || self.sort.direction != SortDirection::Asc
            || range.min > 0.0
            || range.max < self.price_ceiling
            || self.criteria.stock_status != StockStatus::All
    }

    /// اعمال معیارهای فعلی روی محصولات
    pub fn apply<'a, V>(&self, products: &'a [Product], values: &V) -> Vec<&'a Product>
    where
        V: ProductValues + ?Sized,
    {
        filter_products(products, &self.criteria, &self.sort, values)
    }
}
