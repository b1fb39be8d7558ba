//! # مدل محصول
//!
//! محصول از بک‌اند میاد و قیمت و موجودیش فیلد ساده نیستن:
//! قیمت از روی ردیف‌های قیمت تاریخ‌دار و موجودی از جمع موجودی انبارها
//! محاسبه میشه. همه‌ی این منطق فقط در [`EffectiveValues`] هست.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Resource;

/// ارجاع به دسته‌بندی یا برند
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub id: String,
    pub name: String,
}

/// یک ردیف قیمت که از تاریخ `effective_from` معتبره
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTier {
    pub price: f64,
    pub effective_from: NaiveDate,
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
}

impl PriceTier {
    #[must_use]
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_from <= date && self.effective_to.map_or(true, |end| date <= end)
    }
}

/// موجودی محصول در یک انبار
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockEntry {
    pub warehouse_id: String,
    pub quantity: u32,
}

/// محصول، همونطور که بک‌اند برمیگردونه
///
/// `price` و `stock_quantity` فیلدهای قدیمی تخت هستن که برای سازگاری
/// با داده‌های قدیمی نگه داشته شدن.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<EntityRef>,
    #[serde(default)]
    pub brand: Option<EntityRef>,
    #[serde(default)]
    pub prices: Vec<PriceTier>,
    #[serde(default)]
    pub stocks: Vec<StockEntry>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock_quantity: Option<u32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Resource for Product {
    const PATH: &'static str = "products";
    const NAME: &'static str = "product";
}

impl Product {
    /// محصول ساده با نام، برای ساخت داده در تست‌ها و fixture‌ها
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            category: None,
            brand: None,
            prices: Vec::new(),
            stocks: Vec::new(),
            price: None,
            stock_quantity: None,
            is_active: true,
            created_at: None,
        }
    }

    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn brand_name(&self) -> Option<&str> {
        self.brand.as_ref().map(|b| b.name.as_str())
    }
}

// =====================================
// Derived Values
// =====================================
/// نقطه‌ی اتصال موتور فیلتر به قوانین قیمت و موجودی
///
/// موتور فیلتر فقط از این trait استفاده میکنه و در هر بار فیلتر کردن
/// مقدارها رو از نو میپرسه.
pub trait ProductValues {
    /// قیمت فعلی فروش
    fn current_price(&self, product: &Product) -> f64;

    /// موجودی فعلی
    fn current_stock(&self, product: &Product) -> u64;
}

/// قانون استاندارد قیمت و موجودی
///
/// - قیمت: ردیفی که در تاریخ `as_of` معتبره و دیرتر از بقیه شروع شده؛
///   اگه نبود فیلد قدیمی `price`؛ اگه اونم نبود صفر.
/// - موجودی: جمع موجودی انبارها؛ اگه ردیفی نبود فیلد قدیمی
///   `stock_quantity`؛ اگه اونم نبود صفر.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveValues {
    pub as_of: NaiveDate,
}

impl EffectiveValues {
    #[must_use]
    pub fn new(as_of: NaiveDate) -> Self {
        Self { as_of }
    }

    /// مقادیر در تاریخ امروز (وقت محلی)
    #[must_use]
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl Default for EffectiveValues {
    fn default() -> Self {
        Self::today()
    }
}

impl ProductValues for EffectiveValues {
    fn current_price(&self, product: &Product) -> f64 {
        product
            .prices
            .iter()
            .filter(|tier| tier.is_effective_on(self.as_of))
            .max_by_key(|tier| tier.effective_from)
            .map(|tier| tier.price)
            .or(product.price)
            .unwrap_or(0.0)
    }

    fn current_stock(&self, product: &Product) -> u64 {
        if product.stocks.is_empty() {
            return product.stock_quantity.map_or(0, u64::from);
        }

        product
            .stocks
            .iter()
            .map(|entry| u64::from(entry.quantity))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tier(price: f64, from: NaiveDate, to: Option<NaiveDate>) -> PriceTier {
        PriceTier {
            price,
            effective_from: from,
            effective_to: to,
        }
    }

    #[test]
    fn test_latest_effective_tier_wins() {
        let mut product = Product::new("p1", "Widget");
        product.prices = vec![
            tier(100.0, date(2024, 1, 1), None),
            tier(120.0, date(2024, 6, 1), None),
            tier(150.0, date(2025, 1, 1), None),
        ];

        let values = EffectiveValues::new(date(2024, 7, 15));
        assert_eq!(values.current_price(&product), 120.0);
    }

    #[test]
    fn test_expired_tier_is_skipped() {
        let mut product = Product::new("p1", "Widget");
        product.prices = vec![
            tier(100.0, date(2024, 1, 1), None),
            tier(80.0, date(2024, 6, 1), Some(date(2024, 6, 30))),
        ];

        assert_eq!(EffectiveValues::new(date(2024, 6, 15)).current_price(&product), 80.0);
        assert_eq!(EffectiveValues::new(date(2024, 7, 1)).current_price(&product), 100.0);
    }

    #[test]
    fn test_price_falls_back_to_flat_field() {
        let mut product = Product::new("p1", "Widget");
        product.price = Some(42.0);
        product.prices = vec![tier(100.0, date(2030, 1, 1), None)];

        let values = EffectiveValues::new(date(2024, 1, 1));
        assert_eq!(values.current_price(&product), 42.0);

        product.price = None;
        assert_eq!(values.current_price(&product), 0.0);
    }

    #[test]
    fn test_stock_is_summed_across_warehouses() {
        let mut product = Product::new("p1", "Widget");
        product.stock_quantity = Some(99);
        product.stocks = vec![
            StockEntry { warehouse_id: "w1".into(), quantity: 3 },
            StockEntry { warehouse_id: "w2".into(), quantity: 4 },
        ];

        let values = EffectiveValues::new(date(2024, 1, 1));
        assert_eq!(values.current_stock(&product), 7);

        product.stocks.clear();
        assert_eq!(values.current_stock(&product), 99);

        product.stock_quantity = None;
        assert_eq!(values.current_stock(&product), 0);
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "id": "p1",
            "name": "گوشی",
            "category": {"id": "c1", "name": "موبایل"},
            "prices": [{"price": 250.5, "effectiveFrom": "2024-01-01"}],
            "stocks": [{"warehouseId": "w1", "quantity": 2}]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.category_name(), Some("موبایل"));
        assert_eq!(product.brand_name(), None);
        assert!(product.is_active);
        assert_eq!(product.prices[0].effective_to, None);
    }
}
