//! # Entity‌های پنل مدیریت
//!
//! بقیه‌ی منابعی که بک‌اند REST ارائه میده. این ساختارها فقط شکل داده
//! هستن؛ منطقشون سمت بک‌اند هست.

use serde::{Deserialize, Serialize};

use super::Resource;

fn default_active() -> bool {
    true
}

/// تعریف یک entity ساده و پیاده‌سازی [`Resource`] براش
///
/// # مفاهیم:
/// - `macro_rules!`: جلوگیری از تکرار derive و impl برای هر entity
macro_rules! resource {
    (
        $(#[$meta:meta])*
        $name:ident at $path:literal as $label:literal {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident : $ty:ty,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub id: String,
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl Resource for $name {
            const PATH: &'static str = $path;
            const NAME: &'static str = $label;
        }
    };
}

resource! {
    /// دسته‌بندی محصولات (میتونه والد داشته باشه)
    Category at "categories" as "category" {
        pub name: String,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub parent_id: Option<String>,
        #[serde(default = "default_active")]
        pub is_active: bool,
    }
}

resource! {
    Brand at "brands" as "brand" {
        pub name: String,
        #[serde(default)]
        pub logo_url: Option<String>,
        #[serde(default = "default_active")]
        pub is_active: bool,
    }
}

resource! {
    /// تامین‌کننده
    Supplier at "suppliers" as "supplier" {
        pub name: String,
        #[serde(default)]
        pub email: Option<String>,
        #[serde(default)]
        pub phone: Option<String>,
        #[serde(default = "default_active")]
        pub is_active: bool,
    }
}

resource! {
    /// کاربر پنل مدیریت
    User at "users" as "user" {
        pub username: String,
        pub email: String,
        #[serde(default)]
        pub role_id: Option<String>,
        #[serde(default = "default_active")]
        pub is_active: bool,
    }
}

resource! {
    Role at "roles" as "role" {
        pub name: String,
        #[serde(default)]
        pub permissions: Vec<String>,
    }
}

resource! {
    /// بنر تبلیغاتی صفحه‌ی اصلی فروشگاه
    Banner at "banners" as "banner" {
        pub title: String,
        pub image_url: String,
        #[serde(default)]
        pub link_url: Option<String>,
        #[serde(default)]
        pub position: i32,
        #[serde(default)]
        pub starts_at: Option<String>,
        #[serde(default)]
        pub ends_at: Option<String>,
        #[serde(default = "default_active")]
        pub is_active: bool,
    }
}

resource! {
    Tag at "tags" as "tag" {
        pub name: String,
    }
}

resource! {
    /// انبار؛ موجودی محصولات به تفکیک انبار نگهداری میشه
    Warehouse at "warehouses" as "warehouse" {
        pub name: String,
        #[serde(default)]
        pub location: Option<String>,
        #[serde(default = "default_active")]
        pub is_active: bool,
    }
}
