//! توابع کوچک مشترک: اعتبارسنجی رنگ hex، خلاصه‌ی متن و
//! پنهان کردن توکن در لاگ.

use once_cell::sync::Lazy;
use regex::Regex;

// =====================================
// Constants
// =====================================
/// طول پیش‌فرض خلاصه‌ی توضیحات محصول در لیست
pub const DEFAULT_PREVIEW_LENGTH: usize = 120;

// =====================================
// Lazy Statics (Regex patterns)
// =====================================
/// رنگ hex به شکل `#rrggbb` یا `#rgb`
///
/// # مفاهیم:
/// - `Lazy`: مقداردهی اولیه در اولین استفاده
/// - این بهینه‌تر از ساخت Regex هر بار هست
pub static VALID_HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})$").expect("Invalid regex pattern")
});

// =====================================
// Validation Functions
// =====================================
/// اعتبارسنجی رنگ hex
///
/// ```rust
/// use admin_dashboard::utils::is_valid_hex_color;
///
/// assert!(is_valid_hex_color("#1976d2"));
/// assert!(!is_valid_hex_color("1976d2")); // بدون #
/// ```
#[must_use]
pub fn is_valid_hex_color(color: &str) -> bool {
    VALID_HEX_COLOR.is_match(color)
}

// =====================================
// String Utilities
// =====================================
/// کوتاه کردن متن برای پیش‌نمایش (بر اساس کاراکتر، نه بایت)
///
/// # مثال
/// ```rust
/// use admin_dashboard::utils::truncate;
///
/// let text = "Hello, World!";
/// assert_eq!(truncate(text, Some(8)), "Hello...");
/// ```
#[must_use]
pub fn truncate(text: &str, max_len: Option<usize>) -> String {
    let max = max_len.unwrap_or(DEFAULT_PREVIEW_LENGTH);

    if text.chars().count() <= max {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", truncated.trim_end())
}

// =====================================
// Security Utilities
// =====================================
/// Mask کردن بخشی از متن (برای لاگ کردن توکن)
///
/// # مثال
/// ```rust
/// use admin_dashboard::utils::mask_string;
///
/// assert_eq!(mask_string("secret123", 3), "sec***");
/// ```
#[must_use]
pub fn mask_string(text: &str, visible_chars: usize) -> String {
    let len = text.chars().count();
    if len <= visible_chars {
        return "*".repeat(len);
    }

    let visible: String = text.chars().take(visible_chars).collect();
    format!("{}***", visible)
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_hex_color() {
        assert!(is_valid_hex_color("#1976d2"));
        assert!(is_valid_hex_color("#FFF"));
        assert!(!is_valid_hex_color("#12345"));
        assert!(!is_valid_hex_color("#gggggg"));
        assert!(!is_valid_hex_color("red"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", Some(10)), "short");
        assert_eq!(truncate("this is a long text", Some(10)), "this is...");
        // متن فارسی نباید وسط کاراکتر شکسته بشه
        assert_eq!(truncate("سلام دنیای زیبا", Some(8)), "سلام...");
    }

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("secret123", 3), "sec***");
        assert_eq!(mask_string("ab", 5), "**");
    }
}
