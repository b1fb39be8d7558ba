//! # فرمت تاریخ و ارقام فارسی
//!
//! فرمت‌کننده‌ها هیچوقت خطا نمیدن: ورودی خالی یا نامعتبر
//! رشته‌ی خالی برمیگردونه تا UI چیزی نمایش نده.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::{to_jalaali, JalaaliDate};

/// ارقام فارسی، به ترتیب ۰ تا ۹
const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// نام ماه‌های جلالی
pub const MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// نام روزهای هفته، از شنبه
pub const WEEKDAY_NAMES: [&str; 7] = [
    "شنبه",
    "یکشنبه",
    "دوشنبه",
    "سه‌شنبه",
    "چهارشنبه",
    "پنجشنبه",
    "جمعه",
];

/// فرمت‌های date-time بدون timezone که قبول میکنیم
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// نام ماه (۱ تا ۱۲)
#[must_use]
pub fn month_name(month: u8) -> Option<&'static str> {
    MONTH_NAMES.get(usize::from(month).checked_sub(1)?).copied()
}

/// نام روز هفته (۰ = شنبه)
#[must_use]
pub fn weekday_name(weekday: u8) -> Option<&'static str> {
    WEEKDAY_NAMES.get(usize::from(weekday)).copied()
}

/// تبدیل ارقام لاتین به فارسی، بقیه‌ی کاراکترها دست نمیخورن
///
/// ```rust
/// use admin_dashboard::calendar::to_persian_digits;
///
/// assert_eq!(to_persian_digits("1403/01/09"), "۱۴۰۳/۰۱/۰۹");
/// ```
#[must_use]
pub fn to_persian_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(digit) => PERSIAN_DIGITS[digit as usize],
            None => c,
        })
        .collect()
}

/// پارس کردن تاریخ ورودی از API
///
/// `YYYY-MM-DD`، RFC 3339 و date-time بدون timezone. برای RFC 3339
/// تاریخ در همون offset خود رشته حساب میشه.
#[must_use]
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Some(datetime.date_naive());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|datetime| datetime.date())
}

/// `{روز} {نام ماه} {سال}` با ارقام فارسی، مثلا «۹ فروردین ۱۴۰۳»
#[must_use]
pub fn format_jalaali(date: &JalaaliDate) -> String {
    to_persian_digits(&format!(
        "{} {} {}",
        date.day(),
        date.month_name(),
        date.year()
    ))
}

/// `{سال}/{ماه}/{روز}` با صفر پیشرو و ارقام فارسی، مثلا «۱۴۰۳/۰۱/۰۹»
#[must_use]
pub fn format_jalaali_numeric(date: &JalaaliDate) -> String {
    to_persian_digits(&date.to_string())
}

/// فرمت یک تاریخ میلادی تایپ‌شده؛ خارج از محدوده → رشته‌ی خالی
#[must_use]
pub fn format_naive_date(date: NaiveDate) -> String {
    to_jalaali(date)
        .map(|j| format_jalaali(&j))
        .unwrap_or_default()
}

#[must_use]
pub fn format_naive_date_numeric(date: NaiveDate) -> String {
    to_jalaali(date)
        .map(|j| format_jalaali_numeric(&j))
        .unwrap_or_default()
}

/// فرمت تاریخ ورودی (مثلا فیلد `created_at` از API)
///
/// `None` یا رشته‌ی نامعتبر → `""`
#[must_use]
pub fn format_date(input: Option<&str>) -> String {
    input
        .and_then(parse_date_input)
        .map(format_naive_date)
        .unwrap_or_default()
}

/// مثل [`format_date`] ولی به شکل عددی
#[must_use]
pub fn format_date_numeric(input: Option<&str>) -> String {
    input
        .and_then(parse_date_input)
        .map(format_naive_date_numeric)
        .unwrap_or_default()
}
