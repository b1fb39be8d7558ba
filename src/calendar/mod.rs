//! # ماژول تقویم جلالی (Jalaali Calendar)
//!
//! تبدیل دوطرفه‌ی تاریخ میلادی و جلالی، ساخت جدول ماه برای date picker
//! و فرمت کردن تاریخ با ارقام فارسی.
//!
//! ## الگوریتم
//! تبدیل با حساب روزها از یک مبدا ثابت (Julian Day Number) انجام میشه.
//! سال‌های کبیسه از جدول «breaks» و چرخه‌ی ۳۳ ساله محاسبه میشن،
//! نه از قانون ساده‌ی ۴ ساله که برای تقویم جلالی غلطه.
//!
//! محدوده‌ی پشتیبانی‌شده: سال‌های جلالی [`MIN_YEAR`] تا [`MAX_YEAR`].
//!
//! ## مثال
//! ```rust
//! use admin_dashboard::calendar::{to_jalaali, to_gregorian};
//! use chrono::NaiveDate;
//!
//! let nowruz = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
//! let j = to_jalaali(nowruz).unwrap();
//! assert_eq!((j.year(), j.month(), j.day()), (1403, 1, 1));
//! assert_eq!(to_gregorian(1403, 1, 1).unwrap(), nowruz);
//! ```

mod format;
mod grid;

pub use format::*;
pub use grid::*;

use std::{fmt, str::FromStr};

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use thiserror::Error;

// =====================================
// Constants
// =====================================
/// سال‌هایی که چرخه‌ی کبیسه در اونها عوض میشه.
/// آخرین عنصر مرز بالای محدوده‌ی پشتیبانی‌شده هست (خودش شامل نمیشه).
const BREAKS: [i64; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// کوچک‌ترین سال جلالی قابل تبدیل
pub const MIN_YEAR: i32 = -61;

/// بزرگ‌ترین سال جلالی قابل تبدیل
///
/// سال 3177 هنوز در جدول breaks هست، ولی روزهای آخرش در سال میلادی
/// 3799 میفتن که تبدیل برگشتیش به سال 3178 نیاز داره.
pub const MAX_YEAR: i32 = 3176;

// =====================================
// Errors
// =====================================
/// خطاهای تقویم
///
/// ورودی خارج از محدوده هیچوقت به یه تاریخ غلط تبدیل نمیشه،
/// همیشه یکی از این خطاها برمیگرده.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// سال جلالی خارج از جدول breaks
    #[error("Jalaali year {0} is outside the supported range {MIN_YEAR}..={MAX_YEAR}")]
    YearOutOfRange(i32),

    /// تاریخ میلادی که معادل جلالیش خارج از محدوده‌ست
    #[error("Gregorian date {0} is outside the supported range")]
    DateOutOfRange(NaiveDate),

    #[error("Month {0} is not between 1 and 12")]
    InvalidMonth(u8),

    #[error("Day {day} does not exist in month {month} of year {year}")]
    InvalidDay { year: i32, month: u8, day: u8 },

    /// رشته‌ای که شکل «سال/ماه/روز» نداره
    #[error("Cannot parse '{0}' as a Jalaali date")]
    Parse(String),
}

// =====================================
// Jalaali Date
// =====================================
/// یک تاریخ معتبر در تقویم جلالی
///
/// فقط از طریق [`JalaaliDate::new`] یا تبدیل از میلادی ساخته میشه،
/// پس ماه و روز همیشه معتبرن.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct JalaaliDate {
    year: i32,
    month: u8,
    day: u8,
}

impl JalaaliDate {
    /// ساخت تاریخ با اعتبارسنجی کامل
    ///
    /// # Errors
    /// `YearOutOfRange`، `InvalidMonth` یا `InvalidDay`
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        let length = month_length(year, month)?;
        if day == 0 || day > length {
            return Err(CalendarError::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// تبدیل از تاریخ میلادی
    pub fn from_gregorian(date: NaiveDate) -> Result<Self, CalendarError> {
        to_jalaali(date)
    }

    /// امروز به وقت محلی
    #[must_use]
    pub fn today() -> Option<Self> {
        to_jalaali(Local::now().date_naive()).ok()
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(&self) -> u8 {
        self.month
    }

    #[must_use]
    pub fn day(&self) -> u8 {
        self.day
    }

    /// تبدیل به میلادی
    pub fn to_gregorian(&self) -> NaiveDate {
        // ساخت JalaaliDate اعتبارسنجی شده، پس j2d همیشه موفقه
        let jdn = j2d(self.year.into(), self.month.into(), self.day.into());
        gregorian_from_jdn(jdn).unwrap_or(NaiveDate::MIN)
    }

    /// روز هفته: ۰ = شنبه ... ۶ = جمعه
    #[must_use]
    pub fn weekday(&self) -> u8 {
        persian_weekday(self.to_gregorian())
    }

    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year).unwrap_or(false)
    }

    #[must_use]
    pub fn days_in_month(&self) -> u8 {
        month_length(self.year, self.month).unwrap_or(29)
    }

    #[must_use]
    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or_default()
    }
}

/// نمایش به شکل `1403/01/01` با ارقام لاتین
impl fmt::Display for JalaaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// پارس کردن `1403/1/1`، `1403-01-01` یا سال منفی مثل `-005/01/01`
impl FromStr for JalaaliDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = || CalendarError::Parse(s.to_string());

        let trimmed = s.trim();
        let (sign, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, trimmed),
        };

        let parts: Vec<&str> = body.split(['/', '-']).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(parse_error());
        };

        if year.starts_with(['-', '+']) {
            return Err(parse_error());
        }
        let year = sign * year.parse::<i32>().map_err(|_| parse_error())?;
        let month = month.parse::<u8>().map_err(|_| parse_error())?;
        let day = day.parse::<u8>().map_err(|_| parse_error())?;

        Self::new(year, month, day)
    }
}

// =====================================
// Public Operations
// =====================================
/// تبدیل تاریخ میلادی به جلالی
///
/// # Errors
/// `DateOutOfRange` اگه نتیجه خارج از [`MIN_YEAR`]..=[`MAX_YEAR`] باشه
pub fn to_jalaali(date: NaiveDate) -> Result<JalaaliDate, CalendarError> {
    let jdn = g2d(date.year().into(), date.month().into(), date.day().into());
    let (year, month, day) = d2j(jdn).map_err(|_| CalendarError::DateOutOfRange(date))?;

    if !(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&year) {
        return Err(CalendarError::DateOutOfRange(date));
    }

    // month و day از d2j همیشه در بازه‌ی u8 هستن
    Ok(JalaaliDate {
        year: year as i32,
        month: month as u8,
        day: day as u8,
    })
}

/// تبدیل تاریخ جلالی به میلادی
///
/// برخلاف الگوریتم مرجع، ماه و روز نامعتبر قبول نمیشن.
///
/// # Errors
/// `YearOutOfRange`، `InvalidMonth` یا `InvalidDay`
pub fn to_gregorian(year: i32, month: u8, day: u8) -> Result<NaiveDate, CalendarError> {
    Ok(JalaaliDate::new(year, month, day)?.to_gregorian())
}

/// آیا سال جلالی کبیسه‌ست؟ (اسفند ۳۰ روزه)
pub fn is_leap_year(year: i32) -> Result<bool, CalendarError> {
    check_year(year)?;
    Ok(jal_cal(year.into())?.leap == 0)
}

/// تعداد روزهای یک ماه جلالی: ۳۱ برای شش ماه اول، ۳۰ برای پنج ماه بعد،
/// و ۲۹ یا ۳۰ برای اسفند.
pub fn month_length(year: i32, month: u8) -> Result<u8, CalendarError> {
    match month {
        1..=6 => check_year(year).map(|()| 31),
        7..=11 => check_year(year).map(|()| 30),
        12 => Ok(if is_leap_year(year)? { 30 } else { 29 }),
        _ => Err(CalendarError::InvalidMonth(month)),
    }
}

/// روز هفته‌ی یک تاریخ جلالی، ۰ = شنبه ... ۶ = جمعه
pub fn day_of_week(year: i32, month: u8, day: u8) -> Result<u8, CalendarError> {
    Ok(JalaaliDate::new(year, month, day)?.weekday())
}

/// نگاشت روز هفته‌ی میلادی (۰ = یکشنبه) به هفته‌ی ایرانی (۰ = شنبه)
fn persian_weekday(date: NaiveDate) -> u8 {
    ((date.weekday().num_days_from_sunday() + 1) % 7) as u8
}

fn check_year(year: i32) -> Result<(), CalendarError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::YearOutOfRange(year))
    }
}

// =====================================
// Day-count Arithmetic
// =====================================
// همه‌ی تقسیم‌ها truncating هستن (مثل `/` و `%` روی اعداد صحیح Rust).

/// اطلاعات یک سال جلالی
struct YearInfo {
    /// سال‌های گذشته از آخرین کبیسه (۰ یعنی خود سال کبیسه‌ست)
    leap: i64,
    /// سال میلادی که اول فروردین در اون قرار داره
    gy: i64,
    /// روز مارس که اول فروردین بهش میفته
    march: i64,
}

fn jal_cal(jy: i64) -> Result<YearInfo, CalendarError> {
    let last = BREAKS[BREAKS.len() - 1];
    if jy < BREAKS[0] || jy >= last {
        return Err(CalendarError::YearOutOfRange(jy as i32));
    }

    let gy = jy + 621;
    let mut leap_j = -14;
    let mut jp = BREAKS[0];
    let mut jump = 0;

    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / 33 * 8 + jump % 33 / 4;
        jp = jm;
    }

    let mut n = jy - jp;

    // کبیسه‌های جلالی از ۶۲۱ میلادی تا اول سال jy
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    // کبیسه‌های میلادی تا سال gy
    let leap_g = gy / 4 - (gy / 100 + 1) * 3 / 4 - 150;
    let march = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Ok(YearInfo { leap, gy, march })
}

/// میلادی به Julian Day Number
fn g2d(gy: i64, gm: i64, gd: i64) -> i64 {
    let d = (gy + (gm - 8) / 6 + 100_100) * 1461 / 4 + (153 * ((gm + 9) % 12) + 2) / 5 + gd
        - 34_840_408;
    d - (gy + 100_100 + (gm - 8) / 6) / 100 * 3 / 4 + 752
}

/// Julian Day Number به میلادی
fn d2g(jdn: i64) -> (i64, i64, i64) {
    let mut j = 4 * jdn + 139_361_631;
    j += (4 * jdn + 183_187_720) / 146_097 * 3 / 4 * 4 - 3908;
    let i = j % 1461 / 4 * 5 + 308;
    let gd = i % 153 / 5 + 1;
    let gm = i / 153 % 12 + 1;
    let gy = j / 1461 - 100_100 + (8 - gm) / 6;
    (gy, gm, gd)
}

/// جلالی به Julian Day Number (ورودی باید معتبر باشه)
fn j2d(jy: i64, jm: i64, jd: i64) -> i64 {
    match jal_cal(jy) {
        Ok(info) => g2d(info.gy, 3, info.march) + (jm - 1) * 31 - jm / 7 * (jm - 7) + jd - 1,
        Err(_) => 0,
    }
}

/// Julian Day Number به جلالی
fn d2j(jdn: i64) -> Result<(i64, i64, i64), CalendarError> {
    let (gy, _, _) = d2g(jdn);
    let mut jy = gy - 621;
    let info = jal_cal(jy)?;
    let first_day = g2d(gy, 3, info.march);

    // روزهای گذشته از اول فروردین
    let mut k = jdn - first_day;
    if k >= 0 {
        if k <= 185 {
            return Ok((jy, 1 + k / 31, k % 31 + 1));
        }
        k -= 186;
    } else {
        // هنوز در سال جلالی قبلی هستیم
        jy -= 1;
        k += 179;
        if info.leap == 1 {
            k += 1;
        }
    }

    Ok((jy, 7 + k / 30, k % 30 + 1))
}

fn gregorian_from_jdn(jdn: i64) -> Option<NaiveDate> {
    let (gy, gm, gd) = d2g(jdn);
    NaiveDate::from_ymd_opt(i32::try_from(gy).ok()?, gm as u32, gd as u32)
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_known_conversions() {
        let cases = [
            (date(2024, 3, 20), (1403, 1, 1)),
            (date(2025, 3, 21), (1404, 1, 1)),
            (date(1979, 2, 11), (1357, 11, 22)),
            (date(2000, 1, 1), (1378, 10, 11)),
            (date(1970, 1, 1), (1348, 10, 11)),
            (date(2025, 3, 20), (1403, 12, 30)),
        ];

        for (gregorian, (y, m, d)) in cases {
            let j = to_jalaali(gregorian).unwrap();
            assert_eq!((j.year(), j.month(), j.day()), (y, m, d), "{gregorian}");
            assert_eq!(to_gregorian(y, m, d).unwrap(), gregorian);
        }
    }

    #[test]
    fn test_jdn_matches_chrono() {
        // JDN روز 0001-01-01 برابر 1721426 هست
        for day in [date(560, 3, 20), date(1582, 10, 15), date(2000, 2, 29), date(3000, 12, 31)] {
            let expected = i64::from(day.num_days_from_ce()) + 1_721_425;
            assert_eq!(g2d(day.year().into(), day.month().into(), day.day().into()), expected);
            assert_eq!(gregorian_from_jdn(expected), Some(day));
        }
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(1403).unwrap());
        assert!(is_leap_year(1399).unwrap());
        assert!(!is_leap_year(1402).unwrap());
        assert!(!is_leap_year(1404).unwrap());

        assert_eq!(month_length(1403, 12).unwrap(), 30);
        assert_eq!(month_length(1402, 12).unwrap(), 29);
        assert_eq!(month_length(1402, 6).unwrap(), 31);
        assert_eq!(month_length(1402, 7).unwrap(), 30);
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        assert_eq!(to_gregorian(1402, 13, 1), Err(CalendarError::InvalidMonth(13)));
        assert_eq!(to_gregorian(1402, 0, 1), Err(CalendarError::InvalidMonth(0)));
        assert_eq!(
            to_gregorian(1402, 12, 30),
            Err(CalendarError::InvalidDay { year: 1402, month: 12, day: 30 })
        );
        assert!(matches!(to_gregorian(1402, 7, 31), Err(CalendarError::InvalidDay { .. })));
        assert!(matches!(to_gregorian(1402, 1, 0), Err(CalendarError::InvalidDay { .. })));
        assert_eq!(to_gregorian(3178, 1, 1), Err(CalendarError::YearOutOfRange(3178)));
        assert_eq!(to_gregorian(3177, 1, 1), Err(CalendarError::YearOutOfRange(3177)));
        assert_eq!(is_leap_year(3177), Err(CalendarError::YearOutOfRange(3177)));
        assert_eq!(month_length(-62, 1), Err(CalendarError::YearOutOfRange(-62)));
    }

    #[test]
    fn test_range_ends_roundtrip() {
        let last_day = month_length(MAX_YEAR, 12).unwrap();
        for (y, m, d) in [(MAX_YEAR, 12, last_day), (MAX_YEAR, 1, 1), (MIN_YEAR, 1, 1), (MIN_YEAR, 12, 1)] {
            let gregorian = to_gregorian(y, m, d).unwrap();
            let back = to_jalaali(gregorian).unwrap();
            assert_eq!((back.year(), back.month(), back.day()), (y, m, d), "{gregorian}");
        }

        let after_last = to_gregorian(MAX_YEAR, 12, last_day).unwrap().succ_opt().unwrap();
        assert_eq!(to_jalaali(after_last), Err(CalendarError::DateOutOfRange(after_last)));
    }

    #[test]
    fn test_out_of_range_gregorian() {
        let too_early = date(100, 1, 1);
        assert_eq!(to_jalaali(too_early), Err(CalendarError::DateOutOfRange(too_early)));

        let too_late = date(4000, 1, 1);
        assert_eq!(to_jalaali(too_late), Err(CalendarError::DateOutOfRange(too_late)));
    }

    #[test]
    fn test_day_of_week() {
        // 2024-03-20 چهارشنبه بود
        assert_eq!(day_of_week(1403, 1, 1).unwrap(), 4);
        // 2024-03-23 شنبه
        assert_eq!(day_of_week(1403, 1, 4).unwrap(), 0);
        // 2024-03-22 جمعه
        assert_eq!(day_of_week(1403, 1, 3).unwrap(), 6);
    }

    #[test]
    fn test_display_and_parse() {
        let d = JalaaliDate::new(1403, 1, 9).unwrap();
        assert_eq!(d.to_string(), "1403/01/09");
        assert_eq!("1403/1/9".parse::<JalaaliDate>().unwrap(), d);
        assert_eq!("1403-01-09".parse::<JalaaliDate>().unwrap(), d);
        assert!(matches!("1403/01".parse::<JalaaliDate>(), Err(CalendarError::Parse(_))));
        assert!(matches!("abc/1/1".parse::<JalaaliDate>(), Err(CalendarError::Parse(_))));
        assert!(matches!("--5/1/1".parse::<JalaaliDate>(), Err(CalendarError::Parse(_))));

        let negative = JalaaliDate::new(-5, 1, 1).unwrap();
        assert_eq!(negative.to_string(), "-005/01/01");
        assert_eq!(negative.to_string().parse::<JalaaliDate>().unwrap(), negative);
        assert_eq!("-5-1-1".parse::<JalaaliDate>().unwrap(), negative);
        assert!(matches!(
            "1402/12/30".parse::<JalaaliDate>(),
            Err(CalendarError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_ordering() {
        let a = JalaaliDate::new(1402, 12, 29).unwrap();
        let b = JalaaliDate::new(1403, 1, 1).unwrap();
        assert!(a < b);
    }
}
