//! # جدول ماه (Month Grid)
//!
//! ساخت صفحه‌ی یک ماه جلالی برای date picker: هفته‌های ۷ خانه‌ای
//! که از شنبه شروع میشن.

use serde::Serialize;

use super::{day_of_week, month_length, CalendarError, MAX_YEAR, MIN_YEAR};

/// یک خانه از جدول ماه
///
/// در JSON، خانه‌ی خالی `null` و روز یک عدد هست.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// خانه‌ی پرکننده قبل از روز اول یا بعد از روز آخر
    Empty,
    /// شماره‌ی روز ماه
    Day(u8),
}

impl Cell {
    #[must_use]
    pub fn day(&self) -> Option<u8> {
        match self {
            Self::Day(day) => Some(*day),
            Self::Empty => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// یک هفته، از شنبه تا جمعه
pub type Week = [Cell; 7];

/// صفحه‌ی کامل یک ماه جلالی
///
/// # Invariants
/// - تعداد خانه‌ها مضرب ۷ هست (فقط هفته‌ی کامل)
/// - دقیقا `month_length` خانه روز دارن، به ترتیب صعودی
/// - روز اول در ستون `day_of_week(year, month, 1)` قرار داره
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u8,
    pub weeks: Vec<Week>,
}

impl MonthGrid {
    /// همه‌ی خانه‌ها به ترتیب سطری
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.weeks.iter().flatten()
    }

    /// فقط روزها، به ترتیب
    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells().filter_map(Cell::day)
    }

    /// ستون روز اول ماه (۰ = شنبه)
    #[must_use]
    pub fn leading_blanks(&self) -> usize {
        self.cells().take_while(|cell| cell.is_empty()).count()
    }
}

/// ساخت جدول یک ماه جلالی
///
/// # Algorithm
/// 1. به تعداد `day_of_week(year, month, 1)` خانه‌ی خالی
/// 2. روزهای ۱ تا طول ماه
/// 3. پر کردن هفته‌ی آخر با خانه‌ی خالی تا ۷ خانه
///
/// # Errors
/// ماه یا سال نامعتبر
pub fn build_month_grid(year: i32, month: u8) -> Result<MonthGrid, CalendarError> {
    let length = month_length(year, month)?;
    let offset = usize::from(day_of_week(year, month, 1)?);

    let mut cells: Vec<Cell> = Vec::with_capacity(42);
    cells.extend(std::iter::repeat(Cell::Empty).take(offset));
    cells.extend((1..=length).map(Cell::Day));
    while cells.len() % 7 != 0 {
        cells.push(Cell::Empty);
    }

    let weeks = cells
        .chunks_exact(7)
        .map(|chunk| {
            let mut week = [Cell::Empty; 7];
            week.copy_from_slice(chunk);
            week
        })
        .collect();

    Ok(MonthGrid { year, month, weeks })
}

/// ماه بعد برای ورق زدن picker؛ بعد از آخرین ماه پشتیبانی‌شده `None`
#[must_use]
pub fn next_month(year: i32, month: u8) -> Option<(i32, u8)> {
    match month {
        1..=11 => Some((year, month + 1)),
        12 if year < MAX_YEAR => Some((year + 1, 1)),
        _ => None,
    }
}

/// ماه قبل؛ قبل از اولین ماه پشتیبانی‌شده `None`
#[must_use]
pub fn previous_month(year: i32, month: u8) -> Option<(i32, u8)> {
    match month {
        2..=12 => Some((year, month - 1)),
        1 if year > MIN_YEAR => Some((year - 1, 12)),
        _ => None,
    }
}
