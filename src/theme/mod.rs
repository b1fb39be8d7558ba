//! # ماژول تم (Theme)
//!
//! از رنگ اصلی (accent) که کاربر انتخاب کرده، با محاسبات HSL
//! یه پالت کامل برای حالت روشن و تاریک ساخته میشه.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils;

/// رنگ پیش‌فرض accent
pub const DEFAULT_ACCENT: &str = "#1976d2";

/// میزان روشن/تیره کردن برای نسخه‌های light و dark رنگ اصلی
const SHADE_STEP: f64 = 15.0;

/// بالاتر از این lightness، متن روی رنگ اصلی سیاه میشه
const CONTRAST_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("Invalid hex color '{0}'")]
    InvalidHex(String),
}

/// حالت نمایش
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// پارس کردن مقدار ذخیره‌شده؛ مقدار ناشناخته → `None`
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

// =====================================
// HSL Color
// =====================================
/// رنگ در فضای HSL
///
/// `h` بین ۰ و ۳۶۰، `s` و `l` درصد بین ۰ و ۱۰۰.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    /// پارس کردن `#rrggbb` یا `#rgb`
    ///
    /// # Errors
    /// `ThemeError::InvalidHex` برای هر فرمت دیگه
    pub fn from_hex(hex: &str) -> Result<Self, ThemeError> {
        let (r, g, b) = parse_hex(hex)?;
        Ok(Self::from_rgb(r, g, b))
    }

    #[must_use]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = f64::from(r) / 255.0;
        let g = f64::from(g) / 255.0;
        let b = f64::from(b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;

        if delta == 0.0 {
            return Self::new(0.0, 0.0, l * 100.0);
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        Self::new(h, s * 100.0, l * 100.0)
    }

    #[must_use]
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let s = self.s / 100.0;
        let l = self.l / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h_prime = self.h / 60.0;
        let x = c * (1.0 - (h_prime.rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h_prime as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (channel(r), channel(g), channel(b))
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// فرمت CSS، مثلا `hsl(210 79% 46%)`
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "hsl({} {}% {}%)",
            self.h.round(),
            self.s.round(),
            self.l.round()
        )
    }

    #[must_use]
    pub fn lighten(&self, amount: f64) -> Self {
        Self::new(self.h, self.s, self.l + amount)
    }

    #[must_use]
    pub fn darken(&self, amount: f64) -> Self {
        Self::new(self.h, self.s, self.l - amount)
    }

    #[must_use]
    pub fn with_lightness(&self, l: f64) -> Self {
        Self::new(self.h, self.s, l)
    }

    #[must_use]
    pub fn with_saturation(&self, s: f64) -> Self {
        Self::new(self.h, s, self.l)
    }
}

/// یکدست کردن رنگ hex به شکل `#rrggbb` با حروف کوچک
///
/// ```rust
/// use admin_dashboard::theme::normalize_hex;
///
/// assert_eq!(normalize_hex("#F0A").unwrap(), "#ff00aa");
/// ```
///
/// # Errors
/// `ThemeError::InvalidHex`
pub fn normalize_hex(hex: &str) -> Result<String, ThemeError> {
    let (r, g, b) = parse_hex(hex.trim())?;
    Ok(format!("#{:02x}{:02x}{:02x}", r, g, b))
}

fn parse_hex(hex: &str) -> Result<(u8, u8, u8), ThemeError> {
    let invalid = || ThemeError::InvalidHex(hex.to_string());

    if !utils::is_valid_hex_color(hex) {
        return Err(invalid());
    }

    let digits = &hex[1..];
    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&expanded[range], 16).map_err(|_| invalid())
    };

    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

// =====================================
// Palette
// =====================================
/// پالت مشتق‌شده از رنگ accent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    pub mode: ThemeMode,
    pub main: String,
    pub light: String,
    pub dark: String,
    pub contrast_text: String,
    pub background: String,
    pub surface: String,
    pub text: String,
}

impl Palette {
    /// ساخت پالت از رنگ accent
    ///
    /// رنگ‌های پس‌زمینه و متن همرنگ accent هستن ولی با اشباع کم،
    /// تا کل رابط کاربری یه ته‌رنگ یکدست داشته باشه.
    ///
    /// # Errors
    /// رنگ hex نامعتبر
    pub fn derive(accent: &str, mode: ThemeMode) -> Result<Self, ThemeError> {
        let base = Hsl::from_hex(accent)?;
        let neutral = base.with_saturation(base.s.min(20.0));

        let contrast_text = if base.l > CONTRAST_THRESHOLD {
            "#000000"
        } else {
            "#ffffff"
        };

        let (background, surface, text) = match mode {
            ThemeMode::Light => (
                neutral.with_lightness(98.0),
                neutral.with_lightness(100.0),
                neutral.with_lightness(12.0),
            ),
            ThemeMode::Dark => (
                neutral.with_lightness(8.0),
                neutral.with_lightness(14.0),
                neutral.with_lightness(92.0),
            ),
        };

        Ok(Self {
            mode,
            main: base.to_hex(),
            light: base.lighten(SHADE_STEP).to_hex(),
            dark: base.darken(SHADE_STEP).to_hex(),
            contrast_text: contrast_text.to_string(),
            background: background.to_hex(),
            surface: surface.to_hex(),
            text: text.to_hex(),
        })
    }

    /// متغیرهای CSS برای تزریق در `:root`
    #[must_use]
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--color-primary", self.main.clone()),
            ("--color-primary-light", self.light.clone()),
            ("--color-primary-dark", self.dark.clone()),
            ("--color-primary-contrast", self.contrast_text.clone()),
            ("--color-background", self.background.clone()),
            ("--color-surface", self.surface.clone()),
            ("--color-text", self.text.clone()),
        ]
    }
}
