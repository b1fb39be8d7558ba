//! # Calendar Handlers
//!
//! تبدیل تاریخ و جدول ماه برای date picker

use axum::{extract::Path, Json};

use crate::{
    api::ValidatedQuery,
    calendar::{self, JalaaliDate},
    error::{AppError, Result},
    models::{ApiResponse, ConvertQuery, GregorianQuery, JalaaliDateResponse, MonthGridResponse},
};

/// جدول یک ماه جلالی
///
/// # Endpoint
/// `GET /api/calendar/:year/:month`
///
/// # Response
/// ```json
/// {
///   "success": true,
///   "data": {
///     "year": 1403, "month": 1, "month_name": "فروردین",
///     "weeks": [[null, null, null, null, 1, 2, 3], ...]
///   }
/// }
/// ```
pub async fn month_grid(
    Path((year, month)): Path<(i32, u8)>,
) -> Result<Json<ApiResponse<MonthGridResponse>>> {
    let grid = calendar::build_month_grid(year, month)?;
    Ok(Json(ApiResponse::success(grid.into())))
}

/// میلادی به جلالی
///
/// # Endpoint
/// `GET /api/calendar/to-jalaali?date=2024-03-20`
///
/// `date` میتونه `YYYY-MM-DD` یا RFC 3339 باشه.
pub async fn to_jalaali(
    ValidatedQuery(query): ValidatedQuery<ConvertQuery>,
) -> Result<Json<ApiResponse<JalaaliDateResponse>>> {
    let date = calendar::parse_date_input(&query.date)
        .ok_or_else(|| AppError::BadRequest(format!("Cannot parse date '{}'", query.date)))?;

    let jalaali = calendar::to_jalaali(date)?;
    Ok(Json(ApiResponse::success(jalaali.into())))
}

/// جلالی به میلادی
///
/// # Endpoint
/// `GET /api/calendar/to-gregorian?year=1403&month=1&day=1`
pub async fn to_gregorian(
    ValidatedQuery(query): ValidatedQuery<GregorianQuery>,
) -> Result<Json<ApiResponse<JalaaliDateResponse>>> {
    let date = JalaaliDate::new(query.year, query.month, query.day)?;
    Ok(Json(ApiResponse::success(date.into())))
}

/// تاریخ امروز
///
/// # Endpoint
/// `GET /api/calendar/today`
pub async fn today() -> Result<Json<ApiResponse<JalaaliDateResponse>>> {
    let date = JalaaliDate::today()
        .ok_or_else(|| AppError::Internal("System date is outside the calendar range".into()))?;

    Ok(Json(ApiResponse::success(date.into())))
}
