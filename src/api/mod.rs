//! # لایه API
//!
//! ## مسیرها:
//! - `GET /health` - Health check
//! - `GET /api/products` - لیست فیلترشده‌ی محصولات
//! - `GET /api/products/:id` - یک محصول
//! - `GET /api/calendar/today` - تاریخ امروز
//! - `GET /api/calendar/:year/:month` - جدول ماه جلالی
//! - `GET /api/calendar/to-jalaali?date=` - میلادی به جلالی
//! - `GET /api/calendar/to-gregorian?year=&month=&day=` - جلالی به میلادی
//! - `GET /api/preferences` - تنظیمات کاربر
//! - `PUT /api/preferences/theme` - حالت تم
//! - `PUT /api/preferences/accent` - رنگ accent
//! - `GET /api/theme/palette` - پالت رنگ
//! - `PUT /api/session` / `DELETE /api/session` - ورود و خروج

mod extractors;
mod handlers;
mod middleware;

pub use extractors::*;
pub use handlers::*;
pub use middleware::*;

use std::time::Duration;

use axum::{
    middleware as axum_middleware,
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, database::Database, error::Result, services::AppState};

/// زمان اضافه‌ی پردازش، بالای timeout درخواست به بک‌اند
const HANDLER_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

// =====================================
// Router Builder
// =====================================
/// ساخت Router اصلی برنامه
///
/// # Errors
/// آدرس بک‌اند نامعتبر
pub fn create_router(db: Database, config: Config) -> Result<Router> {
    let state = AppState::new(db, config)?;
    Ok(router(state))
}

/// ساخت Router از یه state آماده (در تست‌ها هم استفاده میشه)
pub fn router(state: AppState) -> Router {
    let timeout = state.config.request_timeout() + HANDLER_TIMEOUT_MARGIN;

    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(handlers::health::health_check))
        .layer(
            ServiceBuilder::new()
                // ترتیب: اولین layer بیرونی‌ترین هست
                .layer(axum_middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(request_timing))
                .layer(TimeoutLayer::new(timeout))
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(axum_middleware::from_fn(security_headers)),
        )
        .with_state(state)
}

/// Route‌های API
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/calendar", calendar_routes())
        .route(
            "/preferences",
            get(handlers::preferences::get_preferences),
        )
        .route("/preferences/theme", put(handlers::preferences::set_theme))
        .route("/preferences/accent", put(handlers::preferences::set_accent))
        .route("/theme/palette", get(handlers::preferences::palette))
        .route(
            "/session",
            put(handlers::preferences::start_session).delete(handlers::preferences::end_session),
        )
}

/// Route‌های محصولات
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::products::list_products))
        .route("/:id", get(handlers::products::get_product))
}

/// Route‌های تقویم
fn calendar_routes() -> Router<AppState> {
    Router::new()
        .route("/today", get(handlers::calendar::today))
        .route("/to-jalaali", get(handlers::calendar::to_jalaali))
        .route("/to-gregorian", get(handlers::calendar::to_gregorian))
        .route("/:year/:month", get(handlers::calendar::month_grid))
}
