//! # Health Check Handler
//!
//! برای بررسی سلامت سرویس

use axum::{extract::State, Json};
use tracing::warn;

use crate::{error::Result, models::HealthResponse, services::AppState};

// =====================================
// Health Check
// =====================================
/// بررسی سلامت سرویس
///
/// بک‌اند REST اینجا چک نمیشه؛ در دسترس نبودنش سرویس ما رو
/// unhealthy نمیکنه.
///
/// # Endpoint
/// `GET /health`
///
/// # Response
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": true,
///   "uptime_seconds": 42
/// }
/// ```
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let db_ok = match state.database.health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Preference database health check failed");
            false
        }
    };

    let uptime = state.started_at.elapsed().as_secs();
    Ok(Json(HealthResponse::healthy(db_ok).with_uptime(uptime)))
}
