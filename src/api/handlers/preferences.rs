//! # Preference & Session Handlers
//!
//! تم، رنگ accent و توکن ورود

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::{
    api::{ValidatedJson, ValidatedQuery},
    error::Result,
    models::{
        AccentRequest, ApiResponse, EmptyResponse, PaletteQuery, PreferencesResponse,
        SessionRequest, ThemeRequest,
    },
    services::AppState,
    theme::Palette,
    utils,
};

/// تنظیمات فعلی
///
/// # Endpoint
/// `GET /api/preferences`
pub async fn get_preferences(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PreferencesResponse>>> {
    let snapshot = state.preferences.snapshot().await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

/// تغییر حالت تم
///
/// # Endpoint
/// `PUT /api/preferences/theme`
///
/// # Request Body
/// ```json
/// { "mode": "dark" }
/// ```
pub async fn set_theme(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ThemeRequest>,
) -> Result<Json<ApiResponse<PreferencesResponse>>> {
    state.preferences.set_theme(request.mode).await?;

    let snapshot = state.preferences.snapshot().await?;
    Ok(Json(ApiResponse::success(snapshot).with_message("Theme updated")))
}

/// تغییر رنگ accent
///
/// # Endpoint
/// `PUT /api/preferences/accent`
///
/// # Request Body
/// ```json
/// { "color": "#ff5722" }
/// ```
pub async fn set_accent(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AccentRequest>,
) -> Result<Json<ApiResponse<PreferencesResponse>>> {
    state.preferences.set_accent_color(&request.color).await?;

    let snapshot = state.preferences.snapshot().await?;
    Ok(Json(ApiResponse::success(snapshot).with_message("Accent color updated")))
}

/// پالت رنگ برای تم فعلی یا مقادیر داده‌شده
///
/// # Endpoint
/// `GET /api/theme/palette?mode=dark&accent=%23ff5722`
pub async fn palette(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PaletteQuery>,
) -> Result<Json<ApiResponse<Palette>>> {
    let mode = match query.mode {
        Some(mode) => mode,
        None => state.preferences.theme().await?,
    };
    let accent = match query.accent {
        Some(accent) => accent,
        None => state.preferences.accent_color().await?,
    };

    let palette = Palette::derive(&accent, mode)?;
    Ok(Json(ApiResponse::success(palette)))
}

/// ذخیره‌ی توکن بعد از ورود
///
/// # Endpoint
/// `PUT /api/session`
pub async fn start_session(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SessionRequest>,
) -> Result<(StatusCode, Json<EmptyResponse>)> {
    state.preferences.set_auth_token(&request.token).await?;
    info!(token = %utils::mask_string(request.token.trim(), 4), "Session started");

    Ok((StatusCode::OK, Json(EmptyResponse::ok("Session stored"))))
}

/// خروج
///
/// # Endpoint
/// `DELETE /api/session`
pub async fn end_session(State(state): State<AppState>) -> Result<Json<EmptyResponse>> {
    let removed = state.preferences.clear_auth_token().await?;

    let message = if removed {
        "Session cleared"
    } else {
        "No active session"
    };
    Ok(Json(EmptyResponse::ok(message)))
}
