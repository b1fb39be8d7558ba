//! # Extractor‌ها
//!
//! JSON و query بعد از parse شدن validate میشن؛ خطای parse به 400 و
//! خطای validation به 422 میرسه.

use axum::{
    async_trait,
    body::Body,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query,
    },
    http::{request::Parts, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

// =====================================
// Request ID Extractor
// =====================================
/// استخراج یا تولید Request ID
///
/// middleware `request_id` قبل از handler این header رو میذاره؛
/// اگه نبود یه شناسه‌ی جدید ساخته میشه.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    /// Header name برای request ID
    pub const HEADER_NAME: &'static str = "X-Request-Id";
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequestId {
    type Rejection = std::convert::Infallible; // هیچوقت fail نمیکنه

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .headers
            .get(Self::HEADER_NAME)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
            .unwrap_or_else(|| nanoid::nanoid!(12));

        Ok(RequestId(request_id))
    }
}

// =====================================
// JSON with Validation
// =====================================
/// استخراج JSON با اعتبارسنجی خودکار
///
/// # استفاده:
/// ```rust,ignore
/// async fn handler(ValidatedJson(data): ValidatedJson<AccentRequest>) -> ... {
///     // data حتما valid هست
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        // اول JSON رو parse کن
        let Json(data): Json<T> = Json::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| AppError::BadRequest(format!("Invalid JSON: {}", e)))?;

        // بعد validate کن
        data.validate()?;

        Ok(ValidatedJson(data))
    }
}

// =====================================
// Query with Validation
// =====================================
/// مثل [`ValidatedJson`] برای query string
///
/// # استفاده:
/// ```rust,ignore
/// async fn handler(ValidatedQuery(query): ValidatedQuery<ProductQuery>) -> ... {}
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data): Query<T> = Query::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| {
                AppError::BadRequest(format!("Invalid query string: {}", e))
            })?;

        data.validate()?;

        Ok(ValidatedQuery(data))
    }
}
