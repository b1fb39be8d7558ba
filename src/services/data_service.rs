//! # سرویس داده‌ی راه دور (Remote Data Service)
//!
//! wrapper تایپ‌شده روی بک‌اند REST. برای هر entity یه مجموعه endpoint
//! با فعل‌های معمول HTTP وجود داره:
//!
//! | عملیات | درخواست |
//! |--------|---------|
//! | `list` | `GET /{path}` |
//! | `get` | `GET /{path}/{id}` |
//! | `create` | `POST /{path}` |
//! | `update` | `PUT /{path}/{id}` |
//! | `patch_status` | `PATCH /{path}/{id}` |
//! | `delete` | `DELETE /{path}/{id}` |
//!
//! اگه توکن ورود ذخیره شده باشه، به صورت `Authorization: Bearer` فرستاده میشه.

use std::marker::PhantomData;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, instrument, warn};
use url::Url;

use super::{Preferences, Service};
use crate::{
    config::Config,
    error::{AppError, Result},
    models::{Product, Resource, StatusPatch},
};

/// کلاینت بک‌اند REST
#[derive(Debug, Clone)]
pub struct RemoteDataService {
    client: Client,
    base_url: Url,
    preferences: Preferences,
}

impl Service for RemoteDataService {}

/// بدنه‌ی خطای بک‌اند، اگه JSON باشه
#[derive(Debug, Deserialize)]
struct UpstreamError {
    #[serde(alias = "error")]
    message: String,
}

impl RemoteDataService {
    /// ساخت کلاینت با timeout و آدرس تنظیمات
    ///
    /// # Errors
    /// آدرس بک‌اند نامعتبر یا خطا در ساخت کلاینت HTTP
    pub fn new(config: &Config, preferences: Preferences) -> Result<Self> {
        let base_url = Url::parse(&config.api_base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "API base URL '{}' cannot have paths",
                config.api_base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            preferences,
        })
    }

    /// کلاینت یک نوع entity
    ///
    /// ```rust,ignore
    /// let brands = service.resource::<Brand>().list().await?;
    /// ```
    #[must_use]
    pub fn resource<R: Resource>(&self) -> ResourceClient<'_, R> {
        ResourceClient {
            service: self,
            _resource: PhantomData,
        }
    }

    /// همه‌ی محصولات، ورودی موتور فیلتر
    pub async fn products(&self) -> Result<Vec<Product>> {
        self.resource::<Product>().list().await
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// ساخت آدرس endpoint؛ شناسه به عنوان یک segment کامل escape میشه
    fn endpoint(&self, path: &str, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(path);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let builder = self.client.request(method, url);

        Ok(match self.preferences.auth_token().await? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|e| AppError::Upstream {
            status: None,
            message: e.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<UpstreamError>(&body)
            .map(|e| e.message)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("Request failed").to_string()
                } else {
                    body
                }
            });

        warn!(status = status.as_u16(), %message, "Backend request failed");
        Err(AppError::from_upstream(status, message))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        Ok(response.json::<T>().await?)
    }
}

// =====================================
// Per-Resource Client
// =====================================
/// عملیات CRUD روی یک نوع entity
///
/// # مفاهیم:
/// - `PhantomData<R>`: نوع entity فقط در سطح type system هست
/// - lifetime `'a`: کلاینت از سرویس قرض گرفته میشه
pub struct ResourceClient<'a, R> {
    service: &'a RemoteDataService,
    _resource: PhantomData<R>,
}

impl<R: Resource> ResourceClient<'_, R> {
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn list(&self) -> Result<Vec<R>> {
        let url = self.service.endpoint(R::PATH, None);
        let request = self.service.request(Method::GET, url).await?;
        let items: Vec<R> = self.service.send_json(request).await?;

        debug!(count = items.len(), "Fetched list");
        Ok(items)
    }

    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn get(&self, id: &str) -> Result<R> {
        let url = self.service.endpoint(R::PATH, Some(id));
        let request = self.service.request(Method::GET, url).await?;

        self.service
            .send_json(request)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::resource_not_found(R::NAME, id),
                other => other,
            })
    }

    #[instrument(skip(self, body), fields(resource = R::NAME))]
    pub async fn create(&self, body: &R) -> Result<R> {
        let url = self.service.endpoint(R::PATH, None);
        let request = self.service.request(Method::POST, url).await?.json(body);
        self.service.send_json(request).await
    }

    #[instrument(skip(self, body), fields(resource = R::NAME))]
    pub async fn update(&self, id: &str, body: &R) -> Result<R> {
        let url = self.service.endpoint(R::PATH, Some(id));
        let request = self.service.request(Method::PUT, url).await?.json(body);
        self.service.send_json(request).await
    }

    /// فعال/غیرفعال کردن
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn patch_status(&self, id: &str, patch: &StatusPatch) -> Result<R> {
        let url = self.service.endpoint(R::PATH, Some(id));
        let request = self.service.request(Method::PATCH, url).await?.json(patch);
        self.service.send_json(request).await
    }

    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let url = self.service.endpoint(R::PATH, Some(id));
        let request = self.service.request(Method::DELETE, url).await?;
        self.service.send(request).await?;
        Ok(())
    }
}
