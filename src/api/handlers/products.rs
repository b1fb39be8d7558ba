//! # Product Handlers
//!
//! لیست محصولات با فیلتر، مرتب‌سازی و صفحه‌بندی

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{debug, instrument};

use crate::{
    api::{RequestId, ValidatedQuery},
    error::Result,
    models::{
        ApiResponse, EffectiveValues, PaginatedResult, Product, ProductListResponse, ProductQuery,
        ProductView,
    },
    services::{
        product_filter::{CatalogFacets, ProductFilter},
        AppState,
    },
};

// =====================================
// List Products
// =====================================
/// لیست محصولات
///
/// # Endpoint
/// `GET /api/products?search=&category=&brand=&min_price=&max_price=&stock=&sort=&direction=&page=&per_page=`
///
/// محصولات هر بار از بک‌اند گرفته میشن و قیمت/موجودی در تاریخ امروز
/// محاسبه میشه؛ facets همیشه از کل لیست (قبل از فیلتر) ساخته میشن.
#[instrument(skip_all, fields(request_id = %request_id.0))]
pub async fn list_products(
    State(state): State<AppState>,
    request_id: RequestId,
    ValidatedQuery(query): ValidatedQuery<ProductQuery>,
) -> Result<Json<ApiResponse<ProductListResponse>>> {
    let products = state.data_service.products().await?;
    let values = EffectiveValues::today();

    let facets = CatalogFacets::collect(&products, &values);
    let filter = ProductFilter::with_criteria(
        query.criteria(facets.max_price),
        query.sort_criteria(),
        facets.max_price,
    );

    let visible = filter.apply(&products, &values);
    debug!(total = products.len(), visible = visible.len(), "Products filtered");

    let page = PaginatedResult::from_items(visible, &query.pagination())
        .map(|product| ProductView::from_product(product, &values));

    Ok(Json(ApiResponse::success(ProductListResponse {
        items: page.data,
        facets,
        has_active_filters: filter.has_active_filters(),
        pagination: page.pagination,
    })))
}

// =====================================
// Get Product
// =====================================
/// یک محصول با مقادیر محاسبه‌شده
///
/// # Endpoint
/// `GET /api/products/:id`
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProductView>>> {
    let product = state.data_service.resource::<Product>().get(&id).await?;
    let view = ProductView::from_product(&product, &EffectiveValues::today());

    Ok(Json(ApiResponse::success(view)))
}
