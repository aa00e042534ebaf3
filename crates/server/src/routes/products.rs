use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use common::types::ApiResponse;
use serde::Deserialize;
use service::product::domain::{AddProductRequest, ProductDto, UpdateProductRequest};
use tracing::info;
use uuid::Uuid;

use crate::{errors::JsonApiError, state::ServerState};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/all", get(list))
        .route("/add", post(add))
        .route("/id/:id", get(get_by_id))
        .route("/:id/update", put(update))
        .route("/:id", delete(remove))
        .route("/brand", get(by_brand))
        .route("/category/:category", get(by_category))
        .route("/name/:name", get(by_name))
        .route("/category-and-brand", get(by_category_and_brand))
        .route("/brand-and-name", get(by_brand_and_name))
        .route("/count", get(count))
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BrandQuery { pub brand: String }

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryBrandQuery {
    pub category: String,
    #[serde(rename = "brandName")]
    pub brand_name: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BrandNameQuery {
    #[serde(rename = "brandName")]
    pub brand_name: String,
    #[serde(rename = "productName")]
    pub product_name: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CountQuery { pub brand: String, pub name: String }

/// Filter endpoints report an empty match as 404.
fn found(products: Vec<ProductDto>) -> Result<Json<ApiResponse<Vec<ProductDto>>>, JsonApiError> {
    if products.is_empty() {
        return Err(JsonApiError::not_found("no products found"));
    }
    Ok(Json(ApiResponse::new("success", products)))
}

#[utoipa::path(
    get, path = "/api/v1/product/all", tag = "product",
    responses((status = 200, description = "All products, possibly empty", body = crate::openapi::ProductListEnvelope))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<ApiResponse<Vec<ProductDto>>>, JsonApiError> {
    let all = state.products.list().await?;
    Ok(Json(ApiResponse::new("success", all)))
}

#[utoipa::path(
    post, path = "/api/v1/product/add", tag = "product",
    request_body = crate::openapi::ProductRequestDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ProductEnvelope),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn add(State(state): State<ServerState>, Json(input): Json<AddProductRequest>) -> Result<Json<ApiResponse<ProductDto>>, JsonApiError> {
    info!(name = %input.name, brand = %input.brand, category = %input.category.name, "product_add_request");
    let created = state.products.add(input).await?;
    Ok(Json(ApiResponse::new("Add product success!", created)))
}

#[utoipa::path(
    get, path = "/api/v1/product/id/{id}", tag = "product",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::ProductEnvelope),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<ApiResponse<ProductDto>>, JsonApiError> {
    let found = state.products.get(id).await?;
    Ok(Json(ApiResponse::new("success", found)))
}

#[utoipa::path(
    put, path = "/api/v1/product/{id}/update", tag = "product",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = crate::openapi::ProductRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductEnvelope),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(State(state): State<ServerState>, Path(id): Path<Uuid>, Json(input): Json<UpdateProductRequest>) -> Result<Json<ApiResponse<ProductDto>>, JsonApiError> {
    let updated = state.products.update(id, input).await?;
    Ok(Json(ApiResponse::new("Update product success!", updated)))
}

#[utoipa::path(
    delete, path = "/api/v1/product/{id}", tag = "product",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted together with its images"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn remove(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<ApiResponse<()>>, JsonApiError> {
    state.products.delete(id).await?;
    Ok(Json(ApiResponse::message_only("Delete product success!")))
}

#[utoipa::path(
    get, path = "/api/v1/product/brand", tag = "product",
    params(BrandQuery),
    responses(
        (status = 200, description = "Matches", body = crate::openapi::ProductListEnvelope),
        (status = 404, description = "No match")
    )
)]
pub async fn by_brand(State(state): State<ServerState>, Query(q): Query<BrandQuery>) -> Result<Json<ApiResponse<Vec<ProductDto>>>, JsonApiError> {
    found(state.products.by_brand(&q.brand).await?)
}

#[utoipa::path(
    get, path = "/api/v1/product/category/{category}", tag = "product",
    params(("category" = String, Path, description = "Exact category name")),
    responses(
        (status = 200, description = "Matches", body = crate::openapi::ProductListEnvelope),
        (status = 404, description = "No match")
    )
)]
pub async fn by_category(State(state): State<ServerState>, Path(category): Path<String>) -> Result<Json<ApiResponse<Vec<ProductDto>>>, JsonApiError> {
    found(state.products.by_category(&category).await?)
}

#[utoipa::path(
    get, path = "/api/v1/product/name/{name}", tag = "product",
    params(("name" = String, Path, description = "Exact product name")),
    responses(
        (status = 200, description = "Matches", body = crate::openapi::ProductListEnvelope),
        (status = 404, description = "No match")
    )
)]
pub async fn by_name(State(state): State<ServerState>, Path(name): Path<String>) -> Result<Json<ApiResponse<Vec<ProductDto>>>, JsonApiError> {
    found(state.products.by_name(&name).await?)
}

#[utoipa::path(
    get, path = "/api/v1/product/category-and-brand", tag = "product",
    params(CategoryBrandQuery),
    responses(
        (status = 200, description = "Matches", body = crate::openapi::ProductListEnvelope),
        (status = 404, description = "No match")
    )
)]
pub async fn by_category_and_brand(State(state): State<ServerState>, Query(q): Query<CategoryBrandQuery>) -> Result<Json<ApiResponse<Vec<ProductDto>>>, JsonApiError> {
    found(state.products.by_category_and_brand(&q.category, &q.brand_name).await?)
}

#[utoipa::path(
    get, path = "/api/v1/product/brand-and-name", tag = "product",
    params(BrandNameQuery),
    responses(
        (status = 200, description = "Matches", body = crate::openapi::ProductListEnvelope),
        (status = 404, description = "No match")
    )
)]
pub async fn by_brand_and_name(State(state): State<ServerState>, Query(q): Query<BrandNameQuery>) -> Result<Json<ApiResponse<Vec<ProductDto>>>, JsonApiError> {
    found(state.products.by_brand_and_name(&q.brand_name, &q.product_name).await?)
}

#[utoipa::path(
    get, path = "/api/v1/product/count", tag = "product",
    params(CountQuery),
    responses((status = 200, description = "Number of products with this brand and name"))
)]
pub async fn count(State(state): State<ServerState>, Query(q): Query<CountQuery>) -> Result<Json<ApiResponse<u64>>, JsonApiError> {
    let n = state.products.count_by_brand_and_name(&q.brand, &q.name).await?;
    Ok(Json(ApiResponse::new("Product count!", n)))
}
