use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use common::types::ApiResponse;
use service::category::domain::{CategoryDto, CategoryInput};
use uuid::Uuid;

use crate::{errors::JsonApiError, state::ServerState};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/all", get(list))
        .route("/add", post(create))
        .route("/name/:name", get(get_by_name))
        .route("/:id", get(get_by_id).put(update).delete(delete))
}

#[utoipa::path(
    get, path = "/api/v1/category/all", tag = "category",
    responses((status = 200, description = "All categories", body = crate::openapi::CategoryListEnvelope))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<ApiResponse<Vec<CategoryDto>>>, JsonApiError> {
    let all = state.categories.list().await?;
    Ok(Json(ApiResponse::new("Found!", all)))
}

#[utoipa::path(
    post, path = "/api/v1/category/add", tag = "category",
    request_body = crate::openapi::CategoryInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::CategoryEnvelope),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<CategoryInput>) -> Result<Json<ApiResponse<CategoryDto>>, JsonApiError> {
    let created = state.categories.create(&input.name).await?;
    Ok(Json(ApiResponse::new("Success", created)))
}

#[utoipa::path(
    get, path = "/api/v1/category/{id}", tag = "category",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::CategoryEnvelope),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<ApiResponse<CategoryDto>>, JsonApiError> {
    let found = state.categories.get(id).await?;
    Ok(Json(ApiResponse::new("Found", found)))
}

#[utoipa::path(
    get, path = "/api/v1/category/name/{name}", tag = "category",
    params(("name" = String, Path, description = "Exact category name")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::CategoryEnvelope),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_by_name(State(state): State<ServerState>, Path(name): Path<String>) -> Result<Json<ApiResponse<CategoryDto>>, JsonApiError> {
    let found = state.categories.get_by_name(&name).await?;
    Ok(Json(ApiResponse::new("Found", found)))
}

#[utoipa::path(
    put, path = "/api/v1/category/{id}", tag = "category",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = crate::openapi::CategoryInputDoc,
    responses(
        (status = 200, description = "Renamed", body = crate::openapi::CategoryEnvelope),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update(State(state): State<ServerState>, Path(id): Path<Uuid>, Json(input): Json<CategoryInput>) -> Result<Json<ApiResponse<CategoryDto>>, JsonApiError> {
    let updated = state.categories.update(id, &input.name).await?;
    Ok(Json(ApiResponse::new("Update success!", updated)))
}

#[utoipa::path(
    delete, path = "/api/v1/category/{id}", tag = "category",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Products still use this category")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<ApiResponse<()>>, JsonApiError> {
    state.categories.delete(id).await?;
    Ok(Json(ApiResponse::message_only("Delete success!")))
}
