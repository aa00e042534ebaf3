use axum::{
    body::Body,
    extract::{multipart::{Field, MultipartError}, DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::{delete, get, post, put},
    Json, Router,
};
use common::types::ApiResponse;
use service::{errors::ServiceError, image::domain::{ImageDto, ImageUpload}};
use tracing::info;
use uuid::Uuid;

use crate::{errors::JsonApiError, state::ServerState};

pub fn router(max_upload_bytes: usize) -> Router<ServerState> {
    Router::new()
        .route("/upload", post(upload))
        .route("/product/:product_id", get(list_for_product))
        .route("/image/download/:id", get(download))
        .route("/image/:id/update", put(update))
        .route("/image/:id/delete", delete(remove))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

fn read_error(e: MultipartError) -> JsonApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return JsonApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "Upload Too Large", Some(e.body_text()));
    }
    ServiceError::Io(e.body_text()).into()
}

async fn read_upload(field: Field<'_>) -> Result<ImageUpload, JsonApiError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(read_error)?;
    Ok(ImageUpload { file_name, content_type, bytes: bytes.to_vec() })
}

/// `attachment; filename="..."` with quotes and separators stripped.
pub fn content_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .filter(|c| (c.is_ascii_graphic() || *c == ' ') && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let safe = if safe.trim().is_empty() { "download".to_string() } else { safe };
    format!("attachment; filename=\"{safe}\"")
}

#[utoipa::path(
    post, path = "/api/v1/images/upload", tag = "image",
    request_body(content = String, content_type = "multipart/form-data", description = "`productId` text field plus one or more `files` parts"),
    responses(
        (status = 200, description = "Saved, one entry per file in upload order", body = crate::openapi::ImageListEnvelope),
        (status = 400, description = "Missing productId or no files"),
        (status = 404, description = "Product not found"),
        (status = 413, description = "Upload too large")
    )
)]
pub async fn upload(State(state): State<ServerState>, mut multipart: Multipart) -> Result<Json<ApiResponse<Vec<ImageDto>>>, JsonApiError> {
    let mut product_id: Option<Uuid> = None;
    let mut uploads = Vec::new();
    // every part is read before anything is written
    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        match field.name() {
            Some("productId") => {
                let text = field.text().await.map_err(read_error)?;
                let id = Uuid::parse_str(text.trim())
                    .map_err(|e| JsonApiError::bad_request(format!("invalid productId: {e}")))?;
                product_id = Some(id);
            }
            Some("files") => uploads.push(read_upload(field).await?),
            _ => {}
        }
    }
    let product_id = product_id.ok_or_else(|| JsonApiError::bad_request("missing productId field"))?;
    info!(product_id = %product_id, files = uploads.len(), "image_upload_request");
    let saved = state.images.save_images(product_id, uploads).await?;
    Ok(Json(ApiResponse::new("Upload success!", saved)))
}

#[utoipa::path(
    get, path = "/api/v1/images/product/{productId}", tag = "image",
    params(("productId" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Images of the product", body = crate::openapi::ImageListEnvelope),
        (status = 404, description = "Product not found")
    )
)]
pub async fn list_for_product(State(state): State<ServerState>, Path(product_id): Path<Uuid>) -> Result<Json<ApiResponse<Vec<ImageDto>>>, JsonApiError> {
    let images = state.images.list_for_product(product_id).await?;
    Ok(Json(ApiResponse::new("success", images)))
}

#[utoipa::path(
    get, path = "/api/v1/images/image/download/{id}", tag = "image",
    params(("id" = Uuid, Path, description = "Image ID")),
    responses(
        (status = 200, description = "Raw image bytes with the stored content type"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn download(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Response, JsonApiError> {
    let image = state.images.get_image(id).await?;
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, image.file_type.as_str())
        .header(header::CONTENT_LENGTH, image.data.len())
        .header(header::CONTENT_DISPOSITION, content_disposition(&image.file_name))
        .body(Body::from(image.data))
        .map_err(|e| JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Download Failed", Some(e.to_string())))
}

#[utoipa::path(
    put, path = "/api/v1/images/image/{id}/update", tag = "image",
    params(("id" = Uuid, Path, description = "Image ID")),
    request_body(content = String, content_type = "multipart/form-data", description = "Replacement `file` part"),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ImageEnvelope),
        (status = 400, description = "Missing file"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(State(state): State<ServerState>, Path(id): Path<Uuid>, mut multipart: Multipart) -> Result<Json<ApiResponse<ImageDto>>, JsonApiError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        if field.name() == Some("file") {
            upload = Some(read_upload(field).await?);
        }
    }
    let upload = upload.ok_or_else(|| JsonApiError::bad_request("missing file field"))?;
    let updated = state.images.update_image(id, upload).await?;
    Ok(Json(ApiResponse::new("Update success!", updated)))
}

#[utoipa::path(
    delete, path = "/api/v1/images/image/{id}/delete", tag = "image",
    params(("id" = Uuid, Path, description = "Image ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn remove(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<ApiResponse<()>>, JsonApiError> {
    state.images.delete_image(id).await?;
    Ok(Json(ApiResponse::message_only("Delete success!")))
}
