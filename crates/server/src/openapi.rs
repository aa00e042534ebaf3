use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CategoryInputDoc { pub name: String }

#[derive(ToSchema)]
pub struct CategoryDoc { pub id: Uuid, pub name: String }

#[derive(ToSchema)]
pub struct CategoryRefDoc { pub name: String }

/// Create and full-update payload; the category is get-or-created by name.
#[derive(ToSchema)]
pub struct ProductRequestDoc {
    pub name: String,
    pub brand: String,
    /// Non-negative, at most two decimal places
    #[schema(example = 29.5)]
    pub price: f64,
    pub inventory: i32,
    pub description: Option<String>,
    pub category: CategoryRefDoc,
}

#[derive(ToSchema)]
pub struct ProductDoc {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    /// Decimal rendered as a string, e.g. "29.50"
    pub price: String,
    pub inventory: i32,
    pub description: String,
    pub category: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ImageDoc { pub id: Uuid, pub file_name: String, pub download_url: String }

#[derive(ToSchema)]
pub struct CategoryEnvelope { pub message: String, pub data: CategoryDoc }

#[derive(ToSchema)]
pub struct CategoryListEnvelope { pub message: String, pub data: Vec<CategoryDoc> }

#[derive(ToSchema)]
pub struct ProductEnvelope { pub message: String, pub data: ProductDoc }

#[derive(ToSchema)]
pub struct ProductListEnvelope { pub message: String, pub data: Vec<ProductDoc> }

#[derive(ToSchema)]
pub struct ImageEnvelope { pub message: String, pub data: ImageDoc }

#[derive(ToSchema)]
pub struct ImageListEnvelope { pub message: String, pub data: Vec<ImageDoc> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::categories::list,
        crate::routes::categories::create,
        crate::routes::categories::get_by_id,
        crate::routes::categories::get_by_name,
        crate::routes::categories::update,
        crate::routes::categories::delete,
        crate::routes::products::list,
        crate::routes::products::add,
        crate::routes::products::get_by_id,
        crate::routes::products::update,
        crate::routes::products::remove,
        crate::routes::products::by_brand,
        crate::routes::products::by_category,
        crate::routes::products::by_name,
        crate::routes::products::by_category_and_brand,
        crate::routes::products::by_brand_and_name,
        crate::routes::products::count,
        crate::routes::images::upload,
        crate::routes::images::list_for_product,
        crate::routes::images::download,
        crate::routes::images::update,
        crate::routes::images::remove,
    ),
    components(
        schemas(
            HealthResponse,
            CategoryInputDoc,
            CategoryDoc,
            CategoryRefDoc,
            ProductRequestDoc,
            ProductDoc,
            ImageDoc,
            CategoryEnvelope,
            CategoryListEnvelope,
            ProductEnvelope,
            ProductListEnvelope,
            ImageEnvelope,
            ImageListEnvelope,
        )
    ),
    tags(
        (name = "health"),
        (name = "category"),
        (name = "product"),
        (name = "image")
    )
)]
pub struct ApiDoc;
