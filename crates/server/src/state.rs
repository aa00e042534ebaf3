use std::sync::Arc;

use configs::CatalogConfig;
use sea_orm::DatabaseConnection;
use service::{
    category::{repository::SeaOrmCategoryRepository, CategoryService},
    image::{repository::SeaOrmImageRepository, ImageService},
    product::{repository::SeaOrmProductRepository, ProductService},
};

pub type Categories = CategoryService<SeaOrmCategoryRepository>;
pub type Products = ProductService<SeaOrmProductRepository>;
pub type Images = ImageService<SeaOrmImageRepository, SeaOrmProductRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<CatalogConfig>,
    pub categories: Arc<Categories>,
    pub products: Arc<Products>,
    pub images: Arc<Images>,
}

impl ServerState {
    /// Wire the SeaORM repositories and services over one connection pool.
    pub fn new(db: DatabaseConnection, catalog: CatalogConfig) -> Self {
        let product_repo = Arc::new(SeaOrmProductRepository { db: db.clone() });
        let image_repo = Arc::new(SeaOrmImageRepository { db: db.clone(), api_prefix: catalog.api_prefix.clone() });
        Self {
            categories: Arc::new(CategoryService::new(Arc::new(SeaOrmCategoryRepository { db }))),
            products: Arc::new(ProductService::new(Arc::clone(&product_repo))),
            images: Arc::new(ImageService::new(image_repo, product_repo)),
            catalog: Arc::new(catalog),
        }
    }
}
