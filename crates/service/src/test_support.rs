#![cfg(test)]
use std::sync::Arc;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::category::{repository::SeaOrmCategoryRepository, service::CategoryService};
use crate::image::{repository::SeaOrmImageRepository, service::ImageService};
use crate::product::{repository::SeaOrmProductRepository, service::ProductService};

pub const API_PREFIX: &str = "/api/v1";

/// Fresh migrated in-memory database; every test gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub struct Services {
    pub db: DatabaseConnection,
    pub categories: CategoryService<SeaOrmCategoryRepository>,
    pub products: ProductService<SeaOrmProductRepository>,
    pub images: ImageService<SeaOrmImageRepository, SeaOrmProductRepository>,
}

pub async fn services() -> Result<Services, anyhow::Error> {
    let db = get_db().await?;
    let product_repo = Arc::new(SeaOrmProductRepository { db: db.clone() });
    Ok(Services {
        categories: CategoryService::new(Arc::new(SeaOrmCategoryRepository { db: db.clone() })),
        products: ProductService::new(Arc::clone(&product_repo)),
        images: ImageService::new(
            Arc::new(SeaOrmImageRepository { db: db.clone(), api_prefix: API_PREFIX.into() }),
            product_repo,
        ),
        db,
    })
}
