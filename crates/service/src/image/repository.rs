use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use uuid::Uuid;

use models::image::{self, ImageFile};

use crate::errors::ServiceError;

#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<image::Model>, ServiceError>;
    /// Insert every file or none of them; rows come back in input order.
    async fn insert_batch(&self, product_id: Uuid, files: Vec<ImageFile>) -> Result<Vec<image::Model>, ServiceError>;
    async fn overwrite(&self, id: Uuid, file: ImageFile) -> Result<Option<image::Model>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn list_for_product(&self, product_id: Uuid) -> Result<Vec<image::Model>, ServiceError>;
}

/// SeaORM-backed repository; `api_prefix` is baked into each download url.
pub struct SeaOrmImageRepository {
    pub db: DatabaseConnection,
    pub api_prefix: String,
}

#[async_trait]
impl ImageRepository for SeaOrmImageRepository {
    async fn get(&self, id: Uuid) -> Result<Option<image::Model>, ServiceError> {
        Ok(image::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn insert_batch(&self, product_id: Uuid, files: Vec<ImageFile>) -> Result<Vec<image::Model>, ServiceError> {
        let txn = self.db.begin().await?;
        let mut saved = Vec::with_capacity(files.len());
        for file in files {
            saved.push(image::insert(&txn, product_id, file, &self.api_prefix).await?);
        }
        txn.commit().await?;
        Ok(saved)
    }

    async fn overwrite(&self, id: Uuid, file: ImageFile) -> Result<Option<image::Model>, ServiceError> {
        let Some(existing) = image::Entity::find_by_id(id).one(&self.db).await? else { return Ok(None); };
        Ok(Some(image::overwrite(&self.db, existing, file).await?))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = image::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_for_product(&self, product_id: Uuid) -> Result<Vec<image::Model>, ServiceError> {
        Ok(image::find_by_product(&self.db, product_id).await?)
    }
}
