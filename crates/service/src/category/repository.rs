use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use models::category;

use crate::errors::ServiceError;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<category::Model>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<category::Model>, ServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<category::Model>, ServiceError>;
    /// `None` when the name is already taken.
    async fn create(&self, name: &str) -> Result<Option<category::Model>, ServiceError>;
    async fn rename(&self, id: Uuid, name: &str) -> Result<Option<category::Model>, ServiceError>;
    async fn product_count(&self, id: Uuid) -> Result<u64, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCategoryRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn list(&self) -> Result<Vec<category::Model>, ServiceError> {
        Ok(category::list_all(&self.db).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<category::Model>, ServiceError> {
        Ok(category::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<category::Model>, ServiceError> {
        Ok(category::find_by_name(&self.db, name).await?)
    }

    async fn create(&self, name: &str) -> Result<Option<category::Model>, ServiceError> {
        Ok(category::insert_if_absent(&self.db, name).await?)
    }

    async fn rename(&self, id: Uuid, name: &str) -> Result<Option<category::Model>, ServiceError> {
        let Some(existing) = category::Entity::find_by_id(id).one(&self.db).await? else { return Ok(None); };
        Ok(Some(category::rename(&self.db, existing, name).await?))
    }

    async fn product_count(&self, id: Uuid) -> Result<u64, ServiceError> {
        Ok(category::product_count(&self.db, id).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = category::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
