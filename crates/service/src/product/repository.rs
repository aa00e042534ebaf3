use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use uuid::Uuid;

use models::{category, product::{self, ProductFields, WithCategory}};

use crate::errors::ServiceError;
use crate::product::domain::ProductFilter;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Get-or-create the category and insert the product atomically.
    async fn create(&self, fields: ProductFields, category: &str) -> Result<WithCategory, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<WithCategory>, ServiceError>;
    async fn list(&self) -> Result<Vec<WithCategory>, ServiceError>;
    async fn update(&self, id: Uuid, fields: ProductFields, category: &str) -> Result<Option<WithCategory>, ServiceError>;
    /// Removes the product and its images; false when the id is unknown.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn find(&self, filter: &ProductFilter) -> Result<Vec<WithCategory>, ServiceError>;
    async fn count_by_brand_and_name(&self, brand: &str, name: &str) -> Result<u64, ServiceError>;
    async fn exists(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn create(&self, fields: ProductFields, category: &str) -> Result<WithCategory, ServiceError> {
        let txn = self.db.begin().await?;
        let cat = category::get_or_create(&txn, category).await?;
        let created = product::insert(&txn, fields, cat.id).await?;
        txn.commit().await?;
        Ok((created, Some(cat)))
    }

    async fn get(&self, id: Uuid) -> Result<Option<WithCategory>, ServiceError> {
        Ok(product::find_with_category(&self.db, id).await?)
    }

    async fn list(&self) -> Result<Vec<WithCategory>, ServiceError> {
        Ok(product::list_all(&self.db).await?)
    }

    async fn update(&self, id: Uuid, fields: ProductFields, category: &str) -> Result<Option<WithCategory>, ServiceError> {
        let txn = self.db.begin().await?;
        // dropping the transaction on early return rolls it back
        let Some(existing) = product::Entity::find_by_id(id).one(&txn).await? else { return Ok(None); };
        let cat = category::get_or_create(&txn, category).await?;
        let updated = product::overwrite(&txn, existing, fields, cat.id).await?;
        txn.commit().await?;
        Ok(Some((updated, Some(cat))))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        let deleted = product::delete_cascade(&txn, id).await?;
        txn.commit().await?;
        Ok(deleted)
    }

    async fn find(&self, filter: &ProductFilter) -> Result<Vec<WithCategory>, ServiceError> {
        let rows = match filter {
            ProductFilter::Category(c) => product::find_by_category_name(&self.db, c).await?,
            ProductFilter::Brand(b) => product::find_by_brand(&self.db, b).await?,
            ProductFilter::CategoryAndBrand { category, brand } => {
                product::find_by_category_and_brand(&self.db, category, brand).await?
            }
            ProductFilter::Name(n) => product::find_by_name(&self.db, n).await?,
            ProductFilter::BrandAndName { brand, name } => product::find_by_brand_and_name(&self.db, brand, name).await?,
        };
        Ok(rows)
    }

    async fn count_by_brand_and_name(&self, brand: &str, name: &str) -> Result<u64, ServiceError> {
        Ok(product::count_by_brand_and_name(&self.db, brand, name).await?)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(product::Entity::find_by_id(id).one(&self.db).await?.is_some())
    }
}
