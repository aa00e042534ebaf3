use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::category::domain::CategoryDto;
use crate::category::repository::CategoryRepository;
use crate::errors::ServiceError;

/// Category business rules: unique names, no deletion while products use it.
pub struct CategoryService<R: CategoryRepository> {
    repo: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<CategoryDto>, ServiceError> {
        Ok(self.repo.list().await?.into_iter().map(CategoryDto::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<CategoryDto, ServiceError> {
        self.repo.get(id).await?.map(CategoryDto::from).ok_or_else(|| ServiceError::not_found("category"))
    }

    /// Plain lookup; absence is not an error here.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<CategoryDto>, ServiceError> {
        Ok(self.repo.find_by_name(name).await?.map(CategoryDto::from))
    }

    pub async fn get_by_name(&self, name: &str) -> Result<CategoryDto, ServiceError> {
        self.find_by_name(name).await?.ok_or_else(|| ServiceError::not_found("category"))
    }

    #[instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<CategoryDto, ServiceError> {
        match self.repo.create(name).await? {
            Some(created) => {
                info!(category_id = %created.id, name = %created.name, "category_created");
                Ok(created.into())
            }
            None => Err(ServiceError::Conflict(format!("category {name} already exists"))),
        }
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: Uuid, name: &str) -> Result<CategoryDto, ServiceError> {
        let updated = self.repo.rename(id, name).await?.ok_or_else(|| ServiceError::not_found("category"))?;
        info!(category_id = %updated.id, name = %updated.name, "category_renamed");
        Ok(updated.into())
    }

    /// Rejected with `Conflict` while products still reference the category.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.repo.get(id).await?.is_none() {
            return Err(ServiceError::not_found("category"));
        }
        let in_use = self.repo.product_count(id).await?;
        if in_use > 0 {
            return Err(ServiceError::Conflict(format!("category still has {in_use} product(s)")));
        }
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("category"));
        }
        info!(category_id = %id, "category_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ServiceError;
    use crate::product::domain::{AddProductRequest, CategoryRef};
    use crate::test_support::services;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[tokio::test]
    async fn category_crud_service() -> Result<(), anyhow::Error> {
        let svc = services().await?;

        let created = svc.categories.create("Garden").await?;
        assert_eq!(svc.categories.get(created.id).await?, created);
        assert_eq!(svc.categories.get_by_name("Garden").await?.id, created.id);
        assert!(svc.categories.find_by_name("Kitchen").await?.is_none());

        let renamed = svc.categories.update(created.id, "Outdoor").await?;
        assert_eq!(renamed.name, "Outdoor");
        assert_eq!(svc.categories.list().await?.len(), 1);

        svc.categories.delete(created.id).await?;
        assert!(matches!(svc.categories.get(created.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        svc.categories.create("Garden").await?;
        assert!(matches!(svc.categories.create("Garden").await, Err(ServiceError::Conflict(_))));

        let other = svc.categories.create("Kitchen").await?;
        assert!(matches!(svc.categories.update(other.id, "Garden").await, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        let id = Uuid::new_v4();
        assert!(matches!(svc.categories.get(id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.categories.update(id, "x").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.categories.delete(id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.categories.get_by_name("nope").await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_validation_error() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        assert!(matches!(svc.categories.create("  ").await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_rejected_while_products_reference_it() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        let product = svc.products.add(AddProductRequest {
            name: "Shoe".into(),
            brand: "Acme".into(),
            price: Decimal::new(2950, 2),
            inventory: 10,
            description: String::new(),
            category: CategoryRef { name: "Footwear".into() },
        }).await?;
        let footwear = svc.categories.get_by_name("Footwear").await?;

        assert!(matches!(svc.categories.delete(footwear.id).await, Err(ServiceError::Conflict(_))));

        svc.products.delete(product.id).await?;
        svc.categories.delete(footwear.id).await?;
        Ok(())
    }
}
