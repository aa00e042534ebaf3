use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::mapper::{product_dto, product_dtos};
use crate::product::domain::{AddProductRequest, ProductDto, ProductFilter, UpdateProductRequest};
use crate::product::repository::ProductRepository;

/// Application service for products.
/// Validates payloads before any write and maps rows to [`ProductDto`].
pub struct ProductService<R: ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, req), fields(name = %req.name, brand = %req.brand, category = %req.category.name))]
    pub async fn add(&self, req: AddProductRequest) -> Result<ProductDto, ServiceError> {
        let fields = req.fields();
        fields.validate()?;
        models::category::validate_name(&req.category.name)?;
        let created = product_dto(self.repo.create(fields, &req.category.name).await?);
        info!(product_id = %created.id, "product_created");
        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> Result<ProductDto, ServiceError> {
        self.repo.get(id).await?.map(product_dto).ok_or_else(|| ServiceError::not_found("product"))
    }

    pub async fn list(&self) -> Result<Vec<ProductDto>, ServiceError> {
        Ok(product_dtos(self.repo.list().await?))
    }

    #[instrument(skip(self, req))]
    pub async fn update(&self, id: Uuid, req: UpdateProductRequest) -> Result<ProductDto, ServiceError> {
        let fields = req.fields();
        fields.validate()?;
        models::category::validate_name(&req.category.name)?;
        let updated = self
            .repo
            .update(id, fields, &req.category.name)
            .await?
            .map(product_dto)
            .ok_or_else(|| ServiceError::not_found("product"))?;
        info!(product_id = %id, "product_updated");
        Ok(updated)
    }

    /// Deletes the product together with its images.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("product"));
        }
        info!(product_id = %id, "product_deleted");
        Ok(())
    }

    pub async fn find(&self, filter: ProductFilter) -> Result<Vec<ProductDto>, ServiceError> {
        Ok(product_dtos(self.repo.find(&filter).await?))
    }

    pub async fn by_category(&self, category: &str) -> Result<Vec<ProductDto>, ServiceError> {
        self.find(ProductFilter::Category(category.to_string())).await
    }

    pub async fn by_brand(&self, brand: &str) -> Result<Vec<ProductDto>, ServiceError> {
        self.find(ProductFilter::Brand(brand.to_string())).await
    }

    pub async fn by_category_and_brand(&self, category: &str, brand: &str) -> Result<Vec<ProductDto>, ServiceError> {
        self.find(ProductFilter::CategoryAndBrand { category: category.to_string(), brand: brand.to_string() }).await
    }

    pub async fn by_name(&self, name: &str) -> Result<Vec<ProductDto>, ServiceError> {
        self.find(ProductFilter::Name(name.to_string())).await
    }

    pub async fn by_brand_and_name(&self, brand: &str, name: &str) -> Result<Vec<ProductDto>, ServiceError> {
        self.find(ProductFilter::BrandAndName { brand: brand.to_string(), name: name.to_string() }).await
    }

    pub async fn count_by_brand_and_name(&self, brand: &str, name: &str) -> Result<u64, ServiceError> {
        self.repo.count_by_brand_and_name(brand, name).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use configs::DatabaseConfig;
    use migration::MigratorTrait;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::errors::ServiceError;
    use crate::image::domain::ImageUpload;
    use crate::product::domain::{AddProductRequest, CategoryRef, UpdateProductRequest};
    use crate::product::repository::SeaOrmProductRepository;
    use crate::product::service::ProductService;
    use crate::test_support::services;

    fn shoe(name: &str, brand: &str, category: &str) -> AddProductRequest {
        AddProductRequest {
            name: name.into(),
            brand: brand.into(),
            price: Decimal::new(2950, 2),
            inventory: 10,
            description: String::new(),
            category: CategoryRef { name: category.into() },
        }
    }

    #[tokio::test]
    async fn add_then_get_returns_same_fields() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        let created = svc.products.add(shoe("Shoe", "Acme", "Footwear")).await?;
        let fetched = svc.products.get(created.id).await?;

        assert_eq!(fetched.name, "Shoe");
        assert_eq!(fetched.brand, "Acme");
        assert_eq!(fetched.price, Decimal::new(2950, 2));
        assert_eq!(fetched.inventory, 10);
        assert_eq!(fetched.category, "Footwear");
        assert_eq!(fetched.id, created.id);
        Ok(())
    }

    #[tokio::test]
    async fn same_category_name_creates_one_row() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        let a = svc.products.add(shoe("Shoe", "Acme", "Footwear")).await?;
        let b = svc.products.add(shoe("Boot", "Zeta", "Footwear")).await?;

        let cats = svc.categories.list().await?;
        assert_eq!(cats.len(), 1);
        assert_eq!(a.category, b.category);
        assert_eq!(svc.products.by_category("Footwear").await?.len(), 2);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_adds_share_one_new_category() -> Result<(), anyhow::Error> {
        // a file-backed pool, so the adds really run on separate connections
        let path = std::env::temp_dir().join(format!("catalog-{}.db", Uuid::new_v4()));
        let cfg = DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", path.display()),
            max_connections: 8,
            min_connections: 1,
            ..DatabaseConfig::default()
        };
        let db = models::db::connect_with_config(&cfg).await?;
        migration::Migrator::up(&db, None).await?;
        let products = Arc::new(ProductService::new(Arc::new(SeaOrmProductRepository { db: db.clone() })));

        let mut handles = Vec::new();
        for i in 0..8 {
            let products = Arc::clone(&products);
            handles.push(tokio::spawn(async move { products.add(shoe(&format!("Shoe {i}"), "Acme", "NewCat")).await }));
        }
        for handle in handles {
            assert_eq!(handle.await??.category, "NewCat");
        }

        let rows = models::category::list_all(&db).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "NewCat");
        assert_eq!(products.by_category("NewCat").await?.len(), 8);

        db.close().await?;
        let _ = std::fs::remove_file(&path);
        Ok(())
    }

    #[tokio::test]
    async fn missing_product_is_not_found() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        let id = Uuid::new_v4();
        assert!(matches!(svc.products.get(id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.products.delete(id).await, Err(ServiceError::NotFound(_))));
        let req = UpdateProductRequest {
            name: "x".into(),
            brand: "y".into(),
            price: Decimal::ONE,
            inventory: 1,
            description: String::new(),
            category: CategoryRef { name: "Ghost".into() },
        };
        assert!(matches!(svc.products.update(id, req).await, Err(ServiceError::NotFound(_))));
        // the rolled-back update left no category behind
        assert!(svc.categories.find_by_name("Ghost").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_moves_category() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        let created = svc.products.add(shoe("Shoe", "Acme", "Footwear")).await?;
        let updated = svc
            .products
            .update(created.id, UpdateProductRequest {
                name: "Trail Shoe".into(),
                brand: "Acme".into(),
                price: Decimal::new(4425, 2),
                inventory: 3,
                description: "grippy".into(),
                category: CategoryRef { name: "Outdoor".into() },
            })
            .await?;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Trail Shoe");
        assert_eq!(updated.price, Decimal::new(4425, 2));
        assert_eq!(updated.inventory, 3);
        assert_eq!(updated.category, "Outdoor");
        assert_eq!(svc.products.get(created.id).await?, updated);
        assert!(svc.products.by_category("Footwear").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn brand_and_name_is_subset_of_brand() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        svc.products.add(shoe("Shoe", "Acme", "Footwear")).await?;
        svc.products.add(shoe("Shoe", "Acme", "Sale")).await?;
        svc.products.add(shoe("Boot", "Acme", "Footwear")).await?;
        svc.products.add(shoe("Shoe", "Zeta", "Footwear")).await?;

        let by_brand = svc.products.by_brand("Acme").await?;
        let both = svc.products.by_brand_and_name("Acme", "Shoe").await?;
        let expected: HashSet<_> = by_brand.iter().filter(|p| p.name == "Shoe").map(|p| p.id).collect();
        let got: HashSet<_> = both.iter().map(|p| p.id).collect();

        assert_eq!(by_brand.len(), 3);
        assert_eq!(got, expected);
        assert_eq!(svc.products.count_by_brand_and_name("Acme", "Shoe").await?, 2);
        assert_eq!(svc.products.by_category_and_brand("Footwear", "Acme").await?.len(), 2);
        assert_eq!(svc.products.by_name("Shoe").await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn filters_match_exactly() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        svc.products.add(shoe("Shoe", "Acme", "Footwear")).await?;
        assert!(svc.products.by_brand("acme").await?.is_empty());
        assert!(svc.products.by_name("Sho").await?.is_empty());
        assert!(svc.products.by_category("Foot").await?.is_empty());
        assert_eq!(svc.products.count_by_brand_and_name("Acme", "shoe").await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_payload_writes_nothing() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        let mut bad = shoe("Shoe", "Acme", "Footwear");
        bad.price = Decimal::new(-1, 0);
        assert!(matches!(svc.products.add(bad).await, Err(ServiceError::Validation(_))));

        let mut bad = shoe("Shoe", "Acme", "Footwear");
        bad.inventory = -5;
        assert!(matches!(svc.products.add(bad).await, Err(ServiceError::Validation(_))));

        assert!(matches!(svc.products.add(shoe("Shoe", "Acme", " ")).await, Err(ServiceError::Validation(_))));

        assert!(svc.categories.list().await?.is_empty());
        assert!(svc.products.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_images_too() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        let p = svc.products.add(shoe("Shoe", "Acme", "Footwear")).await?;
        let saved = svc
            .images
            .save_images(p.id, vec![ImageUpload::new("a.png", Some("image/png"), vec![1, 2, 3])])
            .await?;

        svc.products.delete(p.id).await?;

        assert!(matches!(svc.images.get_image(saved[0].id).await, Err(ServiceError::NotFound(_))));
        assert!(svc.products.list().await?.is_empty());
        Ok(())
    }
}
