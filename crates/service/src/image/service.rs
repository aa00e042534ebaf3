use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use models::image;

use crate::errors::ServiceError;
use crate::image::domain::{ImageDto, ImageUpload};
use crate::image::repository::ImageRepository;
use crate::mapper::image_dto;
use crate::product::repository::ProductRepository;

/// Stores image files against existing products.
pub struct ImageService<I: ImageRepository, P: ProductRepository> {
    images: Arc<I>,
    products: Arc<P>,
}

impl<I: ImageRepository, P: ProductRepository> ImageService<I, P> {
    pub fn new(images: Arc<I>, products: Arc<P>) -> Self { Self { images, products } }

    /// Full row including bytes, for download.
    pub async fn get_image(&self, id: Uuid) -> Result<image::Model, ServiceError> {
        self.images.get(id).await?.ok_or_else(|| ServiceError::not_found("image"))
    }

    #[instrument(skip(self))]
    pub async fn delete_image(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.images.delete(id).await? {
            return Err(ServiceError::not_found("image"));
        }
        info!(image_id = %id, "image_deleted");
        Ok(())
    }

    /// Save a batch of uploads for one product. All files are validated
    /// before the first write and the batch commits as a unit.
    #[instrument(skip(self, uploads), fields(files = uploads.len()))]
    pub async fn save_images(&self, product_id: Uuid, uploads: Vec<ImageUpload>) -> Result<Vec<ImageDto>, ServiceError> {
        if uploads.is_empty() {
            return Err(ServiceError::Validation("at least one file is required".into()));
        }
        if !self.products.exists(product_id).await? {
            return Err(ServiceError::not_found("product"));
        }
        let files = uploads.into_iter().map(ImageUpload::into_file).collect::<Vec<_>>();
        for f in &files {
            f.validate()?;
        }
        let saved = self.images.insert_batch(product_id, files).await?;
        info!(product_id = %product_id, count = saved.len(), "images_saved");
        Ok(saved.into_iter().map(image_dto).collect())
    }

    /// Replace the file behind an existing image. The download url stays as is.
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name))]
    pub async fn update_image(&self, id: Uuid, upload: ImageUpload) -> Result<ImageDto, ServiceError> {
        let file = upload.into_file();
        file.validate()?;
        let updated = self.images.overwrite(id, file).await?.ok_or_else(|| ServiceError::not_found("image"))?;
        info!(image_id = %id, "image_updated");
        Ok(image_dto(updated))
    }

    pub async fn list_for_product(&self, product_id: Uuid) -> Result<Vec<ImageDto>, ServiceError> {
        if !self.products.exists(product_id).await? {
            return Err(ServiceError::not_found("product"));
        }
        Ok(self.images.list_for_product(product_id).await?.into_iter().map(image_dto).collect())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::errors::ServiceError;
    use crate::image::domain::ImageUpload;
    use crate::product::domain::{AddProductRequest, CategoryRef};
    use crate::test_support::{services, Services, API_PREFIX};

    async fn product(svc: &Services) -> Result<Uuid, anyhow::Error> {
        let p = svc.products.add(AddProductRequest {
            name: "Shoe".into(),
            brand: "Acme".into(),
            price: Decimal::new(2950, 2),
            inventory: 10,
            description: String::new(),
            category: CategoryRef { name: "Footwear".into() },
        }).await?;
        Ok(p.id)
    }

    #[tokio::test]
    async fn save_keeps_order_and_embeds_id() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        let pid = product(&svc).await?;
        let saved = svc.images.save_images(pid, vec![
            ImageUpload::new("front.png", Some("image/png"), vec![1, 2, 3]),
            ImageUpload::new("side.jpg", None, vec![4, 5]),
        ]).await?;

        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].file_name, "front.png");
        assert_eq!(saved[1].file_name, "side.jpg");
        for dto in &saved {
            assert_eq!(dto.download_url, format!("{API_PREFIX}/images/image/download/{}", dto.id));
        }

        let stored = svc.images.get_image(saved[1].id).await?;
        assert_eq!(stored.data, vec![4, 5]);
        assert_eq!(stored.file_type, "image/jpeg");
        assert_eq!(stored.product_id, pid);
        Ok(())
    }

    #[tokio::test]
    async fn empty_batch_or_unknown_product_is_rejected() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        let pid = product(&svc).await?;
        assert!(matches!(svc.images.save_images(pid, vec![]).await, Err(ServiceError::Validation(_))));

        let res = svc.images.save_images(Uuid::new_v4(), vec![ImageUpload::new("a.png", None, vec![1])]).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_file_aborts_whole_batch() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        let pid = product(&svc).await?;
        let res = svc.images.save_images(pid, vec![
            ImageUpload::new("ok.png", None, vec![1]),
            ImageUpload::new("  ", Some("image/png"), vec![2]),
        ]).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert!(svc.images.list_for_product(pid).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_bytes_and_keeps_url() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        let pid = product(&svc).await?;
        let saved = svc.images.save_images(pid, vec![ImageUpload::new("a.png", None, vec![1])]).await?;
        let id = saved[0].id;

        let updated = svc.images.update_image(id, ImageUpload::new("b.gif", Some("image/gif"), vec![7, 7])).await?;
        assert_eq!(updated.id, id);
        assert_eq!(updated.file_name, "b.gif");
        assert_eq!(updated.download_url, saved[0].download_url);

        let stored = svc.images.get_image(id).await?;
        assert_eq!(stored.data, vec![7, 7]);
        assert_eq!(stored.file_type, "image/gif");
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_creates_nothing() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        let pid = product(&svc).await?;
        let res = svc.images.update_image(Uuid::new_v4(), ImageUpload::new("a.png", None, vec![1])).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert!(svc.images.list_for_product(pid).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn delete_and_list() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        let pid = product(&svc).await?;
        let saved = svc.images.save_images(pid, vec![
            ImageUpload::new("a.png", None, vec![1]),
            ImageUpload::new("b.png", None, vec![2]),
        ]).await?;

        svc.images.delete_image(saved[0].id).await?;
        let left = svc.images.list_for_product(pid).await?;
        assert_eq!(left, vec![saved[1].clone()]);

        assert!(matches!(svc.images.delete_image(saved[0].id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.images.get_image(saved[0].id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.images.list_for_product(Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn listing_order_is_stable() -> Result<(), anyhow::Error> {
        let svc = services().await?;
        let pid = product(&svc).await?;
        let uploads = (0..6).map(|i| ImageUpload::new(format!("{i}.png"), None, vec![i])).collect();
        let saved = svc.images.save_images(pid, uploads).await?;

        let first = svc.images.list_for_product(pid).await?;
        assert_eq!(first, svc.images.list_for_product(pid).await?);
        let mut listed: Vec<_> = first.iter().map(|i| i.id).collect();
        let mut expected: Vec<_> = saved.iter().map(|i| i.id).collect();
        listed.sort();
        expected.sort();
        assert_eq!(listed, expected);
        Ok(())
    }
}
