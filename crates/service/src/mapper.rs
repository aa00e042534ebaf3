//! Entity to transfer-object mapping. One direction only.

use models::{image, product::WithCategory};

use crate::image::domain::ImageDto;
use crate::product::domain::ProductDto;

/// Flatten a product row and its category into a [`ProductDto`].
/// A dangling category (not possible under the FK) maps to an empty name.
pub fn product_dto((product, category): WithCategory) -> ProductDto {
    ProductDto {
        id: product.id,
        name: product.name,
        brand: product.brand,
        price: product.price,
        inventory: product.inventory,
        description: product.description,
        category: category.map(|c| c.name).unwrap_or_default(),
    }
}

/// Batch form of [`product_dto`]; preserves order and length.
pub fn product_dtos(rows: Vec<WithCategory>) -> Vec<ProductDto> {
    rows.into_iter().map(product_dto).collect()
}

pub fn image_dto(image: image::Model) -> ImageDto {
    ImageDto { id: image.id, file_name: image.file_name, download_url: image.download_url }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use models::{category, product};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn row(name: &str, category: Option<&str>) -> WithCategory {
        let now = Utc::now().into();
        let category_id = Uuid::new_v4();
        (
            product::Model {
                id: Uuid::new_v4(),
                name: name.into(),
                brand: "Acme".into(),
                price: Decimal::new(2950, 2),
                inventory: 10,
                description: "light".into(),
                category_id,
                created_at: now,
                updated_at: now,
            },
            category.map(|n| category::Model { id: category_id, name: n.into(), created_at: now }),
        )
    }

    #[test]
    fn flattens_category_name() {
        let r = row("Shoe", Some("Footwear"));
        let id = r.0.id;
        let dto = product_dto(r);
        assert_eq!(dto.id, id);
        assert_eq!(dto.name, "Shoe");
        assert_eq!(dto.brand, "Acme");
        assert_eq!(dto.price, Decimal::new(2950, 2));
        assert_eq!(dto.inventory, 10);
        assert_eq!(dto.description, "light");
        assert_eq!(dto.category, "Footwear");
    }

    #[test]
    fn missing_category_maps_to_empty() {
        assert_eq!(product_dto(row("Shoe", None)).category, "");
    }

    #[test]
    fn batch_keeps_order() {
        let rows = vec![row("a", Some("x")), row("b", Some("y")), row("c", Some("x"))];
        let ids: Vec<_> = rows.iter().map(|r| r.0.id).collect();
        let dtos = product_dtos(rows);
        assert_eq!(dtos.iter().map(|d| d.id).collect::<Vec<_>>(), ids);
        assert!(product_dtos(Vec::new()).is_empty());
    }

    #[test]
    fn image_dto_drops_bytes() {
        let id = Uuid::new_v4();
        let dto = image_dto(image::Model {
            id,
            file_name: "a.png".into(),
            file_type: "image/png".into(),
            data: vec![1, 2, 3],
            download_url: image::download_url("/api/v1", id),
            product_id: Uuid::new_v4(),
            created_at: Utc::now().into(),
        });
        assert_eq!(dto.id, id);
        assert_eq!(dto.file_name, "a.png");
        assert!(dto.download_url.ends_with(&id.to_string()));
    }
}
