use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::product::ProductFields;

/// Category reference inside a product payload; resolved by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddProductRequest {
    pub name: String,
    pub brand: String,
    pub price: Decimal,
    pub inventory: i32,
    #[serde(default)]
    pub description: String,
    pub category: CategoryRef,
}

impl AddProductRequest {
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            brand: self.brand.clone(),
            price: self.price,
            inventory: self.inventory,
            description: self.description.clone(),
        }
    }
}

/// Full overwrite of a product; same shape as the create payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub brand: String,
    pub price: Decimal,
    pub inventory: i32,
    #[serde(default)]
    pub description: String,
    pub category: CategoryRef,
}

impl UpdateProductRequest {
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            brand: self.brand.clone(),
            price: self.price,
            inventory: self.inventory,
            description: self.description.clone(),
        }
    }
}

/// Flattened product with its category name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub price: Decimal,
    pub inventory: i32,
    pub description: String,
    pub category: String,
}

/// Exact-match product queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    Category(String),
    Brand(String),
    CategoryAndBrand { category: String, brand: String },
    Name(String),
    BrandAndName { brand: String, name: String },
}
