use sea_orm::{entity::prelude::*, ConnectionTrait, PaginatorTrait, QueryOrder, Select, SelectTwo, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{category, errors::ModelError, image};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,
    pub inventory: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category, Image }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
            Relation::Image => Entity::has_many(image::Entity).into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl Related<image::Entity> for Entity {
    fn to() -> RelationDef { Relation::Image.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Product row joined with its category.
pub type WithCategory = (Model, Option<category::Model>);

/// Mutable product fields, shared by create and full-overwrite update.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub brand: String,
    pub price: Decimal,
    pub inventory: i32,
    pub description: String,
}

impl ProductFields {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("product name required".into()));
        }
        if self.brand.trim().is_empty() {
            return Err(ModelError::Validation("brand required".into()));
        }
        validate_price(self.price)?;
        if self.inventory < 0 {
            return Err(ModelError::Validation("inventory must be >= 0".into()));
        }
        Ok(())
    }
}

pub fn validate_price(price: Decimal) -> Result<(), ModelError> {
    if price < Decimal::ZERO {
        return Err(ModelError::Validation("price must be >= 0".into()));
    }
    // column is NUMERIC(12, 2)
    if price.normalize().scale() > 2 {
        return Err(ModelError::Validation("price supports at most 2 decimal places".into()));
    }
    if price >= Decimal::new(10_000_000_000, 0) {
        return Err(ModelError::Validation("price too large".into()));
    }
    Ok(())
}

pub async fn insert<C: ConnectionTrait>(db: &C, fields: ProductFields, category_id: Uuid) -> Result<Model, ModelError> {
    fields.validate()?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(fields.name),
        brand: Set(fields.brand),
        price: Set(fields.price),
        inventory: Set(fields.inventory),
        description: Set(fields.description),
        category_id: Set(category_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite every mutable field of an existing product.
pub async fn overwrite<C: ConnectionTrait>(db: &C, existing: Model, fields: ProductFields, category_id: Uuid) -> Result<Model, ModelError> {
    fields.validate()?;
    let mut am: ActiveModel = existing.into();
    am.name = Set(fields.name);
    am.brand = Set(fields.brand);
    am.price = Set(fields.price);
    am.inventory = Set(fields.inventory);
    am.description = Set(fields.description);
    am.category_id = Set(category_id);
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}

/// Insertion order. Rows sharing a `created_at` fall back to the v4 `id`,
/// so their relative order is stable across calls but arbitrary.
fn ordered(select: Select<Entity>) -> SelectTwo<Entity, category::Entity> {
    select
        .find_also_related(category::Entity)
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
}

pub async fn find_with_category<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<WithCategory>, ModelError> {
    Ok(Entity::find_by_id(id).find_also_related(category::Entity).one(db).await?)
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<WithCategory>, ModelError> {
    Ok(ordered(Entity::find()).all(db).await?)
}

pub async fn find_by_category_name<C: ConnectionTrait>(db: &C, category: &str) -> Result<Vec<WithCategory>, ModelError> {
    Ok(ordered(Entity::find())
        .filter(category::Column::Name.eq(category))
        .all(db)
        .await?)
}

pub async fn find_by_brand<C: ConnectionTrait>(db: &C, brand: &str) -> Result<Vec<WithCategory>, ModelError> {
    Ok(ordered(Entity::find().filter(Column::Brand.eq(brand))).all(db).await?)
}

pub async fn find_by_category_and_brand<C: ConnectionTrait>(db: &C, category: &str, brand: &str) -> Result<Vec<WithCategory>, ModelError> {
    Ok(ordered(Entity::find().filter(Column::Brand.eq(brand)))
        .filter(category::Column::Name.eq(category))
        .all(db)
        .await?)
}

pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Vec<WithCategory>, ModelError> {
    Ok(ordered(Entity::find().filter(Column::Name.eq(name))).all(db).await?)
}

pub async fn find_by_brand_and_name<C: ConnectionTrait>(db: &C, brand: &str, name: &str) -> Result<Vec<WithCategory>, ModelError> {
    Ok(ordered(
        Entity::find()
            .filter(Column::Brand.eq(brand))
            .filter(Column::Name.eq(name)),
    )
    .all(db)
    .await?)
}

pub async fn count_by_brand_and_name<C: ConnectionTrait>(db: &C, brand: &str, name: &str) -> Result<u64, ModelError> {
    Ok(Entity::find()
        .filter(Column::Brand.eq(brand))
        .filter(Column::Name.eq(name))
        .count(db)
        .await?)
}

/// Remove a product and its images; returns false when no such product exists.
pub async fn delete_cascade<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, ModelError> {
    image::delete_for_product(db, id).await?;
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
