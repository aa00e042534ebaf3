use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, product};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Product }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Product => Entity::has_many(product::Entity).into(),
        }
    }
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef { Relation::Product.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub const NAME_MAX_LEN: usize = 128;

/// Names are matched exactly, so only blank or oversized names are rejected.
pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("category name required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(ModelError::Validation(format!("category name longer than {NAME_MAX_LEN} characters")));
    }
    Ok(())
}

/// Insert a category unless the name is already taken.
/// Returns `None` when another row owns the name; never fails on the duplicate itself.
pub async fn insert_if_absent<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<Model>, ModelError> {
    validate_name(name)?;
    let model = Model { id: Uuid::new_v4(), name: name.to_string(), created_at: Utc::now().into() };
    let am = ActiveModel {
        id: Set(model.id),
        name: Set(model.name.clone()),
        created_at: Set(model.created_at),
    };
    let inserted = Entity::insert(am)
        .on_conflict(OnConflict::column(Column::Name).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    Ok((inserted > 0).then_some(model))
}

pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Name.eq(name)).one(db).await?)
}

/// Get-or-create keyed by name.
///
/// The insert is conflict-tolerant, so two concurrent callers with the same
/// new name both end up reading the single row that won.
pub async fn get_or_create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, ModelError> {
    if let Some(created) = insert_if_absent(db, name).await? {
        return Ok(created);
    }
    find_by_name(db, name)
        .await?
        .ok_or_else(|| ModelError::Db(DbErr::RecordNotFound(format!("category {name} vanished after conflict"))))
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Name).all(db).await?)
}

pub async fn rename<C: ConnectionTrait>(db: &C, existing: Model, name: &str) -> Result<Model, ModelError> {
    validate_name(name)?;
    let mut am: ActiveModel = existing.into();
    am.name = Set(name.to_string());
    Ok(am.update(db).await?)
}

/// Number of products still pointing at this category.
pub async fn product_count<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, ModelError> {
    use sea_orm::PaginatorTrait;
    Ok(product::Entity::find().filter(product::Column::CategoryId.eq(id)).count(db).await?)
}
