use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, product};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "image")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub file_name: String,
    pub file_type: String,
    #[sea_orm(column_type = "Blob")]
    #[serde(skip_serializing)]
    pub data: Vec<u8>,
    pub download_url: String,
    pub product_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Product }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Product => Entity::belongs_to(product::Entity)
                .from(Column::ProductId)
                .to(product::Column::Id)
                .into(),
        }
    }
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef { Relation::Product.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// File content as received from an upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub file_type: String,
    pub data: Vec<u8>,
}

impl ImageFile {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.file_name.trim().is_empty() {
            return Err(ModelError::Validation("file name required".into()));
        }
        if !self.file_type.contains('/') {
            return Err(ModelError::Validation(format!("invalid content type: {:?}", self.file_type)));
        }
        Ok(())
    }
}

/// Download location of an image; embeds the image id.
pub fn download_url(api_prefix: &str, id: Uuid) -> String {
    format!("{api_prefix}/images/image/download/{id}")
}

/// Insert an image with its id and download url fixed up front, so the row is
/// complete from the first write.
pub async fn insert<C: ConnectionTrait>(db: &C, product_id: Uuid, file: ImageFile, api_prefix: &str) -> Result<Model, ModelError> {
    file.validate()?;
    let id = Uuid::new_v4();
    let am = ActiveModel {
        id: Set(id),
        file_name: Set(file.file_name),
        file_type: Set(file.file_type),
        data: Set(file.data),
        download_url: Set(download_url(api_prefix, id)),
        product_id: Set(product_id),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

/// Replace name, type and bytes. The download url is left untouched.
pub async fn overwrite<C: ConnectionTrait>(db: &C, existing: Model, file: ImageFile) -> Result<Model, ModelError> {
    file.validate()?;
    let mut am: ActiveModel = existing.into();
    am.file_name = Set(file.file_name);
    am.file_type = Set(file.file_type);
    am.data = Set(file.data);
    Ok(am.update(db).await?)
}

/// Images of a product in upload order. Rows written in the same clock tick
/// fall back to the random v4 `id`, which is stable across calls but not the
/// order the files were sent in.
pub async fn find_by_product<C: ConnectionTrait>(db: &C, product_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::ProductId.eq(product_id))
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn delete_for_product<C: ConnectionTrait>(db: &C, product_id: Uuid) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::ProductId.eq(product_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
