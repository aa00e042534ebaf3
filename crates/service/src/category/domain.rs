use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Create/rename input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
}

/// Category as exposed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: Uuid,
    pub name: String,
}

impl From<models::category::Model> for CategoryDto {
    fn from(m: models::category::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}
