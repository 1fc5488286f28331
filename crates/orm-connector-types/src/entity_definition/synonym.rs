use serde::{Deserialize, Serialize};

use super::{ColumnId, EntityId};

/// An alias pointing at another column. The field resolves to the aliased
/// column's type but is exposed under the alias's public name.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Synonym {
    pub(super) entity_id: EntityId,
    pub(super) client_name: String,
    pub(super) column: ColumnId,
}

impl Synonym {
    pub fn new(entity_id: EntityId, client_name: impl Into<String>, column: ColumnId) -> Self {
        Self {
            entity_id,
            client_name: client_name.into(),
            column,
        }
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn column(&self) -> ColumnId {
        self.column
    }
}
