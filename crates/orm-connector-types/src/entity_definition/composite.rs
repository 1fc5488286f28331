use serde::{Deserialize, Serialize};

use super::{ColumnId, EntityId};

/// A composite attribute grouping multiple columns under one logical value.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Composite {
    pub(super) entity_id: EntityId,
    pub(super) client_name: String,
    /// The logical type name of the composite value; the cache key for the
    /// generated nested type.
    pub(super) type_name: String,
    pub(super) columns: Vec<ColumnId>,
}

impl Composite {
    pub fn new(
        entity_id: EntityId,
        client_name: impl Into<String>,
        type_name: impl Into<String>,
        columns: Vec<ColumnId>,
    ) -> Self {
        Self {
            entity_id,
            client_name: client_name.into(),
            type_name: type_name.into(),
            columns,
        }
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }
}
