use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Column, ColumnId, Entity, EntityId, Enum, EnumId};

/// Lookup index from client-facing names to ids.
#[derive(Default, Serialize, Deserialize, Debug, Clone)]
pub(super) struct Names {
    #[serde(with = "super::vectorize")]
    entities: HashMap<String, EntityId>,
    #[serde(with = "super::vectorize")]
    columns: HashMap<(EntityId, String), ColumnId>,
    #[serde(with = "super::vectorize")]
    enums: HashMap<String, EnumId>,
}

impl Names {
    pub(super) fn intern_entity(&mut self, entity: &Entity, id: EntityId) {
        self.entities.insert(entity.client_name().to_string(), id);
    }

    pub(super) fn intern_column(&mut self, column: &Column, id: ColumnId) {
        self.columns
            .insert((column.entity_id(), column.client_name().to_string()), id);
    }

    pub(super) fn intern_enum(&mut self, r#enum: &Enum, id: EnumId) {
        self.enums.insert(r#enum.client_name().to_string(), id);
    }

    pub(super) fn get_entity_id(&self, client_name: &str) -> Option<EntityId> {
        self.entities.get(client_name).copied()
    }

    pub(super) fn get_column_id(&self, entity_id: EntityId, client_name: &str) -> Option<ColumnId> {
        self.columns
            .get(&(entity_id, client_name.to_string()))
            .copied()
    }

    pub(super) fn get_enum_id(&self, client_name: &str) -> Option<EnumId> {
        self.enums.get(client_name).copied()
    }
}
