use inflector::Inflector;
use serde::{Deserialize, Serialize};

use super::{ColumnType, EntityId};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Column {
    pub(super) entity_id: EntityId,
    pub(super) database_name: String,
    pub(super) client_name: String,
    pub(super) column_type: ColumnType,
    pub(super) nullable: bool,
    pub(super) has_default: bool,
    pub(super) is_primary_key: bool,
    pub(super) description: Option<String>,
}

impl Column {
    pub fn new(entity_id: EntityId, name: impl Into<String>, column_type: ColumnType) -> Self {
        let database_name = name.into();
        let client_name = database_name.to_camel_case();

        Self {
            entity_id,
            database_name,
            client_name,
            column_type,
            nullable: true,
            has_default: false,
            is_primary_key: false,
            description: None,
        }
    }

    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    pub fn non_nullable(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.nullable = false;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn has_default(&self) -> bool {
        self.has_default
    }

    pub fn is_primary_key(&self) -> bool {
        self.is_primary_key
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
