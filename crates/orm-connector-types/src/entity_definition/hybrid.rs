use serde::{Deserialize, Serialize};

use super::{ColumnType, EntityId};

/// The declared return type of a computed property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HybridReturn {
    Scalar(ColumnType),
    /// The property returns another entity model; a nested type is generated
    /// for it under a property-derived name.
    Entity(EntityId),
    Unspecified,
}

/// A computed property: a model member whose value is derived, not stored.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Hybrid {
    pub(super) entity_id: EntityId,
    pub(super) client_name: String,
    pub(super) returns: HybridReturn,
    pub(super) description: Option<String>,
}

impl Hybrid {
    pub fn new(entity_id: EntityId, client_name: impl Into<String>, returns: HybridReturn) -> Self {
        Self {
            entity_id,
            client_name: client_name.into(),
            returns,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn returns(&self) -> &HybridReturn {
        &self.returns
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
