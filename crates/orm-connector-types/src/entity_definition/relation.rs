use serde::{Deserialize, Serialize};

use super::{ColumnId, EntityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationKind {
    ManyToOne,
    OneToMany,
    ManyToMany,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Relation {
    pub(super) referencing_entity: EntityId,
    pub(super) referenced_entity: EntityId,
    pub(super) client_field_name: String,
    pub(super) kind: RelationKind,
    /// When false, a one-to-many relationship collapses to a single row.
    pub(super) uselist: bool,
    /// The backing foreign-key column on the referencing side. Present for
    /// every to-one relationship.
    pub(super) foreign_key_column: Option<ColumnId>,
}

impl Relation {
    pub fn new(
        referencing_entity: EntityId,
        referenced_entity: EntityId,
        client_field_name: impl Into<String>,
        kind: RelationKind,
    ) -> Self {
        Self {
            referencing_entity,
            referenced_entity,
            client_field_name: client_field_name.into(),
            kind,
            uselist: !matches!(kind, RelationKind::ManyToOne),
            foreign_key_column: None,
        }
    }

    pub fn with_uselist(mut self, uselist: bool) -> Self {
        self.uselist = uselist;
        self
    }

    pub fn with_foreign_key(mut self, column: ColumnId) -> Self {
        self.foreign_key_column = Some(column);
        self
    }

    pub fn referencing_entity(&self) -> EntityId {
        self.referencing_entity
    }

    pub fn referenced_entity(&self) -> EntityId {
        self.referenced_entity
    }

    pub fn client_field_name(&self) -> &str {
        &self.client_field_name
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn uselist(&self) -> bool {
        self.uselist
    }

    pub fn foreign_key_column(&self) -> Option<ColumnId> {
        self.foreign_key_column
    }
}
