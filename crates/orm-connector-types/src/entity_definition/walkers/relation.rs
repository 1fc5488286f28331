use super::{ColumnWalker, EntityWalker, Walker};
use crate::entity_definition::{Relation, RelationId, RelationKind};

/// A relationship between two entity models.
pub type RelationWalker<'a> = Walker<'a, RelationId>;

impl<'a> RelationWalker<'a> {
    /// The entity holding the relationship field.
    pub fn referencing_entity(self) -> EntityWalker<'a> {
        self.walk(self.get().referencing_entity())
    }

    /// The entity the relationship points at.
    pub fn referenced_entity(self) -> EntityWalker<'a> {
        self.walk(self.get().referenced_entity())
    }

    /// The name of the relationship field in the GraphQL APIs.
    pub fn client_field_name(self) -> &'a str {
        self.get().client_field_name()
    }

    pub fn kind(self) -> RelationKind {
        self.get().kind()
    }

    /// True when the relationship resolves to a collection of rows.
    pub fn is_collection(self) -> bool {
        !matches!(self.kind(), RelationKind::ManyToOne) && self.get().uselist()
    }

    pub fn is_to_one(self) -> bool {
        !self.is_collection()
    }

    /// The backing foreign-key column on the referencing side.
    pub fn foreign_key_column(self) -> Option<ColumnWalker<'a>> {
        self.get().foreign_key_column().map(|id| self.walk(id))
    }

    fn get(self) -> &'a Relation {
        self.definition.relation(self.id)
    }
}
