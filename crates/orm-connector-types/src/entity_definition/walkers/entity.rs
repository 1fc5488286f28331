use super::{
    ColumnWalker, CompositeWalker, HybridWalker, RelationWalker, SynonymWalker, Walker,
};
use crate::entity_definition::{Entity, EntityId};

/// An entity model definition.
pub type EntityWalker<'a> = Walker<'a, EntityId>;

impl<'a> EntityWalker<'a> {
    /// The name of the entity in storage.
    pub fn database_name(self) -> &'a str {
        self.get().database_name()
    }

    /// The name of the entity in the GraphQL APIs.
    pub fn client_name(self) -> &'a str {
        self.get().client_name()
    }

    /// The columns of this entity, in declaration order.
    pub fn columns(self) -> impl Iterator<Item = ColumnWalker<'a>> {
        self.definition
            .columns_of(self.id)
            .map(move |id| self.walk(id))
    }

    /// The relationships referencing out of this entity.
    pub fn relations(self) -> impl Iterator<Item = RelationWalker<'a>> {
        self.definition
            .relations_of(self.id)
            .map(move |id| self.walk(id))
    }

    /// The composite attributes of this entity.
    pub fn composites(self) -> impl Iterator<Item = CompositeWalker<'a>> {
        self.definition
            .composites_of(self.id)
            .map(move |id| self.walk(id))
    }

    /// The computed properties of this entity.
    pub fn hybrids(self) -> impl Iterator<Item = HybridWalker<'a>> {
        self.definition
            .hybrids_of(self.id)
            .map(move |id| self.walk(id))
    }

    /// The synonyms of this entity.
    pub fn synonyms(self) -> impl Iterator<Item = SynonymWalker<'a>> {
        self.definition
            .synonyms_of(self.id)
            .map(move |id| self.walk(id))
    }

    /// The first primary-key column of this entity, if any.
    pub fn primary_key(self) -> Option<ColumnWalker<'a>> {
        self.columns().find(|column| column.is_primary_key())
    }

    /// Finds a column of this entity by its client name.
    pub fn find_column(self, client_name: &str) -> Option<ColumnWalker<'a>> {
        self.definition.find_column(self.id, client_name)
    }

    fn get(self) -> &'a Entity {
        self.definition.entity(self.id)
    }
}
