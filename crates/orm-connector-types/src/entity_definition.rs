mod column;
mod column_type;
mod composite;
mod entity;
mod r#enum;
mod enum_variant;
mod hybrid;
mod ids;
mod names;
mod relation;
mod synonym;
mod vectorize;
mod walkers;

use serde::{Deserialize, Serialize};

pub use column::Column;
pub use column_type::{ColumnType, TypeTag};
pub use composite::Composite;
pub use entity::Entity;
pub use enum_variant::EnumVariant;
pub use hybrid::{Hybrid, HybridReturn};
pub use ids::{
    ColumnId, CompositeId, EntityId, EnumId, EnumVariantId, HybridId, RelationId, SynonymId,
};
pub use r#enum::Enum;
pub use relation::{Relation, RelationKind};
pub use synonym::Synonym;
pub use walkers::{
    ColumnWalker, CompositeWalker, EntityWalker, EnumVariantWalker, EnumWalker, HybridWalker,
    RelationWalker, SynonymWalker, Walker,
};

use names::Names;

use crate::DefinitionError;

/// Definition of every entity model visible to the schema parser. Contains
/// the entities, their columns, relationships, composite attributes, computed
/// properties, synonyms and native enums.
///
/// The definition is populated through the `push_*` methods and immutable
/// afterwards from the parser's perspective: the parser only reads it through
/// the walker accessors and the `find_*` lookups.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EntityDefinition {
    /// Ordered by insertion; addressed by [`EntityId`].
    entities: Vec<Entity>,
    /// Ordered by entity id, then declaration order.
    columns: Vec<Column>,
    relations: Vec<Relation>,
    composites: Vec<Composite>,
    hybrids: Vec<Hybrid>,
    synonyms: Vec<Synonym>,
    enums: Vec<Enum>,
    enum_variants: Vec<EnumVariant>,
    names: Names,
}

impl EntityDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over all entity models of the definition.
    pub fn entities(&self) -> impl ExactSizeIterator<Item = EntityWalker<'_>> + '_ {
        (0..self.entities.len()).map(move |id| self.walk(EntityId(id as u32)))
    }

    /// Iterates over all native enums of the definition.
    pub fn enums(&self) -> impl ExactSizeIterator<Item = EnumWalker<'_>> + '_ {
        (0..self.enums.len()).map(move |id| self.walk(EnumId(id as u32)))
    }

    /// Finds an entity model by its client (GraphQL-facing) name.
    pub fn find_entity(&self, client_name: &str) -> Option<EntityWalker<'_>> {
        self.names
            .get_entity_id(client_name)
            .map(|id| self.walk(id))
    }

    /// Finds a column of an entity by its client name.
    pub fn find_column(&self, entity_id: EntityId, client_name: &str) -> Option<ColumnWalker<'_>> {
        self.names
            .get_column_id(entity_id, client_name)
            .map(|id| self.walk(id))
    }

    /// Finds a native enum by its client name.
    pub fn find_enum(&self, client_name: &str) -> Option<EnumWalker<'_>> {
        self.names.get_enum_id(client_name).map(|id| self.walk(id))
    }

    /// Adds an entity to the definition.
    pub fn push_entity(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.entities.len() as u32);
        self.names.intern_entity(&entity, id);
        self.entities.push(entity);

        id
    }

    /// Adds a column to the definition.
    pub fn push_column(&mut self, column: Column) -> ColumnId {
        let id = ColumnId(self.columns.len() as u32);
        self.names.intern_column(&column, id);
        self.columns.push(column);

        id
    }

    /// Adds a relationship between two entities to the definition.
    pub fn push_relation(&mut self, relation: Relation) -> RelationId {
        let id = RelationId(self.relations.len() as u32);
        self.relations.push(relation);

        id
    }

    /// Adds a composite attribute to the definition.
    pub fn push_composite(&mut self, composite: Composite) -> CompositeId {
        let id = CompositeId(self.composites.len() as u32);
        self.composites.push(composite);

        id
    }

    /// Adds a computed property to the definition.
    pub fn push_hybrid(&mut self, hybrid: Hybrid) -> HybridId {
        let id = HybridId(self.hybrids.len() as u32);
        self.hybrids.push(hybrid);

        id
    }

    /// Adds a synonym redirecting an alias to an existing column.
    pub fn push_synonym(&mut self, synonym: Synonym) -> SynonymId {
        let id = SynonymId(self.synonyms.len() as u32);
        self.synonyms.push(synonym);

        id
    }

    /// Adds a native enum to the definition.
    pub fn push_enum(&mut self, r#enum: Enum) -> EnumId {
        let id = EnumId(self.enums.len() as u32);
        self.names.intern_enum(&r#enum, id);
        self.enums.push(r#enum);

        id
    }

    /// Adds an enum variant to the definition.
    pub fn push_enum_variant(&mut self, variant: EnumVariant) -> EnumVariantId {
        let id = EnumVariantId(self.enum_variants.len() as u32);
        self.enum_variants.push(variant);

        id
    }

    /// Structural validation of one entity model. A model with no columns, or
    /// a to-one relationship without a backing foreign-key column, is not
    /// usable for type generation.
    pub fn validate_entity(&self, id: EntityId) -> crate::Result<()> {
        let entity = self.walk(id);

        if entity.columns().next().is_none() {
            return Err(DefinitionError::not_mapped(
                entity.client_name(),
                "the entity has no columns",
            ));
        }

        for relation in entity.relations() {
            if relation.is_to_one() && relation.foreign_key_column().is_none() {
                return Err(DefinitionError::not_mapped(
                    entity.client_name(),
                    format!(
                        "to-one relationship `{}` has no foreign key column",
                        relation.client_field_name()
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Walk an item in the definition by its ID.
    pub fn walk<Id>(&self, id: Id) -> Walker<'_, Id> {
        Walker {
            id,
            definition: self,
        }
    }

    pub(crate) fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.0 as usize]
    }

    pub(crate) fn column(&self, id: ColumnId) -> &Column {
        &self.columns[id.0 as usize]
    }

    pub(crate) fn relation(&self, id: RelationId) -> &Relation {
        &self.relations[id.0 as usize]
    }

    pub(crate) fn composite(&self, id: CompositeId) -> &Composite {
        &self.composites[id.0 as usize]
    }

    pub(crate) fn hybrid(&self, id: HybridId) -> &Hybrid {
        &self.hybrids[id.0 as usize]
    }

    pub(crate) fn synonym(&self, id: SynonymId) -> &Synonym {
        &self.synonyms[id.0 as usize]
    }

    pub(crate) fn r#enum(&self, id: EnumId) -> &Enum {
        &self.enums[id.0 as usize]
    }

    pub(crate) fn columns_of(&self, entity_id: EntityId) -> impl Iterator<Item = ColumnId> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter(move |(_, column)| column.entity_id() == entity_id)
            .map(|(idx, _)| ColumnId(idx as u32))
    }

    pub(crate) fn relations_of(&self, entity_id: EntityId) -> impl Iterator<Item = RelationId> + '_ {
        self.relations
            .iter()
            .enumerate()
            .filter(move |(_, relation)| relation.referencing_entity() == entity_id)
            .map(|(idx, _)| RelationId(idx as u32))
    }

    pub(crate) fn composites_of(
        &self,
        entity_id: EntityId,
    ) -> impl Iterator<Item = CompositeId> + '_ {
        self.composites
            .iter()
            .enumerate()
            .filter(move |(_, composite)| composite.entity_id() == entity_id)
            .map(|(idx, _)| CompositeId(idx as u32))
    }

    pub(crate) fn hybrids_of(&self, entity_id: EntityId) -> impl Iterator<Item = HybridId> + '_ {
        self.hybrids
            .iter()
            .enumerate()
            .filter(move |(_, hybrid)| hybrid.entity_id() == entity_id)
            .map(|(idx, _)| HybridId(idx as u32))
    }

    pub(crate) fn synonyms_of(&self, entity_id: EntityId) -> impl Iterator<Item = SynonymId> + '_ {
        self.synonyms
            .iter()
            .enumerate()
            .filter(move |(_, synonym)| synonym.entity_id() == entity_id)
            .map(|(idx, _)| SynonymId(idx as u32))
    }

    pub(crate) fn variants_of(&self, enum_id: EnumId) -> impl Iterator<Item = EnumVariantId> + '_ {
        self.enum_variants
            .iter()
            .enumerate()
            .filter(move |(_, variant)| variant.enum_id() == enum_id)
            .map(|(idx, _)| EnumVariantId(idx as u32))
    }

    pub(crate) fn enum_variant(&self, id: EnumVariantId) -> &EnumVariant {
        &self.enum_variants[id.0 as usize]
    }
}
