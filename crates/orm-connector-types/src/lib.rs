//! Structural metadata of relational entity models.
//!
//! The [`EntityDefinition`] describes every mapped entity the GraphQL parser
//! can see: columns with their source types, relationships between entities,
//! composite attributes, computed (hybrid) properties, synonyms and native
//! enums. The definition is built once, validated, and from then on only read
//! through the walker accessors.

mod entity_definition;
mod error;

pub use entity_definition::{
    Column, ColumnId, ColumnType, ColumnWalker, Composite, CompositeId, CompositeWalker, Entity,
    EntityDefinition, EntityId, EntityWalker, Enum, EnumId, EnumVariant, EnumVariantId,
    EnumVariantWalker, EnumWalker, Hybrid, HybridId, HybridReturn, HybridWalker, Relation,
    RelationId, RelationKind, RelationWalker, Synonym, SynonymId, SynonymWalker, TypeTag, Walker,
};
pub use error::DefinitionError;

pub type Result<T> = std::result::Result<T, DefinitionError>;
