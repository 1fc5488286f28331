//! Derives a GraphQL schema registry from relational entity-model
//! definitions.
//!
//! Given an [`EntityDefinition`](orm_connector_types::EntityDefinition)
//! describing mapped entities, the parser introspects columns,
//! relationships, composite attributes and computed properties, and produces
//! the corresponding GraphQL types in a memoizing
//! [`Registry`](graphql_registry::Registry): output and input object types,
//! pagination-capable connections with sortable queries, relay-style global
//! identifiers, and role-aware upsert mutations.
//!
//! Schema construction is single-threaded and happens once per registry;
//! after it completes the registry is read-only and safe to share. Request
//! time work (connection resolution, mutations, node lookups) delegates to
//! the collaborator contracts in [`runtime`].

pub mod attributes;
pub mod classify;
pub mod convert;
pub mod error;
pub mod fields;
pub mod mutation;
pub mod object_type;
pub mod relay;
pub mod runtime;

pub use attributes::{build_model_attributes, AssembledFields};
pub use classify::{iter_fields, ClassifiedField, ClassifiedMember, FieldKind};
pub use convert::{ConvertContext, ConvertHandler, Converter};
pub use error::{CollaboratorError, MutationError, ResolveError, SchemaBuildError};
pub use fields::{
    parse_sort_symbol, sort_argument_for_entity, Connection, ConnectionField, SortArgument,
};
pub use mutation::{MutationDefinition, MutationOptions, Provider, RoleFields, RolesMap};
pub use object_type::{
    build_input_type, build_output_type, default_connection_field_factory,
    finalize_deferred_fields, resolve_deferred_field, ConnectionFieldFactory, TypeOptions,
    NODE_INTERFACE,
};
pub use relay::{from_global_id, to_global_id, NodeGetter, NodeResolver};
pub use runtime::{
    get_query, ColumnOrdering, ConnectionArguments, Edge, EntityQuery, EntitySession, Page,
    PageInfo, Paginate, QuerySource, Record, RequestContext, SlicePaginator,
};
