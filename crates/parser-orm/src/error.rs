use graphql_registry::RegistryError;
use orm_connector_types::DefinitionError;
use thiserror::Error;

/// The error type of the external collaborators (sessions, queries, node
/// lookups). Opaque to this crate; preserved as the cause of the typed
/// failures below.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Construction-time failures. A broken schema must not partially start:
/// these are propagated out of the build entry points and never recovered.
#[derive(Debug, Error)]
pub enum SchemaBuildError {
    /// the converter was given a source type with no registered handler
    #[error("don't know how to convert the source type `{type_name}`")]
    UnsupportedType { type_name: String },

    #[error(transparent)]
    ModelNotMapped(#[from] DefinitionError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// a connection field was requested over a type without a connection
    #[error("the type `{type_name}` doesn't have a connection")]
    NotConnectionCapable { type_name: String },
}

/// Request-time failures during connection resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("a query on the model or a session in the request context is required for querying `{model}`")]
    NoQueryAvailable { model: String },

    #[error("querying the model failed")]
    Query(#[source] CollaboratorError),
}

/// Request-time failures during mutation resolution. Surfaced to the caller
/// as the mutation's error result, never silently dropped.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("no roles for user")]
    NoAuthorizedRoles,

    #[error("field `{0}` not allowed for user")]
    FieldNotAuthorized(String),

    /// the session has been rolled back and released before this is returned
    #[error("persisting the record failed")]
    PersistenceFailed { source: CollaboratorError },
}

impl MutationError {
    pub fn source_error(&self) -> Option<&CollaboratorError> {
        match self {
            MutationError::PersistenceFailed { source } => Some(source),
            _ => None,
        }
    }
}
