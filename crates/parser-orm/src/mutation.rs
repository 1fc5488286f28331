//! Mutation resolution: role-based field authorization merged with
//! create-or-update semantics against a request-scoped session.

use std::{
    collections::HashMap,
    sync::Arc,
};

use graphql_registry::{MetaType, Registry};
use orm_connector_types::{DefinitionError, EntityDefinition};
use serde_json::Value;

use crate::{
    error::{CollaboratorError, MutationError, SchemaBuildError},
    runtime::{EntitySession, Record, RequestContext},
};

/// The fields a role may write: everything, or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleFields {
    All,
    Fields(Vec<String>),
}

impl RoleFields {
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RoleFields::Fields(fields.into_iter().map(Into::into).collect())
    }
}

pub type RolesMap = HashMap<String, RoleFields>;

/// A configuration input that is either a direct value or a callable taking
/// the request context.
pub enum Provider<T> {
    Value(T),
    Callable(Box<dyn Fn(&RequestContext) -> T + Send + Sync>),
}

impl<T: Clone> Provider<T> {
    pub fn resolve(&self, ctx: &RequestContext) -> T {
        match self {
            Provider::Value(value) => value.clone(),
            Provider::Callable(callable) => callable(ctx),
        }
    }
}

impl<T> Provider<T> {
    pub fn callable(f: impl Fn(&RequestContext) -> T + Send + Sync + 'static) -> Self {
        Provider::Callable(Box::new(f))
    }
}

pub struct MutationOptions {
    pub session: Provider<Arc<dyn EntitySession>>,
    pub user_roles: Provider<Vec<String>>,
    pub roles_map: Provider<RolesMap>,
}

/// One upsert mutation over an entity model.
///
/// The relationship-to-foreign-key field map is built once here: it
/// translates between the GraphQL-facing relationship names and the
/// storage-facing foreign-key columns, in both directions.
pub struct MutationDefinition {
    model: String,
    primary_key: String,
    relation_fields: HashMap<String, String>,
    output_fields: Option<Vec<String>>,
    session: Provider<Arc<dyn EntitySession>>,
    user_roles: Provider<Vec<String>>,
    roles_map: Provider<RolesMap>,
}

impl MutationDefinition {
    pub fn new(
        definition: &EntityDefinition,
        model: &str,
        registry: &Registry,
        options: MutationOptions,
    ) -> Result<Self, SchemaBuildError> {
        let entity = definition
            .find_entity(model)
            .ok_or_else(|| DefinitionError::not_mapped(model, "unknown entity model"))?;
        definition.validate_entity(entity.id())?;

        let primary_key = entity
            .primary_key()
            .ok_or_else(|| DefinitionError::not_mapped(model, "mutations require a primary key"))?
            .client_name()
            .to_string();

        let relation_fields = entity
            .relations()
            .filter(|relation| relation.is_to_one())
            .filter_map(|relation| {
                relation.foreign_key_column().map(|fk| {
                    (
                        relation.client_field_name().to_string(),
                        fk.client_name().to_string(),
                    )
                })
            })
            .collect();

        // the output shape is pinned at definition time, matching the
        // caller's requested selection
        let output_fields = registry
            .get_model_type(model)
            .and_then(MetaType::as_object)
            .map(|object| {
                object
                    .fields
                    .keys()
                    .chain(object.deferred.keys())
                    .cloned()
                    .collect()
            });

        Ok(Self {
            model: model.to_string(),
            primary_key,
            relation_fields,
            output_fields,
            session: options.session,
            user_roles: options.user_roles,
            roles_map: options.roles_map,
        })
    }

    /// Resolves one mutate invocation: authorization, relationship renaming,
    /// upsert, commit, and output shaping. On persistence failure the
    /// session is rolled back and closed before the error propagates.
    pub async fn mutate(
        &self,
        ctx: &RequestContext,
        input: Record,
    ) -> Result<Record, MutationError> {
        let session = self.session.resolve(ctx);
        let user_roles = self.user_roles.resolve(ctx);
        let roles_map = self.roles_map.resolve(ctx);

        let data = self.authorized_fields(&user_roles, &roles_map, input)?;

        let mut record = Record::new();
        for (name, value) in data {
            let key = self.relation_fields.get(&name).cloned().unwrap_or(name);
            record.insert(key, value);
        }

        let persisted = match self.upsert(session.as_ref(), record).await {
            Ok(persisted) => persisted,
            Err(source) => {
                tracing::warn!(model = %self.model, "upsert failed, rolling back");

                if let Err(error) = session.rollback().await {
                    tracing::warn!(model = %self.model, %error, "rollback failed");
                }
                if let Err(error) = session.close().await {
                    tracing::warn!(model = %self.model, %error, "closing the session failed");
                }

                return Err(MutationError::PersistenceFailed { source });
            }
        };

        Ok(self.shape_output(persisted))
    }

    async fn upsert(
        &self,
        session: &dyn EntitySession,
        record: Record,
    ) -> Result<Record, CollaboratorError> {
        let pk = record
            .get(&self.primary_key)
            .filter(|value| !value.is_null())
            .cloned();

        let persisted = match pk {
            Some(pk_value) => match session.find_by_pk(&self.model, &pk_value).await? {
                Some(existing) => {
                    let changes: Record = record
                        .iter()
                        .filter(|(name, value)| existing.get(name.as_str()) != Some(*value))
                        .map(|(name, value)| ((*name).clone(), (*value).clone()))
                        .collect();

                    if changes.is_empty() {
                        existing
                    } else {
                        session.update(&self.model, &pk_value, changes).await?
                    }
                }
                None => session.insert(&self.model, record).await?,
            },
            None => session.insert(&self.model, record).await?,
        };

        session.commit().await?;

        Ok(persisted)
    }

    /// Merges the role permission maps over the input.
    ///
    /// A field passes when any applicable role allows it (the wildcard
    /// allows everything, an explicit list allows its entries plus the
    /// primary key), or when its value is empty. A non-empty field
    /// disallowed by every applicable role fails the mutation.
    fn authorized_fields(
        &self,
        user_roles: &[String],
        roles_map: &RolesMap,
        data: Record,
    ) -> Result<Record, MutationError> {
        let applicable: Vec<&RoleFields> = user_roles
            .iter()
            .filter_map(|role| roles_map.get(role))
            .collect();

        if applicable.is_empty() {
            return Err(MutationError::NoAuthorizedRoles);
        }

        if applicable
            .iter()
            .any(|fields| matches!(fields, RoleFields::All))
        {
            return Ok(data);
        }

        for (name, value) in &data {
            if value.is_null() {
                continue;
            }

            let allowed = applicable.iter().any(|fields| match fields {
                RoleFields::All => true,
                RoleFields::Fields(list) => {
                    list.iter().any(|field| field == name) || *name == self.primary_key
                }
            });

            if !allowed {
                return Err(MutationError::FieldNotAuthorized(name.clone()));
            }
        }

        Ok(data)
    }

    /// Re-shapes the persisted record to the requested output selection,
    /// renaming foreign-key columns back to their relationship names.
    fn shape_output(&self, record: Record) -> Record {
        let reverse: HashMap<&String, &String> = self
            .relation_fields
            .iter()
            .map(|(relation, fk)| (fk, relation))
            .collect();

        let renamed: Record = record
            .into_iter()
            .map(|(name, value)| match reverse.get(&name) {
                Some(relation) => ((*relation).clone(), value),
                None => (name, value),
            })
            .collect();

        match &self.output_fields {
            Some(fields) => fields
                .iter()
                .map(|field| {
                    (
                        field.clone(),
                        renamed.get(field).cloned().unwrap_or(Value::Null),
                    )
                })
                .collect(),
            None => renamed,
        }
    }
}
