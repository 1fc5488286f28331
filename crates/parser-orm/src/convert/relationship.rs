use graphql_registry::{
    DeferredField, InputObjectType, MetaField, MetaFieldType, MetaInputValue, Registry,
};
use orm_connector_types::{DefinitionError, RelationWalker};

use super::Converter;
use crate::error::SchemaBuildError;

pub(crate) enum RelationshipField {
    /// A by-name reference, resolved once the target model's type exists.
    Deferred(DeferredField),
    Concrete(MetaField),
}

/// Converts a relationship.
///
/// Output mode produces a deferred field: the target type may not exist yet
/// (forward and cyclic references), so the reference is recorded by model
/// name and materialized later by registry lookup.
///
/// Input mode must not require the full nested object graph. A to-one
/// relationship reduces to a non-required scalar over its foreign-key
/// column; a to-many relationship takes a list of minimal nested inputs
/// carrying only the target's primary key.
pub(crate) fn convert_relationship(
    relation: RelationWalker<'_>,
    registry: &mut Registry,
    converter: &Converter,
    input_mode: bool,
) -> Result<RelationshipField, SchemaBuildError> {
    let target = relation.referenced_entity();

    if !input_mode {
        let mut deferred = DeferredField::new(relation.client_field_name(), target.client_name());

        if relation.is_collection() {
            deferred = deferred.to_many();
        } else if let Some(fk) = relation.foreign_key_column() {
            if !fk.nullable() {
                deferred = deferred.non_nullable();
            }
        }

        return Ok(RelationshipField::Deferred(deferred));
    }

    if relation.is_to_one() {
        let fk = relation.foreign_key_column().ok_or_else(|| {
            DefinitionError::not_mapped(
                relation.referencing_entity().client_name(),
                format!(
                    "to-one relationship `{}` has no foreign key column",
                    relation.client_field_name()
                ),
            )
        })?;

        // the reference may be omitted to leave the association unset
        let field =
            converter.convert_column(fk, relation.client_field_name(), registry, true, true)?;

        return Ok(RelationshipField::Concrete(field));
    }

    let pk = target.primary_key().ok_or_else(|| {
        DefinitionError::not_mapped(
            target.client_name(),
            "a to-many input reference requires a primary key on the target",
        )
    })?;

    let type_name = format!("{}PrimaryKeyInput", target.client_name());

    if registry.lookup_type(&type_name).is_none() {
        let mut pk_field =
            MetaInputValue::new(pk.client_name(), MetaFieldType::named("ID").non_null());
        pk_field.rename = Some(pk.database_name().to_string());

        registry.create_type(InputObjectType::new(type_name.clone(), [pk_field]));
    }

    let ty = MetaFieldType::named(type_name).non_null().list();

    Ok(RelationshipField::Concrete(MetaField::new(
        relation.client_field_name(),
        ty,
    )))
}
