//! The assembler: runs the classifier over an entity, dispatches each member
//! to the converter, and produces cached attribute bundles and ordered field
//! maps.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use graphql_registry::{
    input_values_from_fields, AttributesBundle, DeferredField, InputObjectType, MetaField,
    MetaFieldType, ObjectType, Registry,
};
use indexmap::IndexMap;
use orm_connector_types::{DefinitionError, EntityDefinition, EntityWalker};

use crate::{
    classify::{iter_fields, ClassifiedMember, FieldKind},
    convert::{
        column_required,
        composite::convert_composite,
        hybrid::convert_hybrid,
        relationship::{convert_relationship, RelationshipField},
        Converter,
    },
    error::SchemaBuildError,
};

pub(crate) struct AssembleOptions<'a> {
    pub only_fields: &'a [String],
    pub exclude_fields: &'a [String],
    pub type_overrides: &'a HashMap<String, MetaFieldType>,
}

/// The converted members of one entity, grouped by kind. Groups merge in
/// precedence order: relationships, composites, columns, computed
/// properties.
#[derive(Default)]
pub struct AssembledFields {
    pub relations: IndexMap<String, MetaField>,
    pub deferred: IndexMap<String, DeferredField>,
    pub composites: IndexMap<String, MetaField>,
    pub scalars: IndexMap<String, MetaField>,
    pub hybrids: IndexMap<String, MetaField>,
}

impl AssembledFields {
    /// Merges the groups into one ordered field map. First write wins;
    /// deferred relationship names count as taken.
    pub fn merged(self) -> (IndexMap<String, MetaField>, IndexMap<String, DeferredField>) {
        let mut fields = IndexMap::new();
        let deferred = self.deferred;

        for group in [self.relations, self.composites, self.scalars, self.hybrids] {
            for (name, field) in group {
                if deferred.contains_key(&name) || fields.contains_key(&name) {
                    tracing::debug!(field = %name, "dropping duplicate field");
                    continue;
                }

                fields.insert(name, field);
            }
        }

        (fields, deferred)
    }
}

/// Classifies and converts the wanted member kinds of an entity.
///
/// To-one relationships record their backing foreign-key column's client
/// name in a per-call exclusion set: the same storage column must not also
/// surface as an independent scalar field.
pub(crate) fn build_fields(
    entity: EntityWalker<'_>,
    registry: &mut Registry,
    converter: &Converter,
    options: &AssembleOptions<'_>,
    kinds: &[FieldKind],
    input_mode: bool,
) -> Result<AssembledFields, SchemaBuildError> {
    let mut assembled = AssembledFields::default();
    let mut fk_exclusions: HashSet<String> = HashSet::new();
    let mut taken: HashSet<String> = HashSet::new();

    for field in iter_fields(entity, options.only_fields, options.exclude_fields) {
        if !kinds.contains(&field.kind) {
            continue;
        }

        if taken.contains(field.name) {
            tracing::debug!(field = %field.name, "dropping duplicate field name");
            continue;
        }

        match field.member {
            ClassifiedMember::Relation(relation) => {
                if relation.is_to_one() {
                    if let Some(fk) = relation.foreign_key_column() {
                        fk_exclusions.insert(fk.client_name().to_string());
                    }
                }

                if let Some(ty) = options.type_overrides.get(field.name) {
                    assembled
                        .relations
                        .insert(field.name.to_string(), MetaField::new(field.name, ty.clone()));
                } else {
                    match convert_relationship(relation, registry, converter, input_mode)? {
                        RelationshipField::Deferred(value) => {
                            assembled.deferred.insert(field.name.to_string(), value);
                        }
                        RelationshipField::Concrete(value) => {
                            assembled.relations.insert(field.name.to_string(), value);
                        }
                    }
                }
            }
            ClassifiedMember::Column(column) => {
                if fk_exclusions.contains(field.name) {
                    tracing::debug!(
                        field = %field.name,
                        "skipping the foreign key column backing a relationship"
                    );
                    continue;
                }

                let converted = match options.type_overrides.get(field.name) {
                    Some(ty) => {
                        let ty = if column_required(column, input_mode, false) {
                            ty.clone().non_null()
                        } else {
                            ty.clone()
                        };

                        let mut value = MetaField::new(field.name, ty);
                        value.mapped_name = Some(column.database_name().to_string());
                        value.description = column.description().map(ToOwned::to_owned);
                        value
                    }
                    None => {
                        converter.convert_column(column, field.name, registry, input_mode, false)?
                    }
                };

                assembled.scalars.insert(field.name.to_string(), converted);
            }
            ClassifiedMember::Composite(composite) => {
                let converted = convert_composite(composite, registry, converter, input_mode)?;
                assembled
                    .composites
                    .insert(field.name.to_string(), converted);
            }
            ClassifiedMember::Hybrid(hybrid) => {
                let converted = convert_hybrid(hybrid, registry, converter, input_mode)?;
                assembled.hybrids.insert(field.name.to_string(), converted);
            }
        }

        taken.insert(field.name.to_string());
    }

    Ok(assembled)
}

/// Builds (or returns the cached) attributes bundle of an entity: its scalar
/// and relationship fields, memoized per (model, mode) bundle name.
pub(crate) fn build_attributes(
    entity: EntityWalker<'_>,
    registry: &mut Registry,
    converter: &Converter,
    options: &AssembleOptions<'_>,
    input_mode: bool,
) -> Result<Arc<AttributesBundle>, SchemaBuildError> {
    let bundle_name = if input_mode {
        format!("{}InputAttributes", entity.client_name())
    } else {
        format!("{}Attributes", entity.client_name())
    };

    if let Some(existing) = registry.get_attributes(&bundle_name) {
        tracing::debug!(bundle = %bundle_name, "attributes cache hit");
        return Ok(existing);
    }

    let assembled = build_fields(
        entity,
        registry,
        converter,
        options,
        &[FieldKind::Scalar, FieldKind::Relationship],
        input_mode,
    )?;

    let mut bundle = AttributesBundle::new(bundle_name);
    bundle.relations = assembled.relations;
    bundle.deferred = assembled.deferred;
    bundle.scalars = assembled.scalars;

    Ok(registry.register_attributes(bundle))
}

/// The public path to a model's attributes bundle, without filters or
/// overrides.
pub fn build_model_attributes(
    definition: &EntityDefinition,
    model: &str,
    registry: &mut Registry,
    converter: &Converter,
    input_mode: bool,
) -> Result<Arc<AttributesBundle>, SchemaBuildError> {
    let entity = definition
        .find_entity(model)
        .ok_or_else(|| DefinitionError::not_mapped(model, "unknown entity model"))?;

    let type_overrides = HashMap::new();
    let options = AssembleOptions {
        only_fields: &[],
        exclude_fields: &[],
        type_overrides: &type_overrides,
    };

    build_attributes(entity, registry, converter, &options, input_mode)
}

/// Builds a nested type over an entity's members, for composite values and
/// entity-returning computed properties.
pub(crate) fn build_nested_type(
    entity: EntityWalker<'_>,
    type_name: &str,
    registry: &mut Registry,
    converter: &Converter,
    kinds: &[FieldKind],
    input_mode: bool,
) -> Result<(), SchemaBuildError> {
    let type_overrides = HashMap::new();
    let options = AssembleOptions {
        only_fields: &[],
        exclude_fields: &[],
        type_overrides: &type_overrides,
    };

    let assembled = build_fields(entity, registry, converter, &options, kinds, input_mode)?;
    let (fields, _) = assembled.merged();

    if input_mode {
        registry.create_type(InputObjectType::new(
            type_name,
            input_values_from_fields(fields).into_values(),
        ));
    } else {
        registry.create_type(ObjectType::new(type_name, fields.into_values()));
    }

    Ok(())
}
