//! Output and input type construction: the entry points a schema definition
//! calls per entity model.

use std::{collections::HashMap, sync::Arc};

use graphql_registry::{
    AttributesBundle, DeferredField, InputObjectType, MetaField, MetaFieldType, MetaInputValue,
    MetaType, ObjectType, Registry,
};
use indexmap::IndexMap;
use orm_connector_types::{DefinitionError, EntityDefinition};

use crate::{
    attributes::{build_attributes, build_fields, AssembleOptions},
    classify::FieldKind,
    convert::Converter,
    error::SchemaBuildError,
};

/// The interface marking relay-identified, connection-capable types.
pub const NODE_INTERFACE: &str = "Node";

/// Produces the concrete field of a resolved to-many reference over a
/// connection-capable target.
pub type ConnectionFieldFactory = fn(&Registry, &DeferredField, &str, &str) -> MetaField;

pub fn default_connection_field_factory(
    _registry: &Registry,
    deferred: &DeferredField,
    _target_type: &str,
    connection_type: &str,
) -> MetaField {
    let mut field = MetaField::new(&deferred.name, MetaFieldType::named(connection_type));

    field.push_arg(MetaInputValue::new("first", "Int"));
    field.push_arg(MetaInputValue::new("last", "Int"));
    field.push_arg(MetaInputValue::new("before", "String"));
    field.push_arg(MetaInputValue::new("after", "String"));

    field.description = deferred.description.clone();

    field
}

/// Options of the type construction entry points.
pub struct TypeOptions {
    /// A pre-built attributes bundle, skipping bundle assembly.
    pub attributes: Option<Arc<AttributesBundle>>,
    /// Keeps the type out of the registry model namespace; it is still
    /// created as a named type.
    pub skip_registry_insert: bool,
    pub only_fields: Vec<String>,
    pub exclude_fields: Vec<String>,
    /// Explicit per-field types, bypassing the converter.
    pub type_overrides: HashMap<String, MetaFieldType>,
    /// Whether the type gets a connection. Defaults to whether the type
    /// implements `Node`.
    pub connection: Option<bool>,
    pub connection_factory: ConnectionFieldFactory,
    pub interfaces: Vec<String>,
    /// The name of the relay identifier field, `id` unless overridden.
    pub custom_id: Option<String>,
}

impl Default for TypeOptions {
    fn default() -> Self {
        Self {
            attributes: None,
            skip_registry_insert: false,
            only_fields: Vec::new(),
            exclude_fields: Vec::new(),
            type_overrides: HashMap::new(),
            connection: None,
            connection_factory: default_connection_field_factory,
            interfaces: Vec::new(),
            custom_id: None,
        }
    }
}

impl TypeOptions {
    pub fn node() -> Self {
        Self {
            interfaces: vec![NODE_INTERFACE.to_string()],
            ..Default::default()
        }
    }
}

/// Builds and registers the output type of an entity model.
///
/// Idempotent per registry: a repeat call for an already registered model
/// returns the registered type's name without reassembling anything.
pub fn build_output_type(
    definition: &EntityDefinition,
    model: &str,
    registry: &mut Registry,
    converter: &Converter,
    options: TypeOptions,
) -> Result<String, SchemaBuildError> {
    let entity = definition
        .find_entity(model)
        .ok_or_else(|| DefinitionError::not_mapped(model, "unknown entity model"))?;
    definition.validate_entity(entity.id())?;

    if let Some(existing) = registry.model_type_name(model) {
        tracing::debug!(model, "model type cache hit");
        return Ok(existing.to_string());
    }

    let assemble = AssembleOptions {
        only_fields: &options.only_fields,
        exclude_fields: &options.exclude_fields,
        type_overrides: &options.type_overrides,
    };

    let bundle = match options.attributes.clone() {
        Some(bundle) => bundle,
        None => build_attributes(entity, registry, converter, &assemble, false)?,
    };

    let extra = build_fields(
        entity,
        registry,
        converter,
        &assemble,
        &[FieldKind::Composite, FieldKind::Hybrid],
        false,
    )?;

    let type_name = entity.client_name().to_string();
    let implements_node = options.interfaces.iter().any(|name| name == NODE_INTERFACE);
    let use_connection = options.connection.unwrap_or(implements_node);

    let mut fields: IndexMap<String, MetaField> = IndexMap::new();
    let mut deferred: IndexMap<String, DeferredField> = IndexMap::new();

    if implements_node {
        let id_name = options
            .custom_id
            .clone()
            .unwrap_or_else(|| String::from("id"));
        let field = MetaField::new(&id_name, MetaFieldType::named("ID").non_null())
            .with_description("The ID of the object.");
        fields.insert(id_name, field);
    }

    for (name, value) in bundle.deferred.clone() {
        if !fields.contains_key(&name) {
            deferred.insert(name, value);
        }
    }

    for group in [
        bundle.relations.clone(),
        extra.composites,
        bundle.scalars.clone(),
        extra.hybrids,
    ] {
        for (name, field) in group {
            if fields.contains_key(&name) || deferred.contains_key(&name) {
                tracing::debug!(field = %name, "dropping duplicate field");
                continue;
            }

            fields.insert(name, field);
        }
    }

    let mut object = ObjectType::new(type_name.clone(), []);
    object.fields = fields;
    object.deferred = deferred;
    object.interfaces = options.interfaces.clone();
    object.model = Some(model.to_string());
    object.registry_id = Some(registry.id());

    if use_connection {
        object.connection = Some(register_connection_types(registry, &type_name));
    }

    if options.skip_registry_insert {
        registry.create_type(object);
    } else {
        registry.register_model_type(object)?;
    }

    // references into this type from types built earlier, and self
    // references, are resolvable now
    resolve_type_deferred(registry, &type_name, options.connection_factory);

    Ok(type_name)
}

/// Builds and registers the input type of an entity model, mirroring
/// [`build_output_type`] in input mode. Relationships reduce to key
/// references and computed properties are left out: derived members are not
/// writable.
pub fn build_input_type(
    definition: &EntityDefinition,
    model: &str,
    registry: &mut Registry,
    converter: &Converter,
    options: TypeOptions,
) -> Result<String, SchemaBuildError> {
    let entity = definition
        .find_entity(model)
        .ok_or_else(|| DefinitionError::not_mapped(model, "unknown entity model"))?;
    definition.validate_entity(entity.id())?;

    let type_name = format!("{}Input", entity.client_name());

    if registry.lookup_type(&type_name).is_some() {
        tracing::debug!(model, "input type cache hit");
        return Ok(type_name);
    }

    let assemble = AssembleOptions {
        only_fields: &options.only_fields,
        exclude_fields: &options.exclude_fields,
        type_overrides: &options.type_overrides,
    };

    let bundle = match options.attributes.clone() {
        Some(bundle) => bundle,
        None => build_attributes(entity, registry, converter, &assemble, true)?,
    };

    let extra = build_fields(
        entity,
        registry,
        converter,
        &assemble,
        &[FieldKind::Composite],
        true,
    )?;

    let mut fields: IndexMap<String, MetaField> = IndexMap::new();

    for group in [
        bundle.relations.clone(),
        extra.composites,
        bundle.scalars.clone(),
    ] {
        for (name, field) in group {
            if fields.contains_key(&name) {
                tracing::debug!(field = %name, "dropping duplicate field");
                continue;
            }

            fields.insert(name, field);
        }
    }

    registry.create_type(InputObjectType::new(
        type_name.clone(),
        fields.into_values().map(MetaInputValue::from),
    ));

    Ok(type_name)
}

/// Resolves a deferred relationship reference against the registry. Returns
/// `None` while the target model has no registered type.
///
/// To-one references become direct object fields; to-many references over a
/// connection-capable target delegate to the connection field factory, and
/// plain list fields otherwise.
pub fn resolve_deferred_field(
    registry: &Registry,
    deferred: &DeferredField,
    connection_factory: ConnectionFieldFactory,
) -> Option<MetaField> {
    let target = registry.get_model_type(&deferred.target_model)?.as_object()?;

    if !deferred.to_many {
        let ty = MetaFieldType::named(&target.name);
        let ty = if deferred.nullable { ty } else { ty.non_null() };

        let mut field = MetaField::new(&deferred.name, ty);
        field.description = deferred.description.clone();

        return Some(field);
    }

    match &target.connection {
        Some(connection) => Some(connection_factory(
            registry,
            deferred,
            &target.name,
            connection,
        )),
        None => {
            let mut field = MetaField::new(
                &deferred.name,
                MetaFieldType::named(&target.name).list(),
            );
            field.description = deferred.description.clone();

            Some(field)
        }
    }
}

/// Materializes every resolvable deferred field in the registry. Deferred
/// references whose target model never registered stay out of the field
/// sets.
pub fn finalize_deferred_fields(registry: &mut Registry, connection_factory: ConnectionFieldFactory) {
    let pending: Vec<String> = registry
        .types
        .iter()
        .filter(|(_, r#type)| {
            r#type
                .as_object()
                .is_some_and(|object| !object.deferred.is_empty())
        })
        .map(|(name, _)| name.clone())
        .collect();

    for type_name in pending {
        resolve_type_deferred(registry, &type_name, connection_factory);
    }

    for (type_name, r#type) in &registry.types {
        let Some(object) = r#type.as_object() else {
            continue;
        };

        for field in object.deferred.keys() {
            tracing::debug!(
                type_name = %type_name,
                field = %field,
                "deferred field target not registered, leaving it out of the field set"
            );
        }
    }
}

fn resolve_type_deferred(
    registry: &mut Registry,
    type_name: &str,
    connection_factory: ConnectionFieldFactory,
) {
    let Some(object) = registry.lookup_type(type_name).and_then(MetaType::as_object) else {
        return;
    };

    if object.deferred.is_empty() {
        return;
    }

    let resolved: Vec<(String, MetaField)> = object
        .deferred
        .iter()
        .filter_map(|(name, deferred)| {
            resolve_deferred_field(registry, deferred, connection_factory)
                .map(|field| (name.clone(), field))
        })
        .collect();

    let Some(object) = registry
        .types
        .get_mut(type_name)
        .and_then(MetaType::as_object_mut)
    else {
        return;
    };

    for (name, field) in resolved {
        object.deferred.shift_remove(&name);

        if !object.fields.contains_key(&name) {
            object.fields.insert(name, field);
        }
    }
}

fn register_connection_types(registry: &mut Registry, type_name: &str) -> String {
    register_page_info(registry);

    let edge_name = format!("{type_name}Edge");
    let node = MetaField::new("node", MetaFieldType::named(type_name).non_null());
    let cursor = MetaField::new("cursor", MetaFieldType::named("String").non_null());
    registry.create_type(ObjectType::new(edge_name.clone(), [node, cursor]));

    let connection_name = format!("{type_name}Connection");
    let edges = MetaField::new("edges", MetaFieldType::named(edge_name).list().non_null());
    let page_info = MetaField::new("pageInfo", MetaFieldType::named("PageInfo").non_null());
    registry.create_type(ObjectType::new(connection_name.clone(), [edges, page_info]));

    connection_name
}

fn register_page_info(registry: &mut Registry) {
    if registry.lookup_type("PageInfo").is_some() {
        return;
    }

    registry.create_type(ObjectType::new(
        "PageInfo",
        [
            MetaField::new("hasPreviousPage", "Boolean!"),
            MetaField::new("hasNextPage", "Boolean!"),
            MetaField::new("startCursor", "String"),
            MetaField::new("endCursor", "String"),
        ],
    ));
}
