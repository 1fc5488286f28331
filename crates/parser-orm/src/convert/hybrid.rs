use graphql_registry::{MetaField, MetaFieldType, Registry};
use inflector::Inflector;
use orm_connector_types::{EntityWalker, HybridReturn, HybridWalker};

use super::{scalar_name, Converter};
use crate::{attributes, classify::FieldKind, error::SchemaBuildError};

/// Converts a computed property by its declared return type: an entity
/// return synthesizes a nested type under a property-derived name, a scalar
/// return converts directly, and an unspecified return falls back to a plain
/// descriptive string field.
pub(crate) fn convert_hybrid(
    hybrid: HybridWalker<'_>,
    registry: &mut Registry,
    converter: &Converter,
    input_mode: bool,
) -> Result<MetaField, SchemaBuildError> {
    let field = match hybrid.returns() {
        HybridReturn::Scalar(r#type) => {
            let scalar = scalar_name(r#type).unwrap_or("String");
            MetaField::new(hybrid.client_name(), MetaFieldType::named(scalar))
        }
        HybridReturn::Entity(entity_id) => {
            let target = hybrid.definition().walk(*entity_id);
            let type_name = nested_entity_type(hybrid, target, registry, converter, input_mode)?;

            MetaField::new(hybrid.client_name(), MetaFieldType::named(type_name))
        }
        HybridReturn::Unspecified => {
            MetaField::new(hybrid.client_name(), MetaFieldType::named("String"))
        }
    };

    let field = match hybrid.description() {
        Some(description) => field.with_description(description),
        None => field,
    };

    Ok(field)
}

/// Builds (or reuses) the nested type of an entity-returning property. The
/// type carries the target entity's scalar fields only and is named after
/// the owning entity and the property.
fn nested_entity_type(
    hybrid: HybridWalker<'_>,
    target: EntityWalker<'_>,
    registry: &mut Registry,
    converter: &Converter,
    input_mode: bool,
) -> Result<String, SchemaBuildError> {
    let mut type_name = format!(
        "{}{}",
        hybrid.entity().client_name(),
        hybrid.client_name().to_pascal_case()
    );

    if input_mode {
        type_name.push_str("Input");
    }

    if registry.lookup_type(&type_name).is_none() {
        attributes::build_nested_type(
            target,
            &type_name,
            registry,
            converter,
            &[FieldKind::Scalar],
            input_mode,
        )?;
    }

    Ok(type_name)
}
