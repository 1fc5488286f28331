use graphql_registry::{InputObjectType, MetaField, MetaFieldType, MetaInputValue, ObjectType, Registry};
use orm_connector_types::CompositeWalker;

use super::Converter;
use crate::error::SchemaBuildError;

/// Converts a composite attribute to a field over a generated nested type.
///
/// The nested type is cached under the composite's logical type name
/// (suffixed for input mode): the same composite name always yields the same
/// type within one registry.
pub(crate) fn convert_composite(
    composite: CompositeWalker<'_>,
    registry: &mut Registry,
    converter: &Converter,
    input_mode: bool,
) -> Result<MetaField, SchemaBuildError> {
    let key = if input_mode {
        format!("{}Input", composite.type_name())
    } else {
        composite.type_name().to_string()
    };

    let type_name = match registry.get_composite(&key) {
        Some(existing) => existing.to_string(),
        None => {
            tracing::debug!(composite = %key, "generating composite type");

            let mut fields = Vec::new();

            for column in composite.columns() {
                fields.push(converter.convert_column(
                    column,
                    column.client_name(),
                    registry,
                    input_mode,
                    false,
                )?);
            }

            if input_mode {
                registry.create_type(InputObjectType::new(
                    key.clone(),
                    fields.into_iter().map(MetaInputValue::from),
                ));
            } else {
                registry.create_type(ObjectType::new(key.clone(), fields));
            }

            registry.register_composite(key.clone(), key.clone());

            key
        }
    };

    Ok(MetaField::new(
        composite.client_name(),
        MetaFieldType::named(type_name),
    ))
}
