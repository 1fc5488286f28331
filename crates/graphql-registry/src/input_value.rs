use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{MetaField, MetaFieldType};

#[derive(Clone, Default, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetaInputValue {
    pub name: String,
    pub description: Option<String>,
    pub ty: MetaFieldType,
    pub default_value: Option<Value>,
    /// The storage-facing name of the value, when it differs from the
    /// client-facing one.
    pub rename: Option<String>,
}

impl MetaInputValue {
    pub fn new(name: impl Into<String>, ty: impl Into<MetaFieldType>) -> MetaInputValue {
        MetaInputValue {
            name: name.into(),
            ty: ty.into(),
            ..Default::default()
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    pub fn with_default(self, default_value: Value) -> Self {
        Self {
            default_value: Some(default_value),
            ..self
        }
    }
}

impl From<MetaField> for MetaInputValue {
    fn from(field: MetaField) -> Self {
        MetaInputValue {
            name: field.name,
            description: field.description,
            ty: field.ty,
            default_value: None,
            rename: field.mapped_name,
        }
    }
}

/// Converts an ordered field map into the matching input value map.
pub fn input_values_from_fields(
    fields: IndexMap<String, MetaField>,
) -> IndexMap<String, MetaInputValue> {
    fields
        .into_iter()
        .map(|(name, field)| (name, MetaInputValue::from(field)))
        .collect()
}
