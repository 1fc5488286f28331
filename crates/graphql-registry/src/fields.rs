use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{MetaFieldType, MetaInputValue};

#[derive(Clone, Default, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetaField {
    pub name: String,
    /// The storage-facing name of the field, when it differs from the
    /// client-facing one.
    pub mapped_name: Option<String>,
    pub description: Option<String>,
    pub args: IndexMap<String, MetaInputValue>,
    pub ty: MetaFieldType,
}

impl MetaField {
    pub fn new(name: impl Into<String>, ty: impl Into<MetaFieldType>) -> MetaField {
        MetaField {
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

    pub fn with_mapped_name(self, mapped_name: impl Into<String>) -> Self {
        Self {
            mapped_name: Some(mapped_name.into()),
            ..self
        }
    }

    pub fn push_arg(&mut self, arg: MetaInputValue) {
        self.args.insert(arg.name.clone(), arg);
    }

    pub fn target_field_name(&self) -> &str {
        self.mapped_name.as_deref().unwrap_or(&self.name)
    }
}

/// A relationship field recorded before its target type exists.
///
/// Cyclic references between entity types are broken by registering the
/// reference by target model name only; the concrete field is materialized by
/// registry lookup once the target model's type has been registered.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DeferredField {
    pub name: String,
    pub target_model: String,
    pub to_many: bool,
    pub nullable: bool,
    pub description: Option<String>,
}

impl DeferredField {
    pub fn new(name: impl Into<String>, target_model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_model: target_model.into(),
            to_many: false,
            nullable: true,
            description: None,
        }
    }

    pub fn to_many(mut self) -> Self {
        self.to_many = true;
        self
    }

    pub fn non_nullable(mut self) -> Self {
        self.nullable = false;
        self
    }
}
