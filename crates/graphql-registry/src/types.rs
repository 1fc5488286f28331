use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{DeferredField, MetaField, MetaInputValue, RegistryId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, MetaField>,
    /// Relationship fields waiting for their target model's type.
    pub deferred: IndexMap<String, DeferredField>,
    pub interfaces: Vec<String>,
    /// The entity model this type was generated from, for types in the model
    /// namespace.
    pub model: Option<String>,
    /// The name of the connection type of this model, when the type is
    /// connection-capable.
    pub connection: Option<String>,
    /// The registry the type was assembled against.
    pub registry_id: Option<RegistryId>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = MetaField>) -> Self {
        ObjectType {
            name: name.into(),
            description: None,
            fields: fields
                .into_iter()
                .map(|field| (field.name.clone(), field))
                .collect(),
            deferred: IndexMap::new(),
            interfaces: Vec::new(),
            model: None,
            connection: None,
            registry_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_interfaces(mut self, interfaces: Vec<String>) -> Self {
        self.interfaces = interfaces;
        self
    }

    pub fn implements(&self, interface: &str) -> bool {
        self.interfaces.iter().any(|name| name == interface)
    }

    pub fn field(&self, name: &str) -> Option<&MetaField> {
        self.fields.get(name)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, MetaInputValue>,
    pub oneof: bool,
}

impl InputObjectType {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = MetaInputValue>) -> Self {
        InputObjectType {
            name: name.into(),
            description: None,
            fields: fields
                .into_iter()
                .map(|field| (field.name.clone(), field))
                .collect(),
            oneof: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_oneof(mut self, oneof: bool) -> Self {
        self.oneof = oneof;
        self
    }

    pub fn field(&self, name: &str) -> Option<&MetaInputValue> {
        self.fields.get(name)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetaEnumValue {
    pub name: String,
    pub description: Option<String>,
}

impl MetaEnumValue {
    pub fn new(name: impl Into<String>) -> Self {
        MetaEnumValue {
            name: name.into(),
            description: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<MetaEnumValue>,
}

impl EnumType {
    pub fn new<T>(name: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<String>,
    {
        EnumType {
            name: name.into(),
            description: None,
            values: values
                .into_iter()
                .map(|value| MetaEnumValue::new(value))
                .collect(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn value(&self, name: &str) -> Option<&MetaEnumValue> {
        self.values.iter().find(|value| value.name == name)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum MetaType {
    Object(ObjectType),
    InputObject(InputObjectType),
    Enum(EnumType),
}

impl MetaType {
    pub fn name(&self) -> &str {
        match self {
            MetaType::Object(object) => &object.name,
            MetaType::InputObject(input) => &input.name,
            MetaType::Enum(r#enum) => &r#enum.name,
        }
    }

    pub fn fields(&self) -> Option<&IndexMap<String, MetaField>> {
        match self {
            MetaType::Object(object) => Some(&object.fields),
            _ => None,
        }
    }

    pub fn fields_mut(&mut self) -> Option<&mut IndexMap<String, MetaField>> {
        match self {
            MetaType::Object(object) => Some(&mut object.fields),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            MetaType::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectType> {
        match self {
            MetaType::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        match self {
            MetaType::InputObject(input) => Some(input),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            MetaType::Enum(r#enum) => Some(r#enum),
            _ => None,
        }
    }
}

impl From<ObjectType> for MetaType {
    fn from(value: ObjectType) -> Self {
        MetaType::Object(value)
    }
}

impl From<InputObjectType> for MetaType {
    fn from(value: InputObjectType) -> Self {
        MetaType::InputObject(value)
    }
}

impl From<EnumType> for MetaType {
    fn from(value: EnumType) -> Self {
        MetaType::Enum(value)
    }
}
