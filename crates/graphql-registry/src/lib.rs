//! The generated side of the schema derivation: GraphQL meta types and the
//! memoizing [`Registry`] the parser populates.
//!
//! The registry holds four independent namespaces: entity model to output
//! type, composite name to type, attributes-bundle name to bundle, and enum
//! name to type. Entries are only ever added, never removed or overwritten —
//! schema shape is static per process, so the memoization doubles as the
//! identity guarantee: one type per model, one bundle per name, one enum per
//! logical name.

mod bundle;
mod error;
mod field_types;
mod fields;
mod input_value;
mod types;

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub use bundle::AttributesBundle;
pub use error::RegistryError;
pub use field_types::MetaFieldType;
pub use fields::{DeferredField, MetaField};
pub use input_value::{input_values_from_fields, MetaInputValue};
pub use types::{EnumType, InputObjectType, MetaEnumValue, MetaType, ObjectType};

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Identity of one registry instance. Assembled types carry the id of the
/// registry they were built against; registering them elsewhere fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistryId(u64);

fn next_registry_id() -> RegistryId {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    RegistryId(COUNTER.fetch_add(1, Ordering::Relaxed))
}

#[derive(Debug)]
pub struct Registry {
    id: RegistryId,
    /// Every produced named type.
    pub types: BTreeMap<String, MetaType>,
    models: BTreeMap<String, String>,
    composites: BTreeMap<String, String>,
    bundles: BTreeMap<String, Arc<AttributesBundle>>,
    enums: BTreeMap<String, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            id: next_registry_id(),
            types: BTreeMap::new(),
            models: BTreeMap::new(),
            composites: BTreeMap::new(),
            bundles: BTreeMap::new(),
            enums: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> RegistryId {
        self.id
    }

    /// Adds a named type. The namespace is append-only: a second type under
    /// an already taken name is dropped in favor of the registered one.
    pub fn create_type(&mut self, r#type: impl Into<MetaType>) {
        let r#type = r#type.into();
        let name = r#type.name().to_string();

        if self.types.contains_key(&name) {
            tracing::debug!(type_name = %name, "type already registered, keeping the existing one");
            return;
        }

        self.types.insert(name, r#type);
    }

    pub fn lookup_type(&self, name: &str) -> Option<&MetaType> {
        self.types.get(name)
    }

    /// Registers a generated output type under its entity model.
    ///
    /// Fails when the type was assembled against a different registry, or
    /// when a different type already claims the model. Re-registering the
    /// same (model, type name) pair is a no-op.
    pub fn register_model_type(&mut self, object: ObjectType) -> Result<()> {
        let Some(model) = object.model.clone() else {
            return Err(RegistryError::NotAModelType {
                type_name: object.name,
            });
        };

        if object.registry_id != Some(self.id) {
            return Err(RegistryError::InvalidRegistry {
                type_name: object.name,
            });
        }

        match self.models.get(&model) {
            Some(existing) if *existing == object.name => return Ok(()),
            Some(_) => return Err(RegistryError::DuplicateModelType { model }),
            None => (),
        }

        self.models.insert(model, object.name.clone());
        self.create_type(object);

        Ok(())
    }

    pub fn model_type_name(&self, model: &str) -> Option<&str> {
        self.models.get(model).map(String::as_str)
    }

    pub fn get_model_type(&self, model: &str) -> Option<&MetaType> {
        self.models
            .get(model)
            .and_then(|name| self.types.get(name))
    }

    /// Registers an attributes bundle, returning the cached instance when the
    /// name is already taken.
    pub fn register_attributes(&mut self, bundle: AttributesBundle) -> Arc<AttributesBundle> {
        if let Some(existing) = self.bundles.get(&bundle.name) {
            tracing::debug!(bundle = %bundle.name, "attributes bundle already registered");
            return existing.clone();
        }

        let bundle = Arc::new(bundle);
        self.bundles.insert(bundle.name.clone(), bundle.clone());

        bundle
    }

    pub fn get_attributes(&self, name: &str) -> Option<Arc<AttributesBundle>> {
        self.bundles.get(name).cloned()
    }

    /// Records the generated type for a composite logical name.
    pub fn register_composite(&mut self, key: impl Into<String>, type_name: impl Into<String>) {
        self.composites.entry(key.into()).or_insert_with(|| type_name.into());
    }

    pub fn get_composite(&self, key: &str) -> Option<&str> {
        self.composites.get(key).map(String::as_str)
    }

    /// Returns the registered enum type name for a logical name, creating and
    /// registering the type on first use. Enum types are registered exactly
    /// once per logical name.
    pub fn get_or_register_enum(
        &mut self,
        name: &str,
        create: impl FnOnce() -> EnumType,
    ) -> String {
        if let Some(existing) = self.enums.get(name) {
            tracing::debug!(r#enum = %name, "enum already registered");
            return existing.clone();
        }

        let r#enum = create();
        let type_name = r#enum.name.clone();

        self.enums.insert(name.to_string(), type_name.clone());
        self.create_type(r#enum);

        type_name
    }

    pub fn get_enum(&self, name: &str) -> Option<&EnumType> {
        self.enums
            .get(name)
            .and_then(|type_name| self.types.get(type_name))
            .and_then(MetaType::as_enum)
    }

    /// Drops every entry and assumes a fresh identity, for isolated rebuilds
    /// between test runs.
    pub fn reset(&mut self) {
        *self = Registry::new();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: Lazy<Mutex<Registry>> = Lazy::new(|| Mutex::new(Registry::new()));

/// Runs a closure against the process-wide registry. Top-level ergonomic
/// path; anything needing isolation passes its own [`Registry`] instead.
pub fn with_global_registry<T>(f: impl FnOnce(&mut Registry) -> T) -> T {
    let mut registry = GLOBAL_REGISTRY.lock().expect("global registry poisoned");
    f(&mut registry)
}

pub fn reset_global_registry() {
    with_global_registry(Registry::reset);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_type(registry: &Registry, name: &str, model: &str) -> ObjectType {
        let mut object = ObjectType::new(name, [MetaField::new("id", "ID!")]);
        object.model = Some(model.to_string());
        object.registry_id = Some(registry.id());
        object
    }

    #[test]
    fn one_type_per_model() {
        let mut registry = Registry::new();

        let object = model_type(&registry, "User", "User");
        registry.register_model_type(object.clone()).unwrap();

        // same pair again is fine
        registry.register_model_type(object).unwrap();

        let other = model_type(&registry, "Customer", "User");
        let error = registry.register_model_type(other).unwrap_err();
        assert!(matches!(error, RegistryError::DuplicateModelType { .. }));
    }

    #[test]
    fn registering_against_a_foreign_registry_fails() {
        let mut ours = Registry::new();
        let theirs = Registry::new();

        let object = model_type(&theirs, "User", "User");
        let error = ours.register_model_type(object).unwrap_err();
        assert!(matches!(error, RegistryError::InvalidRegistry { .. }));
    }

    #[test]
    fn bundles_keep_referential_identity() {
        let mut registry = Registry::new();

        let first = registry.register_attributes(AttributesBundle::new("UserAttributes"));
        let second = registry.register_attributes(AttributesBundle::new("UserAttributes"));

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn enums_register_once_per_logical_name() {
        let mut registry = Registry::new();

        let first =
            registry.get_or_register_enum("status", || EnumType::new("Status", ["OPEN", "DONE"]));
        let second =
            registry.get_or_register_enum("status", || EnumType::new("Other", ["NOPE"]));

        assert_eq!(first, second);
        assert_eq!(registry.get_enum("status").unwrap().values.len(), 2);
    }

    #[test]
    fn types_are_never_overwritten() {
        let mut registry = Registry::new();

        registry.create_type(ObjectType::new("User", [MetaField::new("id", "ID!")]));
        registry.create_type(ObjectType::new("User", []));

        let fields = registry.lookup_type("User").unwrap().fields().unwrap();
        assert!(fields.contains_key("id"));
    }

    #[test]
    fn reset_changes_identity_and_clears_entries() {
        let mut registry = Registry::new();
        let before = registry.id();

        registry.register_attributes(AttributesBundle::new("UserAttributes"));
        registry.reset();

        assert_ne!(registry.id(), before);
        assert!(registry.get_attributes("UserAttributes").is_none());
    }
}
