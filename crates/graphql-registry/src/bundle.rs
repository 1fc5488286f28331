use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{DeferredField, MetaField};

/// A named, cached grouping of the field descriptors of one entity model's
/// scalar and relationship members, for one mode (output or input).
///
/// For a given bundle name exactly one instance is ever constructed per
/// registry; repeat requests return the cached `Arc`, so the same descriptor
/// set backs every type built from the bundle across a schema build.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AttributesBundle {
    pub name: String,
    /// Concrete relationship fields (input mode).
    pub relations: IndexMap<String, MetaField>,
    /// By-name relationship references (output mode).
    pub deferred: IndexMap<String, DeferredField>,
    pub scalars: IndexMap<String, MetaField>,
}

impl AttributesBundle {
    pub fn new(name: impl Into<String>) -> Self {
        AttributesBundle {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty() && self.deferred.is_empty() && self.scalars.is_empty()
    }

    /// All concrete field names held by the bundle, in precedence order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.relations
            .keys()
            .chain(self.deferred.keys())
            .chain(self.scalars.keys())
            .map(String::as_str)
    }
}
