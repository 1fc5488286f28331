//! Relay-style global identifiers and node resolution.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use graphql_registry::Registry;
use serde_json::Value;

use crate::{error::CollaboratorError, object_type::NODE_INTERFACE, runtime::RequestContext};

/// Encodes a (type name, local id) pair into an opaque global identifier.
pub fn to_global_id(type_name: &str, id: &str) -> String {
    URL_SAFE_NO_PAD.encode(format!("{type_name}:{id}"))
}

/// Decodes a global identifier. Returns `None` for values that are not
/// well-formed global ids; callers fall back to treating the raw value as a
/// local id of a known type.
pub fn from_global_id(value: &str) -> Option<(String, String)> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    let (type_name, id) = decoded.split_once(':')?;

    Some((type_name.to_string(), id.to_string()))
}

/// A per-type record lookup by local id.
#[async_trait]
pub trait NodeGetter: Send + Sync {
    async fn get_node(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<Option<Value>, CollaboratorError>;
}

/// Resolves global identifiers to records through per-type registered
/// lookups.
///
/// Resolution requires the decoded type to be registered, to implement the
/// `Node` interface, and to have a registered lookup; anything else resolves
/// to `None`.
#[derive(Default)]
pub struct NodeResolver {
    getters: HashMap<String, Arc<dyn NodeGetter>>,
}

impl NodeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_getter(&mut self, type_name: impl Into<String>, getter: Arc<dyn NodeGetter>) {
        self.getters.insert(type_name.into(), getter);
    }

    pub async fn resolve_node(
        &self,
        registry: &Registry,
        ctx: &RequestContext,
        global_id: &str,
        fallback_type: Option<&str>,
    ) -> Option<Value> {
        let (type_name, local_id) = match from_global_id(global_id) {
            Some(decoded) => decoded,
            None => (fallback_type?.to_string(), global_id.to_string()),
        };

        let object = registry.lookup_type(&type_name)?.as_object()?;
        if !object.implements(NODE_INTERFACE) {
            return None;
        }

        let getter = self.getters.get(&type_name)?;

        match getter.get_node(ctx, &local_id).await {
            Ok(node) => node,
            Err(error) => {
                tracing::debug!(type_name = %type_name, %error, "node lookup failed");
                None
            }
        }
    }
}
