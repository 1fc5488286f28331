mod support;

use std::sync::Arc;

use async_trait::async_trait;
use graphql_registry::Registry;
use parser_orm::{
    build_output_type, from_global_id, to_global_id, CollaboratorError, Converter, NodeGetter,
    NodeResolver, RequestContext, TypeOptions,
};
use serde_json::{json, Value};

struct StaticGetter;

#[async_trait]
impl NodeGetter for StaticGetter {
    async fn get_node(
        &self,
        _ctx: &RequestContext,
        id: &str,
    ) -> Result<Option<Value>, CollaboratorError> {
        Ok(Some(json!({ "id": id, "name": "looked up" })))
    }
}

fn registry_with_types() -> Registry {
    let definition = support::definition();
    let mut registry = Registry::new();
    let converter = Converter::new();

    // User implements Node, Post does not
    build_output_type(&definition, "User", &mut registry, &converter, TypeOptions::node())
        .unwrap();
    build_output_type(&definition, "Post", &mut registry, &converter, TypeOptions::default())
        .unwrap();

    registry
}

#[tokio::test]
async fn global_ids_resolve_through_registered_getters() {
    let registry = registry_with_types();
    let ctx = RequestContext::default();

    let mut resolver = NodeResolver::new();
    resolver.register_getter("User", Arc::new(StaticGetter));

    let node = resolver
        .resolve_node(&registry, &ctx, &to_global_id("User", "42"), None)
        .await
        .unwrap();

    assert_eq!(node["id"], json!("42"));
}

#[tokio::test]
async fn bare_ids_fall_back_to_the_given_type() {
    let registry = registry_with_types();
    let ctx = RequestContext::default();

    let mut resolver = NodeResolver::new();
    resolver.register_getter("User", Arc::new(StaticGetter));

    let node = resolver
        .resolve_node(&registry, &ctx, "42", Some("User"))
        .await
        .unwrap();

    assert_eq!(node["id"], json!("42"));

    let missing = resolver.resolve_node(&registry, &ctx, "42", None).await;
    assert!(missing.is_none());
}

#[tokio::test]
async fn types_outside_the_node_interface_do_not_resolve() {
    let registry = registry_with_types();
    let ctx = RequestContext::default();

    let mut resolver = NodeResolver::new();
    resolver.register_getter("Post", Arc::new(StaticGetter));

    let node = resolver
        .resolve_node(&registry, &ctx, &to_global_id("Post", "1"), None)
        .await;

    assert!(node.is_none());
}

#[tokio::test]
async fn unregistered_getters_resolve_to_none() {
    let registry = registry_with_types();
    let ctx = RequestContext::default();

    let resolver = NodeResolver::new();

    let node = resolver
        .resolve_node(&registry, &ctx, &to_global_id("User", "1"), None)
        .await;

    assert!(node.is_none());
}

#[test]
fn encoding_is_opaque_and_reversible() {
    let encoded = to_global_id("User", "1337");
    assert!(!encoded.contains("User"));
    assert_eq!(from_global_id(&encoded), Some(("User".into(), "1337".into())));
}
