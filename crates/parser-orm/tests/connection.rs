mod support;

use async_trait::async_trait;
use graphql_registry::Registry;
use parser_orm::{
    build_output_type, CollaboratorError, ColumnOrdering, ConnectionArguments, ConnectionField,
    Converter, EntityQuery, QuerySource, RequestContext, ResolveError, SlicePaginator,
    TypeOptions,
};
use serde_json::{json, Value};

fn users(count: usize) -> Vec<Value> {
    // reverse insertion order, so default sorting has something to do
    (0..count)
        .rev()
        .map(|i| json!({ "id": i, "name": format!("user-{i}") }))
        .collect()
}

fn connection_field() -> ConnectionField {
    let definition = support::definition();
    let mut registry = Registry::new();
    let converter = Converter::new();

    build_output_type(&definition, "User", &mut registry, &converter, TypeOptions::node())
        .unwrap();

    ConnectionField::new(&definition, "User", &mut registry).unwrap()
}

#[tokio::test]
async fn the_sort_defaults_to_ascending_primary_key() {
    let field = connection_field();
    let ctx = RequestContext::default();

    let connection = field
        .resolve(
            &ctx,
            Some(QuerySource::Items(users(4))),
            &ConnectionArguments::default(),
            &SlicePaginator,
        )
        .await
        .unwrap();

    let ids: Vec<_> = connection
        .edges
        .iter()
        .map(|edge| edge.node["id"].clone())
        .collect();
    assert_eq!(ids, [json!(0), json!(1), json!(2), json!(3)]);
    assert_eq!(connection.length, 4);
    assert_eq!(connection.iterable.len(), 4);
}

#[tokio::test]
async fn explicit_sort_symbols_win_over_the_default() {
    let field = connection_field();
    let ctx = RequestContext::default();

    let args = ConnectionArguments {
        sort: Some(vec!["id_desc".to_string()]),
        ..Default::default()
    };

    let connection = field
        .resolve(&ctx, Some(QuerySource::Items(users(3))), &args, &SlicePaginator)
        .await
        .unwrap();

    let ids: Vec<_> = connection
        .edges
        .iter()
        .map(|edge| edge.node["id"].clone())
        .collect();
    assert_eq!(ids, [json!(2), json!(1), json!(0)]);
}

#[tokio::test]
async fn multi_key_sorting_is_stable_and_ordered() {
    let field = connection_field();
    let ctx = RequestContext::default();

    let items = vec![
        json!({ "id": 1, "group": "b", "name": "x" }),
        json!({ "id": 2, "group": "a", "name": "y" }),
        json!({ "id": 3, "group": "a", "name": "x" }),
    ];

    let args = ConnectionArguments {
        sort: Some(vec!["group_asc".to_string(), "name_desc".to_string()]),
        ..Default::default()
    };

    let connection = field
        .resolve(&ctx, Some(QuerySource::Items(items)), &args, &SlicePaginator)
        .await
        .unwrap();

    let ids: Vec<_> = connection
        .edges
        .iter()
        .map(|edge| edge.node["id"].clone())
        .collect();
    assert_eq!(ids, [json!(2), json!(3), json!(1)]);
}

#[tokio::test]
async fn windows_slice_after_sorting() {
    let field = connection_field();
    let ctx = RequestContext::default();

    let args = ConnectionArguments {
        first: Some(2),
        ..Default::default()
    };

    let connection = field
        .resolve(&ctx, Some(QuerySource::Items(users(5))), &args, &SlicePaginator)
        .await
        .unwrap();

    let ids: Vec<_> = connection
        .edges
        .iter()
        .map(|edge| edge.node["id"].clone())
        .collect();
    assert_eq!(ids, [json!(0), json!(1)]);
    assert!(connection.page_info.has_next_page);
    assert_eq!(connection.length, 5);
}

#[tokio::test]
async fn bound_queries_serve_when_no_source_is_given() {
    let field = connection_field();

    let mut ctx = RequestContext::default();
    ctx.bound_queries.insert("User".to_string(), users(2));

    let connection = field
        .resolve(&ctx, None, &ConnectionArguments::default(), &SlicePaginator)
        .await
        .unwrap();

    assert_eq!(connection.edges.len(), 2);
}

#[tokio::test]
async fn no_query_and_no_session_is_an_error() {
    let field = connection_field();
    let ctx = RequestContext::default();

    let error = field
        .resolve(&ctx, None, &ConnectionArguments::default(), &SlicePaginator)
        .await
        .unwrap_err();

    assert!(matches!(error, ResolveError::NoQueryAvailable { .. }));
}

#[tokio::test]
async fn asynchronous_resolvers_defer_the_pagination_step() {
    let field = connection_field();
    let ctx = RequestContext::default();

    let resolver = async { Some(QuerySource::Items(users(3))) };

    let connection = field
        .connection_resolver(&ctx, resolver, &ConnectionArguments::default(), &SlicePaginator)
        .await
        .unwrap();

    let ids: Vec<_> = connection
        .edges
        .iter()
        .map(|edge| edge.node["id"].clone())
        .collect();
    assert_eq!(ids, [json!(0), json!(1), json!(2)]);
}

/// A count/order/fetch capable query over a fixed record set.
struct VecQuery {
    items: Vec<Value>,
}

#[async_trait]
impl EntityQuery for VecQuery {
    fn order_by(self: Box<Self>, orderings: &[ColumnOrdering]) -> Box<dyn EntityQuery> {
        let QuerySource::Items(items) = QuerySource::Items(self.items).order_by(orderings) else {
            unreachable!()
        };

        Box::new(VecQuery { items })
    }

    async fn count(&self) -> Result<usize, CollaboratorError> {
        Ok(self.items.len())
    }

    async fn fetch(self: Box<Self>) -> Result<Vec<Value>, CollaboratorError> {
        Ok(self.items)
    }
}

#[tokio::test]
async fn query_backed_sources_count_before_fetching() {
    let field = connection_field();
    let ctx = RequestContext::default();

    let source = QuerySource::Query(Box::new(VecQuery { items: users(3) }));

    let args = ConnectionArguments {
        first: Some(1),
        ..Default::default()
    };

    let connection = field
        .resolve(&ctx, Some(source), &args, &SlicePaginator)
        .await
        .unwrap();

    assert_eq!(connection.length, 3);
    assert_eq!(connection.edges.len(), 1);
    assert_eq!(connection.edges[0].node["id"], json!(0));
}
