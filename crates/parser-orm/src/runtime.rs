//! Contracts of the external collaborators: the request-bound session, the
//! query provider and the pagination primitive. The parser produces schema
//! metadata; executing queries and persisting records happens behind these
//! traits.

use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CollaboratorError, ResolveError};

/// A record crossing the session/query boundary.
pub type Record = Map<String, Value>;

/// Per-request context handed to resolvers and mutation providers. Holds the
/// request-bound session and whatever data the serving layer wants to expose
/// to provider callables.
#[derive(Default, Clone)]
pub struct RequestContext {
    pub session: Option<Arc<dyn EntitySession>>,
    /// Materialized queries bound directly to a model, taking precedence
    /// over the session.
    pub bound_queries: HashMap<String, Vec<Value>>,
    pub data: HashMap<String, Value>,
}

impl RequestContext {
    pub fn with_session(session: Arc<dyn EntitySession>) -> Self {
        Self {
            session: Some(session),
            ..Default::default()
        }
    }
}

/// A request-scoped ORM session. Acquired and released entirely within one
/// mutate invocation; never shared across concurrent mutations.
#[async_trait]
pub trait EntitySession: Send + Sync {
    async fn find_by_pk(
        &self,
        model: &str,
        pk: &Value,
    ) -> Result<Option<Record>, CollaboratorError>;

    async fn insert(&self, model: &str, record: Record) -> Result<Record, CollaboratorError>;

    async fn update(
        &self,
        model: &str,
        pk: &Value,
        changes: Record,
    ) -> Result<Record, CollaboratorError>;

    async fn commit(&self) -> Result<(), CollaboratorError>;

    async fn rollback(&self) -> Result<(), CollaboratorError>;

    async fn close(&self) -> Result<(), CollaboratorError>;

    /// The default query over a model, for connection resolution.
    async fn query(&self, model: &str) -> Result<QuerySource, CollaboratorError>;
}

/// A column reference with a direction; entries form a stable multi-key
/// ordering, applied in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOrdering {
    pub column: String,
    pub ascending: bool,
}

/// A queryable that supports counting and ordering without materializing.
#[async_trait]
pub trait EntityQuery: Send + Sync {
    /// Applies an explicit ordering over the query.
    fn order_by(self: Box<Self>, orderings: &[ColumnOrdering]) -> Box<dyn EntityQuery>;

    async fn count(&self) -> Result<usize, CollaboratorError>;

    async fn fetch(self: Box<Self>) -> Result<Vec<Value>, CollaboratorError>;
}

/// A query-like or materialized source of records.
pub enum QuerySource {
    Query(Box<dyn EntityQuery>),
    Items(Vec<Value>),
}

impl QuerySource {
    pub fn order_by(self, orderings: &[ColumnOrdering]) -> Self {
        match self {
            QuerySource::Query(query) => QuerySource::Query(query.order_by(orderings)),
            QuerySource::Items(mut items) => {
                items.sort_by(|a, b| compare_records(a, b, orderings));
                QuerySource::Items(items)
            }
        }
    }

    pub async fn count(&self) -> Result<usize, CollaboratorError> {
        match self {
            QuerySource::Query(query) => query.count().await,
            QuerySource::Items(items) => Ok(items.len()),
        }
    }

    pub async fn fetch(self) -> Result<Vec<Value>, CollaboratorError> {
        match self {
            QuerySource::Query(query) => query.fetch().await,
            QuerySource::Items(items) => Ok(items),
        }
    }
}

fn compare_records(a: &Value, b: &Value, orderings: &[ColumnOrdering]) -> Ordering {
    for ordering in orderings {
        let left = a.get(&ordering.column).unwrap_or(&Value::Null);
        let right = b.get(&ordering.column).unwrap_or(&Value::Null);

        let result = compare_values(left, right);
        let result = if ordering.ascending {
            result
        } else {
            result.reverse()
        };

        if result != Ordering::Equal {
            return result;
        }
    }

    Ordering::Equal
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

/// Obtains a query source for a model: a query bound directly to the model
/// first, else one opened through the request session.
pub async fn get_query(model: &str, ctx: &RequestContext) -> Result<QuerySource, ResolveError> {
    if let Some(items) = ctx.bound_queries.get(model) {
        return Ok(QuerySource::Items(items.clone()));
    }

    match &ctx.session {
        Some(session) => session.query(model).await.map_err(ResolveError::Query),
        None => Err(ResolveError::NoQueryAvailable {
            model: model.to_string(),
        }),
    }
}

/// The window arguments of a paginated field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionArguments {
    pub first: Option<usize>,
    pub last: Option<usize>,
    pub before: Option<String>,
    pub after: Option<String>,
    /// Sort symbols, e.g. `name_asc`.
    pub sort: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub node: Value,
    pub cursor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

/// The slice produced by the pagination primitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub edges: Vec<Edge>,
    pub page_info: PageInfo,
}

/// The pagination primitive: given materialized records and a window,
/// produce paged edges plus cursor metadata.
pub trait Paginate: Send + Sync {
    fn paginate(&self, items: &[Value], args: &ConnectionArguments, total: usize) -> Page;
}

pub fn encode_cursor(index: usize) -> String {
    URL_SAFE_NO_PAD.encode(format!("item:{index}"))
}

pub fn decode_cursor(cursor: &str) -> Option<usize> {
    let bytes = URL_SAFE_NO_PAD.decode(cursor).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    decoded.strip_prefix("item:")?.parse().ok()
}

/// Offset-window pagination over a materialized list.
#[derive(Debug, Default, Clone, Copy)]
pub struct SlicePaginator;

impl Paginate for SlicePaginator {
    fn paginate(&self, items: &[Value], args: &ConnectionArguments, total: usize) -> Page {
        let mut start = 0;
        let mut end = items.len();

        if let Some(after) = args.after.as_deref().and_then(decode_cursor) {
            start = start.max(after + 1);
        }

        if let Some(before) = args.before.as_deref().and_then(decode_cursor) {
            end = end.min(before);
        }

        if let Some(first) = args.first {
            end = end.min(start + first);
        }

        if let Some(last) = args.last {
            start = start.max(end.saturating_sub(last));
        }

        let start = start.min(items.len());
        let end = end.min(items.len()).max(start);

        let edges: Vec<_> = items[start..end]
            .iter()
            .enumerate()
            .map(|(offset, node)| Edge {
                node: node.clone(),
                cursor: encode_cursor(start + offset),
            })
            .collect();

        let page_info = PageInfo {
            has_previous_page: start > 0,
            has_next_page: end < total,
            start_cursor: edges.first().map(|edge| edge.cursor.clone()),
            end_cursor: edges.last().map(|edge| edge.cursor.clone()),
        };

        Page { edges, page_info }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items(count: usize) -> Vec<Value> {
        (0..count).map(|i| json!({ "id": i })).collect()
    }

    #[test]
    fn cursor_round_trip() {
        assert_eq!(decode_cursor(&encode_cursor(42)), Some(42));
        assert_eq!(decode_cursor("not a cursor"), None);
    }

    #[test]
    fn first_limits_the_window() {
        let items = items(5);
        let args = ConnectionArguments {
            first: Some(2),
            ..Default::default()
        };

        let page = SlicePaginator.paginate(&items, &args, 5);

        assert_eq!(page.edges.len(), 2);
        assert!(page.page_info.has_next_page);
        assert!(!page.page_info.has_previous_page);
    }

    #[test]
    fn after_and_last_compose() {
        let items = items(6);
        let args = ConnectionArguments {
            after: Some(encode_cursor(1)),
            last: Some(2),
            ..Default::default()
        };

        let page = SlicePaginator.paginate(&items, &args, 6);

        let ids: Vec<_> = page.edges.iter().map(|e| e.node["id"].clone()).collect();
        assert_eq!(ids, [json!(4), json!(5)]);
        assert!(page.page_info.has_previous_page);
    }

    #[test]
    fn items_sources_sort_with_multiple_keys() {
        let source = QuerySource::Items(vec![
            json!({ "age": 30, "name": "b" }),
            json!({ "age": 30, "name": "a" }),
            json!({ "age": 20, "name": "c" }),
        ]);

        let orderings = [
            ColumnOrdering {
                column: "age".into(),
                ascending: true,
            },
            ColumnOrdering {
                column: "name".into(),
                ascending: true,
            },
        ];

        let QuerySource::Items(sorted) = source.order_by(&orderings) else {
            unreachable!()
        };

        let names: Vec<_> = sorted.iter().map(|v| v["name"].clone()).collect();
        assert_eq!(names, [json!("c"), json!("a"), json!("b")]);
    }
}
