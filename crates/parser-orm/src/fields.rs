//! The connection/sort field: a pagination wrapper over a collection source
//! with an optional multi-column sort argument.

use graphql_registry::{EnumType, MetaField, MetaFieldType, MetaInputValue, MetaType, Registry};
use orm_connector_types::{DefinitionError, EntityDefinition, EntityWalker};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{ResolveError, SchemaBuildError},
    runtime::{
        get_query, ColumnOrdering, ConnectionArguments, Edge, PageInfo, Paginate, QuerySource,
        RequestContext,
    },
};

fn sort_symbol(column_name: &str, ascending: bool) -> String {
    format!("{column_name}_{}", if ascending { "asc" } else { "desc" })
}

/// Parses a sort symbol (`name_asc`, `name_desc`) back into a column
/// ordering.
pub fn parse_sort_symbol(symbol: &str) -> Option<ColumnOrdering> {
    if let Some(column) = symbol.strip_suffix("_asc") {
        return Some(ColumnOrdering {
            column: column.to_string(),
            ascending: true,
        });
    }

    symbol.strip_suffix("_desc").map(|column| ColumnOrdering {
        column: column.to_string(),
        ascending: false,
    })
}

/// The sort argument of a connection field: a generated enum of signed
/// column references, optionally with a primary-key-ascending default.
#[derive(Debug)]
pub struct SortArgument {
    pub enum_type: String,
    pub default: Option<Vec<ColumnOrdering>>,
}

/// Builds (or reuses) the sort enum of an entity and returns the argument
/// carrying it. With `has_default`, the sort defaults to ascending by the
/// entity's primary key.
pub fn sort_argument_for_entity(
    entity: EntityWalker<'_>,
    registry: &mut Registry,
    has_default: bool,
) -> SortArgument {
    let logical_name = format!("{}SortEnum", entity.client_name());

    let enum_type = registry.get_or_register_enum(&logical_name, || {
        let mut values = Vec::new();

        for column in entity.columns() {
            values.push(sort_symbol(column.client_name(), true));
            values.push(sort_symbol(column.client_name(), false));
        }

        EnumType::new(logical_name.clone(), values)
    });

    let default = has_default.then(|| {
        entity
            .columns()
            .filter(|column| column.is_primary_key())
            .map(|column| ColumnOrdering {
                column: column.client_name().to_string(),
                ascending: true,
            })
            .collect()
    });

    SortArgument { enum_type, default }
}

/// The resolved value of a connection field: the paged edges plus the
/// resolved length and the raw iterable, for downstream introspection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub edges: Vec<Edge>,
    pub page_info: PageInfo,
    pub length: usize,
    pub iterable: Vec<Value>,
}

/// A pagination field over a model's connection-capable type.
#[derive(Debug)]
pub struct ConnectionField {
    model: String,
    connection_type: String,
    sort: Option<SortArgument>,
}

impl ConnectionField {
    /// A sorted connection field, defaulting to ascending primary key. The
    /// model's output type must be registered and connection-capable.
    pub fn new(
        definition: &EntityDefinition,
        model: &str,
        registry: &mut Registry,
    ) -> Result<Self, SchemaBuildError> {
        let entity = definition
            .find_entity(model)
            .ok_or_else(|| DefinitionError::not_mapped(model, "unknown entity model"))?;

        let connection_type = registry
            .get_model_type(model)
            .and_then(MetaType::as_object)
            .and_then(|object| object.connection.clone())
            .ok_or_else(|| SchemaBuildError::NotConnectionCapable {
                type_name: model.to_string(),
            })?;

        let sort = Some(sort_argument_for_entity(entity, registry, true));

        Ok(Self {
            model: model.to_string(),
            connection_type,
            sort,
        })
    }

    /// Disables the sort argument.
    pub fn unsorted(mut self) -> Self {
        self.sort = None;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn connection_type(&self) -> &str {
        &self.connection_type
    }

    /// The schema-facing field, carrying the window arguments and the sort
    /// argument with its default symbols.
    pub fn meta_field(&self, name: &str) -> MetaField {
        let mut field = MetaField::new(name, MetaFieldType::named(&self.connection_type));

        field.push_arg(MetaInputValue::new("first", "Int"));
        field.push_arg(MetaInputValue::new("last", "Int"));
        field.push_arg(MetaInputValue::new("before", "String"));
        field.push_arg(MetaInputValue::new("after", "String"));

        if let Some(sort) = &self.sort {
            let mut arg =
                MetaInputValue::new("sort", MetaFieldType::named(&sort.enum_type).list());

            if let Some(default) = &sort.default {
                let symbols = default
                    .iter()
                    .map(|ordering| Value::String(sort_symbol(&ordering.column, ordering.ascending)))
                    .collect();
                arg.default_value = Some(Value::Array(symbols));
            }

            field.push_arg(arg);
        }

        field
    }

    /// Resolves one request: takes the given source (or obtains one through
    /// the query provider), applies the requested or default ordering,
    /// measures the total length and pages through the pagination primitive.
    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        resolved: Option<QuerySource>,
        args: &ConnectionArguments,
        paginate: &dyn Paginate,
    ) -> Result<Connection, ResolveError> {
        let source = match resolved {
            Some(source) => source,
            None => get_query(&self.model, ctx).await?,
        };

        let orderings = self.orderings(args);
        let source = if orderings.is_empty() {
            source
        } else {
            source.order_by(&orderings)
        };

        let length = source.count().await.map_err(ResolveError::Query)?;
        let items = source.fetch().await.map_err(ResolveError::Query)?;

        let page = paginate.paginate(&items, args, length);

        Ok(Connection {
            edges: page.edges,
            page_info: page.page_info,
            length,
            iterable: items,
        })
    }

    /// Awaits an asynchronous upstream resolver, then pages as a
    /// continuation, preserving the argument and type context captured at
    /// call time.
    pub async fn connection_resolver<F>(
        &self,
        ctx: &RequestContext,
        resolver: F,
        args: &ConnectionArguments,
        paginate: &dyn Paginate,
    ) -> Result<Connection, ResolveError>
    where
        F: std::future::Future<Output = Option<QuerySource>>,
    {
        let resolved = resolver.await;
        self.resolve(ctx, resolved, args, paginate).await
    }

    fn orderings(&self, args: &ConnectionArguments) -> Vec<ColumnOrdering> {
        match &args.sort {
            Some(symbols) => symbols
                .iter()
                .filter_map(|symbol| parse_sort_symbol(symbol))
                .collect(),
            None => self
                .sort
                .as_ref()
                .and_then(|sort| sort.default.clone())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_symbols_round_trip() {
        let ordering = parse_sort_symbol(&sort_symbol("name", true)).unwrap();
        assert_eq!(ordering.column, "name");
        assert!(ordering.ascending);

        let ordering = parse_sort_symbol("createdAt_desc").unwrap();
        assert_eq!(ordering.column, "createdAt");
        assert!(!ordering.ascending);

        assert!(parse_sort_symbol("garbage").is_none());
    }
}
