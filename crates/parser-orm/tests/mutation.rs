mod support;

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use graphql_registry::Registry;
use parser_orm::{
    build_output_type, default_connection_field_factory, finalize_deferred_fields,
    CollaboratorError, Converter, EntitySession, MutationDefinition, MutationError,
    MutationOptions, Provider, QuerySource, Record, RequestContext, RoleFields, RolesMap,
    TypeOptions,
};
use serde_json::{json, Map, Value};

/// An in-memory session tracking the calls the upsert makes.
#[derive(Default)]
struct MemorySession {
    records: Mutex<HashMap<String, Record>>,
    update_calls: AtomicUsize,
    insert_calls: AtomicUsize,
    commits: AtomicUsize,
    rolled_back: AtomicBool,
    closed: AtomicBool,
    fail_commit: AtomicBool,
}

impl MemorySession {
    fn with_record(pk: Value, record: Record) -> Self {
        let session = Self::default();
        session.records.lock().unwrap().insert(pk.to_string(), record);
        session
    }

    fn record(&self, pk: &Value) -> Option<Record> {
        self.records.lock().unwrap().get(&pk.to_string()).cloned()
    }
}

#[async_trait]
impl EntitySession for MemorySession {
    async fn find_by_pk(
        &self,
        _model: &str,
        pk: &Value,
    ) -> Result<Option<Record>, CollaboratorError> {
        Ok(self.records.lock().unwrap().get(&pk.to_string()).cloned())
    }

    async fn insert(&self, _model: &str, record: Record) -> Result<Record, CollaboratorError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        let pk = record.get("id").cloned().unwrap_or(json!(1));
        self.records
            .lock()
            .unwrap()
            .insert(pk.to_string(), record.clone());

        Ok(record)
    }

    async fn update(
        &self,
        _model: &str,
        pk: &Value,
        changes: Record,
    ) -> Result<Record, CollaboratorError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        let mut records = self.records.lock().unwrap();
        let record = records.entry(pk.to_string()).or_insert_with(Map::new);
        for (name, value) in changes {
            record.insert(name, value);
        }

        Ok(record.clone())
    }

    async fn commit(&self) -> Result<(), CollaboratorError> {
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err("constraint violation".into());
        }

        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(&self) -> Result<(), CollaboratorError> {
        self.rolled_back.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn close(&self) -> Result<(), CollaboratorError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn query(&self, _model: &str) -> Result<QuerySource, CollaboratorError> {
        Ok(QuerySource::Items(
            self.records
                .lock()
                .unwrap()
                .values()
                .cloned()
                .map(Value::Object)
                .collect(),
        ))
    }
}

fn roles_map() -> RolesMap {
    [
        ("editor".to_string(), RoleFields::fields(["name"])),
        ("admin".to_string(), RoleFields::All),
    ]
    .into_iter()
    .collect()
}

fn mutation_for(
    session: &Arc<MemorySession>,
    user_roles: &[&str],
) -> MutationDefinition {
    let definition = support::definition();
    let registry = Registry::new();

    MutationDefinition::new(
        &definition,
        "User",
        &registry,
        MutationOptions {
            session: Provider::Value(session.clone() as Arc<dyn EntitySession>),
            user_roles: Provider::Value(user_roles.iter().map(ToString::to_string).collect()),
            roles_map: Provider::Value(roles_map()),
        },
    )
    .unwrap()
}

fn input(pairs: &[(&str, Value)]) -> Record {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

#[tokio::test]
async fn fields_outside_the_role_allowance_are_rejected() {
    let session = Arc::new(MemorySession::default());
    let mutation = mutation_for(&session, &["editor"]);
    let ctx = RequestContext::default();

    let error = mutation
        .mutate(&ctx, input(&[("name", json!("x")), ("secret", json!("y"))]))
        .await
        .unwrap_err();

    let MutationError::FieldNotAuthorized(field) = error else {
        unreachable!("expected an authorization failure");
    };
    assert_eq!(field, "secret");
}

#[tokio::test]
async fn the_wildcard_role_allows_everything() {
    let session = Arc::new(MemorySession::default());
    let mutation = mutation_for(&session, &["admin"]);
    let ctx = RequestContext::default();

    mutation
        .mutate(&ctx, input(&[("name", json!("x")), ("secret", json!("y"))]))
        .await
        .unwrap();

    let stored = session.record(&json!(1)).unwrap();
    assert_eq!(stored["name"], json!("x"));
    assert_eq!(stored["secret"], json!("y"));
}

#[tokio::test]
async fn users_without_mapped_roles_are_rejected() {
    let session = Arc::new(MemorySession::default());
    let mutation = mutation_for(&session, &["viewer"]);
    let ctx = RequestContext::default();

    let error = mutation
        .mutate(&ctx, input(&[("name", json!("x"))]))
        .await
        .unwrap_err();

    assert!(matches!(error, MutationError::NoAuthorizedRoles));
}

#[tokio::test]
async fn empty_values_never_trip_authorization() {
    let session = Arc::new(MemorySession::default());
    let mutation = mutation_for(&session, &["editor"]);
    let ctx = RequestContext::default();

    // a null disallowed field passes through untouched
    mutation
        .mutate(&ctx, input(&[("name", json!("x")), ("secret", Value::Null)]))
        .await
        .unwrap();

    assert_eq!(session.insert_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn the_primary_key_is_implicitly_allowed() {
    let session = Arc::new(MemorySession::default());
    let mutation = mutation_for(&session, &["editor"]);
    let ctx = RequestContext::default();

    mutation
        .mutate(&ctx, input(&[("id", json!(7)), ("name", json!("x"))]))
        .await
        .unwrap();

    assert!(session.record(&json!(7)).is_some());
}

#[tokio::test]
async fn an_absent_primary_key_creates_a_record() {
    let session = Arc::new(MemorySession::default());
    let mutation = mutation_for(&session, &["admin"]);
    let ctx = RequestContext::default();

    mutation
        .mutate(&ctx, input(&[("name", json!("fresh"))]))
        .await
        .unwrap();

    assert_eq!(session.insert_calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.commits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn a_missing_record_under_the_given_key_creates_one() {
    let session = Arc::new(MemorySession::default());
    let mutation = mutation_for(&session, &["admin"]);
    let ctx = RequestContext::default();

    mutation
        .mutate(&ctx, input(&[("id", json!(42)), ("name", json!("fresh"))]))
        .await
        .unwrap();

    assert_eq!(session.insert_calls.load(Ordering::SeqCst), 1);
    assert!(session.record(&json!(42)).is_some());
}

#[tokio::test]
async fn unchanged_values_commit_without_writing() {
    let stored = input(&[("id", json!(42)), ("name", json!("old"))]);
    let session = Arc::new(MemorySession::with_record(json!(42), stored));
    let mutation = mutation_for(&session, &["admin"]);
    let ctx = RequestContext::default();

    mutation
        .mutate(&ctx, input(&[("id", json!(42)), ("name", json!("old"))]))
        .await
        .unwrap();

    assert_eq!(session.update_calls.load(Ordering::SeqCst), 0);
    assert_eq!(session.insert_calls.load(Ordering::SeqCst), 0);
    assert_eq!(session.commits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn changed_values_are_written_and_committed() {
    let stored = input(&[("id", json!(42)), ("name", json!("old"))]);
    let session = Arc::new(MemorySession::with_record(json!(42), stored));
    let mutation = mutation_for(&session, &["admin"]);
    let ctx = RequestContext::default();

    mutation
        .mutate(&ctx, input(&[("id", json!(42)), ("name", json!("new"))]))
        .await
        .unwrap();

    assert_eq!(session.update_calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.commits.load(Ordering::SeqCst), 1);
    assert_eq!(session.record(&json!(42)).unwrap()["name"], json!("new"));
}

#[tokio::test]
async fn persistence_failures_roll_back_and_close_the_session() {
    let session = Arc::new(MemorySession::default());
    session.fail_commit.store(true, Ordering::SeqCst);

    let mutation = mutation_for(&session, &["admin"]);
    let ctx = RequestContext::default();

    let error = mutation
        .mutate(&ctx, input(&[("name", json!("x"))]))
        .await
        .unwrap_err();

    assert!(matches!(error, MutationError::PersistenceFailed { .. }));
    assert!(session.rolled_back.load(Ordering::SeqCst));
    assert!(session.closed.load(Ordering::SeqCst));

    let MutationError::PersistenceFailed { source } = error else {
        unreachable!()
    };
    assert_eq!(source.to_string(), "constraint violation");
}

#[tokio::test]
async fn relationship_names_translate_to_foreign_keys_and_back() {
    let definition = support::definition();
    let mut registry = Registry::new();
    let converter = Converter::new();

    build_output_type(&definition, "User", &mut registry, &converter, TypeOptions::node())
        .unwrap();
    build_output_type(&definition, "Post", &mut registry, &converter, TypeOptions::default())
        .unwrap();
    finalize_deferred_fields(&mut registry, default_connection_field_factory);

    let session = Arc::new(MemorySession::default());

    let mutation = MutationDefinition::new(
        &definition,
        "Post",
        &registry,
        MutationOptions {
            session: Provider::Value(session.clone() as Arc<dyn EntitySession>),
            user_roles: Provider::Value(vec!["admin".to_string()]),
            roles_map: Provider::Value(roles_map()),
        },
    )
    .unwrap();

    let ctx = RequestContext::default();
    let output = mutation
        .mutate(
            &ctx,
            input(&[
                ("id", json!(1)),
                ("title", json!("hello")),
                ("author", json!(9)),
            ]),
        )
        .await
        .unwrap();

    // stored under the foreign-key column
    let stored = session.record(&json!(1)).unwrap();
    assert_eq!(stored["authorId"], json!(9));
    assert!(!stored.contains_key("author"));

    // exposed back under the relationship name, shaped to the output type
    assert_eq!(output["author"], json!(9));
    assert!(!output.contains_key("authorId"));
    assert_eq!(output["title"], json!("hello"));
}

#[tokio::test]
async fn provider_callables_resolve_against_the_request_context() {
    let session = Arc::new(MemorySession::default());
    let definition = support::definition();
    let registry = Registry::new();

    let shared = session.clone() as Arc<dyn EntitySession>;
    let mutation = MutationDefinition::new(
        &definition,
        "User",
        &registry,
        MutationOptions {
            session: Provider::callable(move |_| shared.clone()),
            user_roles: Provider::callable(|ctx| {
                ctx.data
                    .get("roles")
                    .and_then(Value::as_array)
                    .map(|roles| {
                        roles
                            .iter()
                            .filter_map(Value::as_str)
                            .map(ToString::to_string)
                            .collect()
                    })
                    .unwrap_or_default()
            }),
            roles_map: Provider::Value(roles_map()),
        },
    )
    .unwrap();

    let mut ctx = RequestContext::default();
    ctx.data.insert("roles".into(), json!(["admin"]));

    mutation
        .mutate(&ctx, input(&[("name", json!("via callable"))]))
        .await
        .unwrap();

    assert_eq!(session.insert_calls.load(Ordering::SeqCst), 1);
}
