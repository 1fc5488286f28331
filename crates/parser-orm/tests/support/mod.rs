use orm_connector_types::{
    Column, ColumnType, Composite, Entity, EntityDefinition, Enum, EnumVariant, Hybrid,
    HybridReturn, Relation, RelationKind, Synonym,
};

/// Two mutually referencing entities plus the member kinds the parser has to
/// handle: enums, arrays, a composite, a synonym and computed properties.
pub fn definition() -> EntityDefinition {
    let mut definition = EntityDefinition::new();

    let users = definition.push_entity(Entity::new("users").with_client_name("User"));
    let posts = definition.push_entity(Entity::new("posts").with_client_name("Post"));

    definition.push_column(Column::new(users, "id", ColumnType::Int).primary_key());
    let name =
        definition.push_column(Column::new(users, "name", ColumnType::String).non_nullable());
    definition.push_column(
        Column::new(users, "email", ColumnType::String)
            .non_nullable()
            .with_default(),
    );
    definition.push_column(Column::new(users, "secret", ColumnType::String));
    definition.push_column(Column::new(
        users,
        "tags",
        ColumnType::Array(Box::new(ColumnType::String)),
    ));

    let status = definition.push_enum(Enum::new("user_status"));
    definition.push_enum_variant(EnumVariant::new(status, "ACTIVE"));
    definition.push_enum_variant(EnumVariant::new(status, "BLOCKED"));
    definition.push_column(Column::new(users, "status", ColumnType::Enum(status)));

    let street = definition.push_column(Column::new(users, "street", ColumnType::String));
    let city = definition.push_column(Column::new(users, "city", ColumnType::String));
    definition.push_composite(Composite::new(users, "address", "Address", vec![street, city]));

    definition.push_synonym(Synonym::new(users, "handle", name));

    definition.push_hybrid(Hybrid::new(users, "karma", HybridReturn::Scalar(ColumnType::Int)));
    definition.push_hybrid(
        Hybrid::new(users, "summary", HybridReturn::Unspecified)
            .with_description("A readable account summary"),
    );

    definition.push_column(Column::new(posts, "id", ColumnType::Int).primary_key());
    definition.push_column(Column::new(posts, "title", ColumnType::String).non_nullable());
    let author_id = definition.push_column(Column::new(posts, "author_id", ColumnType::Int));

    definition.push_relation(
        Relation::new(posts, users, "author", RelationKind::ManyToOne).with_foreign_key(author_id),
    );
    definition.push_relation(Relation::new(users, posts, "posts", RelationKind::OneToMany));

    definition
}
