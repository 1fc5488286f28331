//! Enumeration of an entity model's members, tagged by kind.

use orm_connector_types::{
    ColumnWalker, CompositeWalker, EntityWalker, HybridWalker, RelationWalker,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    Composite,
    Hybrid,
    Relationship,
}

#[derive(Clone, Copy)]
pub enum ClassifiedMember<'a> {
    Column(ColumnWalker<'a>),
    Composite(CompositeWalker<'a>),
    Hybrid(HybridWalker<'a>),
    Relation(RelationWalker<'a>),
}

pub struct ClassifiedField<'a> {
    /// The public name the field is exposed under. Differs from the member's
    /// own name for synonym-redirected columns.
    pub name: &'a str,
    pub member: ClassifiedMember<'a>,
    pub kind: FieldKind,
}

/// Enumerates the members of an entity in a fixed precedence order:
/// relationships, composites, plain columns, synonym-redirected columns,
/// computed properties. Later stages use first-registered-wins semantics for
/// name collisions, so the order is load-bearing.
///
/// A member is skipped when `only_fields` is non-empty and excludes its name,
/// or when its name appears in `exclude_fields`. The filter is name-based
/// and applies uniformly across all kinds.
///
/// The traversal is a pure read; every call returns a fresh iterator.
pub fn iter_fields<'a>(
    entity: EntityWalker<'a>,
    only_fields: &'a [String],
    exclude_fields: &'a [String],
) -> impl Iterator<Item = ClassifiedField<'a>> + 'a {
    let skip = move |name: &str| {
        let not_in_only = !only_fields.is_empty() && !only_fields.iter().any(|only| only == name);
        let excluded = exclude_fields.iter().any(|excluded| excluded == name);

        not_in_only || excluded
    };

    let relations = entity
        .relations()
        .filter(move |relation| !skip(relation.client_field_name()))
        .map(|relation| ClassifiedField {
            name: relation.client_field_name(),
            member: ClassifiedMember::Relation(relation),
            kind: FieldKind::Relationship,
        });

    let composites = entity
        .composites()
        .filter(move |composite| !skip(composite.client_name()))
        .map(|composite| ClassifiedField {
            name: composite.client_name(),
            member: ClassifiedMember::Composite(composite),
            kind: FieldKind::Composite,
        });

    let columns = entity
        .columns()
        .filter(move |column| !skip(column.client_name()))
        .map(|column| ClassifiedField {
            name: column.client_name(),
            member: ClassifiedMember::Column(column),
            kind: FieldKind::Scalar,
        });

    let synonyms = entity
        .synonyms()
        .filter(move |synonym| !skip(synonym.client_name()))
        .map(|synonym| ClassifiedField {
            name: synonym.client_name(),
            member: ClassifiedMember::Column(synonym.column()),
            kind: FieldKind::Scalar,
        });

    let hybrids = entity
        .hybrids()
        .filter(move |hybrid| !skip(hybrid.client_name()))
        .map(|hybrid| ClassifiedField {
            name: hybrid.client_name(),
            member: ClassifiedMember::Hybrid(hybrid),
            kind: FieldKind::Hybrid,
        });

    relations
        .chain(composites)
        .chain(columns)
        .chain(synonyms)
        .chain(hybrids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orm_connector_types::{
        Column, ColumnType, Composite, Entity, EntityDefinition, Hybrid, HybridReturn, Relation,
        RelationKind, Synonym,
    };

    fn definition() -> EntityDefinition {
        let mut definition = EntityDefinition::new();

        let users = definition.push_entity(Entity::new("users").with_client_name("User"));
        let posts = definition.push_entity(Entity::new("posts").with_client_name("Post"));

        definition.push_column(Column::new(users, "id", ColumnType::Int).primary_key());
        let name = definition.push_column(Column::new(users, "name", ColumnType::String));
        let street = definition.push_column(Column::new(users, "street", ColumnType::String));
        let city = definition.push_column(Column::new(users, "city", ColumnType::String));

        definition.push_composite(Composite::new(users, "address", "Address", vec![street, city]));
        definition.push_synonym(Synonym::new(users, "handle", name));
        definition.push_hybrid(Hybrid::new(users, "displayName", HybridReturn::Unspecified));
        definition.push_relation(Relation::new(users, posts, "posts", RelationKind::OneToMany));
        definition.push_column(Column::new(posts, "id", ColumnType::Int).primary_key());

        definition
    }

    #[test]
    fn precedence_order_is_fixed() {
        let definition = definition();
        let user = definition.find_entity("User").unwrap();

        let kinds: Vec<_> = iter_fields(user, &[], &[])
            .map(|field| (field.name.to_string(), field.kind))
            .collect();

        let names: Vec<_> = kinds.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            ["posts", "address", "id", "name", "street", "city", "handle", "displayName"]
        );

        assert_eq!(kinds[0].1, FieldKind::Relationship);
        assert_eq!(kinds[1].1, FieldKind::Composite);
        assert_eq!(kinds[6].1, FieldKind::Scalar);
        assert_eq!(kinds[7].1, FieldKind::Hybrid);
    }

    #[test]
    fn filtering_is_uniform_across_kinds() {
        let definition = definition();
        let user = definition.find_entity("User").unwrap();

        let only = vec!["posts".to_string(), "name".to_string()];
        let names: Vec<_> = iter_fields(user, &only, &[]).map(|field| field.name).collect();
        assert_eq!(names, ["posts", "name"]);

        let exclude = vec!["address".to_string(), "displayName".to_string()];
        let names: Vec<_> = iter_fields(user, &[], &exclude).map(|field| field.name).collect();
        assert_eq!(names, ["posts", "id", "name", "street", "city", "handle"]);
    }

    #[test]
    fn synonyms_carry_the_aliased_column() {
        let definition = definition();
        let user = definition.find_entity("User").unwrap();

        let synonym = iter_fields(user, &[], &[])
            .find(|field| field.name == "handle")
            .unwrap();

        assert_eq!(synonym.kind, FieldKind::Scalar);
        let column = match synonym.member {
            ClassifiedMember::Column(column) => Some(column),
            _ => None,
        };
        assert_eq!(column.unwrap().client_name(), "name");
    }

    #[test]
    fn the_iterator_restarts_per_call() {
        let definition = definition();
        let user = definition.find_entity("User").unwrap();

        let first: Vec<_> = iter_fields(user, &[], &[]).map(|f| f.name).collect();
        let second: Vec<_> = iter_fields(user, &[], &[]).map(|f| f.name).collect();

        assert_eq!(first, second);
    }
}
