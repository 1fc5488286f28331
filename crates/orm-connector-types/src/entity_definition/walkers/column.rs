use super::{EntityWalker, Walker};
use crate::entity_definition::{Column, ColumnId, ColumnType};

/// A column definition.
pub type ColumnWalker<'a> = Walker<'a, ColumnId>;

impl<'a> ColumnWalker<'a> {
    /// The entity this column belongs to.
    pub fn entity(self) -> EntityWalker<'a> {
        self.walk(self.get().entity_id())
    }

    /// The name of the column in storage.
    pub fn database_name(self) -> &'a str {
        self.get().database_name()
    }

    /// The name of the column in the GraphQL APIs.
    pub fn client_name(self) -> &'a str {
        self.get().client_name()
    }

    /// The declared source type of the column.
    pub fn column_type(self) -> &'a ColumnType {
        self.get().column_type()
    }

    pub fn nullable(self) -> bool {
        self.get().nullable()
    }

    pub fn has_default(self) -> bool {
        self.get().has_default()
    }

    pub fn is_primary_key(self) -> bool {
        self.get().is_primary_key()
    }

    pub fn description(self) -> Option<&'a str> {
        self.get().description()
    }

    fn get(self) -> &'a Column {
        self.definition.column(self.id)
    }
}
