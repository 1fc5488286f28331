use super::{ColumnWalker, EntityWalker, Walker};
use crate::entity_definition::{Composite, CompositeId};

/// A composite attribute definition.
pub type CompositeWalker<'a> = Walker<'a, CompositeId>;

impl<'a> CompositeWalker<'a> {
    /// The entity this composite belongs to.
    pub fn entity(self) -> EntityWalker<'a> {
        self.walk(self.get().entity_id())
    }

    /// The name of the composite field in the GraphQL APIs.
    pub fn client_name(self) -> &'a str {
        self.get().client_name()
    }

    /// The logical type name of the composite value.
    pub fn type_name(self) -> &'a str {
        self.get().type_name()
    }

    /// The member columns grouped under this composite.
    pub fn columns(self) -> impl Iterator<Item = ColumnWalker<'a>> {
        self.get().columns().iter().map(move |id| self.walk(*id))
    }

    fn get(self) -> &'a Composite {
        self.definition.composite(self.id)
    }
}
