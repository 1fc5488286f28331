use super::{EntityWalker, Walker};
use crate::entity_definition::{Hybrid, HybridId, HybridReturn};

/// A computed property definition.
pub type HybridWalker<'a> = Walker<'a, HybridId>;

impl<'a> HybridWalker<'a> {
    /// The entity this property belongs to.
    pub fn entity(self) -> EntityWalker<'a> {
        self.walk(self.get().entity_id())
    }

    /// The name of the property in the GraphQL APIs.
    pub fn client_name(self) -> &'a str {
        self.get().client_name()
    }

    /// The declared return type of the property.
    pub fn returns(self) -> &'a HybridReturn {
        self.get().returns()
    }

    pub fn description(self) -> Option<&'a str> {
        self.get().description()
    }

    fn get(self) -> &'a Hybrid {
        self.definition.hybrid(self.id)
    }
}
