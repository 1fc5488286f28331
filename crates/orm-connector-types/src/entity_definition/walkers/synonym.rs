use super::{ColumnWalker, EntityWalker, Walker};
use crate::entity_definition::{Synonym, SynonymId};

/// A synonym definition: an alias over another column.
pub type SynonymWalker<'a> = Walker<'a, SynonymId>;

impl<'a> SynonymWalker<'a> {
    /// The entity this synonym belongs to.
    pub fn entity(self) -> EntityWalker<'a> {
        self.walk(self.get().entity_id())
    }

    /// The public name the aliased column is exposed under.
    pub fn client_name(self) -> &'a str {
        self.get().client_name()
    }

    /// The column the alias points at.
    pub fn column(self) -> ColumnWalker<'a> {
        self.walk(self.get().column())
    }

    fn get(self) -> &'a Synonym {
        self.definition.synonym(self.id)
    }
}
