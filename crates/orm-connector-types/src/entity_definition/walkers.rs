mod column;
mod composite;
mod entity;
mod r#enum;
mod enum_variant;
mod hybrid;
mod relation;
mod synonym;

pub use column::ColumnWalker;
pub use composite::CompositeWalker;
pub use entity::EntityWalker;
pub use enum_variant::EnumVariantWalker;
pub use hybrid::HybridWalker;
pub use r#enum::EnumWalker;
pub use relation::RelationWalker;
pub use synonym::SynonymWalker;

use super::EntityDefinition;

/// An accessor to a definition item, carrying the definition along for
/// navigation to related items.
#[derive(Clone, Copy)]
pub struct Walker<'a, Id> {
    pub(crate) id: Id,
    pub(crate) definition: &'a EntityDefinition,
}

impl<'a, Id> Walker<'a, Id>
where
    Id: Copy,
{
    pub fn id(self) -> Id {
        self.id
    }

    pub fn definition(self) -> &'a EntityDefinition {
        self.definition
    }

    pub(crate) fn walk<Other>(self, id: Other) -> Walker<'a, Other> {
        Walker {
            id,
            definition: self.definition,
        }
    }
}
