use super::{EnumVariantWalker, Walker};
use crate::entity_definition::{Enum, EnumId};

/// A native enum definition.
pub type EnumWalker<'a> = Walker<'a, EnumId>;

impl<'a> EnumWalker<'a> {
    /// The name of the enum in storage.
    pub fn database_name(self) -> &'a str {
        self.get().database_name()
    }

    /// The name of the enum in the GraphQL APIs.
    pub fn client_name(self) -> &'a str {
        self.get().client_name()
    }

    /// The variants of the enum, in declaration order.
    pub fn variants(self) -> impl Iterator<Item = EnumVariantWalker<'a>> {
        self.definition
            .variants_of(self.id)
            .map(move |id| self.walk(id))
    }

    fn get(self) -> &'a Enum {
        self.definition.r#enum(self.id)
    }
}
