use super::{r#enum::EnumWalker, Walker};
use crate::entity_definition::{EnumVariant, EnumVariantId};

/// An enum variant definition.
pub type EnumVariantWalker<'a> = Walker<'a, EnumVariantId>;

impl<'a> EnumVariantWalker<'a> {
    /// The enum this variant belongs to.
    pub fn r#enum(self) -> EnumWalker<'a> {
        self.walk(self.get().enum_id())
    }

    /// The name of the variant in storage.
    pub fn database_name(self) -> &'a str {
        self.get().database_name()
    }

    /// The name of the variant in the GraphQL APIs.
    pub fn client_name(self) -> &'a str {
        self.get().client_name()
    }

    fn get(self) -> &'a EnumVariant {
        self.definition.enum_variant(self.id)
    }
}
