use serde::{Deserialize, Serialize};

use super::EnumId;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EnumVariant {
    pub(super) enum_id: EnumId,
    pub(super) database_name: String,
    pub(super) client_name: String,
}

impl EnumVariant {
    pub fn new(enum_id: EnumId, name: impl Into<String>) -> Self {
        let database_name = name.into();
        let client_name = database_name.clone();

        Self {
            enum_id,
            database_name,
            client_name,
        }
    }

    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    pub fn enum_id(&self) -> EnumId {
        self.enum_id
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }
}
