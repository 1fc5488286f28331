use inflector::Inflector;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Enum {
    pub(super) database_name: String,
    pub(super) client_name: String,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        let database_name = name.into();
        let client_name = database_name.to_pascal_case();

        Self {
            database_name,
            client_name,
        }
    }

    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }
}
