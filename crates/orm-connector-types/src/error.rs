use thiserror::Error;

#[derive(Debug, Error)]
pub enum DefinitionError {
    /// returned when a name presented as an entity model fails structural validation
    #[error("`{entity}` is not a mapped entity model: {reason}")]
    ModelNotMapped { entity: String, reason: String },
}

impl DefinitionError {
    pub fn not_mapped(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ModelNotMapped {
            entity: entity.into(),
            reason: reason.into(),
        }
    }
}
