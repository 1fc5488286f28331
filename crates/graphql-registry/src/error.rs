use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// returned when a type assembled against one registry is registered into
    /// another
    #[error("the type `{type_name}` was assembled against a different registry")]
    InvalidRegistry { type_name: String },

    /// returned when a second type claims an already registered model
    #[error("a type is already registered for the model `{model}`")]
    DuplicateModelType { model: String },

    /// returned when a type without a model is pushed into the model namespace
    #[error("the type `{type_name}` does not declare an entity model")]
    NotAModelType { type_name: String },
}
