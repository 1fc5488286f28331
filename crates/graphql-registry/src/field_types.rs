//! Types for working with GraphQL type names.

/// The type of a [`MetaField`](crate::MetaField).
///
/// A newtype around a string in SDL type notation (e.g. `[Int]!`). The
/// nullability and collection shape of a field are carried by this encoding:
/// a trailing `!` marks the value required, surrounding brackets mark a list.
#[derive(Clone, Default, Hash, Debug, serde::Deserialize, serde::Serialize, PartialEq, Eq)]
pub struct MetaFieldType(String);

impl MetaFieldType {
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_non_null(&self) -> bool {
        self.0.ends_with('!')
    }

    pub fn is_list(&self) -> bool {
        // starts_with so both nullable and non-nullable lists match
        self.0.starts_with('[')
    }

    /// Wraps the type as required. A no-op on already required types.
    pub fn non_null(self) -> Self {
        if self.is_non_null() {
            self
        } else {
            Self(format!("{}!", self.0))
        }
    }

    /// Wraps the type as a nullable list of the current shape.
    pub fn list(self) -> Self {
        Self(format!("[{}]", self.0))
    }

    /// The named type with all list and non-null wrappers stripped.
    pub fn named_type(&self) -> &str {
        self.0
            .trim_start_matches('[')
            .trim_end_matches(|c| c == ']' || c == '!')
    }
}

impl std::fmt::Display for MetaFieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MetaFieldType {
    fn from(value: &str) -> MetaFieldType {
        MetaFieldType(value.to_string())
    }
}

impl From<String> for MetaFieldType {
    fn from(value: String) -> MetaFieldType {
        MetaFieldType(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_and_inspection() {
        let ty = MetaFieldType::named("User");
        assert!(!ty.is_non_null());
        assert!(!ty.is_list());

        let ty = ty.non_null();
        assert_eq!(ty.as_str(), "User!");
        assert!(ty.is_non_null());

        let ty = ty.list();
        assert_eq!(ty.as_str(), "[User!]");
        assert!(ty.is_list());
        assert!(!ty.is_non_null());

        assert_eq!(ty.named_type(), "User");
    }

    #[test]
    fn non_null_is_idempotent() {
        let ty = MetaFieldType::named("Int").non_null().non_null();
        assert_eq!(ty.as_str(), "Int!");
    }
}
