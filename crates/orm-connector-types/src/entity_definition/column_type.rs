use serde::{Deserialize, Serialize};

use super::EnumId;

/// The declared source type of a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    String,
    Text,
    Uuid,
    SmallInt,
    Int,
    BigInt,
    Float,
    Decimal,
    Boolean,
    Date,
    DateTime,
    Time,
    Timestamp,
    Json,
    Jsonb,
    Hstore,
    /// A native enumerated type declared in the definition.
    Enum(EnumId),
    /// An enumeration declared inline as a bare list of string options.
    StringOptions { name: String, options: Vec<String> },
    Array(Box<ColumnType>),
    /// A table-valued column; exposed as an untyped JSON scalar.
    TableValued,
    Color,
    Country,
    /// A constrained choice column. With declared options it synthesizes an
    /// enum, otherwise it degrades to a plain string.
    Choice { name: String, options: Vec<String> },
}

impl ColumnType {
    /// The dispatch key of this type for the converter handler table.
    pub fn tag(&self) -> TypeTag {
        match self {
            ColumnType::String => TypeTag::String,
            ColumnType::Text => TypeTag::Text,
            ColumnType::Uuid => TypeTag::Uuid,
            ColumnType::SmallInt => TypeTag::SmallInt,
            ColumnType::Int => TypeTag::Int,
            ColumnType::BigInt => TypeTag::BigInt,
            ColumnType::Float => TypeTag::Float,
            ColumnType::Decimal => TypeTag::Decimal,
            ColumnType::Boolean => TypeTag::Boolean,
            ColumnType::Date => TypeTag::Date,
            ColumnType::DateTime => TypeTag::DateTime,
            ColumnType::Time => TypeTag::Time,
            ColumnType::Timestamp => TypeTag::Timestamp,
            ColumnType::Json => TypeTag::Json,
            ColumnType::Jsonb => TypeTag::Jsonb,
            ColumnType::Hstore => TypeTag::Hstore,
            ColumnType::Enum(_) => TypeTag::Enum,
            ColumnType::StringOptions { .. } => TypeTag::StringOptions,
            ColumnType::Array(_) => TypeTag::Array,
            ColumnType::TableValued => TypeTag::TableValued,
            ColumnType::Color => TypeTag::Color,
            ColumnType::Country => TypeTag::Country,
            ColumnType::Choice { .. } => TypeTag::Choice,
        }
    }

    /// True for the identifier-capable kinds: strings, integers and UUIDs.
    /// Primary-key columns of these kinds are promoted to `ID`.
    pub fn is_identifier_kind(&self) -> bool {
        matches!(
            self,
            ColumnType::String
                | ColumnType::Text
                | ColumnType::Uuid
                | ColumnType::SmallInt
                | ColumnType::Int
                | ColumnType::BigInt
        )
    }
}

/// A stable, data-free tag per source type kind; the key of the converter
/// dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeTag {
    String,
    Text,
    Uuid,
    SmallInt,
    Int,
    BigInt,
    Float,
    Decimal,
    Boolean,
    Date,
    DateTime,
    Time,
    Timestamp,
    Json,
    Jsonb,
    Hstore,
    Enum,
    StringOptions,
    Array,
    TableValued,
    Color,
    Country,
    Choice,
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
