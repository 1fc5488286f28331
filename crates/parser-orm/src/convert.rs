//! The dispatch-by-source-type converter: maps one column, composite,
//! computed property or relationship of an entity model to one GraphQL field
//! descriptor.

pub(crate) mod composite;
pub(crate) mod hybrid;
pub(crate) mod relationship;

use std::collections::HashMap;

use graphql_registry::{EnumType, MetaField, MetaFieldType, Registry};
use inflector::Inflector;
use orm_connector_types::{ColumnType, ColumnWalker, TypeTag};

use crate::error::SchemaBuildError;

/// A source-type handler. Receives the type being dispatched on (which for
/// array elements differs from the column's own type), the column carrying
/// nullability and key metadata, and the conversion context.
pub type ConvertHandler = fn(
    &ColumnType,
    ColumnWalker<'_>,
    &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError>;

pub struct ConvertContext<'a> {
    pub registry: &'a mut Registry,
    pub converter: &'a Converter,
    /// The public name the produced field is exposed under.
    pub field_name: &'a str,
    pub input_mode: bool,
    /// Forces the field non-required regardless of column semantics. Set for
    /// nullable foreign-key scalars feeding to-one relationships.
    pub optional_override: bool,
}

/// The conversion dispatch table, keyed by source-type tag. Built-in
/// handlers cover every [`TypeTag`]; [`register_handler`] replaces or
/// extends them.
///
/// [`register_handler`]: Converter::register_handler
pub struct Converter {
    handlers: HashMap<TypeTag, ConvertHandler>,
}

impl Converter {
    pub fn new() -> Self {
        let mut converter = Converter {
            handlers: HashMap::new(),
        };

        converter.register_handler(TypeTag::String, convert_string);
        converter.register_handler(TypeTag::Text, convert_string);
        converter.register_handler(TypeTag::Uuid, convert_uuid);
        converter.register_handler(TypeTag::SmallInt, convert_int);
        converter.register_handler(TypeTag::Int, convert_int);
        converter.register_handler(TypeTag::BigInt, convert_big_int);
        converter.register_handler(TypeTag::Float, convert_float);
        converter.register_handler(TypeTag::Decimal, convert_decimal);
        converter.register_handler(TypeTag::Boolean, convert_boolean);
        converter.register_handler(TypeTag::Date, convert_date);
        converter.register_handler(TypeTag::DateTime, convert_datetime);
        converter.register_handler(TypeTag::Timestamp, convert_datetime);
        converter.register_handler(TypeTag::Time, convert_time);
        converter.register_handler(TypeTag::Json, convert_json);
        converter.register_handler(TypeTag::Jsonb, convert_json);
        converter.register_handler(TypeTag::Hstore, convert_json);
        converter.register_handler(TypeTag::TableValued, convert_json);
        converter.register_handler(TypeTag::Enum, convert_enum);
        converter.register_handler(TypeTag::StringOptions, convert_string_options);
        converter.register_handler(TypeTag::Array, convert_array);
        converter.register_handler(TypeTag::Color, convert_plain_string);
        converter.register_handler(TypeTag::Country, convert_plain_string);
        converter.register_handler(TypeTag::Choice, convert_choice);

        converter
    }

    /// A converter with no handlers at all, for fully custom tables.
    pub fn empty() -> Self {
        Converter {
            handlers: HashMap::new(),
        }
    }

    /// Registers a handler for a source-type tag, replacing any existing one.
    pub fn register_handler(&mut self, tag: TypeTag, handler: ConvertHandler) {
        self.handlers.insert(tag, handler);
    }

    /// Converts one column under its own declared type.
    pub fn convert_column(
        &self,
        column: ColumnWalker<'_>,
        field_name: &str,
        registry: &mut Registry,
        input_mode: bool,
        optional_override: bool,
    ) -> Result<MetaField, SchemaBuildError> {
        let mut ctx = ConvertContext {
            registry,
            converter: self,
            field_name,
            input_mode,
            optional_override,
        };

        self.convert(column.column_type(), column, &mut ctx)
    }

    /// Dispatches a source type through the handler table.
    pub fn convert(
        &self,
        r#type: &ColumnType,
        column: ColumnWalker<'_>,
        ctx: &mut ConvertContext<'_>,
    ) -> Result<MetaField, SchemaBuildError> {
        match self.handlers.get(&r#type.tag()) {
            Some(handler) => handler(r#type, column, ctx),
            None => Err(SchemaBuildError::UnsupportedType {
                type_name: r#type.tag().to_string(),
            }),
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the produced field is required. In output mode a field is
/// required iff the column is non-nullable; in input mode iff it is
/// non-nullable and has no default. The override forces non-required.
pub(crate) fn column_required(
    column: ColumnWalker<'_>,
    input_mode: bool,
    optional_override: bool,
) -> bool {
    if optional_override {
        return false;
    }

    if input_mode {
        !(column.nullable() || column.has_default())
    } else {
        !column.nullable()
    }
}

/// The scalar type name a source type converts to when it needs no registry
/// interaction, e.g. for computed-property return types.
pub(crate) fn scalar_name(r#type: &ColumnType) -> Option<&'static str> {
    let name = match r#type {
        ColumnType::String | ColumnType::Text => "String",
        ColumnType::Uuid => "Uuid",
        ColumnType::SmallInt | ColumnType::Int => "Int",
        ColumnType::BigInt => "BigInt",
        ColumnType::Float => "Float",
        ColumnType::Decimal => "Decimal",
        ColumnType::Boolean => "Boolean",
        ColumnType::Date => "Date",
        ColumnType::DateTime | ColumnType::Timestamp => "DateTime",
        ColumnType::Time => "Time",
        ColumnType::Json | ColumnType::Jsonb | ColumnType::Hstore | ColumnType::TableValued => {
            "JSON"
        }
        ColumnType::Color | ColumnType::Country => "String",
        _ => return None,
    };

    Some(name)
}

fn scalar_field(scalar: &str, column: ColumnWalker<'_>, ctx: &ConvertContext<'_>) -> MetaField {
    let ty = MetaFieldType::named(scalar);
    let ty = if column_required(column, ctx.input_mode, ctx.optional_override) {
        ty.non_null()
    } else {
        ty
    };

    let mut field = MetaField::new(ctx.field_name, ty);
    field.mapped_name = Some(column.database_name().to_string());
    field.description = column.description().map(ToOwned::to_owned);

    field
}

fn promoted_to_id(column: ColumnWalker<'_>, ctx: &ConvertContext<'_>) -> bool {
    column.is_primary_key() && column.column_type().is_identifier_kind() && !ctx.optional_override
}

fn convert_string(
    _: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    if promoted_to_id(column, ctx) {
        return Ok(scalar_field("ID", column, ctx));
    }

    Ok(scalar_field("String", column, ctx))
}

fn convert_uuid(
    _: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    if promoted_to_id(column, ctx) {
        return Ok(scalar_field("ID", column, ctx));
    }

    Ok(scalar_field("Uuid", column, ctx))
}

fn convert_int(
    _: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    if promoted_to_id(column, ctx) {
        return Ok(scalar_field("ID", column, ctx));
    }

    Ok(scalar_field("Int", column, ctx))
}

fn convert_big_int(
    _: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    if promoted_to_id(column, ctx) {
        return Ok(scalar_field("ID", column, ctx));
    }

    Ok(scalar_field("BigInt", column, ctx))
}

fn convert_float(
    _: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    Ok(scalar_field("Float", column, ctx))
}

fn convert_decimal(
    _: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    Ok(scalar_field("Decimal", column, ctx))
}

fn convert_boolean(
    _: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    Ok(scalar_field("Boolean", column, ctx))
}

fn convert_date(
    _: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    Ok(scalar_field("Date", column, ctx))
}

fn convert_datetime(
    _: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    Ok(scalar_field("DateTime", column, ctx))
}

fn convert_time(
    _: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    Ok(scalar_field("Time", column, ctx))
}

fn convert_json(
    _: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    Ok(scalar_field("JSON", column, ctx))
}

fn convert_plain_string(
    _: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    Ok(scalar_field("String", column, ctx))
}

fn convert_enum(
    r#type: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    let ColumnType::Enum(enum_id) = r#type else {
        return Err(SchemaBuildError::UnsupportedType {
            type_name: r#type.tag().to_string(),
        });
    };

    let r#enum = column.definition().walk(*enum_id);
    let logical_name = r#enum.client_name();

    let type_name = ctx.registry.get_or_register_enum(logical_name, || {
        EnumType::new(
            logical_name,
            r#enum.variants().map(|variant| variant.client_name().to_string()),
        )
    });

    Ok(scalar_field(&type_name, column, ctx))
}

fn convert_string_options(
    r#type: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    let ColumnType::StringOptions { name, options } = r#type else {
        return Err(SchemaBuildError::UnsupportedType {
            type_name: r#type.tag().to_string(),
        });
    };

    let type_name = ctx.registry.get_or_register_enum(name, || {
        EnumType::new(name.to_pascal_case(), options.clone())
    });

    Ok(scalar_field(&type_name, column, ctx))
}

fn convert_choice(
    r#type: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    let ColumnType::Choice { name, options } = r#type else {
        return Err(SchemaBuildError::UnsupportedType {
            type_name: r#type.tag().to_string(),
        });
    };

    if options.is_empty() {
        return Ok(scalar_field("String", column, ctx));
    }

    let type_name = ctx.registry.get_or_register_enum(name, || {
        EnumType::new(name.to_pascal_case(), options.clone())
    });

    Ok(scalar_field(&type_name, column, ctx))
}

fn convert_array(
    r#type: &ColumnType,
    column: ColumnWalker<'_>,
    ctx: &mut ConvertContext<'_>,
) -> Result<MetaField, SchemaBuildError> {
    let ColumnType::Array(element_type) = r#type else {
        return Err(SchemaBuildError::UnsupportedType {
            type_name: r#type.tag().to_string(),
        });
    };

    let converter = ctx.converter;
    let element = converter.convert(element_type, column, ctx)?;

    // the list carries the array column's own semantics, not the element's
    let ty = MetaFieldType::named(element.ty.named_type()).list();
    let ty = if column_required(column, ctx.input_mode, ctx.optional_override) {
        ty.non_null()
    } else {
        ty
    };

    let mut field = MetaField::new(ctx.field_name, ty);
    field.mapped_name = Some(column.database_name().to_string());
    field.description = column.description().map(ToOwned::to_owned);

    Ok(field)
}
