//! MySQL to C# type mapping

use std::fmt;

use crate::schema::ColumnDescriptor;

/// A C# scalar type used for entity properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Decimal,
    Float,
    Double,
    DateTime,
    TimeSpan,
    String,
    /// Fallback for native types without a mapping
    Object,
}

impl ScalarType {
    /// The C# spelling of this type
    pub fn keyword(&self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Byte => "byte",
            ScalarType::Short => "short",
            ScalarType::Int => "int",
            ScalarType::Long => "long",
            ScalarType::Decimal => "decimal",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
            ScalarType::DateTime => "DateTime",
            ScalarType::TimeSpan => "TimeSpan",
            ScalarType::String => "string",
            ScalarType::Object => "object",
        }
    }
}

/// The declared type of a generated property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyType {
    pub scalar: ScalarType,
    /// Rendered with the `?` nullable marker
    pub nullable: bool,
}

impl PropertyType {
    /// Get the type string for code generation
    pub fn to_type_string(&self) -> String {
        self.to_string()
    }

    pub fn is_string(&self) -> bool {
        self.scalar == ScalarType::String
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scalar.keyword())?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Native type name (lowercase) to C# scalar, in lookup order
const TYPE_MAPPING: &[(&str, ScalarType)] = &[
    ("bit", ScalarType::Bool),
    ("tinyint", ScalarType::Byte),
    ("smallint", ScalarType::Short),
    ("mediumint", ScalarType::Int),
    ("int", ScalarType::Int),
    ("bigint", ScalarType::Long),
    ("decimal", ScalarType::Decimal),
    ("float", ScalarType::Float),
    ("double", ScalarType::Double),
    ("datetime", ScalarType::DateTime),
    ("date", ScalarType::DateTime),
    ("timestamp", ScalarType::DateTime),
    ("time", ScalarType::TimeSpan),
    ("char", ScalarType::String),
    ("varchar", ScalarType::String),
    ("tinytext", ScalarType::String),
    ("text", ScalarType::String),
    ("mediumtext", ScalarType::String),
    ("longtext", ScalarType::String),
    ("json", ScalarType::String),
];

/// Integer types whose display width 1 marks a boolean flag
const INTEGER_TYPES: &[&str] = &["tinyint", "smallint", "mediumint", "int", "integer", "bigint"];

/// Resolve MySQL column types to C# types
pub struct TypeMapper;

impl TypeMapper {
    /// Get the property type for a column.
    ///
    /// Nullable columns get the `?` marker, except strings, which are
    /// reference types and never decorated.
    pub fn map(column: &ColumnDescriptor) -> PropertyType {
        let scalar = Self::map_scalar(column);
        PropertyType {
            scalar,
            nullable: column.nullable && scalar != ScalarType::String,
        }
    }

    /// Resolve the scalar type (without the nullable marker)
    pub fn map_scalar(column: &ColumnDescriptor) -> ScalarType {
        let data_type = column.data_type.trim().to_lowercase();

        // integer(1) is the MySQL boolean convention; wins over the table
        if Self::is_boolean_flag(&data_type, column.max_length) {
            return ScalarType::Bool;
        }

        TYPE_MAPPING
            .iter()
            .find(|(native, _)| *native == data_type)
            .map(|(_, scalar)| *scalar)
            .unwrap_or(ScalarType::Object)
    }

    fn is_boolean_flag(data_type_lower: &str, max_length: Option<u64>) -> bool {
        max_length == Some(1) && INTEGER_TYPES.contains(&data_type_lower)
    }
}
