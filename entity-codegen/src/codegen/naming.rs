//! Naming utilities for code generation

use heck::ToPascalCase;

/// Convert a table name to a class name (PascalCase)
pub fn to_class_name(table_name: &str) -> String {
    table_name.to_pascal_case()
}

/// Convert a column name to a property name (PascalCase)
pub fn to_property_name(column_name: &str) -> String {
    column_name.to_pascal_case()
}

/// File name of the generated entity for a table, e.g. "user_profile" -> "UserProfile.cs"
pub fn to_entity_file_name(table_name: &str, extension: &str) -> String {
    format!("{}.{}", to_class_name(table_name), extension)
}

/// Escape a value for a C# regular string literal
pub fn escape_string_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
