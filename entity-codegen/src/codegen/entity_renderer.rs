//! Entity renderer - generates C# entity classes from table metadata

use std::collections::BTreeSet;

use crate::config::AttributeToggles;
use crate::schema::{ColumnDescriptor, TableSchema};

use super::naming::{escape_string_literal, to_class_name, to_property_name};
use super::type_mapper::{PropertyType, TypeMapper};

const USING_SYSTEM: &str = "using System;";
const USING_ANNOTATIONS: &str = "using System.ComponentModel.DataAnnotations;";
const USING_SCHEMA: &str = "using System.ComponentModel.DataAnnotations.Schema;";

const CLASS_INDENT: &str = "    ";
const MEMBER_INDENT: &str = "        ";

/// Native types that receive `[MaxLength]`
const LENGTH_CONSTRAINED_TYPES: &[&str] = &["varchar", "char"];

/// Render the complete source of the entity class for a table
pub fn render_entity(table: &TableSchema, namespace: &str, toggles: &AttributeToggles) -> String {
    let class_name = to_class_name(&table.name);
    let mut lines: Vec<String> = using_directives(toggles)
        .into_iter()
        .map(str::to_string)
        .collect();

    lines.push(String::new());
    lines.push(format!("namespace {}", namespace));
    lines.push("{".to_string());

    if toggles.use_table {
        lines.push(format!(
            "{}[Table(\"{}\")]",
            CLASS_INDENT,
            escape_string_literal(&table.name)
        ));
    }
    lines.push(format!("{}public class {}", CLASS_INDENT, class_name));
    lines.push(format!("{}{{", CLASS_INDENT));

    for (i, column) in table.columns.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        let property_type = TypeMapper::map(column);
        for attribute in property_attributes(column, property_type, toggles) {
            lines.push(format!("{}{}", MEMBER_INDENT, attribute));
        }
        lines.push(format!(
            "{}public {} {} {{ get; set; }}",
            MEMBER_INDENT,
            property_type,
            to_property_name(&column.name)
        ));
    }

    lines.push(format!("{}}}", CLASS_INDENT));
    lines.push("}".to_string());

    let mut code = lines.join("\n");
    code.push('\n');
    code
}

/// Using directives needed by the enabled attributes, in byte order
fn using_directives(toggles: &AttributeToggles) -> BTreeSet<&'static str> {
    let mut usings = BTreeSet::new();
    usings.insert(USING_SYSTEM);
    if toggles.needs_annotations() {
        usings.insert(USING_ANNOTATIONS);
    }
    if toggles.needs_schema_annotations() {
        usings.insert(USING_SCHEMA);
    }
    usings
}

/// Attributes for one property, in their fixed emission order
fn property_attributes(
    column: &ColumnDescriptor,
    property_type: PropertyType,
    toggles: &AttributeToggles,
) -> Vec<String> {
    let mut attrs = Vec::new();

    if toggles.use_key && column.is_primary_key {
        attrs.push("[Key]".to_string());
    }

    if toggles.use_database_generated && column.is_auto_increment {
        attrs.push("[DatabaseGenerated(DatabaseGeneratedOption.Identity)]".to_string());
    }

    if toggles.use_column {
        attrs.push(format!(
            "[Column(\"{}\")]",
            escape_string_literal(&column.name)
        ));
    }

    if toggles.use_required && !column.nullable && !property_type.is_string() {
        attrs.push("[Required]".to_string());
    }

    if toggles.use_max_length {
        let data_type = column.data_type.to_lowercase();
        if let Some(max_length) = column.max_length {
            if LENGTH_CONSTRAINED_TYPES.contains(&data_type.as_str()) {
                attrs.push(format!("[MaxLength({})]", max_length));
            }
        }
    }

    attrs
}
