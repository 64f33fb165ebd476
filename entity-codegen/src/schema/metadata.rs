//! Metadata structures read from the database catalog

use once_cell::sync::Lazy;
use regex::Regex;

/// Integer display width in a full column type, e.g. "tinyint(1) unsigned" -> 1
static DISPLAY_WIDTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:tinyint|smallint|mediumint|int|integer|bigint)\((\d+)\)")
        .expect("display width pattern is valid")
});

/// A base table and its columns in catalog order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name
    pub name: String,

    /// Columns sorted by ordinal position
    pub columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    /// Create a table schema; columns are ordered by their ordinal position
    /// regardless of the order they are passed in.
    pub fn new(name: impl Into<String>, mut columns: Vec<ColumnDescriptor>) -> Self {
        columns.sort_by_key(|c| c.ordinal_position);
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Names of the primary key columns, in ordinal order
    pub fn primary_key_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_primary_key)
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Metadata for a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,

    /// Native type name without length or flags (e.g. "varchar", "tinyint")
    pub data_type: String,

    /// Whether the column is nullable
    pub nullable: bool,

    /// Whether the column is part of the primary key
    pub is_primary_key: bool,

    /// Whether this column is auto-increment
    pub is_auto_increment: bool,

    /// Character length, or the display width for integer types
    pub max_length: Option<u64>,

    /// Numeric precision (numeric types only)
    pub numeric_precision: Option<u64>,

    /// Numeric scale (exact numeric types only)
    pub numeric_scale: Option<u64>,

    /// 1-based position of the column within its table
    pub ordinal_position: u32,
}

/// One row of `INFORMATION_SCHEMA.COLUMNS`, as read from the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogColumn {
    pub column_name: String,
    pub data_type: String,
    /// "YES" or "NO"
    pub is_nullable: String,
    /// "PRI", "UNI", "MUL" or empty
    pub column_key: String,
    /// e.g. "auto_increment", "DEFAULT_GENERATED on update CURRENT_TIMESTAMP"
    pub extra: String,
    pub character_maximum_length: Option<u64>,
    pub numeric_precision: Option<u64>,
    pub numeric_scale: Option<u64>,
    /// Full type including length and flags, e.g. "tinyint(1) unsigned"
    pub column_type: String,
    pub ordinal_position: u32,
}

impl From<CatalogColumn> for ColumnDescriptor {
    fn from(row: CatalogColumn) -> Self {
        let max_length = display_width(&row.column_type).or(row.character_maximum_length);

        Self {
            name: row.column_name,
            data_type: row.data_type,
            nullable: row.is_nullable.eq_ignore_ascii_case("YES"),
            is_primary_key: row.column_key.eq_ignore_ascii_case("PRI"),
            is_auto_increment: row.extra.to_lowercase().contains("auto_increment"),
            max_length,
            numeric_precision: row.numeric_precision,
            numeric_scale: row.numeric_scale,
            ordinal_position: row.ordinal_position,
        }
    }
}

/// Parse the display width out of an integer column type
pub fn display_width(column_type: &str) -> Option<u64> {
    let column_type = column_type.trim().to_lowercase();
    DISPLAY_WIDTH
        .captures(&column_type)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
