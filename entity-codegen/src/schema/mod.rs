//! Database catalog access
//!
//! [`SchemaSource`] abstracts over where table and column metadata come from:
//! [`MySqlSchema`] reads a live server's `INFORMATION_SCHEMA`, while
//! [`MemorySchema`] serves a fixed catalog (handy for tests and previews).

mod memory;
mod metadata;
mod mysql_catalog;

pub use self::memory::MemorySchema;
pub use self::metadata::*;
pub use self::mysql_catalog::MySqlSchema;

use crate::error::Result;

/// A source of schema metadata for one database.
pub trait SchemaSource {
    /// Name of the database (schema) being read
    fn database_name(&self) -> &str;

    /// Base tables of the database, views excluded
    fn list_tables(&mut self) -> Result<Vec<String>>;

    /// Columns of a table in ordinal order
    fn list_columns(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>>;

    /// The server's own `CREATE TABLE` statement for a table
    fn show_create_table(&mut self, table: &str) -> Result<String>;

    /// Read a table together with its columns
    fn read_table(&mut self, table: &str) -> Result<TableSchema> {
        let columns = self.list_columns(table)?;
        Ok(TableSchema::new(table, columns))
    }
}

/// Quote a MySQL identifier with backticks, doubling embedded backticks
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
