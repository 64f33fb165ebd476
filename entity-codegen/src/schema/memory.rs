//! In-memory catalog

use super::metadata::{ColumnDescriptor, TableSchema};
use super::SchemaSource;
use crate::error::{CodegenError, Result};

/// A fixed catalog held in memory. Tables are listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemorySchema {
    database: String,
    tables: Vec<(TableSchema, String)>,
}

impl MemorySchema {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            tables: Vec::new(),
        }
    }

    /// Add a table with the statement `SHOW CREATE TABLE` should report for it
    pub fn with_table(mut self, table: TableSchema, create_statement: impl Into<String>) -> Self {
        self.tables.push((table, create_statement.into()));
        self
    }

    fn find(&self, name: &str) -> Result<&(TableSchema, String)> {
        self.tables
            .iter()
            .find(|(table, _)| table.name == name)
            .ok_or_else(|| CodegenError::Catalog(format!("Table '{}' doesn't exist", name)))
    }
}

impl SchemaSource for MemorySchema {
    fn database_name(&self) -> &str {
        &self.database
    }

    fn list_tables(&mut self) -> Result<Vec<String>> {
        Ok(self
            .tables
            .iter()
            .map(|(table, _)| table.name.clone())
            .collect())
    }

    fn list_columns(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        self.find(table).map(|(table, _)| table.columns.clone())
    }

    fn show_create_table(&mut self, table: &str) -> Result<String> {
        self.find(table).map(|(_, create_statement)| create_statement.clone())
    }
}
