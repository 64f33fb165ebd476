//! MySQL catalog reader

use mysql::prelude::{FromRow, Queryable};
use mysql::{Conn, FromRowError, OptsBuilder, Row};
use tracing::{debug, info};

use super::metadata::{CatalogColumn, ColumnDescriptor};
use super::{quote_identifier, SchemaSource};
use crate::config::DatabaseSettings;
use crate::error::{CodegenError, Result};

const TABLES_QUERY: &str = "\
SELECT TABLE_NAME
FROM INFORMATION_SCHEMA.TABLES
WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE'
ORDER BY TABLE_NAME";

const COLUMNS_QUERY: &str = "\
SELECT
    COLUMN_NAME,
    DATA_TYPE,
    IS_NULLABLE,
    COLUMN_KEY,
    EXTRA,
    CHARACTER_MAXIMUM_LENGTH,
    NUMERIC_PRECISION,
    NUMERIC_SCALE,
    COLUMN_TYPE,
    ORDINAL_POSITION
FROM INFORMATION_SCHEMA.COLUMNS
WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
ORDER BY ORDINAL_POSITION";

/// Schema metadata read over a single blocking MySQL connection.
///
/// The connection is closed when the reader is dropped; [`MySqlSchema::close`]
/// does the same and logs it.
pub struct MySqlSchema {
    conn: Conn,
    database: String,
}

impl MySqlSchema {
    /// Open a connection to the configured database
    pub fn connect(settings: &DatabaseSettings) -> Result<Self> {
        info!(
            "Connecting to database {} on {}:{}",
            settings.database, settings.host, settings.port
        );

        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(settings.host.clone()))
            .tcp_port(settings.port)
            .db_name(Some(settings.database.clone()))
            .user(Some(settings.user.clone()))
            .pass(Some(settings.password.clone()));
        let conn = Conn::new(opts)?;

        info!("Successfully connected to database: {}", settings.database);
        Ok(Self {
            conn,
            database: settings.database.clone(),
        })
    }

    /// Close the connection
    pub fn close(self) {
        drop(self.conn);
        info!("Database connection closed");
    }
}

impl SchemaSource for MySqlSchema {
    fn database_name(&self) -> &str {
        &self.database
    }

    fn list_tables(&mut self) -> Result<Vec<String>> {
        let rows: Vec<Row> = self.conn.exec(TABLES_QUERY, (self.database.clone(),))?;
        rows.into_iter()
            .map(|row| mysql::from_row_opt::<String>(row).map_err(CodegenError::from))
            .collect()
    }

    fn list_columns(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        debug!("Reading columns of {}.{}", self.database, table);
        let rows: Vec<Row> = self
            .conn
            .exec(COLUMNS_QUERY, (self.database.clone(), table.to_string()))?;

        rows.into_iter()
            .map(|row| -> Result<ColumnDescriptor> {
                let column = CatalogColumn::from_row_opt(row)?;
                Ok(ColumnDescriptor::from(column))
            })
            .collect()
    }

    fn show_create_table(&mut self, table: &str) -> Result<String> {
        let query = format!("SHOW CREATE TABLE {}", quote_identifier(table));
        let row: Option<Row> = self.conn.query_first(query)?;
        let row = row.ok_or_else(|| {
            CodegenError::Catalog(format!("SHOW CREATE TABLE returned no row for {}", table))
        })?;
        let (_, create_statement): (String, String) = mysql::from_row_opt(row)?;
        Ok(create_statement)
    }
}

impl FromRow for CatalogColumn {
    fn from_row_opt(row: Row) -> std::result::Result<Self, FromRowError> {
        let (
            column_name,
            data_type,
            is_nullable,
            column_key,
            extra,
            character_maximum_length,
            numeric_precision,
            numeric_scale,
            column_type,
            ordinal_position,
        ): (
            String,
            String,
            String,
            String,
            String,
            Option<u64>,
            Option<u64>,
            Option<u64>,
            String,
            u32,
        ) = FromRow::from_row_opt(row)?;

        Ok(Self {
            column_name,
            data_type,
            is_nullable,
            column_key,
            extra,
            character_maximum_length,
            numeric_precision,
            numeric_scale,
            column_type,
            ordinal_position,
        })
    }
}
