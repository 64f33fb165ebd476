//! entity-codegen: Generate C# entity classes from a live MySQL schema
//!
//! The generator reads `INFORMATION_SCHEMA` of one database and writes:
//!
//! - One entity class per base table (`<PascalCaseTable>.cs`) with optional
//!   data annotation attributes (`[Key]`, `[Column]`, `[MaxLength]`, ...)
//! - Optionally, a schema dump script built from `SHOW CREATE TABLE`
//!
//! # CLI Usage
//!
//! ```bash
//! entity-codegen database_config.ini
//! ```
//!
//! If the settings file does not exist, a template is written in its place.
//!
//! # Library Usage
//!
//! ```rust,ignore
//! use entity_codegen::{ConfigLoad, GeneratorSettings};
//!
//! if let ConfigLoad::Loaded(settings) = GeneratorSettings::load("database_config.ini".as_ref())? {
//!     let report = entity_codegen::generate(&settings)?;
//!     println!("{} entities written", report.entity_files.len());
//! }
//! ```
//!
//! Rendering is independent of the database: [`codegen::render_entity`] and
//! [`codegen::render_schema_dump`] are pure functions, and any
//! [`schema::SchemaSource`] (e.g. [`schema::MemorySchema`]) can drive
//! [`codegen::EntityGenerator`].

pub mod codegen;
pub mod config;
pub mod error;
pub mod schema;

use tracing::info;

pub use codegen::{EntityGenerator, GenerationReport};
pub use config::{AttributeToggles, ConfigLoad, GeneratorSettings};
pub use error::{CodegenError, Result};

use schema::{MySqlSchema, SchemaSource, TableSchema};

/// Main entry point for code generation.
///
/// Opens one connection for the whole run and closes it on every exit path.
pub fn generate(settings: &GeneratorSettings) -> Result<GenerationReport> {
    info!("Connecting to database...");
    let mut schema = MySqlSchema::connect(&settings.database)?;

    let result = EntityGenerator::new(settings).generate(&mut schema);
    schema.close();
    result
}

/// Read every base table with its columns, without generating anything
pub fn inspect(settings: &GeneratorSettings) -> Result<Vec<TableSchema>> {
    let mut schema = MySqlSchema::connect(&settings.database)?;
    let result = read_tables(&mut schema);
    schema.close();
    result
}

/// Read every base table of a source, in listing order
pub fn read_tables<S: SchemaSource + ?Sized>(source: &mut S) -> Result<Vec<TableSchema>> {
    let tables = source.list_tables()?;
    tables.iter().map(|table| source.read_table(table)).collect()
}
