//! Main code generator orchestrator

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::config::GeneratorSettings;
use crate::error::Result;
use crate::schema::SchemaSource;

use super::entity_renderer::render_entity;
use super::naming::to_entity_file_name;
use super::schema_dump::generate_schema_dump;

/// Files produced (or, in dry-run mode, planned) by one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Entity files in table order
    pub entity_files: Vec<PathBuf>,

    /// The schema dump script, when requested
    pub sql_script: Option<PathBuf>,

    /// Nothing was written
    pub dry_run: bool,
}

/// Drives one generation run against a schema source
pub struct EntityGenerator<'a> {
    settings: &'a GeneratorSettings,
    generated_at: Option<NaiveDateTime>,
}

impl<'a> EntityGenerator<'a> {
    /// Create a new generator with the given settings
    pub fn new(settings: &'a GeneratorSettings) -> Self {
        Self {
            settings,
            generated_at: None,
        }
    }

    /// Fix the timestamp stamped into the schema dump (defaults to now)
    pub fn generated_at(mut self, timestamp: NaiveDateTime) -> Self {
        self.generated_at = Some(timestamp);
        self
    }

    /// Generate the dump script (if enabled) and one entity file per table.
    ///
    /// Tables are processed one at a time; a failure stops the run and
    /// leaves files already written in place.
    pub fn generate<S: SchemaSource + ?Sized>(&self, source: &mut S) -> Result<GenerationReport> {
        let settings = self.settings;
        let mut report = GenerationReport {
            dry_run: settings.dry_run,
            ..Default::default()
        };

        if !settings.dry_run {
            fs::create_dir_all(&settings.output_directory)?;
        }

        let tables = source.list_tables()?;
        info!("Found {} tables in database", tables.len());

        if settings.generate_sql {
            info!("Generating SQL script...");
            let generated_at = self
                .generated_at
                .unwrap_or_else(|| Local::now().naive_local());
            let script = generate_schema_dump(source, &tables, generated_at)?;
            let path = settings.sql_output_path();
            self.write(&path, &script)?;
            info!("SQL script generated: {}", path.display());
            report.sql_script = Some(path);
        }

        for table in &tables {
            info!("Processing table: {}", table);
            let schema = source.read_table(table)?;
            info!("Found {} columns in table {}", schema.columns.len(), table);

            let code = render_entity(&schema, &settings.namespace, &settings.attributes);
            let file_name = to_entity_file_name(table, settings.language.file_extension());
            let path = settings.output_directory.join(&file_name);
            self.write(&path, &code)?;

            info!("Generated entity class: {}", file_name);
            report.entity_files.push(path);
        }

        info!("Entity generation completed successfully");
        Ok(report)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if self.settings.dry_run {
            debug!("Dry run, skipping write of {}", path.display());
            return Ok(());
        }
        fs::write(path, content)?;
        Ok(())
    }
}
