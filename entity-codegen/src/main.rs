//! CLI entry point for entity-codegen

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use entity_codegen::codegen::{to_class_name, TypeMapper};
use entity_codegen::config::{defaults, write_default_config};
use entity_codegen::schema::TableSchema;
use entity_codegen::{CodegenError, ConfigLoad, GeneratorSettings};

#[derive(Parser)]
#[command(name = "entity-codegen")]
#[command(about = "Generate C# entity classes from a MySQL database schema")]
#[command(version)]
struct Cli {
    /// Path to the settings file (INI format); a template is created if missing
    #[arg(default_value = defaults::CONFIG_FILE)]
    config: PathBuf,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    /// Inspect schema (show the tables read from the catalog)
    #[arg(long, conflicts_with = "dry_run")]
    inspect: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    println!("Database Entity Generator");
    println!("------------------------");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CodegenError>() {
                Some(e) if e.is_config() => eprintln!("Configuration error: {}", e),
                _ => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = match GeneratorSettings::load(&cli.config)? {
        ConfigLoad::Loaded(settings) => settings,
        ConfigLoad::NotFound(path) => {
            println!(
                "Configuration file not found. Creating default configuration at: {}",
                path.display()
            );
            write_default_config(&path)?;
            println!(
                "Please update the configuration file with your database details and run the program again."
            );
            return Ok(());
        }
    };

    // Priority: RUST_LOG env var > verbose setting
    let default_level = if settings.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!(
        "Initialized generator with configuration from: {}",
        cli.config.display()
    );

    if cli.inspect {
        let tables = entity_codegen::inspect(&settings)?;
        print_tables(&tables);
        return Ok(());
    }

    if cli.dry_run {
        settings.dry_run = true;
    }

    let report = entity_codegen::generate(&settings)?;

    if report.dry_run {
        println!("Dry run mode - would generate:");
        if let Some(script) = &report.sql_script {
            println!("  Script: {}", script.display());
        }
        for file in &report.entity_files {
            println!("  Entity: {}", file.display());
        }
    }

    Ok(())
}

fn print_tables(tables: &[TableSchema]) {
    println!("Read {} tables:\n", tables.len());
    for table in tables {
        println!("Table: {} -> {}", table.name, to_class_name(&table.name));
        let primary_key = table.primary_key_columns();
        if !primary_key.is_empty() {
            println!("  Primary key: {}", primary_key.join(", "));
        }
        println!("  Columns:");
        for col in &table.columns {
            let nullable = if col.nullable { "NULL" } else { "NOT NULL" };
            let key = if col.is_primary_key { " PRIMARY KEY" } else { "" };
            let auto_inc = if col.is_auto_increment {
                " AUTO_INCREMENT"
            } else {
                ""
            };
            let length = col
                .max_length
                .map(|len| format!("({})", len))
                .unwrap_or_default();
            println!(
                "    - {} {}{} {}{}{} -> {}",
                col.name,
                col.data_type,
                length,
                nullable,
                key,
                auto_inc,
                TypeMapper::map(col)
            );
        }
        println!();
    }
}
