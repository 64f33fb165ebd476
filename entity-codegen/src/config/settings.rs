//! Configuration settings for entity-codegen

use config::{Config, File, FileStoredFormat, Format, Map, Value, ValueKind};
use ini::{Ini, ParseOption};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use super::defaults;
use crate::error::{CodegenError, Result};

/// Connection parameters for the database being introspected
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Which decorative attributes are emitted on generated entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AttributeToggles {
    /// `[Key]` on primary key columns
    #[serde(rename = "use_key_attribute")]
    pub use_key: bool,
    /// `[Required]` on non-nullable, non-string columns
    #[serde(rename = "use_required_attribute")]
    pub use_required: bool,
    /// `[Column("name")]` on every property
    #[serde(rename = "use_column_attribute")]
    pub use_column: bool,
    /// `[MaxLength(n)]` on char/varchar columns
    #[serde(rename = "use_maxlength_attribute")]
    pub use_max_length: bool,
    /// `[Table("name")]` on the class
    #[serde(rename = "use_table_attribute")]
    pub use_table: bool,
    /// `[DatabaseGenerated(...)]` on auto-increment columns
    #[serde(rename = "use_databasegenerated_attribute")]
    pub use_database_generated: bool,
}

impl Default for AttributeToggles {
    fn default() -> Self {
        Self {
            use_key: defaults::ATTRIBUTE_ENABLED,
            use_required: defaults::ATTRIBUTE_ENABLED,
            use_column: defaults::ATTRIBUTE_ENABLED,
            use_max_length: defaults::ATTRIBUTE_ENABLED,
            use_table: defaults::ATTRIBUTE_ENABLED,
            use_database_generated: defaults::ATTRIBUTE_ENABLED,
        }
    }
}

impl AttributeToggles {
    /// Every toggle switched off
    pub fn none() -> Self {
        Self {
            use_key: false,
            use_required: false,
            use_column: false,
            use_max_length: false,
            use_table: false,
            use_database_generated: false,
        }
    }

    /// Whether any attribute from `System.ComponentModel.DataAnnotations` is on
    pub fn needs_annotations(&self) -> bool {
        self.use_key || self.use_required || self.use_max_length
    }

    /// Whether any attribute from `System.ComponentModel.DataAnnotations.Schema` is on
    pub fn needs_schema_annotations(&self) -> bool {
        self.use_column || self.use_table || self.use_database_generated
    }
}

/// Language the entity classes are generated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetLanguage {
    #[default]
    CSharp,
}

impl TargetLanguage {
    /// Parse the `language` setting
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csharp" | "c#" | "cs" => Ok(TargetLanguage::CSharp),
            other => Err(CodegenError::Config(format!(
                "Unsupported language: {}",
                other
            ))),
        }
    }

    /// File extension of generated entity files
    pub fn file_extension(&self) -> &'static str {
        match self {
            TargetLanguage::CSharp => "cs",
        }
    }
}

/// Fully validated settings for one generation run
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub database: DatabaseSettings,

    /// Directory receiving the generated files
    pub output_directory: PathBuf,

    /// Namespace wrapping every generated class
    pub namespace: String,

    pub language: TargetLanguage,

    /// Log progress at info level (otherwise warnings only)
    pub verbose: bool,

    /// Also write the schema dump script
    pub generate_sql: bool,

    /// File name of the schema dump script, relative to `output_directory`
    pub sql_output_file: String,

    pub attributes: AttributeToggles,

    /// Report the files that would be written without writing them
    pub dry_run: bool,
}

/// Outcome of looking for a settings file
#[derive(Debug)]
pub enum ConfigLoad {
    Loaded(GeneratorSettings),
    NotFound(PathBuf),
}

/// The settings file as written, before required keys are checked.
/// Section and key names arrive lowercased.
#[derive(Deserialize)]
struct SettingsFile {
    database: Option<DatabaseSection>,
    generator: Option<GeneratorSection>,
    #[serde(default)]
    attributes: AttributeToggles,
}

#[derive(Deserialize)]
struct DatabaseSection {
    host: Option<String>,
    #[serde(default = "default_port")]
    port: u16,
    database: Option<String>,
    user: Option<String>,
    password: Option<String>,
}

#[derive(Deserialize)]
struct GeneratorSection {
    output_directory: Option<PathBuf>,
    namespace: Option<String>,
    #[serde(default = "default_language")]
    language: String,
    #[serde(default = "default_verbose")]
    verbose: bool,
    #[serde(default = "default_generate_sql")]
    generate_sql: bool,
    #[serde(default = "default_sql_output_file")]
    sql_output_file: String,
}

// Default value functions for serde
fn default_port() -> u16 {
    defaults::PORT
}
fn default_language() -> String {
    defaults::LANGUAGE.to_string()
}
fn default_verbose() -> bool {
    defaults::VERBOSE
}
fn default_generate_sql() -> bool {
    defaults::GENERATE_SQL
}
fn default_sql_output_file() -> String {
    defaults::SQL_OUTPUT_FILE.to_string()
}

impl GeneratorSettings {
    /// Load settings from an INI file.
    ///
    /// A missing file is not an error: the caller decides whether to
    /// scaffold a template (see [`write_default_config`]).
    pub fn load(path: &Path) -> Result<ConfigLoad> {
        if !path.exists() {
            return Ok(ConfigLoad::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_ini_str(&content).map(ConfigLoad::Loaded)
    }

    /// Parse settings from INI text
    pub fn from_ini_str(content: &str) -> Result<Self> {
        let file: SettingsFile = Config::builder()
            .add_source(File::from_str(content, LiteralIni))
            .build()?
            .try_deserialize()?;

        Self::validate(file)
    }

    fn validate(file: SettingsFile) -> Result<Self> {
        let database = file.database.ok_or_else(|| missing_section("Database"))?;
        let database = DatabaseSettings {
            host: required(database.host, "database", "host")?,
            port: database.port,
            database: required(database.database, "database", "database")?,
            user: required(database.user, "database", "user")?,
            password: required(database.password, "database", "password")?,
        };

        let generator = file.generator.ok_or_else(|| missing_section("Generator"))?;

        Ok(Self {
            database,
            output_directory: required(generator.output_directory, "generator", "output_directory")?,
            namespace: required(generator.namespace, "generator", "namespace")?,
            language: TargetLanguage::parse(&generator.language)?,
            verbose: generator.verbose,
            generate_sql: generator.generate_sql,
            sql_output_file: generator.sql_output_file,
            attributes: file.attributes,
            dry_run: false,
        })
    }

    /// Path of the schema dump script
    pub fn sql_output_path(&self) -> PathBuf {
        self.output_directory.join(&self.sql_output_file)
    }
}

fn missing_section(name: &str) -> CodegenError {
    CodegenError::Config(format!("Missing required section: {}", name))
}

fn required<T>(value: Option<T>, kind: &str, key: &str) -> Result<T> {
    value.ok_or_else(|| {
        CodegenError::Config(format!("Missing required {} parameter: {}", kind, key))
    })
}

/// Write the settings template to `path`
pub fn write_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, defaults::CONFIG_TEMPLATE)?;
    Ok(())
}

/// INI format that keeps values verbatim: no backslash escapes, no quote
/// stripping. Section and key names are lowercased.
#[derive(Debug, Clone, Copy)]
struct LiteralIni;

impl Format for LiteralIni {
    fn parse(
        &self,
        uri: Option<&String>,
        text: &str,
    ) -> std::result::Result<Map<String, Value>, Box<dyn std::error::Error + Send + Sync>> {
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, options)?;

        let mut sections: Map<String, Map<String, Value>> = Map::new();
        let mut root: Map<String, Value> = Map::new();
        for (section, properties) in ini.iter() {
            let target = match section {
                Some(name) => sections.entry(name.to_lowercase()).or_default(),
                None => &mut root,
            };
            for (key, value) in properties.iter() {
                target.insert(
                    key.to_lowercase(),
                    Value::new(uri, ValueKind::String(value.to_owned())),
                );
            }
        }

        for (name, entries) in sections {
            root.insert(name, Value::new(uri, ValueKind::Table(entries)));
        }
        Ok(root)
    }
}

impl FileStoredFormat for LiteralIni {
    fn file_extensions(&self) -> &'static [&'static str] {
        &["ini"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[Database]
host = db.internal
database = shop
user = reader
password = secret

[Generator]
output_directory = ./out
namespace = Shop.Entities
"#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let settings = GeneratorSettings::from_ini_str(MINIMAL).unwrap();
        assert_eq!(settings.database.host, "db.internal");
        assert_eq!(settings.database.port, 3306);
        assert_eq!(settings.database.database, "shop");
        assert_eq!(settings.namespace, "Shop.Entities");
        assert_eq!(settings.output_directory, PathBuf::from("./out"));
        assert_eq!(settings.language, TargetLanguage::CSharp);
        assert!(settings.verbose);
        assert!(!settings.generate_sql);
        assert_eq!(settings.sql_output_file, "database_structure.sql");
        assert_eq!(settings.attributes, AttributeToggles::default());
        assert!(!settings.dry_run);
    }

    #[test]
    fn test_missing_password() {
        let content = MINIMAL.replace("password = secret\n", "");
        let err = GeneratorSettings::from_ini_str(&content).unwrap_err();
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "Missing required database parameter: password"
        );
    }

    #[test]
    fn test_missing_generator_section() {
        let content = r#"
[Database]
host = localhost
database = shop
user = reader
password = secret
"#;
        let err = GeneratorSettings::from_ini_str(content).unwrap_err();
        assert_eq!(err.to_string(), "Missing required section: Generator");
    }

    #[test]
    fn test_missing_namespace() {
        let content = MINIMAL.replace("namespace = Shop.Entities\n", "");
        let err = GeneratorSettings::from_ini_str(&content).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required generator parameter: namespace"
        );
    }

    #[test]
    fn test_attribute_toggles() {
        let content = format!(
            "{}\n[Attributes]\nuse_key_attribute = false\nuse_maxlength_attribute = no\n",
            MINIMAL
        );
        let settings = GeneratorSettings::from_ini_str(&content).unwrap();
        assert!(!settings.attributes.use_key);
        assert!(!settings.attributes.use_max_length);
        assert!(settings.attributes.use_required);
        assert!(settings.attributes.use_column);
        assert!(settings.attributes.use_table);
        assert!(settings.attributes.use_database_generated);
    }

    #[test]
    fn test_generator_options() {
        let content = format!(
            "{}verbose = off\ngenerate_sql = true\nsql_output_file = schema.sql\nlanguage = csharp\n",
            MINIMAL
        );
        let settings = GeneratorSettings::from_ini_str(&content).unwrap();
        assert!(!settings.verbose);
        assert!(settings.generate_sql);
        assert_eq!(settings.sql_output_path(), PathBuf::from("./out/schema.sql"));
    }

    #[test]
    fn test_invalid_boolean() {
        let content = format!("{}generate_sql = maybe\n", MINIMAL);
        let err = GeneratorSettings::from_ini_str(&content).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_values_are_read_verbatim() {
        let content = r#"
[Database]
host = localhost
database = shop
user = reader
password = "back\slash"

[Generator]
output_directory = C:\Projects\Shop\Entities
namespace = Shop.Entities
sql_output_file = 'dump.sql'
"#;
        let settings = GeneratorSettings::from_ini_str(content).unwrap();
        assert_eq!(settings.database.password, r#""back\slash""#);
        assert_eq!(
            settings.output_directory,
            PathBuf::from(r"C:\Projects\Shop\Entities")
        );
        assert_eq!(settings.sql_output_file, "'dump.sql'");
    }

    #[test]
    fn test_section_and_key_names_ignore_case() {
        let content = r#"
[DATABASE]
Host = localhost
Database = shop
USER = reader
Password = secret

[generator]
Output_Directory = out
NameSpace = Ns
Generate_SQL = On

[ATTRIBUTES]
Use_Key_Attribute = 0
"#;
        let settings = GeneratorSettings::from_ini_str(content).unwrap();
        assert_eq!(settings.database.user, "reader");
        assert_eq!(settings.namespace, "Ns");
        assert!(settings.generate_sql);
        assert!(!settings.attributes.use_key);
        assert!(settings.attributes.use_table);
    }

    #[test]
    fn test_custom_and_invalid_port() {
        let content = MINIMAL.replace("host = db.internal\n", "host = db.internal\nport = 3307\n");
        let settings = GeneratorSettings::from_ini_str(&content).unwrap();
        assert_eq!(settings.database.port, 3307);

        let content = MINIMAL.replace("host = db.internal\n", "host = db.internal\nport = abc\n");
        let err = GeneratorSettings::from_ini_str(&content).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_unsupported_language() {
        let content = format!("{}language = cobol\n", MINIMAL);
        let err = GeneratorSettings::from_ini_str(&content).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported language: cobol");
    }

    #[test]
    fn test_password_not_in_debug_output() {
        let settings = GeneratorSettings::from_ini_str(MINIMAL).unwrap();
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database_config.ini");
        match GeneratorSettings::load(&path).unwrap() {
            ConfigLoad::NotFound(p) => assert_eq!(p, path),
            ConfigLoad::Loaded(_) => panic!("expected NotFound"),
        }
    }

    #[test]
    fn test_default_template_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database_config.ini");
        write_default_config(&path).unwrap();

        match GeneratorSettings::load(&path).unwrap() {
            ConfigLoad::Loaded(settings) => {
                assert_eq!(settings.database.host, "localhost");
                assert_eq!(settings.namespace, "Write.Your.Namespace");
                assert_eq!(
                    settings.output_directory,
                    PathBuf::from("./GeneratedEntities")
                );
                assert_eq!(settings.attributes, AttributeToggles::default());
            }
            ConfigLoad::NotFound(_) => panic!("template was not written"),
        }
    }
}
