//! Default configuration values - single source of truth

/// Settings file used when none is given on the command line
pub const CONFIG_FILE: &str = "database_config.ini";

/// Default MySQL port
pub const PORT: u16 = 3306;

/// Default target language
pub const LANGUAGE: &str = "csharp";

/// Whether progress is logged at info level by default
pub const VERBOSE: bool = true;

/// Whether the schema dump script is generated by default
pub const GENERATE_SQL: bool = false;

/// Default file name of the schema dump script
pub const SQL_OUTPUT_FILE: &str = "database_structure.sql";

/// Attribute toggles are on unless switched off explicitly
pub const ATTRIBUTE_ENABLED: bool = true;

/// Template written when the settings file does not exist yet
pub const CONFIG_TEMPLATE: &str = "\
[Database]
host = localhost
database = your_database_name
user = username
password = your_password

[Generator]
output_directory = ./GeneratedEntities
namespace = Write.Your.Namespace
language = csharp

[Attributes]
use_key_attribute = true
use_required_attribute = true
use_column_attribute = true
use_maxlength_attribute = true
use_table_attribute = true
use_databasegenerated_attribute = true
";
