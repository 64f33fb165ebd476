//! Schema dump - a portable script recreating every table

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::Result;
use crate::schema::{quote_identifier, SchemaSource};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fetch `SHOW CREATE TABLE` for each table and render the dump script
pub fn generate_schema_dump<S: SchemaSource + ?Sized>(
    source: &mut S,
    tables: &[String],
    generated_at: NaiveDateTime,
) -> Result<String> {
    let mut definitions = Vec::with_capacity(tables.len());
    for table in tables {
        debug!("Getting structure for table: {}", table);
        let create_statement = source.show_create_table(table)?;
        definitions.push((table.clone(), create_statement));
    }

    Ok(render_schema_dump(
        source.database_name(),
        generated_at,
        &definitions,
    ))
}

/// Render the dump script from `(table, create statement)` pairs.
///
/// Create statements are emitted verbatim; the script disables foreign key
/// checks so the tables can be created in any order.
pub fn render_schema_dump(
    database: &str,
    generated_at: NaiveDateTime,
    definitions: &[(String, String)],
) -> String {
    let mut lines = vec![
        "-- Database structure script".to_string(),
        format!("-- Generated on {}", generated_at.format(TIMESTAMP_FORMAT)),
        format!("-- Database: {}", database),
        String::new(),
        "SET FOREIGN_KEY_CHECKS=0;".to_string(),
        "SET SQL_MODE = 'NO_AUTO_VALUE_ON_ZERO';".to_string(),
        "SET NAMES utf8mb4;".to_string(),
        String::new(),
    ];

    for (table, create_statement) in definitions {
        let quoted = quote_identifier(table);
        lines.push(format!("-- Table structure for table {}", quoted));
        lines.push(format!("DROP TABLE IF EXISTS {};", quoted));
        lines.push(format!("{};", create_statement));
        lines.push(String::new());
    }

    lines.push("SET FOREIGN_KEY_CHECKS=1;".to_string());

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{MemorySchema, TableSchema};
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap()
    }

    #[test]
    fn test_render_schema_dump() {
        let definitions = vec![(
            "orders".to_string(),
            "CREATE TABLE `orders` (\n  `id` int NOT NULL AUTO_INCREMENT,\n  PRIMARY KEY (`id`)\n) ENGINE=InnoDB".to_string(),
        )];
        let script = render_schema_dump("shop", timestamp(), &definitions);
        let expected = "-- Database structure script
-- Generated on 2024-03-09 14:05:07
-- Database: shop

SET FOREIGN_KEY_CHECKS=0;
SET SQL_MODE = 'NO_AUTO_VALUE_ON_ZERO';
SET NAMES utf8mb4;

-- Table structure for table `orders`
DROP TABLE IF EXISTS `orders`;
CREATE TABLE `orders` (
  `id` int NOT NULL AUTO_INCREMENT,
  PRIMARY KEY (`id`)
) ENGINE=InnoDB;

SET FOREIGN_KEY_CHECKS=1;
";
        assert_eq!(script, expected);
    }

    #[test]
    fn test_render_without_tables() {
        let script = render_schema_dump("empty", timestamp(), &[]);
        assert!(script.starts_with("-- Database structure script\n"));
        assert!(script.ends_with("SET NAMES utf8mb4;\n\nSET FOREIGN_KEY_CHECKS=1;\n"));
        assert!(!script.contains("DROP TABLE"));
    }

    #[test]
    fn test_generate_follows_table_order() {
        let mut source = MemorySchema::new("shop")
            .with_table(TableSchema::new("users", vec![]), "CREATE TABLE `users` ()")
            .with_table(TableSchema::new("orders", vec![]), "CREATE TABLE `orders` ()");
        let tables = vec!["orders".to_string(), "users".to_string()];

        let script = generate_schema_dump(&mut source, &tables, timestamp()).unwrap();
        let orders = script.find("DROP TABLE IF EXISTS `orders`;").unwrap();
        let users = script.find("DROP TABLE IF EXISTS `users`;").unwrap();
        assert!(orders < users);
        assert!(script.contains("-- Database: shop\n"));
    }

    #[test]
    fn test_generate_propagates_missing_table() {
        let mut source = MemorySchema::new("shop");
        let tables = vec!["ghosts".to_string()];
        assert!(generate_schema_dump(&mut source, &tables, timestamp()).is_err());
    }
}
