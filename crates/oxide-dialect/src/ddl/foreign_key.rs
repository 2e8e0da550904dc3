//! Foreign key constraint generation.

use crate::dialect::Dialect;
use crate::error::{DialectError, Result};

use super::table::StandardTableExporter;
use super::{column_list, drop_constraint_target, Exporter, ForeignKey};

/// Adds and drops foreign keys through `alter table`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardForeignKeyExporter;

impl Exporter<ForeignKey> for StandardForeignKeyExporter {
    fn sql_create_strings(&self, key: &ForeignKey, dialect: &Dialect) -> Result<Vec<String>> {
        let caps = &dialect.config().capabilities;
        if !caps.has_alter_table || !caps.alter_table_foreign_keys {
            return Err(DialectError::UnsupportedCapability {
                dialect: dialect.name(),
                capability: "adding foreign keys with alter table",
            });
        }

        let mut sql = StandardTableExporter::alter_table_string(&key.table, dialect);
        sql.push_str(" add constraint ");
        sql.push_str(&dialect.render_identifier(&key.name));
        sql.push_str(" foreign key (");
        sql.push_str(&column_list(&key.columns, dialect));
        sql.push_str(") references ");
        sql.push_str(&key.referenced_table.render(dialect));
        if !key.referenced_columns.is_empty() {
            sql.push_str(" (");
            sql.push_str(&column_list(&key.referenced_columns, dialect));
            sql.push(')');
        }
        if key.cascade_delete && caps.cascade_delete {
            sql.push_str(" on delete cascade");
        }
        Ok(vec![sql])
    }

    fn sql_drop_strings(&self, key: &ForeignKey, dialect: &Dialect) -> Result<Vec<String>> {
        let config = dialect.config();
        if !config.capabilities.drop_constraints || !config.capabilities.has_alter_table {
            return Ok(Vec::new());
        }
        Ok(vec![format!(
            "{}{}{}",
            StandardTableExporter::alter_table_string(&key.table, dialect),
            config.ddl.drop_foreign_key,
            drop_constraint_target(&key.name, dialect)?
        )])
    }
}
