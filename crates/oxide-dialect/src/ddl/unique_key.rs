//! Unique constraint generation.

use serde::Serialize;

use crate::dialect::Dialect;
use crate::error::{DialectError, Result};

use super::table::StandardTableExporter;
use super::{column_list, drop_constraint_target, Column, Exporter, UniqueKey};

/// Where a backend declares unique constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueDelegate {
    /// Separate `alter table ... add constraint ... unique (...)` statements.
    #[default]
    AlterTable,
    /// Inline in `create table`; `alter table` only for later additions.
    CreateTable,
    /// Unique indexes filtered on non-null values, for backends whose
    /// unique constraints treat NULLs as equal.
    SkipNullable,
}

impl UniqueDelegate {
    /// The fragment making a single column unique, or `None` when the
    /// column has to be covered by a separate key.
    #[must_use]
    pub const fn column_fragment(self, column: &Column) -> Option<&'static str> {
        match self {
            Self::AlterTable | Self::CreateTable => Some(" unique"),
            Self::SkipNullable => {
                if column.nullable {
                    None
                } else {
                    Some(" unique")
                }
            }
        }
    }

    /// Returns whether table-level keys are written inside `create table`.
    #[must_use]
    pub const fn adds_inline(self) -> bool {
        matches!(self, Self::CreateTable)
    }

    /// `, constraint <name> unique (<columns>)` for `create table`.
    #[must_use]
    pub fn table_fragment(self, key: &UniqueKey, dialect: &Dialect) -> String {
        format!(
            ", constraint {} unique ({})",
            dialect.render_identifier(&key.name),
            column_list(&key.columns, dialect)
        )
    }

    fn requires_alter_table(self, dialect: &Dialect) -> Result<()> {
        if dialect.config().capabilities.has_alter_table {
            Ok(())
        } else {
            Err(DialectError::UnsupportedCapability {
                dialect: dialect.name(),
                capability: "alter table unique constraints",
            })
        }
    }
}

impl Exporter<UniqueKey> for UniqueDelegate {
    fn sql_create_strings(&self, key: &UniqueKey, dialect: &Dialect) -> Result<Vec<String>> {
        let columns = column_list(&key.columns, dialect);
        let sql = match self {
            Self::AlterTable | Self::CreateTable => {
                self.requires_alter_table(dialect)?;
                format!(
                    "{} add constraint {} unique ({columns})",
                    StandardTableExporter::alter_table_string(&key.table, dialect),
                    dialect.render_identifier(&key.name)
                )
            }
            Self::SkipNullable => {
                let filter = key
                    .columns
                    .iter()
                    .map(|c| format!("{} is not null", dialect.render_identifier(c)))
                    .collect::<Vec<_>>()
                    .join(" and ");
                format!(
                    "create unique index {} on {} ({columns}) where {filter}",
                    dialect.render_identifier(&key.name),
                    key.table.render(dialect)
                )
            }
        };
        Ok(vec![sql])
    }

    fn sql_drop_strings(&self, key: &UniqueKey, dialect: &Dialect) -> Result<Vec<String>> {
        let sql = match self {
            Self::AlterTable | Self::CreateTable => {
                self.requires_alter_table(dialect)?;
                format!(
                    "{}{}{}",
                    StandardTableExporter::alter_table_string(&key.table, dialect),
                    dialect.config().ddl.drop_unique_key,
                    drop_constraint_target(&key.name, dialect)?
                )
            }
            Self::SkipNullable => format!(
                "drop index {} on {}",
                dialect.render_identifier(&key.name),
                key.table.render(dialect)
            ),
        };
        Ok(vec![sql])
    }
}
