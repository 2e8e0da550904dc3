//! `create table`, `drop table` and `alter table` generation.

use crate::dialect::Dialect;
use crate::error::{DialectError, Result};
use crate::literal::inline_literal;

use super::{
    check_table_if_exists_placement, column_list, Column, Exporter, QualifiedName, Table, UniqueKey,
};

/// Table exporter driven entirely by the dialect configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTableExporter;

impl StandardTableExporter {
    /// Renders the type of `column`: its explicit SQL type, or the type name
    /// resolved at the column's size.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::NoMapping`] or
    /// [`DialectError::UnresolvedPlaceholder`] when no complete type name
    /// can be produced.
    pub fn column_type(column: &Column, dialect: &Dialect) -> Result<String> {
        if let Some(sql_type) = &column.sql_type {
            return Ok(sql_type.clone());
        }
        let size = dialect.size_for(
            column.code,
            column.language,
            column.precision,
            column.scale,
            column.length,
        );
        dialect.ddl_type_name(column.code, &size)
    }

    /// Renders one column definition as it appears inside `create table`
    /// or after `add column`.
    ///
    /// # Errors
    ///
    /// Returns an error when the column type cannot be resolved or an
    /// identity column is requested on a backend without identity support.
    pub fn column_definition(
        column: &Column,
        in_primary_key: bool,
        dialect: &Dialect,
    ) -> Result<String> {
        let config = dialect.config();
        let mut sql = dialect.render_identifier(&column.name);

        if column.identity {
            if !config.identity.supported {
                return Err(DialectError::UnsupportedCapability {
                    dialect: dialect.name(),
                    capability: "identity columns",
                });
            }
            if config.identity.has_data_type {
                sql.push(' ');
                sql.push_str(&Self::column_type(column, dialect)?);
            }
            sql.push_str(config.identity.column_string);
        } else {
            sql.push(' ');
            sql.push_str(&Self::column_type(column, dialect)?);

            if let Some(default) = &column.default {
                sql.push_str(" default ");
                sql.push_str(&default.to_sql(dialect));
            }

            if column.nullable && !in_primary_key {
                sql.push_str(config.ddl.null_column);
            } else {
                sql.push_str(" not null");
            }
        }

        if column.unique && !in_primary_key {
            if let Some(fragment) = dialect.unique_delegate().column_fragment(column) {
                sql.push_str(fragment);
            }
        }

        if let Some(check) = &column.check {
            if config.capabilities.column_check {
                sql.push_str(" check (");
                sql.push_str(check);
                sql.push(')');
            }
        }

        if let Some(comment) = &column.comment {
            if config.ddl.inline_comments {
                sql.push_str(" comment ");
                sql.push_str(&inline_literal(comment));
            }
        }

        Ok(sql)
    }

    /// `alter table [if exists] <name>`.
    #[must_use]
    pub fn alter_table_string(name: &QualifiedName, dialect: &Dialect) -> String {
        let mut sql = String::from("alter table ");
        if dialect.config().capabilities.if_exists_after_alter_table {
            sql.push_str("if exists ");
        }
        sql.push_str(&name.render(dialect));
        sql
    }

    /// `alter table <name> add column <definition>`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnsupportedCapability`] when the backend has
    /// no `alter table`, or any column rendering error.
    pub fn add_column_string(
        name: &QualifiedName,
        column: &Column,
        dialect: &Dialect,
    ) -> Result<String> {
        let config = dialect.config();
        if !config.capabilities.has_alter_table {
            return Err(DialectError::UnsupportedCapability {
                dialect: dialect.name(),
                capability: "alter table",
            });
        }
        Ok(format!(
            "{} {} {}{}",
            Self::alter_table_string(name, dialect),
            config.ddl.add_column,
            Self::column_definition(column, false, dialect)?,
            config.ddl.add_column_suffix
        ))
    }

    /// `drop table [if exists] <name><cascade>[ if exists]`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::ConfigurationConflict`] when both `if exists`
    /// placements are enabled.
    pub fn drop_table_string(name: &QualifiedName, dialect: &Dialect) -> Result<String> {
        check_table_if_exists_placement(dialect)?;
        let config = dialect.config();
        let caps = &config.capabilities;

        let mut sql = String::from("drop table ");
        if caps.if_exists_before_table_name {
            sql.push_str("if exists ");
        }
        sql.push_str(&name.render(dialect));
        sql.push_str(config.ddl.cascade_constraints);
        if caps.if_exists_after_table_name {
            sql.push_str(" if exists");
        }
        Ok(sql)
    }

    fn comment_statements(table: &Table, dialect: &Dialect) -> Vec<String> {
        let config = dialect.config();
        if !config.capabilities.comment_on || config.ddl.inline_comments {
            return Vec::new();
        }
        let table_name = table.name.render(dialect);
        let mut statements = Vec::new();
        if let Some(comment) = &table.comment {
            statements.push(format!(
                "comment on table {table_name} is {}",
                inline_literal(comment)
            ));
        }
        for column in &table.columns {
            if let Some(comment) = &column.comment {
                statements.push(format!(
                    "comment on column {table_name}.{} is {}",
                    dialect.render_identifier(&column.name),
                    inline_literal(comment)
                ));
            }
        }
        statements
    }
}

impl Exporter<Table> for StandardTableExporter {
    fn sql_create_strings(&self, table: &Table, dialect: &Dialect) -> Result<Vec<String>> {
        let config = dialect.config();
        let delegate = dialect.unique_delegate();

        let mut sql = String::from(config.ddl.create_table);
        sql.push(' ');
        sql.push_str(&table.name.render(dialect));
        sql.push_str(" (");

        let definitions = table
            .columns
            .iter()
            .map(|column| {
                Self::column_definition(column, table.primary_key.contains(&column.name), dialect)
            })
            .collect::<Result<Vec<_>>>()?;
        sql.push_str(&definitions.join(", "));

        if !table.primary_key.is_empty() {
            sql.push_str(", primary key (");
            sql.push_str(&column_list(&table.primary_key, dialect));
            sql.push(')');
        }

        // Nullable unique columns the delegate cannot express inline.
        let mut unique_keys = table.unique_keys.clone();
        for column in &table.columns {
            if column.unique
                && !table.primary_key.contains(&column.name)
                && delegate.column_fragment(column).is_none()
            {
                unique_keys.push(UniqueKey::new(
                    format!("uk_{}_{}", table.name.name, column.name),
                    table.name.clone(),
                    [column.name.clone()],
                ));
            }
        }

        if delegate.adds_inline() {
            for key in &unique_keys {
                sql.push_str(&delegate.table_fragment(key, dialect));
            }
        }

        if config.capabilities.table_check {
            for check in &table.checks {
                sql.push_str(", check (");
                sql.push_str(check);
                sql.push(')');
            }
        }

        sql.push(')');

        if let Some(comment) = &table.comment {
            if config.ddl.inline_comments {
                sql.push_str(" comment=");
                sql.push_str(&inline_literal(comment));
            }
        }
        sql.push_str(config.ddl.table_type);

        let mut statements = vec![sql];
        statements.extend(Self::comment_statements(table, dialect));
        if !delegate.adds_inline() {
            for key in &unique_keys {
                statements.extend(delegate.sql_create_strings(key, dialect)?);
            }
        }
        Ok(statements)
    }

    fn sql_drop_strings(&self, table: &Table, dialect: &Dialect) -> Result<Vec<String>> {
        Ok(vec![Self::drop_table_string(&table.name, dialect)?])
    }
}
