//! Index generation.

use crate::dialect::Dialect;
use crate::error::Result;

use super::{check_table_if_exists_placement, column_list, Exporter, Index};

/// `create [unique] index` / `drop index`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardIndexExporter;

impl StandardIndexExporter {
    fn index_name(index: &Index, dialect: &Dialect) -> String {
        if dialect.config().capabilities.qualify_index_name {
            index.table.sibling(index.name.clone()).render(dialect)
        } else {
            dialect.render_identifier(&index.name)
        }
    }
}

impl Exporter<Index> for StandardIndexExporter {
    fn sql_create_strings(&self, index: &Index, dialect: &Dialect) -> Result<Vec<String>> {
        let mut sql = String::from("create ");
        if index.unique {
            sql.push_str("unique ");
        }
        sql.push_str("index ");
        sql.push_str(&Self::index_name(index, dialect));
        sql.push_str(" on ");
        sql.push_str(&index.table.render(dialect));
        sql.push_str(" (");
        sql.push_str(&column_list(&index.columns, dialect));
        sql.push(')');
        Ok(vec![sql])
    }

    fn sql_drop_strings(&self, index: &Index, dialect: &Dialect) -> Result<Vec<String>> {
        check_table_if_exists_placement(dialect)?;
        let config = dialect.config();
        let mut sql = String::from("drop index ");
        if config.capabilities.if_exists_before_table_name {
            sql.push_str("if exists ");
        }
        if config.ddl.drop_index_on_table {
            sql.push_str(&dialect.render_identifier(&index.name));
            sql.push_str(" on ");
            sql.push_str(&index.table.render(dialect));
        } else {
            sql.push_str(&Self::index_name(index, dialect));
        }
        if config.capabilities.if_exists_after_table_name {
            sql.push_str(" if exists");
        }
        Ok(vec![sql])
    }
}
