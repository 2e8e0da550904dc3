//! DDL fragment generation.
//!
//! Structural descriptors ([`Table`], [`Sequence`], [`Index`],
//! [`ForeignKey`], [`UniqueKey`]) are turned into statements by stateless
//! exporters that read the dialect's type names and capability flags.

mod foreign_key;
mod index;
mod schema;
mod sequence;
mod table;
mod unique_key;

pub use foreign_key::StandardForeignKeyExporter;
pub use index::StandardIndexExporter;
pub use schema::{create_catalog, create_schema, drop_catalog, drop_schema};
pub use sequence::StandardSequenceExporter;
pub use table::StandardTableExporter;
pub use unique_key::UniqueDelegate;

use crate::dialect::Dialect;
use crate::error::{DialectError, Result};
use crate::types::{LanguageType, SqlTypeCode};

/// Produces create and drop statements for one kind of database object.
pub trait Exporter<T> {
    /// Statements that create `item`.
    ///
    /// # Errors
    ///
    /// Returns an error when the dialect cannot express `item`.
    fn sql_create_strings(&self, item: &T, dialect: &Dialect) -> Result<Vec<String>>;

    /// Statements that drop `item`.
    ///
    /// # Errors
    ///
    /// Returns an error when the dialect cannot express the drop.
    fn sql_drop_strings(&self, item: &T, dialect: &Dialect) -> Result<Vec<String>>;
}

/// A possibly qualified object name.
///
/// Names wrapped in backticks are quoted with the dialect's quote
/// characters when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QualifiedName {
    /// Catalog.
    pub catalog: Option<String>,
    /// Schema.
    pub schema: Option<String>,
    /// Object name.
    pub name: String,
}

impl QualifiedName {
    /// An unqualified name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: None,
            name: name.into(),
        }
    }

    /// Sets the schema.
    #[must_use]
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Sets the catalog.
    #[must_use]
    pub fn in_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Renders `catalog.schema.name` for `dialect`.
    #[must_use]
    pub fn render(&self, dialect: &Dialect) -> String {
        self.catalog
            .iter()
            .chain(self.schema.iter())
            .chain(std::iter::once(&self.name))
            .map(|part| dialect.render_identifier(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// The same name in a different object namespace, keeping the qualifiers.
    #[must_use]
    pub fn sibling(&self, name: impl Into<String>) -> Self {
        Self {
            catalog: self.catalog.clone(),
            schema: self.schema.clone(),
            name: name.into(),
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Column default value.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// NULL.
    Null,
    /// A boolean, rendered with the dialect's boolean literals.
    Boolean(bool),
    /// An integer.
    Integer(i64),
    /// A float.
    Float(f64),
    /// A string, quoted on output.
    String(String),
    /// Raw SQL, e.g. `current_timestamp`.
    Expression(String),
}

impl DefaultValue {
    /// Renders the default for `dialect`.
    #[must_use]
    pub fn to_sql(&self, dialect: &Dialect) -> String {
        match self {
            Self::Null => String::from("null"),
            Self::Boolean(b) => dialect.boolean_literal(*b).to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => crate::literal::inline_literal(s),
            Self::Expression(expr) => expr.clone(),
        }
    }
}

/// A column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Portable type code.
    pub code: SqlTypeCode,
    /// Language type of the mapped values.
    pub language: LanguageType,
    /// Requested length.
    pub length: Option<u64>,
    /// Requested precision.
    pub precision: Option<u32>,
    /// Requested scale.
    pub scale: Option<u32>,
    /// Explicit SQL type, bypassing the type-name table.
    pub sql_type: Option<String>,
    /// Whether the column is nullable.
    pub nullable: bool,
    /// Whether the column is unique on its own.
    pub unique: bool,
    /// Whether the column is an identity column.
    pub identity: bool,
    /// Default value.
    pub default: Option<DefaultValue>,
    /// Column check constraint.
    pub check: Option<String>,
    /// Column comment.
    pub comment: Option<String>,
}

impl Column {
    /// Creates a nullable column.
    #[must_use]
    pub fn new(name: impl Into<String>, code: SqlTypeCode, language: LanguageType) -> Self {
        Self {
            name: name.into(),
            code,
            language,
            length: None,
            precision: None,
            scale: None,
            sql_type: None,
            nullable: true,
            unique: false,
            identity: false,
            default: None,
            check: None,
            comment: None,
        }
    }

    /// Sets the length.
    #[must_use]
    pub fn length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets precision and scale.
    #[must_use]
    pub fn precision_scale(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column unique.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Marks the column as an identity column.
    #[must_use]
    pub fn identity(mut self) -> Self {
        self.identity = true;
        self.nullable = false;
        self
    }

    /// Sets the default.
    #[must_use]
    pub fn default_value(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Sets the check constraint.
    #[must_use]
    pub fn check(mut self, condition: impl Into<String>) -> Self {
        self.check = Some(condition.into());
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Uses `sql_type` verbatim.
    #[must_use]
    pub fn sql_type(mut self, sql_type: impl Into<String>) -> Self {
        self.sql_type = Some(sql_type.into());
        self
    }
}

/// A table definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Table name.
    pub name: QualifiedName,
    /// Columns, in order.
    pub columns: Vec<Column>,
    /// Primary key columns.
    pub primary_key: Vec<String>,
    /// Multi-column unique keys.
    pub unique_keys: Vec<UniqueKey>,
    /// Table check constraints.
    pub checks: Vec<String>,
    /// Table comment.
    pub comment: Option<String>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the primary key.
    #[must_use]
    pub fn primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a unique key.
    #[must_use]
    pub fn unique_key(mut self, key: UniqueKey) -> Self {
        self.unique_keys.push(key);
        self
    }

    /// Adds a table check.
    #[must_use]
    pub fn check(mut self, condition: impl Into<String>) -> Self {
        self.checks.push(condition.into());
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A sequence definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// Sequence name.
    pub name: QualifiedName,
    /// First value.
    pub initial_value: i64,
    /// Increment.
    pub increment: i32,
}

impl Sequence {
    /// A sequence starting at 1 with increment 1.
    #[must_use]
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            initial_value: 1,
            increment: 1,
        }
    }

    /// Sets start and increment.
    #[must_use]
    pub fn starting(mut self, initial_value: i64, increment: i32) -> Self {
        self.initial_value = initial_value;
        self.increment = increment;
        self
    }
}

/// An index definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// Index name, unqualified.
    pub name: String,
    /// Indexed table.
    pub table: QualifiedName,
    /// Indexed columns.
    pub columns: Vec<String>,
    /// Whether the index is unique.
    pub unique: bool,
}

impl Index {
    /// Creates a non-unique index.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, table: impl Into<QualifiedName>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            unique: false,
        }
    }

    /// Makes the index unique.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// A foreign key definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Constraint name.
    pub name: String,
    /// Referencing table.
    pub table: QualifiedName,
    /// Referencing columns.
    pub columns: Vec<String>,
    /// Referenced table.
    pub referenced_table: QualifiedName,
    /// Referenced columns. Empty when the key references the primary key.
    pub referenced_columns: Vec<String>,
    /// Whether deletes cascade.
    pub cascade_delete: bool,
}

impl ForeignKey {
    /// Creates a foreign key referencing the primary key of `referenced_table`.
    #[must_use]
    pub fn new<I, S>(
        name: impl Into<String>,
        table: impl Into<QualifiedName>,
        columns: I,
        referenced_table: impl Into<QualifiedName>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            referenced_table: referenced_table.into(),
            referenced_columns: Vec::new(),
            cascade_delete: false,
        }
    }

    /// References specific columns rather than the primary key.
    #[must_use]
    pub fn referencing<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.referenced_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Requests `on delete cascade`.
    #[must_use]
    pub fn cascade_delete(mut self) -> Self {
        self.cascade_delete = true;
        self
    }
}

/// A unique key definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueKey {
    /// Constraint name.
    pub name: String,
    /// Table the key belongs to.
    pub table: QualifiedName,
    /// Key columns.
    pub columns: Vec<String>,
}

impl UniqueKey {
    /// Creates a unique key.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, table: impl Into<QualifiedName>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

pub(crate) fn column_list(columns: &[String], dialect: &Dialect) -> String {
    columns
        .iter()
        .map(|c| dialect.render_identifier(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fails when `if exists` is enabled both before and after table names.
pub(crate) fn check_table_if_exists_placement(dialect: &Dialect) -> Result<()> {
    let caps = &dialect.config().capabilities;
    if caps.if_exists_before_table_name && caps.if_exists_after_table_name {
        return Err(DialectError::ConfigurationConflict(format!(
            "dialect '{}' enables 'if exists' both before and after the table name",
            dialect.name()
        )));
    }
    Ok(())
}

/// `[if exists ]<name>[ if exists]` for dropping a constraint.
pub(crate) fn drop_constraint_target(name: &str, dialect: &Dialect) -> Result<String> {
    let caps = &dialect.config().capabilities;
    if caps.if_exists_before_constraint_name && caps.if_exists_after_constraint_name {
        return Err(DialectError::ConfigurationConflict(format!(
            "dialect '{}' enables 'if exists' both before and after the constraint name",
            dialect.name()
        )));
    }
    let mut sql = String::new();
    if caps.if_exists_before_constraint_name {
        sql.push_str("if exists ");
    }
    sql.push_str(&dialect.render_identifier(name));
    if caps.if_exists_after_constraint_name {
        sql.push_str(" if exists");
    }
    Ok(sql)
}
