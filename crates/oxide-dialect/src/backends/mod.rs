//! Concrete backend dialects.
//!
//! Each backend is a function from what the database reported about itself
//! to a frozen [`Dialect`]. All of them start from the standard builder and
//! then override configuration and registrations.

mod duckdb;
mod mysql;
mod oracle;
mod postgres;
mod sqlite;
mod sqlserver;
mod standard;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::ResolutionInfo;
use crate::dialect::Dialect;
use crate::error::DialectError;

/// The supported database backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Generic ANSI SQL.
    Standard,
    /// PostgreSQL.
    PostgreSQL,
    /// MySQL.
    MySQL,
    /// Oracle Database.
    Oracle,
    /// Microsoft SQL Server.
    SqlServer,
    /// SQLite.
    SQLite,
    /// DuckDB.
    DuckDB,
}

impl Backend {
    /// Every backend, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Standard,
        Self::PostgreSQL,
        Self::MySQL,
        Self::Oracle,
        Self::SqlServer,
        Self::SQLite,
        Self::DuckDB,
    ];

    /// The short lowercase name, as used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::PostgreSQL => "postgresql",
            Self::MySQL => "mysql",
            Self::Oracle => "oracle",
            Self::SqlServer => "sqlserver",
            Self::SQLite => "sqlite",
            Self::DuckDB => "duckdb",
        }
    }

    /// Builds the dialect for this backend.
    #[must_use]
    pub fn dialect(self, info: &ResolutionInfo) -> Dialect {
        match self {
            Self::Standard => standard::dialect(info),
            Self::PostgreSQL => postgres::dialect(info),
            Self::MySQL => mysql::dialect(info),
            Self::Oracle => oracle::dialect(info),
            Self::SqlServer => sqlserver::dialect(info),
            Self::SQLite => sqlite::dialect(info),
            Self::DuckDB => duckdb::dialect(info),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "ansi" => Ok(Self::Standard),
            "postgresql" | "postgres" | "pg" => Ok(Self::PostgreSQL),
            "mysql" => Ok(Self::MySQL),
            "oracle" => Ok(Self::Oracle),
            "sqlserver" | "mssql" => Ok(Self::SqlServer),
            "sqlite" => Ok(Self::SQLite),
            "duckdb" => Ok(Self::DuckDB),
            _ => Err(DialectError::UnknownName {
                kind: "backend",
                name: s.to_string(),
            }),
        }
    }
}

impl Dialect {
    /// Builds the dialect for `backend`.
    #[must_use]
    pub fn for_backend(backend: Backend, info: &ResolutionInfo) -> Self {
        backend.dialect(info)
    }
}
