//! Catalog and schema creation.

use crate::dialect::Dialect;
use crate::error::{DialectError, Result};

fn unsupported(dialect: &Dialect, capability: &'static str) -> DialectError {
    DialectError::UnsupportedCapability {
        dialect: dialect.name(),
        capability,
    }
}

/// `create schema <name>`.
///
/// # Errors
///
/// Returns [`DialectError::UnsupportedCapability`] when the backend has no schemas.
pub fn create_schema(name: &str, dialect: &Dialect) -> Result<Vec<String>> {
    let config = dialect.config();
    if !config.capabilities.can_create_schema {
        return Err(unsupported(dialect, "create schema"));
    }
    Ok(vec![format!(
        "{} {}",
        config.ddl.create_schema,
        dialect.render_identifier(name)
    )])
}

/// `drop schema <name>`.
///
/// # Errors
///
/// Returns [`DialectError::UnsupportedCapability`] when the backend has no schemas.
pub fn drop_schema(name: &str, dialect: &Dialect) -> Result<Vec<String>> {
    let config = dialect.config();
    if !config.capabilities.can_create_schema {
        return Err(unsupported(dialect, "drop schema"));
    }
    Ok(vec![format!(
        "{} {}",
        config.ddl.drop_schema,
        dialect.render_identifier(name)
    )])
}

/// `create catalog <name>`, or the backend's equivalent.
///
/// # Errors
///
/// Returns [`DialectError::UnsupportedCapability`] unless the backend can
/// create catalogs.
pub fn create_catalog(name: &str, dialect: &Dialect) -> Result<Vec<String>> {
    let config = dialect.config();
    if !config.capabilities.can_create_catalog {
        return Err(unsupported(dialect, "create catalog"));
    }
    Ok(vec![format!(
        "{} {}",
        config.ddl.create_catalog,
        dialect.render_identifier(name)
    )])
}

/// `drop catalog <name>`, or the backend's equivalent.
///
/// # Errors
///
/// Returns [`DialectError::UnsupportedCapability`] unless the backend can
/// create catalogs.
pub fn drop_catalog(name: &str, dialect: &Dialect) -> Result<Vec<String>> {
    let config = dialect.config();
    if !config.capabilities.can_create_catalog {
        return Err(unsupported(dialect, "drop catalog"));
    }
    Ok(vec![format!(
        "{} {}",
        config.ddl.drop_catalog,
        dialect.render_identifier(name)
    )])
}
