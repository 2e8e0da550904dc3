//! Sequence generation.

use crate::dialect::Dialect;
use crate::error::{DialectError, Result};

use super::{Exporter, Sequence};

/// `create sequence` / `drop sequence` from the dialect's sequence support.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSequenceExporter;

impl StandardSequenceExporter {
    fn require_sequences(dialect: &Dialect) -> Result<()> {
        if dialect.config().sequences.supported {
            Ok(())
        } else {
            Err(DialectError::UnsupportedCapability {
                dialect: dialect.name(),
                capability: "sequences",
            })
        }
    }

    /// The expression producing the next value of `sequence`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnsupportedCapability`] without sequence support.
    pub fn next_value_string(sequence: &str, dialect: &Dialect) -> Result<String> {
        Self::require_sequences(dialect)?;
        Ok(dialect
            .config()
            .sequences
            .next_value
            .replace("$n", &dialect.render_identifier(sequence)))
    }

    /// A statement selecting the next value of `sequence`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnsupportedCapability`] without sequence support.
    pub fn select_next_value_string(sequence: &str, dialect: &Dialect) -> Result<String> {
        let next = Self::next_value_string(sequence, dialect)?;
        Ok(dialect
            .config()
            .sequences
            .select_next_value
            .replace("$v", &next))
    }
}

impl Exporter<Sequence> for StandardSequenceExporter {
    fn sql_create_strings(&self, sequence: &Sequence, dialect: &Dialect) -> Result<Vec<String>> {
        Self::require_sequences(dialect)?;
        if sequence.increment == 0 {
            return Err(DialectError::ConfigurationConflict(format!(
                "sequence '{}' has an increment of zero",
                sequence.name.name
            )));
        }
        if sequence.increment != 1 && !dialect.config().sequences.pooled {
            return Err(DialectError::UnsupportedCapability {
                dialect: dialect.name(),
                capability: "pooled sequences",
            });
        }
        Ok(vec![format!(
            "create sequence {} start with {} increment by {}",
            sequence.name.render(dialect),
            sequence.initial_value,
            sequence.increment
        )])
    }

    fn sql_drop_strings(&self, sequence: &Sequence, dialect: &Dialect) -> Result<Vec<String>> {
        Self::require_sequences(dialect)?;
        let mut sql = String::from("drop sequence ");
        if dialect.config().capabilities.if_exists_on_drop_sequence {
            sql.push_str("if exists ");
        }
        sql.push_str(&sequence.name.render(dialect));
        Ok(vec![sql])
    }
}
