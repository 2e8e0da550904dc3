//! Error types for dialect lookups and SQL fragment generation.

use crate::types::SqlTypeCode;

/// Errors that can occur while translating a portable request into SQL text.
///
/// Every variant is a local, synchronous failure. Nothing here is retried:
/// the only recovery is a different input.
#[derive(Debug, thiserror::Error)]
pub enum DialectError {
    /// No type name is registered for the code, even after the long-type
    /// fallback chain.
    #[error("No type mapping for type code {code} (length: {})", fmt_opt(.length))]
    NoMapping {
        /// The requested type code.
        code: SqlTypeCode,
        /// The requested length, if any.
        length: Option<u64>,
    },

    /// A fragment generator was invoked on a backend that lacks the capability.
    #[error("Dialect '{dialect}' does not support {capability}")]
    UnsupportedCapability {
        /// Name of the dialect.
        dialect: &'static str,
        /// Human readable capability name.
        capability: &'static str,
    },

    /// Mutually exclusive options were requested together.
    #[error("Conflicting dialect configuration: {0}")]
    ConfigurationConflict(String),

    /// A type pattern still holds a size placeholder after substitution.
    #[error("Type pattern '{pattern}' for {code} has an unresolved size placeholder")]
    UnresolvedPlaceholder {
        /// The type code being rendered.
        code: SqlTypeCode,
        /// The partially substituted pattern.
        pattern: String,
    },

    /// The function registry has no entry under this name.
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// A function was called with the wrong number of arguments.
    #[error("Function '{name}' expects {expected} argument(s), got {actual}")]
    FunctionArity {
        /// Function name.
        name: String,
        /// Description of the accepted argument count.
        expected: String,
        /// Number of arguments supplied.
        actual: usize,
    },

    /// A textual name could not be parsed.
    #[error("Unknown {kind}: '{name}'")]
    UnknownName {
        /// What was being parsed (e.g. "type code").
        kind: &'static str,
        /// The offending input.
        name: String,
    },

    /// Backend resolution info was malformed.
    #[error("Invalid resolution info: {0}")]
    InvalidResolutionInfo(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (reading resolution info files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn fmt_opt(value: &Option<u64>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

/// Result type for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_mapping_message() {
        let err = DialectError::NoMapping {
            code: SqlTypeCode::Nclob,
            length: Some(10),
        };
        assert_eq!(
            err.to_string(),
            "No type mapping for type code NCLOB (length: 10)"
        );

        let err = DialectError::NoMapping {
            code: SqlTypeCode::Nclob,
            length: None,
        };
        assert!(err.to_string().ends_with("(length: none)"));
    }

    #[test]
    fn test_unsupported_capability_message() {
        let err = DialectError::UnsupportedCapability {
            dialect: "sqlite",
            capability: "create catalog",
        };
        assert_eq!(
            err.to_string(),
            "Dialect 'sqlite' does not support create catalog"
        );
    }
}
