//! Reserved-word sets.
//!
//! Tokens are always compared in lower case, so every registered keyword is
//! lower-cased on the way in.

use std::collections::BTreeSet;

use tracing::warn;

/// Reserved words of the SQL:2003 standard.
pub const SQL_2003_RESERVED: &[&str] = &[
    "ADD", "ALL", "ALLOCATE", "ALTER", "AND", "ANY", "ARE", "ARRAY", "AS", "ASENSITIVE",
    "ASYMMETRIC", "AT", "ATOMIC", "AUTHORIZATION", "BEGIN", "BETWEEN", "BIGINT", "BINARY",
    "BLOB", "BOOLEAN", "BOTH", "BY", "CALL", "CALLED", "CASCADED", "CASE", "CAST", "CHAR",
    "CHARACTER", "CHECK", "CLOB", "CLOSE", "COLLATE", "COLUMN", "COMMIT", "CONDITION",
    "CONNECT", "CONSTRAINT", "CONTINUE", "CORRESPONDING", "CREATE", "CROSS", "CUBE", "CURRENT",
    "CURRENT_DATE", "CURRENT_DEFAULT_TRANSFORM_GROUP", "CURRENT_PATH", "CURRENT_ROLE",
    "CURRENT_TIME", "CURRENT_TIMESTAMP", "CURRENT_TRANSFORM_GROUP_FOR_TYPE", "CURRENT_USER",
    "CURSOR", "CYCLE", "DATE", "DAY", "DEALLOCATE", "DEC", "DECIMAL", "DECLARE", "DEFAULT",
    "DELETE", "DEREF", "DESCRIBE", "DETERMINISTIC", "DISCONNECT", "DISTINCT", "DO", "DOUBLE",
    "DROP", "DYNAMIC", "EACH", "ELEMENT", "ELSE", "ELSEIF", "END", "ESCAPE", "EXCEPT", "EXEC",
    "EXECUTE", "EXISTS", "EXIT", "EXTERNAL", "FALSE", "FETCH", "FILTER", "FLOAT", "FOR",
    "FOREIGN", "FREE", "FROM", "FULL", "FUNCTION", "GET", "GLOBAL", "GRANT", "GROUP",
    "GROUPING", "HANDLER", "HAVING", "HOLD", "HOUR", "IDENTITY", "IF", "IMMEDIATE", "IN",
    "INDICATOR", "INNER", "INOUT", "INPUT", "INSENSITIVE", "INSERT", "INT", "INTEGER",
    "INTERSECT", "INTERVAL", "INTO", "IS", "ITERATE", "JOIN", "LANGUAGE", "LARGE", "LATERAL",
    "LEADING", "LEAVE", "LEFT", "LIKE", "LOCAL", "LOCALTIME", "LOCALTIMESTAMP", "LOOP",
    "MATCH", "MEMBER", "MERGE", "METHOD", "MINUTE", "MODIFIES", "MODULE", "MONTH", "MULTISET",
    "NATIONAL", "NATURAL", "NCHAR", "NCLOB", "NEW", "NO", "NONE", "NOT", "NULL", "NUMERIC",
    "OF", "OLD", "ON", "ONLY", "OPEN", "OR", "ORDER", "OUT", "OUTER", "OUTPUT", "OVER",
    "OVERLAPS", "PARAMETER", "PARTITION", "PRECISION", "PREPARE", "PRIMARY", "PROCEDURE",
    "RANGE", "READS", "REAL", "RECURSIVE", "REF", "REFERENCES", "REFERENCING", "RELEASE",
    "REPEAT", "RESIGNAL", "RESULT", "RETURN", "RETURNS", "REVOKE", "RIGHT", "ROLLBACK",
    "ROLLUP", "ROW", "ROWS", "SAVEPOINT", "SCROLL", "SEARCH", "SECOND", "SELECT", "SENSITIVE",
    "SESSION_USER", "SET", "SIGNAL", "SIMILAR", "SMALLINT", "SOME", "SPECIFIC", "SPECIFICTYPE",
    "SQL", "SQLEXCEPTION", "SQLSTATE", "SQLWARNING", "START", "STATIC", "SUBMULTISET",
    "SYMMETRIC", "SYSTEM", "SYSTEM_USER", "TABLE", "TABLESAMPLE", "THEN", "TIME", "TIMESTAMP",
    "TIMEZONE_HOUR", "TIMEZONE_MINUTE", "TO", "TRAILING", "TRANSLATION", "TREAT", "TRIGGER",
    "TRUE", "UNDO", "UNION", "UNIQUE", "UNKNOWN", "UNNEST", "UNTIL", "UPDATE", "USER", "USING",
    "VALUE", "VALUES", "VARCHAR", "VARYING", "WHEN", "WHENEVER", "WHERE", "WHILE", "WINDOW",
    "WITH", "WITHIN", "WITHOUT", "YEAR",
];

/// Mutable accumulator for keywords.
#[derive(Debug, Clone, Default)]
pub struct KeywordSetBuilder {
    words: BTreeSet<String>,
}

impl KeywordSetBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded with the SQL:2003 reserved words.
    #[must_use]
    pub fn sql2003() -> Self {
        let mut builder = Self::new();
        builder.register_all(SQL_2003_RESERVED.iter().copied());
        builder
    }

    /// Registers a single keyword.
    pub fn register(&mut self, word: &str) -> &mut Self {
        let word = word.trim();
        if !word.is_empty() {
            self.words.insert(word.to_lowercase());
        }
        self
    }

    /// Registers every keyword in `words`.
    pub fn register_all<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) -> &mut Self {
        for word in words {
            self.register(word);
        }
        self
    }

    /// Registers the comma-separated keyword list a backend reports about itself.
    pub fn register_reported(&mut self, reported: &str) -> &mut Self {
        let mut empty = 0usize;
        for word in reported.split(',') {
            if word.trim().is_empty() {
                empty += 1;
            } else {
                self.register(word);
            }
        }
        if empty > 0 && !reported.trim().is_empty() {
            warn!(empty, "Ignoring empty entries in backend-reported keyword list");
        }
        self
    }

    /// Freezes the set.
    #[must_use]
    pub fn build(self) -> KeywordSet {
        KeywordSet { words: self.words }
    }
}

/// An immutable set of lower-cased reserved words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    words: BTreeSet<String>,
}

impl KeywordSet {
    /// Returns whether `word` is reserved, ignoring case.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Iterates the keywords in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Number of keywords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql2003_seed_is_case_insensitive() {
        let keywords = KeywordSetBuilder::sql2003().build();
        assert!(keywords.contains("select"));
        assert!(keywords.contains("SELECT"));
        assert!(keywords.contains("Current_Timestamp"));
        assert!(!keywords.contains("customer"));
    }

    #[test]
    fn test_reported_keywords_are_added() {
        let mut builder = KeywordSetBuilder::sql2003();
        builder.register_reported("LIMIT, OFFSET,,ILIKE ");
        let keywords = builder.build();
        assert!(keywords.contains("limit"));
        assert!(keywords.contains("ilike"));
        assert!(!keywords.contains(""));
    }

    #[test]
    fn test_keywords_are_stored_lower_case() {
        let mut builder = KeywordSetBuilder::new();
        builder.register("RowNum");
        let keywords = builder.build();
        assert_eq!(keywords.iter().collect::<Vec<_>>(), vec!["rownum"]);
        assert_eq!(keywords.len(), 1);
    }
}
