//! Capacity-weighted type-name tables.
//!
//! A table maps a [`SqlTypeCode`] to one or more name patterns. A pattern
//! may be registered for a capacity ceiling (the largest length or
//! precision it can hold) or as the unconstrained default. Patterns carry
//! `$l`, `$p` and `$s` placeholders for length, precision and scale.
//!
//! Tables are accumulated in a [`TypeNamesBuilder`] while a dialect is
//! constructed and then frozen into an immutable [`TypeNames`].

use std::collections::{BTreeMap, HashMap};

use crate::size::Size;
use crate::types::SqlTypeCode;

/// Length placeholder.
pub const LENGTH_PLACEHOLDER: &str = "$l";
/// Precision placeholder.
pub const PRECISION_PLACEHOLDER: &str = "$p";
/// Scale placeholder.
pub const SCALE_PLACEHOLDER: &str = "$s";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Entries {
    /// Ceiling → pattern, ordered by ceiling.
    weighted: BTreeMap<u64, String>,
    /// Pattern used when no ceiling fits.
    default: Option<String>,
}

/// Mutable accumulator for type-name registrations.
#[derive(Debug, Clone, Default)]
pub struct TypeNamesBuilder {
    entries: HashMap<SqlTypeCode, Entries>,
}

impl TypeNamesBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the unconstrained pattern for `code`, replacing any
    /// previous default.
    pub fn register(&mut self, code: SqlTypeCode, pattern: impl Into<String>) -> &mut Self {
        self.entries.entry(code).or_default().default = Some(pattern.into());
        self
    }

    /// Registers a pattern valid up to `capacity`.
    pub fn register_with_capacity(
        &mut self,
        code: SqlTypeCode,
        capacity: u64,
        pattern: impl Into<String>,
    ) -> &mut Self {
        self.entries
            .entry(code)
            .or_default()
            .weighted
            .insert(capacity, pattern.into());
        self
    }

    /// Removes every registration for `code`.
    pub fn unregister(&mut self, code: SqlTypeCode) -> &mut Self {
        self.entries.remove(&code);
        self
    }

    /// Freezes the registrations.
    #[must_use]
    pub fn build(self) -> TypeNames {
        TypeNames {
            entries: self.entries,
        }
    }
}

/// An immutable, thread-shareable type-name table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeNames {
    entries: HashMap<SqlTypeCode, Entries>,
}

impl TypeNames {
    /// Returns the default pattern for `code`, unsubstituted.
    #[must_use]
    pub fn get_default(&self, code: SqlTypeCode) -> Option<&str> {
        self.entries.get(&code)?.default.as_deref()
    }

    /// Resolves `code` at `size`.
    ///
    /// Picks the smallest ceiling that holds the requested capacity (the
    /// length, else the precision), falling back to the unconstrained
    /// pattern. Placeholders are substituted for the dimensions present in
    /// `size`; the others are left untouched.
    #[must_use]
    pub fn get(&self, code: SqlTypeCode, size: &Size) -> Option<String> {
        let entries = self.entries.get(&code)?;
        let pattern = size
            .capacity()
            .and_then(|capacity| entries.weighted.range(capacity..).next())
            .map(|(_, pattern)| pattern)
            .or(entries.default.as_ref())?;
        Some(substitute(pattern, size))
    }

    /// Returns whether any registration exists for `code`.
    #[must_use]
    pub fn contains_code(&self, code: SqlTypeCode) -> bool {
        self.entries.contains_key(&code)
    }

    /// Returns whether `name` is registered for any code, either as a full
    /// pattern or as the bare type name of one. Comparison ignores case.
    #[must_use]
    pub fn contains_type_name(&self, name: &str) -> bool {
        let matches = |pattern: &String| {
            pattern.eq_ignore_ascii_case(name) || raw_name(pattern).eq_ignore_ascii_case(name)
        };
        self.entries.values().any(|entries| {
            entries.default.iter().any(matches) || entries.weighted.values().any(matches)
        })
    }

    /// Number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .map(|e| e.weighted.len() + usize::from(e.default.is_some()))
            .sum()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Replaces the placeholders for which `size` has a value.
#[must_use]
pub fn substitute(pattern: &str, size: &Size) -> String {
    let mut result = pattern.to_string();
    if let Some(scale) = size.scale {
        result = result.replacen(SCALE_PLACEHOLDER, &scale.to_string(), 1);
    }
    if let Some(length) = size.length {
        result = result.replacen(LENGTH_PLACEHOLDER, &length.to_string(), 1);
    }
    if let Some(precision) = size.precision {
        result = result.replacen(PRECISION_PLACEHOLDER, &precision.to_string(), 1);
    }
    result
}

/// Returns whether any size placeholder survives in `resolved`.
#[must_use]
pub fn has_placeholder(resolved: &str) -> bool {
    [LENGTH_PLACEHOLDER, PRECISION_PLACEHOLDER, SCALE_PLACEHOLDER]
        .iter()
        .any(|p| resolved.contains(p))
}

/// Strips the parenthesised size part from a pattern: `varchar($l)` → `varchar`.
#[must_use]
pub fn raw_name(pattern: &str) -> &str {
    match pattern.find('(') {
        Some(paren) if paren > 0 => &pattern[..paren],
        _ => pattern,
    }
}
