//! Portable function registry.
//!
//! Query compilers call functions by their portable name; the registry
//! decides whether the backend has the function natively or whether it
//! has to be emulated with a pattern.

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::{DialectError, Result};
use crate::pattern;

const MAX_ALIAS_DEPTH: usize = 8;

/// How a function is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionKind {
    /// `name(arg, ...)` under the given SQL name.
    Native {
        /// SQL name.
        sql_name: String,
    },
    /// The SQL name alone, without parentheses (`current_date`).
    NoArgs {
        /// SQL text.
        sql: String,
    },
    /// A `?1`-style pattern.
    Pattern {
        /// The pattern.
        pattern: String,
    },
    /// `open arg sep arg ... close`, as for concatenation operators.
    Variadic {
        /// Opening text.
        open: String,
        /// Separator.
        separator: String,
        /// Closing text.
        close: String,
    },
    /// Another registered name.
    Alias {
        /// The target name.
        target: String,
    },
}

/// A registered function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    /// Rendering.
    pub kind: FunctionKind,
    /// Minimum argument count.
    pub min_args: usize,
    /// Maximum argument count, `None` for unbounded.
    pub max_args: Option<usize>,
}

impl FunctionDescriptor {
    fn accepts(&self, count: usize) -> bool {
        count >= self.min_args && !matches!(self.max_args, Some(max) if count > max)
    }

    fn expected(&self) -> String {
        match self.max_args {
            Some(max) if max == self.min_args => max.to_string(),
            Some(max) => format!("{}..{max}", self.min_args),
            None => format!("at least {}", self.min_args),
        }
    }
}

/// Mutable accumulator for function registrations.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistryBuilder {
    functions: BTreeMap<String, FunctionDescriptor>,
}

impl FunctionRegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder holding the portable function set.
    #[must_use]
    pub fn standard() -> Self {
        let mut b = Self::new();

        // aggregates
        for name in ["count", "sum", "avg", "min", "max"] {
            b.native(name, 1, Some(1));
        }
        b.pattern("every", "(sum(case when ?1 then 0 else 1 end)=0)")
            .pattern("any", "(sum(case when ?1 then 1 else 0 end)>0)");

        // math
        for name in ["abs", "sign", "sqrt", "ln", "exp", "floor", "ceiling", "degrees", "radians"] {
            b.native(name, 1, Some(1));
        }
        b.native("power", 2, Some(2))
            .native("mod", 2, Some(2))
            .native("round", 1, Some(2))
            .native("pi", 0, Some(0))
            .pattern("log10", "log(10,?1)")
            .native("log", 2, Some(2));

        // trigonometry
        for name in ["sin", "cos", "tan", "asin", "acos", "atan"] {
            b.native(name, 1, Some(1));
        }
        b.native("atan2", 2, Some(2));

        // nulls
        b.native("coalesce", 1, None)
            .native("nullif", 2, Some(2))
            .pattern("ifnull", "coalesce(?1,?2)");

        // strings
        b.native("lower", 1, Some(1))
            .native("upper", 1, Some(1))
            .native("left", 2, Some(2))
            .native("right", 2, Some(2))
            .native("replace", 3, Some(3))
            .native("substring", 2, Some(3))
            .native("lpad", 2, Some(3))
            .native("rpad", 2, Some(3))
            .native("trim", 1, Some(1))
            .variadic("concat", "(", "||", ")", 1)
            .pattern("length", "character_length(?1)")
            .pattern("position", "position(?1 in ?2)")
            .pattern("locate", "position(?1 in ?2)")
            .pattern("overlay", "overlay(?1 placing ?2 from ?3)")
            .pattern("str", "cast(?1 as varchar)")
            .native("format", 2, Some(2));

        // comparison
        b.native("least", 2, None).native("greatest", 2, None);

        // date and time
        b.native("timestampadd", 3, Some(3))
            .native("timestampdiff", 3, Some(3))
            .alias("dateadd", "timestampadd")
            .alias("datediff", "timestampdiff");
        b.no_args("current_date", "current_date")
            .no_args("current_time", "current_time")
            .no_args("current_timestamp", "current_timestamp")
            .no_args("local_date", "current_date")
            .no_args("local_time", "localtime")
            .no_args("local_datetime", "localtimestamp")
            .no_args("offset_datetime", "current_timestamp")
            .no_args("instant", "current_timestamp");
        b.alias("current date", "current_date")
            .alias("current time", "current_time")
            .alias("current timestamp", "current_timestamp")
            .alias("local date", "local_date")
            .alias("local time", "local_time")
            .alias("local datetime", "local_datetime")
            .alias("offset datetime", "offset_datetime")
            .alias("current_instant", "instant");

        b
    }

    /// Registers (or replaces) a descriptor under `name`.
    pub fn register(&mut self, name: &str, descriptor: FunctionDescriptor) -> &mut Self {
        self.functions.insert(name.to_lowercase(), descriptor);
        self
    }

    /// Registers a native function taking `min..=max` arguments.
    pub fn native(&mut self, name: &str, min: usize, max: Option<usize>) -> &mut Self {
        self.native_as(name, name, min, max)
    }

    /// Registers a native function rendered under a different SQL name.
    pub fn native_as(
        &mut self,
        name: &str,
        sql_name: &str,
        min: usize,
        max: Option<usize>,
    ) -> &mut Self {
        self.register(
            name,
            FunctionDescriptor {
                kind: FunctionKind::Native {
                    sql_name: sql_name.to_string(),
                },
                min_args: min,
                max_args: max,
            },
        )
    }

    /// Registers a function rendered as bare SQL text.
    pub fn no_args(&mut self, name: &str, sql: &str) -> &mut Self {
        self.register(
            name,
            FunctionDescriptor {
                kind: FunctionKind::NoArgs {
                    sql: sql.to_string(),
                },
                min_args: 0,
                max_args: Some(0),
            },
        )
    }

    /// Registers a pattern emulation. The arity is the highest `?n` in the
    /// pattern.
    pub fn pattern(&mut self, name: &str, pattern: &str) -> &mut Self {
        let arity = pattern::max_ordinal(pattern);
        self.register(
            name,
            FunctionDescriptor {
                kind: FunctionKind::Pattern {
                    pattern: pattern.to_string(),
                },
                min_args: arity,
                max_args: Some(arity),
            },
        )
    }

    /// Registers a variadic operator form.
    pub fn variadic(
        &mut self,
        name: &str,
        open: &str,
        separator: &str,
        close: &str,
        min: usize,
    ) -> &mut Self {
        self.register(
            name,
            FunctionDescriptor {
                kind: FunctionKind::Variadic {
                    open: open.to_string(),
                    separator: separator.to_string(),
                    close: close.to_string(),
                },
                min_args: min,
                max_args: None,
            },
        )
    }

    /// Registers `alternate` as another name for `target`.
    pub fn alias(&mut self, alternate: &str, target: &str) -> &mut Self {
        self.register(
            alternate,
            FunctionDescriptor {
                kind: FunctionKind::Alias {
                    target: target.to_lowercase(),
                },
                min_args: 0,
                max_args: None,
            },
        )
    }

    /// Removes `name`.
    pub fn unregister(&mut self, name: &str) -> &mut Self {
        self.functions.remove(&name.to_lowercase());
        self
    }

    /// Freezes the registry.
    #[must_use]
    pub fn build(self) -> FunctionRegistry {
        FunctionRegistry {
            functions: self.functions,
        }
    }
}

/// An immutable function registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, FunctionDescriptor>,
}

impl FunctionRegistry {
    /// Looks up `name`, following aliases.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnknownFunction`] when `name` (or an alias
    /// target) is not registered.
    pub fn resolve(&self, name: &str) -> Result<&FunctionDescriptor> {
        let mut key = name.to_lowercase();
        for _ in 0..MAX_ALIAS_DEPTH {
            let descriptor = self
                .functions
                .get(&key)
                .ok_or_else(|| DialectError::UnknownFunction(name.to_string()))?;
            match &descriptor.kind {
                FunctionKind::Alias { target } => {
                    trace!(from = key.as_str(), to = target.as_str(), "Following function alias");
                    key.clone_from(target);
                }
                _ => return Ok(descriptor),
            }
        }
        Err(DialectError::UnknownFunction(name.to_string()))
    }

    /// Returns whether `name` resolves to a function.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// Renders a call to `name` with already-rendered arguments.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnknownFunction`] for unregistered names and
    /// [`DialectError::FunctionArity`] when the argument count is not
    /// accepted.
    pub fn render(&self, name: &str, args: &[&str]) -> Result<String> {
        let descriptor = self.resolve(name)?;
        if !descriptor.accepts(args.len()) {
            return Err(DialectError::FunctionArity {
                name: name.to_string(),
                expected: descriptor.expected(),
                actual: args.len(),
            });
        }
        Ok(match &descriptor.kind {
            FunctionKind::Native { sql_name } => format!("{sql_name}({})", args.join(",")),
            FunctionKind::NoArgs { sql } => sql.clone(),
            FunctionKind::Pattern { pattern } => pattern::render(pattern, args),
            FunctionKind::Variadic {
                open,
                separator,
                close,
            } => format!("{open}{}{close}", args.join(separator)),
            // resolve() never returns an alias
            FunctionKind::Alias { target } => {
                return Err(DialectError::UnknownFunction(target.clone()))
            }
        })
    }

    /// Registered names, aliases included, in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> FunctionRegistry {
        FunctionRegistryBuilder::standard().build()
    }

    #[test]
    fn test_native_rendering() {
        let r = registry();
        assert_eq!(r.render("upper", &["name"]).unwrap(), "upper(name)");
        assert_eq!(r.render("COALESCE", &["a", "b", "c"]).unwrap(), "coalesce(a,b,c)");
        assert_eq!(r.render("round", &["x"]).unwrap(), "round(x)");
    }

    #[test]
    fn test_pattern_emulation() {
        let r = registry();
        assert_eq!(r.render("length", &["s"]).unwrap(), "character_length(s)");
        assert_eq!(r.render("locate", &["'x'", "s"]).unwrap(), "position('x' in s)");
        assert_eq!(
            r.render("every", &["p.active"]).unwrap(),
            "(sum(case when p.active then 0 else 1 end)=0)"
        );
        assert_eq!(r.render("ifnull", &["a", "0"]).unwrap(), "coalesce(a,0)");
    }

    #[test]
    fn test_variadic_concat() {
        let r = registry();
        assert_eq!(r.render("concat", &["a", "b", "c"]).unwrap(), "(a||b||c)");
    }

    #[test]
    fn test_aliases_and_alternate_keys() {
        let r = registry();
        assert_eq!(r.render("current date", &[]).unwrap(), "current_date");
        assert_eq!(r.render("local datetime", &[]).unwrap(), "localtimestamp");
        assert_eq!(r.render("current_instant", &[]).unwrap(), "current_timestamp");
        assert_eq!(
            r.render("dateadd", &["day", "1", "d"]).unwrap(),
            "timestampadd(day,1,d)"
        );
    }

    #[test]
    fn test_arity_and_unknown() {
        let r = registry();
        let err = r.render("nullif", &["a"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Function 'nullif' expects 2 argument(s), got 1"
        );
        let err = r.render("least", &["a"]).unwrap_err();
        assert!(err.to_string().contains("at least 2"));
        assert!(matches!(
            r.render("soundex", &["a"]),
            Err(DialectError::UnknownFunction(_))
        ));
    }

    #[test]
    fn test_overrides_and_dangling_alias() {
        let mut b = FunctionRegistryBuilder::standard();
        b.variadic("concat", "concat(", ",", ")", 1)
            .native_as("length", "char_length", 1, Some(1))
            .alias("loop", "loop");
        let r = b.build();
        assert_eq!(r.render("concat", &["a", "b"]).unwrap(), "concat(a,b)");
        assert_eq!(r.render("length", &["s"]).unwrap(), "char_length(s)");
        assert!(r.render("loop", &[]).is_err());
        assert!(!r.contains("loop"));
    }
}
