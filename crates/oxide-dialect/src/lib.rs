//! # oxide-dialect
//!
//! SQL dialect portability layer.
//!
//! A query compiler that targets several relational databases consults a
//! [`Dialect`] for everything vendor-specific:
//! - Type names with capacity-weighted patterns (`varchar($l)`, `number($p,$s)`)
//! - Reserved words and identifier quoting
//! - Cast emulation between boolean representations, strings and integers
//! - Lock clauses and row-locking strategies
//! - Padded batch sizes for `in` lists
//! - DDL for tables, sequences, indexes and constraints
//! - A portable function registry
//!
//! A dialect is built once, during startup, and is immutable afterwards. It
//! is `Send + Sync` and can be shared freely between threads.
//!
//! ## Resolving Type Names
//!
//! ```rust
//! use oxide_dialect::{Backend, Dialect, ResolutionInfo, Size, SqlTypeCode};
//!
//! let dialect = Dialect::for_backend(Backend::Oracle, &ResolutionInfo::version(19, 0));
//!
//! let name = dialect
//!     .resolve_type_name(SqlTypeCode::Varchar, &Size::length(100))
//!     .unwrap();
//! assert_eq!(name, "varchar2(100 char)");
//!
//! // Longer than varchar2 allows
//! let name = dialect
//!     .resolve_type_name(SqlTypeCode::Varchar, &Size::length(10_000))
//!     .unwrap();
//! assert_eq!(name, "clob");
//! ```
//!
//! ## Padding `in` Lists
//!
//! ```rust
//! use oxide_dialect::{Dialect, Settings};
//!
//! let dialect = Dialect::standard();
//! let settings = Settings {
//!     in_clause_parameter_padding: true,
//!     ..Settings::default()
//! };
//!
//! assert_eq!(dialect.batch_size(1, 5), 8);
//! assert_eq!(dialect.render_in_list("id", 3, &settings), "id in(?,?,?,?)");
//! ```

pub mod backends;
pub mod batch;
pub mod cast;
pub mod config;
pub mod ddl;
pub mod dialect;
pub mod error;
pub mod functions;
pub mod keywords;
pub mod literal;
pub mod lock;
pub mod pattern;
pub mod size;
pub mod type_names;
pub mod types;

pub use backends::Backend;
pub use batch::{BatchLoadSizingStrategy, StandardBatchLoadSizing};
pub use cast::{CastMatrix, CastType};
pub use config::{Capabilities, DialectConfig, ResolutionInfo, Settings};
pub use dialect::{Dialect, DialectBuilder, TrimSpec};
pub use error::{DialectError, Result};
pub use keywords::KeywordSet;
pub use lock::{LockMode, LockOptions, Lockable, LockingStrategy};
pub use size::{Size, SizeStrategy, StandardSizeStrategy};
pub use type_names::TypeNames;
pub use types::{LanguageType, SqlTypeCode};
