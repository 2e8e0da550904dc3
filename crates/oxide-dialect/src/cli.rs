//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use oxide_dialect::{Backend, CastType, LockMode, SqlTypeCode};

/// Inspect what a SQL dialect renders.
#[derive(Parser)]
#[command(name = "oxide-dialect")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database backend.
    #[arg(short, long, env = "OXIDE_DIALECT_BACKEND", default_value = "standard")]
    pub backend: Backend,

    /// JSON file with the version, keywords and in-list ceiling the backend
    /// reports about itself.
    #[arg(short, long, env = "OXIDE_DIALECT_RESOLUTION_INFO")]
    pub resolution_info: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the column type name for a type code.
    TypeName {
        /// Type code, e.g. VARCHAR or LONGVARCHAR.
        code: SqlTypeCode,

        /// Column length.
        #[arg(short, long)]
        length: Option<u64>,

        /// Numeric or fractional-second precision.
        #[arg(short, long)]
        precision: Option<u32>,

        /// Numeric scale.
        #[arg(short, long)]
        scale: Option<u32>,
    },

    /// Render a cast between two cast types.
    Cast {
        /// Source cast type, e.g. YN_BOOLEAN.
        from: CastType,

        /// Target cast type.
        to: CastType,

        /// Operand expression.
        #[arg(short, long, default_value = "?")]
        operand: String,

        /// Target type name for the generic cast form.
        #[arg(short, long, default_value = "varchar(255)")]
        target_type: String,
    },

    /// Show the lock clause for a lock mode.
    Lock {
        /// Lock mode, e.g. PESSIMISTIC_WRITE.
        mode: LockMode,

        /// Timeout in milliseconds; -1 waits forever, 0 is no-wait, -2 skips
        /// locked rows.
        #[arg(short, long, default_value_t = -1, allow_hyphen_values = true)]
        timeout: i32,

        /// Table to render the row-lock statement for.
        #[arg(long)]
        table: Option<String>,

        /// Id column of the table.
        #[arg(long, default_value = "id")]
        id_column: String,

        /// Version column of the table.
        #[arg(long)]
        version_column: Option<String>,
    },

    /// Compute the padded batch size.
    BatchSize {
        /// Number of keys to load.
        keys: usize,

        /// Number of key columns.
        #[arg(short, long, default_value_t = 1)]
        columns: usize,
    },

    /// Render an `in` list.
    InList {
        /// Column to restrict.
        column: String,

        /// Number of values.
        keys: usize,

        /// Pad the parameter count to the batch size.
        #[arg(long)]
        pad: bool,
    },

    /// List the reserved words.
    Keywords,

    /// Dump the dialect configuration as JSON.
    Capabilities,

    /// Render `drop table`.
    DropTable {
        /// Table name.
        name: String,

        /// Schema holding the table.
        #[arg(long)]
        schema: Option<String>,
    },
}
