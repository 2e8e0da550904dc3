//! oxide-dialect CLI
//!
//! Command-line tool for inspecting the SQL a dialect renders.

mod cli;

use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use oxide_dialect::ddl::QualifiedName;
use oxide_dialect::{Dialect, Lockable, ResolutionInfo, Settings};

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let info = match &cli.resolution_info {
        Some(path) => {
            debug!(path = %path.display(), "Loading resolution info");
            ResolutionInfo::from_json_file(path)?
        }
        None => ResolutionInfo::default(),
    };
    let dialect = Dialect::for_backend(cli.backend, &info);

    match cli.command {
        Commands::TypeName {
            code,
            length,
            precision,
            scale,
        } => {
            let size = dialect.size_for(
                code,
                code.default_language_type(),
                precision,
                scale,
                length,
            );
            println!("{}", dialect.resolve_type_name(code, &size)?);
        }

        Commands::Cast {
            from,
            to,
            operand,
            target_type,
        } => {
            println!(
                "{}",
                dialect.cast_expression(&operand, from, to, &target_type)
            );
        }

        Commands::Lock {
            mode,
            timeout,
            table,
            id_column,
            version_column,
        } => {
            println!("{}", dialect.for_update_fragment(mode, timeout).trim_start());
            if let Some(table) = table {
                let mut lockable = Lockable::new(table, id_column);
                if let Some(version) = version_column {
                    lockable = lockable.versioned(version);
                }
                match dialect.lock_sql(mode, &lockable, timeout)? {
                    Some(sql) => println!("{sql}"),
                    None => println!("-- {mode} is verified at commit, no statement"),
                }
            }
        }

        Commands::BatchSize { keys, columns } => {
            println!("{}", dialect.batch_size(columns, keys));
        }

        Commands::InList { column, keys, pad } => {
            let settings = Settings {
                in_clause_parameter_padding: pad,
                ..Settings::default()
            };
            println!("{}", dialect.render_in_list(&column, keys, &settings));
        }

        Commands::Keywords => {
            for keyword in dialect.keywords().iter() {
                println!("{keyword}");
            }
        }

        Commands::Capabilities => {
            println!("{}", dialect.config().to_json()?);
        }

        Commands::DropTable { name, schema } => {
            let mut table = QualifiedName::new(name);
            if let Some(schema) = schema {
                table = table.in_schema(schema);
            }
            println!("{}", dialect.drop_table_string(&table)?);
        }
    }

    Ok(())
}
