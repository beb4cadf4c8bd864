//! `tablegate` CLI entry-point.
//!
//! Available sub-commands:
//! - `list`   — print every row of a table.
//! - `get`    — print the row with a given key.
//! - `insert` — insert a row from `field=value` pairs.
//! - `update` — update a row from `field=value` pairs.
//! - `delete` — delete the row with a given key.
//! - `refer`  — follow a foreign key into another table.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tablegate::config::{load_config, Config};
use tablegate::record::{parse_value, value_to_json};
use tablegate::{connect, Fetched, Identity, Record, Result, TableGateway, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tablegate",
    about = "Create, read, update and delete rows of any SQLite table",
    version
)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file; overrides the configured path.
    #[arg(long, global = true, env = "TABLEGATE_DB")]
    db: Option<String>,

    /// Primary-key column; overrides the configured default.
    #[arg(long, global = true)]
    id_field: Option<String>,

    /// Bind key arguments as text. Without it `007` is looked up as the integer 7.
    #[arg(long, global = true)]
    text_key: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every row of a table as JSON.
    List { table: String },
    /// Print the row whose key matches, or `null`.
    Get { table: String, id: String },
    /// Insert a row and print its new id.
    Insert {
        table: String,
        #[arg(value_parser = parse_assignment)]
        fields: Vec<(String, Value)>,
    },
    /// Update the row whose key matches.
    Update {
        table: String,
        id: String,
        #[arg(value_parser = parse_assignment, required = true)]
        fields: Vec<(String, Value)>,
    },
    /// Delete the row whose key matches.
    Delete { table: String, id: String },
    /// Read `related` keyed on `foreign_key`, optionally for one key.
    Refer {
        table: String,
        related: String,
        foreign_key: String,
        id: Option<String>,
    },
}

/// Parses a `field=value` argument.
fn parse_assignment(raw: &str) -> std::result::Result<(String, Value), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.is_empty() => Ok((field.to_string(), parse_value(value))),
        _ => Err(format!("expected field=value, got `{}`", raw)),
    }
}

/// Turns a key argument into an identity.
///
/// Keys parse like field values unless `text_key` is set, in which case they
/// are bound verbatim as text.
fn identity(raw: &str, text_key: bool) -> Identity {
    if text_key {
        Identity::Key(Value::Text(raw.to_string()))
    } else {
        Identity::Key(parse_value(raw))
    }
}

fn fetched_to_json(fetched: Fetched) -> Result<String> {
    let json = match fetched {
        Fetched::All(rows) => serde_json::to_string_pretty(&rows)?,
        Fetched::One(row) => serde_json::to_string_pretty(&row)?,
    };
    Ok(json)
}

fn run(cli: Cli) -> Result<String> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    if let Some(db) = cli.db {
        config.database.path = db;
    }
    let id_field = cli.id_field.unwrap_or(config.gateway.default_id_field);
    let text_key = cli.text_key;
    let key_of = |raw: &str| identity(raw, text_key);

    info!("Using database {}", config.database.path);
    let conn = connect(&config.database)?;
    let gateway = |table: &str| TableGateway::with_connection(table, &id_field, conn.clone());

    match cli.command {
        Command::List { table } => fetched_to_json(gateway(&table).read(None)?),
        Command::Get { table, id } => fetched_to_json(gateway(&table).read(Some(&key_of(&id)))?),
        Command::Insert { table, fields } => {
            let data: Record = fields.into_iter().collect();
            let id = gateway(&table).create(&data)?;
            Ok(value_to_json(&id).to_string())
        }
        Command::Update { table, id, fields } => {
            let data: Record = fields.into_iter().collect();
            Ok(gateway(&table).update(key_of(&id), &data)?.to_string())
        }
        Command::Delete { table, id } => Ok(gateway(&table).delete(key_of(&id))?.to_string()),
        Command::Refer {
            table,
            related,
            foreign_key,
            id,
        } => {
            let key = id.as_deref().map(&key_of);
            fetched_to_json(gateway(&table).refer(&related, &foreign_key, key.as_ref())?)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
