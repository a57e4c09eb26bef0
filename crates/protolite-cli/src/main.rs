//! `protolite` CLI: diff, reshape and group JSON documents from the command
//! line.
//!
//! ## Usage
//!
//! ```sh
//! # Keys of new.json that differ from old.json, keeping "id" for identity
//! protolite diff --new new.json --old old.json --primary-key id
//!
//! # Flat parent-linked rows to a nested forest (stdin → stdout)
//! echo '[{"id":1},{"id":2,"parent_id":1}]' | protolite tree
//!
//! # Forest back to a pre-order list, annotated with depth
//! protolite list --levels -i forest.json
//!
//! # Index a forest by a field, or find one node in it
//! protolite hash --key id -i forest.json
//! protolite find --key id --value 7 -i forest.json
//!
//! # Group or chunk a list of records
//! protolite group --key status -i orders.json
//! protolite chunk --size 100 -i orders.json -o batches.json
//!
//! # Classify a document
//! echo '[1,2]' | protolite type
//! ```
//!
//! Logging goes to stderr. `-v` enables debug events; `RUST_LOG` overrides
//! both.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use protolite_core::collection::{chunk, group_by};
use protolite_core::{
    classify, diff_with, find_children, to_hash_cloned, to_list_cloned, to_list_with, to_tree,
    DiffOptions, Map, TreeKeys, Value,
};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "protolite",
    version,
    about = "Structural helpers for JSON documents: diff, tree/list conversion, grouping"
)]
struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Input/output locations shared by every subcommand that reads one document.
#[derive(Args)]
struct Io {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the keys of NEW whose values differ from OLD
    Diff {
        /// The edited document
        #[arg(long)]
        new: String,
        /// The document to compare against
        #[arg(long)]
        old: String,
        /// Identity field copied from OLD and used to pair array elements
        #[arg(long, default_value = "")]
        primary_key: String,
        /// Comma-separated fields to skip at every depth
        #[arg(long, value_delimiter = ',')]
        ignore: Vec<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Build a forest from a flat list of parent-linked rows
    Tree {
        #[command(flatten)]
        io: Io,
        #[arg(long, default_value = "id")]
        id_key: String,
        #[arg(long, default_value = "parent_id")]
        parent_key: String,
        #[arg(long, default_value = "children")]
        children_key: String,
    },
    /// Flatten a forest into a pre-order list
    List {
        #[command(flatten)]
        io: Io,
        /// Emit {"level": n, "node": ...} entries
        #[arg(long)]
        levels: bool,
    },
    /// Index every node of a forest by a field
    Hash {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        key: String,
        /// Store [node, sibling index] pairs
        #[arg(long)]
        log_index: bool,
    },
    /// Find the first node of a forest whose field equals a JSON value
    Find {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        key: String,
        /// The value to match, as JSON (quote strings: '"abc"')
        #[arg(long)]
        value: String,
    },
    /// Group a list of records by a field
    Group {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        key: String,
    },
    /// Split a list into chunks of at most SIZE elements
    Chunk {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        size: usize,
    },
    /// Print the type tag of a document
    Type {
        #[command(flatten)]
        io: Io,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Diff {
            new,
            old,
            primary_key,
            ignore,
            output,
        } => {
            let new = read_value(Some(&new))?;
            let old = read_value(Some(&old))?;
            let ignore_keys: Vec<&str> = ignore
                .iter()
                .map(|key| key.trim())
                .filter(|key| !key.is_empty())
                .collect();
            let options = DiffOptions::new(&primary_key, &ignore_keys);
            let changes = diff_with(&new, &old, &options).context("Failed to diff documents")?;
            tracing::debug!(
                changed = changes.as_object().map_or(0, Map::len),
                "diff complete"
            );
            write_json(output.as_deref(), &changes)?;
        }
        Commands::Tree {
            io,
            id_key,
            parent_key,
            children_key,
        } => {
            let rows = read_array(io.input.as_deref())?;
            let keys = TreeKeys {
                id: &id_key,
                parent_id: &parent_key,
                children: &children_key,
            };
            let forest = to_tree(rows, &keys).context("Failed to build tree")?;
            write_json(io.output.as_deref(), &Value::Array(forest))?;
        }
        Commands::List { io, levels } => {
            let forest = read_array(io.input.as_deref())?;
            let list = if levels {
                to_list_with(&forest, |node, level| {
                    let mut entry = Map::new();
                    entry.insert("level".into(), Value::from(level));
                    entry.insert("node".into(), node.clone());
                    Value::Object(entry)
                })
            } else {
                to_list_cloned(&forest).context("Failed to flatten forest")?
            };
            write_json(io.output.as_deref(), &Value::Array(list))?;
        }
        Commands::Hash { io, key, log_index } => {
            let forest = read_array(io.input.as_deref())?;
            let hash = to_hash_cloned(&forest, &key, log_index).context("Failed to index forest")?;
            write_json(io.output.as_deref(), &hash)?;
        }
        Commands::Find { io, key, value } => {
            let forest = read_array(io.input.as_deref())?;
            let target = Value::from_json(&value)
                .with_context(|| format!("--value is not valid JSON: {}", value))?;
            let found = find_children(&forest, &target, &key).cloned();
            if found.is_none() {
                tracing::info!(key = %key, value = %value, "no matching node");
            }
            write_json(io.output.as_deref(), &found.unwrap_or(Value::Null))?;
        }
        Commands::Group { io, key } => {
            let list = read_array(io.input.as_deref())?;
            let groups: Map = group_by(&list, &key)
                .into_iter()
                .map(|(name, members)| (name, Value::Array(members)))
                .collect();
            write_json(io.output.as_deref(), &Value::Object(groups))?;
        }
        Commands::Chunk { io, size } => {
            let list = read_array(io.input.as_deref())?;
            let chunks = chunk(&list, size).into_iter().map(Value::Array).collect();
            write_json(io.output.as_deref(), &Value::Array(chunks))?;
        }
        Commands::Type { io } => {
            let value = read_value(io.input.as_deref())?;
            write_output(io.output.as_deref(), classify(&value).as_str())?;
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn read_value(path: Option<&str>) -> Result<Value> {
    let text = read_input(path)?;
    let source = path.unwrap_or("stdin");
    Value::from_json(&text).with_context(|| format!("Invalid JSON in {}", source))
}

fn read_array(path: Option<&str>) -> Result<Vec<Value>> {
    match read_value(path)? {
        Value::Array(items) => Ok(items),
        other => bail!("Expected a JSON array, got {}", classify(&other)),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json(path: Option<&str>, value: &Value) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    write_output(path, &pretty)
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{}\n", content))
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
