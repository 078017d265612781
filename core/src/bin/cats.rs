//! Command-line front end for the cats API.
//!
//! The server is taken from `CATS_API_BASE_URL` unless `--base-url` is given.
//! Results are printed as JSON on stdout.

use cats_core::{ApiError, ApiResult, Cat, CatsService, ClientConfig};
use serde::Serialize;
use serde_json::Value;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cats", about = "CRUD client for the cats resource")]
struct Cli {
    /// Overrides CATS_API_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every cat.
    All,
    Get { id: String },
    Create {
        name: String,
        description: Option<String>,
    },
    /// Fetches the cat first; fields not given keep their current value.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Omit to keep the current group.
        #[arg(long)]
        group: Option<String>,
    },
    Delete { id: String },
    /// Best match; empty filters are ignored.
    Search {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        group: String,
        /// Print every match instead of the best one.
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();

    let cli = Cli::parse();
    let config = match cli.base_url.as_deref() {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    };

    match run(CatsService::connect(config), cli.command).await {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

async fn run(cats: CatsService, command: Command) -> ApiResult<Value> {
    match command {
        Command::All => to_json(&cats.all().await?),
        Command::Get { id } => to_json(&cats.get(&id).await?),
        Command::Create { name, description } => {
            to_json(&cats.create(&name, description.as_deref()).await?)
        }
        Command::Update {
            id,
            name,
            description,
            group,
        } => {
            let current = cats.get(&id).await?;
            let cat = merge(current, &id, Changes { name, description, group });
            to_json(&cats.update(&cat).await?)
        }
        Command::Delete { id } => to_json(&cats.delete(&id).await?),
        Command::Search { name, group, all } => {
            if all {
                to_json(&cats.search_all(&name, &group).await?)
            } else {
                to_json(&cats.search(&name, &group).await?)
            }
        }
    }
}

/// Fields given on the command line for `update`.
struct Changes {
    name: Option<String>,
    description: Option<String>,
    group: Option<String>,
}

/// Overlay `changes` on the server's copy. The server replaces the whole
/// cat, so untouched fields must be sent back unchanged.
fn merge(mut current: Cat, id: &str, changes: Changes) -> Cat {
    current.id = Some(id.to_string());
    if let Some(name) = changes.name {
        current.name = name;
    }
    if changes.description.is_some() {
        current.description = changes.description;
    }
    if changes.group.is_some() {
        current.group = changes.group;
    }
    current
}

fn to_json<T: Serialize>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::Serialization(e.to_string()))
}
