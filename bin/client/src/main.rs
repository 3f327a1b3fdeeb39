//! PermastoreIt command-line client

mod commands;
mod config;
mod constants;
mod error;
mod logger;
mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::download::DownloadOptions;
use commands::Exit;
use config::{parse_delay, NodeArgs, OutputArgs, RepeatArgs};
use constants::{DEFAULT_BULK_DELAY, DEFAULT_BULK_PATTERN};
use output::{Console, OutputFormat};
use sdk::constants::DEFAULT_SEARCH_LIMIT;
use sdk::{Client, Transport};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "permastore", version)]
#[command(about = "Client for a PermastoreIt content-storage node")]
struct Cli {
    #[command(flatten)]
    node: NodeArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the node's operational status
    Status {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Check component health (exit code 2 when not healthy)
    Health {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Upload a single file
    Upload {
        /// File to upload
        file: PathBuf,
        #[command(flatten)]
        repeat: RepeatArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Upload every matching file in a directory
    UploadBulk {
        /// Directory to scan (not recursive)
        directory: PathBuf,
        /// Filename pattern, '*' and '?' wildcards
        #[arg(short, long, default_value = DEFAULT_BULK_PATTERN)]
        pattern: String,
        /// Delay in seconds between uploads
        #[arg(short, long, default_value = DEFAULT_BULK_DELAY, value_parser = parse_delay)]
        delay: Duration,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Download a file by its content hash
    Download {
        /// Content hash of the file
        hash: String,
        /// Directory to save into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        /// Name to save as (defaults to the hash)
        #[arg(short, long)]
        name: Option<String>,
        /// Check the saved content against the hash
        #[arg(long)]
        verify: bool,
        #[command(flatten)]
        repeat: RepeatArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List stored files, most recent first
    List {
        /// Maximum number of files to list
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show metadata of a stored file
    Info {
        /// Content hash of the file
        hash: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Search stored files by name or tag
    Search {
        /// Search text
        query: String,
        /// Maximum number of results
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT, allow_negative_numbers = true)]
        limit: i64,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Fetch the zero-knowledge proof of storage for a file
    #[command(alias = "proof")]
    Zkp {
        /// Content hash of the file
        hash: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show node performance metrics, when exposed
    #[command(alias = "metrics")]
    GetMetrics {
        #[command(flatten)]
        output: OutputArgs,
    },
}

fn run<T: Transport>(client: &Client<T>, console: &mut Console, command: Commands) -> Exit {
    match command {
        Commands::Status { output } => commands::node::status(client, console, output.output_format),
        Commands::Health { output } => commands::node::health(client, console, output.output_format),
        Commands::Upload {
            file,
            repeat,
            output,
        } => commands::upload::upload(client, console, output.output_format, &file, repeat),
        Commands::UploadBulk {
            directory,
            pattern,
            delay,
            output,
        } => commands::bulk::upload_bulk(
            client,
            console,
            output.output_format,
            &directory,
            &pattern,
            delay,
        ),
        Commands::Download {
            hash,
            out_dir,
            name,
            verify,
            repeat,
            output,
        } => {
            let options = DownloadOptions {
                out_dir,
                name,
                repeat,
                verify,
            };
            commands::download::download(client, console, output.output_format, &hash, &options)
        }
        Commands::List { limit, output } => {
            commands::query::list(client, console, output.output_format, limit)
        }
        Commands::Info { hash, output } => {
            commands::query::info(client, console, output.output_format, &hash)
        }
        Commands::Search {
            query,
            limit,
            output,
        } => commands::query::search(client, console, output.output_format, &query, limit),
        Commands::Zkp { hash, output } => {
            commands::zkp::zkp(client, console, output.output_format, &hash)
        }
        Commands::GetMetrics { output } => {
            commands::node::metrics(client, console, output.output_format)
        }
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let cli = Cli::parse();

    let config = cli.node.client_config();
    log::debug!("using node at {}", config.base_url());
    let client = Client::new(config).context("Failed to initialize HTTP client")?;

    let mut console = Console::stdio();
    let exit = run(&client, &mut console, cli.command);
    let exit = console.finish(exit);
    std::process::exit(exit.code());
}
