mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jobcheck")]
#[command(version, about = "LR1110 job document checker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a job document (JSON, YAML or TOML)
    Validate {
        /// Path to the job document
        file: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Check every job instead of stopping at the first failure
        #[arg(short, long)]
        all: bool,

        /// Warn about jobs matching more than one job kind
        #[arg(short, long)]
        warn_ambiguous: bool,
    },

    /// Print the job document JSON Schema
    Schema {
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the Wi-Fi channels accepted in job documents
    Channels,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .init();

    match cli.command {
        Commands::Validate {
            file,
            format,
            all,
            warn_ambiguous,
        } => commands::validate::execute(&file, &format, all, warn_ambiguous),

        Commands::Schema { output } => commands::schema::execute(output.as_deref()),

        Commands::Channels => commands::channels::execute(),
    }
}
