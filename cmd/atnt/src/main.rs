//! AT&T CLI - A command line interface for the AT&T (ORL) face database.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{
    CheckfilesCommand, ClientsCommand, ConfigCommand, DumplistCommand, LookupCommand,
};

/// AT&T CLI - A command line interface for the AT&T "Database of Faces".
///
/// This tool lists and checks the files of the evaluation protocol:
///   - training group: 20 clients, all 10 images each
///   - evaluation group: 20 clients, 5 enrollment and 5 probe images each
///
/// Configuration is stored in ~/.facedb/atnt/ and supports multiple contexts,
/// one per copy of the images on disk.
#[derive(Parser)]
#[command(name = "atnt")]
#[command(about = "AT&T/ORL face database CLI tool")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.facedb/atnt/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Context name to use
    #[arg(short = 'c', long, global = true)]
    pub context: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage CLI configuration
    Config(ConfigCommand),
    /// Dump the list of files matching your criteria
    Dumplist(DumplistCommand),
    /// Check that the image files exist
    Checkfiles(CheckfilesCommand),
    /// List client ids of the given groups
    Clients(ClientsCommand),
    /// Map file paths back to client and file ids
    Lookup(LookupCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Config(cmd) => cmd.run(cli),
        Commands::Dumplist(cmd) => cmd.run(cli),
        Commands::Checkfiles(cmd) => cmd.run(cli),
        Commands::Clients(cmd) => cmd.run(cli),
        Commands::Lookup(cmd) => cmd.run(cli),
    }
}
