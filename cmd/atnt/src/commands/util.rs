//! Utility functions for CLI commands.

use facedb_atnt::{Config as DatasetConfig, Database, Sample};
use facedb_cli::{load_config, read_config, Config, Context, Output, OutputFormat};
use serde::Serialize;

use crate::Cli;

const APP_NAME: &str = "atnt";

/// Gets the global configuration.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(APP_NAME, cli.config.as_deref())
}

/// Gets the context to use, if any. Naming a missing context is an error.
///
/// The config file is only read here, never created.
pub fn get_context(cli: &Cli) -> anyhow::Result<Option<Context>> {
    let cfg = read_config(APP_NAME, cli.config.as_deref())?;

    match cfg.resolve_context(cli.context.as_deref()) {
        Some(ctx) => Ok(Some(ctx.clone())),
        None => match cli.context.as_deref() {
            Some(name) if !name.is_empty() => anyhow::bail!("context '{}' not found", name),
            _ => Ok(None),
        },
    }
}

/// Builds the path affixes of a command: flags win over the context.
pub fn dataset_config(
    cli: &Cli,
    directory: Option<&str>,
    extension: Option<&str>,
) -> anyhow::Result<DatasetConfig> {
    // Nothing to look up when both affixes are given and no context is named.
    let ctx = if cli.context.is_none() && directory.is_some() && extension.is_some() {
        None
    } else {
        get_context(cli)?
    };
    if let Some(ctx) = &ctx {
        print_verbose(cli, &format!("Using context: {}", ctx.name));
    }
    Ok(merge_affixes(ctx.as_ref(), directory, extension))
}

pub fn merge_affixes(
    ctx: Option<&Context>,
    directory: Option<&str>,
    extension: Option<&str>,
) -> DatasetConfig {
    DatasetConfig {
        directory: directory
            .or_else(|| ctx.and_then(Context::directory))
            .map(String::from),
        extension: extension
            .or_else(|| ctx.and_then(Context::extension))
            .map(String::from),
    }
}

/// Creates the output sink from the global flags.
pub fn output(cli: &Cli) -> Output {
    Output::new(OutputFormat::from_json_flag(cli.json), cli.output.clone())
}

/// Prints verbose output if enabled.
pub fn print_verbose(cli: &Cli, msg: &str) {
    facedb_cli::print_verbose(cli.verbose, msg);
}

/// Prints the database and the affixes it resolves paths with.
pub fn print_dataset(cli: &Cli, db: &Database) {
    let config = db.config();
    print_verbose(
        cli,
        &format!(
            "Database {}: directory={} extension={}",
            db.name(),
            config.directory.as_deref().unwrap_or("(none)"),
            config.extension.as_deref().unwrap_or("(none)")
        ),
    );
}

/// One resolved file, as printed by structured output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub id: u32,
    pub client_id: u32,
    pub file_id: u32,
    pub path: String,
}

impl FileRecord {
    pub fn new(sample: &Sample, path: impl Into<String>) -> Self {
        Self {
            id: sample.id(),
            client_id: sample.client_id(),
            file_id: sample.file_id(),
            path: path.into(),
        }
    }
}
