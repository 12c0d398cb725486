//! The lookup command.

use clap::Args;

use facedb_atnt::Database;

use super::{dataset_config, output, print_dataset, FileRecord};
use crate::Cli;

/// Maps file paths back to their client and file ids.
///
/// Paths may be bare stems (s3/2) or carry the directory and extension of the
/// selected context or flags. One bad path fails the whole lookup.
#[derive(Args)]
pub struct LookupCommand {
    /// Directory to strip from each path
    #[arg(short = 'd', long)]
    directory: Option<String>,

    /// Extension to strip from each path
    #[arg(short = 'e', long)]
    extension: Option<String>,

    /// Paths to look up
    #[arg(required = true)]
    paths: Vec<String>,
}

impl LookupCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let db = Database::new(dataset_config(
            cli,
            self.directory.as_deref(),
            self.extension.as_deref(),
        )?);
        print_dataset(cli, &db);

        let samples = db.reverse_lookup(&self.paths)?;
        let records: Vec<FileRecord> = samples
            .iter()
            .zip(&self.paths)
            .map(|(sample, path)| FileRecord::new(sample, path.as_str()))
            .collect();

        output(cli).write(&records)
    }
}
