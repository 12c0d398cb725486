//! The dumplist command.

use clap::Args;

use facedb_atnt::{Database, Sample, SampleQuery};

use super::{dataset_config, output, print_dataset, print_verbose, FileRecord};
use crate::Cli;

/// Dumps the list of files matching your criteria.
///
/// Paths are printed one per line in global id order. With --records (or
/// --json) the client and file ids are printed along with each path.
#[derive(Args)]
pub struct DumplistCommand {
    /// If given, this path will be prepended to every entry returned
    #[arg(short = 'd', long)]
    directory: Option<String>,

    /// If given, this extension will be appended to every entry returned
    #[arg(short = 'e', long)]
    extension: Option<String>,

    /// Limit the output to a group (training, evaluation); repeatable
    #[arg(short = 'g', long = "group")]
    groups: Vec<String>,

    /// Limit the output to a purpose (enroll, probe); repeatable
    #[arg(short = 'p', long = "purpose")]
    purposes: Vec<String>,

    /// Limit enrollment files to a model id; repeatable
    #[arg(short = 'm', long = "model")]
    models: Vec<u32>,

    /// Print structured records instead of plain paths
    #[arg(long)]
    records: bool,
}

impl DumplistCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let db = Database::new(dataset_config(
            cli,
            self.directory.as_deref(),
            self.extension.as_deref(),
        )?);
        print_dataset(cli, &db);

        let query = SampleQuery::new()
            .groups(self.groups.clone())
            .purposes(self.purposes.clone())
            .model_ids(self.models.clone());
        let files = db.files(&query, None, None)?;

        print_verbose(cli, &format!("Found {} file(s)", files.len()));

        let out = output(cli);
        if self.records || cli.json {
            let records = files
                .iter()
                .map(|(&id, path)| Ok(FileRecord::new(&Sample::from_global_id(id)?, path.as_str())))
                .collect::<facedb_atnt::Result<Vec<_>>>()?;
            out.write(&records)
        } else {
            out.write_lines(files.values())
        }
    }
}
