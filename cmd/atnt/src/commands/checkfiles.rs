//! The checkfiles command.

use clap::Args;

use facedb_atnt::{check_files, CheckReport, Database, LocalFs, SampleQuery};

use super::{dataset_config, output, print_dataset, print_verbose};
use crate::Cli;

/// Extension of the images as distributed.
const DEFAULT_EXTENSION: &str = ".pgm";

/// Checks that the files of the database exist on disk.
///
/// Every missing file is reported along with a summary. Missing files do not
/// make the command fail.
#[derive(Args)]
pub struct CheckfilesCommand {
    /// The path to the AT&T images (default: the context's directory)
    #[arg(short = 'd', long)]
    directory: Option<String>,

    /// The extension of the AT&T images (default: the context's extension, or '.pgm')
    #[arg(short = 'e', long)]
    extension: Option<String>,
}

impl CheckfilesCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let mut dataset =
            dataset_config(cli, self.directory.as_deref(), self.extension.as_deref())?;
        dataset
            .extension
            .get_or_insert_with(|| DEFAULT_EXTENSION.to_string());

        let Some(directory) = dataset.directory.clone() else {
            anyhow::bail!("image directory is required, use -d or a context with a directory");
        };

        print_verbose(cli, &format!("Checking files in {}", directory));

        let db = Database::new(dataset);
        print_dataset(cli, &db);
        let files = db.files(&SampleQuery::new(), None, None)?;
        let report = check_files(&files, &LocalFs);

        let out = output(cli);
        if cli.json {
            if !report.is_complete() {
                facedb_cli::print_warning(&format!(
                    "{} files (out of {}) were not found",
                    report.missing.len(),
                    report.total
                ));
            }
            return out.write(&report);
        }
        out.write_lines(summary_lines(&report, &directory))
    }
}

fn summary_lines(report: &CheckReport, directory: &str) -> Vec<String> {
    let mut lines: Vec<String> = report
        .missing
        .values()
        .map(|path| format!("Cannot find file \"{}\"", path))
        .collect();
    if !report.is_complete() {
        lines.push(format!(
            "{} files (out of {}) were not found at \"{}\"",
            report.missing.len(),
            report.total,
            directory
        ));
    }
    lines
}
