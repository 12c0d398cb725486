//! The clients command.

use clap::Args;
use serde::Serialize;

use facedb_atnt::Database;

use super::output;
use crate::Cli;

/// Lists the client (= model) ids of the given groups, ascending.
#[derive(Args)]
pub struct ClientsCommand {
    /// Group to list (training, evaluation); repeatable, default both
    #[arg(short = 'g', long = "group")]
    groups: Vec<String>,
}

#[derive(Serialize)]
struct ClientList {
    groups: Vec<String>,
    client_ids: Vec<u32>,
}

impl ClientsCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let db = Database::default();
        let client_ids = db.resolve_client_ids(self.groups.clone())?;

        let out = output(cli);
        if cli.json {
            let groups: Vec<String> = if self.groups.is_empty() {
                db.list_groups().iter().map(|g| g.to_string()).collect()
            } else {
                self.groups.clone()
            };
            return out.write(&ClientList { groups, client_ids });
        }
        out.write_lines(client_ids)
    }
}
