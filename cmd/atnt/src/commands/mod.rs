//! CLI commands module.

mod checkfiles;
mod clients;
mod config;
mod dumplist;
mod lookup;
mod util;

pub use checkfiles::CheckfilesCommand;
pub use clients::ClientsCommand;
pub use config::ConfigCommand;
pub use dumplist::DumplistCommand;
pub use lookup::LookupCommand;

// Re-export utils for use in commands
pub(crate) use util::*;
