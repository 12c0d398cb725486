//! Query and path resolution for the AT&T "Database of Faces" (formerly the
//! ORL Database of Faces).
//!
//! The database holds 40 subjects with 10 grayscale images each, stored as
//! `s<client>/<file>.pgm`. This crate does not read images; it defines the
//! evaluation protocol over them:
//!
//! - the `training` group holds 20 fixed clients, the `evaluation` group the other 20,
//! - inside the evaluation group, files 2, 4, 5, 7 and 9 of each client are
//!   used for enrollment and the remaining five as probes.
//!
//! # Usage
//!
//! ```
//! use facedb_atnt::{Config, Database, SampleQuery};
//!
//! let db = Database::new(Config::default().with_directory("/data/atnt").with_extension(".pgm"));
//!
//! let world = db.resolve_client_ids("training").unwrap();
//! assert_eq!(world.len(), 20);
//!
//! let files = db.files(&SampleQuery::new().groups("evaluation").purposes("probe"), None, None).unwrap();
//! assert_eq!(files.len(), 100);
//! assert_eq!(files[&23], "/data/atnt/s3/3.pgm");
//!
//! let back = db.reverse_lookup(&["/data/atnt/s3/3.pgm"]).unwrap();
//! assert_eq!(back[0].id(), 23);
//! ```
//!
//! Group and purpose selectors also accept the legacy names `world`, `dev`
//! and `enrol`.

mod check;
mod database;
mod error;
pub mod identity;
mod selector;

pub use check::{check_files, CheckReport, FileProbe, LocalFs};
pub use database::{Config, Database, SampleQuery};
pub use error::{AtntError, Result};
pub use identity::{Client, Sample};
pub use selector::{Group, Purpose, Selector, Vocabulary};
