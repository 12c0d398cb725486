//! The fixed identity universe of the database and its stem path scheme.
//!
//! Every sample is addressed three ways:
//! - a `(client_id, file_id)` pair, with `file_id` counted per client,
//! - a global id in `1..=400`,
//! - a stem path `s<client_id>/<file_id>` relative to the image directory.

use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{AtntError, Result};

/// Number of subjects in the database.
pub const CLIENT_COUNT: u32 = 40;

/// Number of images captured per subject.
pub const FILES_PER_CLIENT: u32 = 10;

/// Total number of images.
pub const FILE_COUNT: u32 = CLIENT_COUNT * FILES_PER_CLIENT;

/// Clients of the training ("world") group. The evaluation group is the complement.
pub const TRAINING_CLIENTS: [u32; 20] = [
    1, 2, 5, 6, 10, 11, 12, 14, 16, 17, 20, 21, 24, 26, 27, 29, 33, 34, 36, 39,
];

/// Per-client file ids used for enrollment. The probe files are the complement.
pub const ENROLL_FILES: [u32; 5] = [2, 4, 5, 7, 9];

// Canonical integers only: "s03/2" is not a stem.
static STEM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^s([1-9][0-9]*)[/\\]([1-9][0-9]*)$").unwrap());

fn check_file_id(file_id: u32) -> Result<()> {
    if !(1..=FILES_PER_CLIENT).contains(&file_id) {
        return Err(AtntError::InvalidArgument(format!(
            "file id {file_id} is outside [1, {FILES_PER_CLIENT}]"
        )));
    }
    Ok(())
}

/// Returns the stem path `s<client_id>/<file_id>` of a sample.
///
/// The client id is not range-checked here; which clients are valid depends on
/// the query context.
pub fn path_stem(client_id: u32, file_id: u32) -> Result<String> {
    check_file_id(file_id)?;
    Ok(format_stem(client_id, file_id))
}

fn format_stem(client_id: u32, file_id: u32) -> String {
    Path::new(&format!("s{client_id}"))
        .join(file_id.to_string())
        .to_string_lossy()
        .into_owned()
}

/// Joins an optional directory, a stem and an optional extension.
///
/// The extension normally carries its leading `.` as in `.pgm`. Missing or
/// empty affixes are left out.
pub fn resolve_path(stem: &str, directory: Option<&str>, extension: Option<&str>) -> String {
    let file = format!("{stem}{}", extension.unwrap_or_default());
    match directory {
        Some(dir) if !dir.is_empty() => Path::new(dir).join(file).to_string_lossy().into_owned(),
        _ => file,
    }
}

/// Computes the global id `(client_id - 1) * 10 + file_id`.
///
/// Both ids must lie inside the database.
pub fn global_id(client_id: u32, file_id: u32) -> Result<u32> {
    check_file_id(file_id)?;
    if !(1..=CLIENT_COUNT).contains(&client_id) {
        return Err(AtntError::InvalidArgument(format!(
            "client id {client_id} is outside [1, {CLIENT_COUNT}]"
        )));
    }
    Ok((client_id - 1) * FILES_PER_CLIENT + file_id)
}

/// Splits a global id in `1..=400` into `(client_id, file_id)`.
pub fn split_global_id(global_id: u32) -> Result<(u32, u32)> {
    if !(1..=FILE_COUNT).contains(&global_id) {
        return Err(AtntError::InvalidArgument(format!(
            "global file id {global_id} is outside [1, {FILE_COUNT}]"
        )));
    }
    let zero_based = global_id - 1;
    Ok((
        zero_based / FILES_PER_CLIENT + 1,
        zero_based % FILES_PER_CLIENT + 1,
    ))
}

/// Parses a stem path back into `(client_id, file_id)`.
///
/// Accepts `/` and `\` as the segment separator. Both ids must lie inside the
/// database.
pub fn parse_path_stem(path: &str) -> Result<(u32, u32)> {
    let invalid = || AtntError::InvalidArgument(format!("\"{path}\" is not a stem of the form s<client>/<file>"));

    let caps = STEM_PATTERN.captures(path).ok_or_else(invalid)?;
    let client_id: u32 = caps[1].parse().map_err(|_| invalid())?;
    let file_id: u32 = caps[2].parse().map_err(|_| invalid())?;

    if client_id > CLIENT_COUNT || file_id > FILES_PER_CLIENT {
        return Err(invalid());
    }
    Ok((client_id, file_id))
}

/// A subject of the database. Client ids and model ids coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Client {
    pub id: u32,
}

impl Client {
    pub fn new(id: u32) -> Self {
        Self { id }
    }
}

/// One image of one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Sample {
    id: u32,
    client_id: u32,
    file_id: u32,
}

impl Sample {
    /// Creates a sample from a client id and a per-client file id.
    pub fn new(client_id: u32, file_id: u32) -> Result<Self> {
        let id = global_id(client_id, file_id)?;
        Ok(Self {
            id,
            client_id,
            file_id,
        })
    }

    /// Creates a sample from its global id.
    pub fn from_global_id(id: u32) -> Result<Self> {
        let (client_id, file_id) = split_global_id(id)?;
        Ok(Self {
            id,
            client_id,
            file_id,
        })
    }

    /// Global id in `1..=400`.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn client_id(&self) -> u32 {
        self.client_id
    }

    /// Per-client file id in `1..=10`.
    pub fn file_id(&self) -> u32 {
        self.file_id
    }

    /// The stem path, without directory or extension.
    pub fn path(&self) -> String {
        format_stem(self.client_id, self.file_id)
    }

    /// Wraps the stem into a complete path.
    pub fn make_path(&self, directory: Option<&str>, extension: Option<&str>) -> String {
        resolve_path(&self.path(), directory, extension)
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_stem() {
        assert_eq!(path_stem(3, 2).unwrap(), "s3/2");
        assert_eq!(path_stem(40, 10).unwrap(), "s40/10");
        // client ids are not checked here
        assert_eq!(path_stem(41, 1).unwrap(), "s41/1");
        assert!(matches!(path_stem(1, 0), Err(AtntError::InvalidArgument(_))));
        assert!(matches!(path_stem(1, 11), Err(AtntError::InvalidArgument(_))));
    }

    #[test]
    fn test_resolve_path() {
        assert_eq!(resolve_path("s3/2", None, None), "s3/2");
        assert_eq!(resolve_path("s3/2", Some(""), Some("")), "s3/2");
        assert_eq!(resolve_path("s3/2", None, Some(".pgm")), "s3/2.pgm");
        assert_eq!(resolve_path("s3/2", Some("/data/atnt"), Some(".pgm")), "/data/atnt/s3/2.pgm");
        assert_eq!(resolve_path("s3/2", Some("/data/atnt/"), None), "/data/atnt/s3/2");
    }

    #[test]
    fn test_global_id_bounds() {
        assert_eq!(global_id(1, 1).unwrap(), 1);
        assert_eq!(global_id(1, 10).unwrap(), 10);
        assert_eq!(global_id(2, 1).unwrap(), 11);
        assert_eq!(global_id(40, 10).unwrap(), 400);
        assert!(global_id(0, 1).is_err());
        assert!(global_id(1, 0).is_err());
        assert!(global_id(41, 1).is_err());
        assert!(matches!(global_id(u32::MAX, 1), Err(AtntError::InvalidArgument(_))));

        assert_eq!(split_global_id(1).unwrap(), (1, 1));
        assert_eq!(split_global_id(10).unwrap(), (1, 10));
        assert_eq!(split_global_id(11).unwrap(), (2, 1));
        assert_eq!(split_global_id(400).unwrap(), (40, 10));
        assert!(split_global_id(0).is_err());
        assert!(split_global_id(401).is_err());
    }

    #[test]
    fn test_parse_path_stem() {
        assert_eq!(parse_path_stem("s3/2").unwrap(), (3, 2));
        assert_eq!(parse_path_stem("s40/10").unwrap(), (40, 10));
        assert_eq!(parse_path_stem("s12\\7").unwrap(), (12, 7));

        for bad in ["", "s3", "3/2", "s3/2.pgm", "s03/2", "s3/02", "s0/1", "s41/1", "s1/11", "x/s3/2", "s3/2/"] {
            assert!(
                matches!(parse_path_stem(bad), Err(AtntError::InvalidArgument(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_round_trip_laws() {
        for client_id in 1..=CLIENT_COUNT {
            for file_id in 1..=FILES_PER_CLIENT {
                let id = global_id(client_id, file_id).unwrap();
                assert_eq!(split_global_id(id).unwrap(), (client_id, file_id));

                let stem = path_stem(client_id, file_id).unwrap();
                assert_eq!(parse_path_stem(&stem).unwrap(), (client_id, file_id));
            }
        }
    }

    #[test]
    fn test_sample() {
        let s = Sample::new(3, 4).unwrap();
        assert_eq!(s.id(), 24);
        assert_eq!(s.client_id(), 3);
        assert_eq!(s.file_id(), 4);
        assert_eq!(s.path(), "s3/4");
        assert_eq!(s.to_string(), "s3/4");
        assert_eq!(s.make_path(Some("db"), Some(".pgm")), "db/s3/4.pgm");
        assert_eq!(Sample::from_global_id(24).unwrap(), s);
        assert!(Sample::new(3, 11).is_err());
        assert!(Sample::new(500_000_000, 3).is_err());
    }
}
