//! Existence checks of resolved files on disk.
//!
//! A missing file is never an error: it is logged and tallied so the caller
//! can report a summary.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

/// Answers whether a path exists.
pub trait FileProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

/// Probes the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileProbe for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

impl<F> FileProbe for F
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn exists(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Outcome of [`check_files`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Number of files checked.
    pub total: usize,
    /// Number of files found.
    pub found: usize,
    /// Paths that could not be found, keyed by global file id.
    pub missing: BTreeMap<u32, String>,
}

impl CheckReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Checks every file of a listing keyed by global id.
pub fn check_files(files: &BTreeMap<u32, String>, probe: &dyn FileProbe) -> CheckReport {
    let mut report = CheckReport {
        total: files.len(),
        ..Default::default()
    };

    for (&id, path) in files {
        if probe.exists(Path::new(path)) {
            report.found += 1;
        } else {
            warn!("atnt: cannot find file {} (id {})", path, id);
            report.missing.insert(id, path.clone());
        }
    }
    report
}
