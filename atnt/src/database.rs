use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::identity::{
    parse_path_stem, split_global_id, Client, Sample, CLIENT_COUNT, ENROLL_FILES,
    FILES_PER_CLIENT, TRAINING_CLIENTS,
};
use crate::selector::{Group, Purpose, Selector, Vocabulary};

/// Path affixes applied to every resolved path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Prepended to every path (e.g. "/data/atnt").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,

    /// Appended to every path, including the leading dot (e.g. ".pgm").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl Config {
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }
}

/// Restrictions for [`Database::query_samples`].
///
/// Every field defaults to "everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleQuery {
    model_ids: Selector<u32>,
    groups: Selector<String>,
    purposes: Selector<String>,
}

impl SampleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts enrollment samples to these models (ids in `1..=40`).
    pub fn model_ids(mut self, ids: impl Into<Selector<u32>>) -> Self {
        self.model_ids = ids.into();
        self
    }

    pub fn groups(mut self, groups: impl Into<Selector<String>>) -> Self {
        self.groups = groups.into();
        self
    }

    /// Only honored when the evaluation group is requested.
    pub fn purposes(mut self, purposes: impl Into<Selector<String>>) -> Self {
        self.purposes = purposes.into();
        self
    }
}

/// Query engine over the AT&T (ORL) face database protocol.
///
/// The database holds no mutable state: the partition sets are fixed at
/// construction and every query is a pure function of its arguments, so a
/// single instance can be shared freely between threads.
///
/// # Example
///
/// ```
/// use facedb_atnt::{Database, SampleQuery};
///
/// let db = Database::default();
/// let samples = db
///     .query_samples(&SampleQuery::new().groups("evaluation").purposes("enroll").model_ids(3u32))
///     .unwrap();
/// let paths = db.resolve_sample_paths(&samples, None, None);
/// assert_eq!(paths, ["s3/2", "s3/4", "s3/5", "s3/7", "s3/9"]);
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    config: Config,
    training_clients: BTreeSet<u32>,
    evaluation_clients: BTreeSet<u32>,
    enroll_files: BTreeSet<u32>,
    probe_files: BTreeSet<u32>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Database {
    /// Creates a database whose paths use the given affixes by default.
    pub fn new(config: Config) -> Self {
        let training_clients: BTreeSet<u32> = TRAINING_CLIENTS.into_iter().collect();
        let evaluation_clients = (1..=CLIENT_COUNT)
            .filter(|id| !training_clients.contains(id))
            .collect();
        let enroll_files: BTreeSet<u32> = ENROLL_FILES.into_iter().collect();
        let probe_files = (1..=FILES_PER_CLIENT)
            .filter(|id| !enroll_files.contains(id))
            .collect();

        Self {
            config,
            training_clients,
            evaluation_clients,
            enroll_files,
            probe_files,
        }
    }

    /// Short name of the database.
    pub fn name(&self) -> &'static str {
        "atnt"
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn list_groups(&self) -> [Group; 2] {
        [Group::Training, Group::Evaluation]
    }

    pub fn list_purposes(&self) -> [Purpose; 2] {
        [Purpose::Enroll, Purpose::Probe]
    }

    fn client_id_set(&self, groups: &BTreeSet<Group>) -> BTreeSet<u32> {
        let mut ids = BTreeSet::new();
        if groups.contains(&Group::Training) {
            ids.extend(&self.training_clients);
        }
        if groups.contains(&Group::Evaluation) {
            ids.extend(&self.evaluation_clients);
        }
        ids
    }

    /// Returns the ids of the clients in the given groups, ascending.
    pub fn resolve_client_ids(&self, groups: impl Into<Selector<String>>) -> Result<Vec<u32>> {
        let groups: BTreeSet<Group> = groups.into().resolve()?;
        Ok(self.client_id_set(&groups).into_iter().collect())
    }

    /// Returns the clients in the given groups, ordered by id.
    pub fn resolve_clients(&self, groups: impl Into<Selector<String>>) -> Result<Vec<Client>> {
        Ok(self
            .resolve_client_ids(groups)?
            .into_iter()
            .map(Client::new)
            .collect())
    }

    /// Same as [`Database::resolve_client_ids`]; every client has exactly one model.
    pub fn model_ids(&self, groups: impl Into<Selector<String>>) -> Result<Vec<u32>> {
        self.resolve_client_ids(groups)
    }

    /// Same as [`Database::resolve_clients`]; every client has exactly one model.
    pub fn models(&self, groups: impl Into<Selector<String>>) -> Result<Vec<Client>> {
        self.resolve_clients(groups)
    }

    pub fn model_from_client(&self, client_id: u32) -> u32 {
        client_id
    }

    pub fn client_from_model(&self, model_id: u32) -> u32 {
        model_id
    }

    /// Returns the client owning the file with the given global id.
    pub fn client_from_file(&self, file_id: u32) -> Result<u32> {
        split_global_id(file_id).map(|(client_id, _)| client_id)
    }

    /// Returns the samples matching the query.
    ///
    /// Enrollment samples are emitted first, for the clients of the requested
    /// groups that are also in the requested models. Probe samples follow, for
    /// every client of the requested groups: the model restriction does not
    /// apply to them. Within each part, clients and files are ascending.
    ///
    /// Purposes are only checked when the evaluation group is requested; the
    /// training group alone always yields every file of its clients.
    pub fn query_samples(&self, query: &SampleQuery) -> Result<Vec<Sample>> {
        let groups: BTreeSet<Group> = query.groups.resolve()?;
        let candidates = self.client_id_set(&groups);

        let model_ids = query.model_ids.resolve_ids("model", 1..=CLIENT_COUNT)?;
        let selected: BTreeSet<u32> = candidates.intersection(&model_ids).copied().collect();

        let purposes: BTreeSet<Purpose> = if groups.contains(&Group::Evaluation) {
            query.purposes.resolve()?
        } else {
            Purpose::ALL.iter().copied().collect()
        };

        let mut samples = Vec::new();
        if purposes.contains(&Purpose::Enroll) {
            for &client_id in &selected {
                for &file_id in &self.enroll_files {
                    samples.push(Sample::new(client_id, file_id)?);
                }
            }
        }
        if purposes.contains(&Purpose::Probe) {
            for &client_id in &candidates {
                for &file_id in &self.probe_files {
                    samples.push(Sample::new(client_id, file_id)?);
                }
            }
        }

        debug!(
            "atnt: {} samples for groups={:?} purposes={:?} models={}",
            samples.len(),
            groups,
            purposes,
            selected.len()
        );
        Ok(samples)
    }

    fn affixes<'a>(
        &'a self,
        directory: Option<&'a str>,
        extension: Option<&'a str>,
    ) -> (Option<&'a str>, Option<&'a str>) {
        (
            directory.or(self.config.directory.as_deref()),
            extension.or(self.config.extension.as_deref()),
        )
    }

    /// Resolves samples to paths, keeping their order.
    ///
    /// `directory` and `extension` override the configured affixes when given.
    pub fn resolve_sample_paths(
        &self,
        samples: &[Sample],
        directory: Option<&str>,
        extension: Option<&str>,
    ) -> Vec<String> {
        let (directory, extension) = self.affixes(directory, extension);
        samples
            .iter()
            .map(|s| s.make_path(directory, extension))
            .collect()
    }

    /// Resolves global file ids to paths, keeping their order.
    pub fn paths_for_ids(
        &self,
        ids: &[u32],
        prefix: Option<&str>,
        suffix: Option<&str>,
    ) -> Result<Vec<String>> {
        let samples = ids
            .iter()
            .map(|&id| Sample::from_global_id(id))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.resolve_sample_paths(&samples, prefix, suffix))
    }

    /// Returns the paths of the matching samples keyed by global id.
    pub fn files(
        &self,
        query: &SampleQuery,
        directory: Option<&str>,
        extension: Option<&str>,
    ) -> Result<BTreeMap<u32, String>> {
        let (directory, extension) = self.affixes(directory, extension);
        Ok(self
            .query_samples(query)?
            .into_iter()
            .map(|s| (s.id(), s.make_path(directory, extension)))
            .collect())
    }

    /// Maps paths back to samples, keeping their order.
    ///
    /// The configured directory and extension are stripped when present, so
    /// both full paths and bare stems are accepted. The first path that is
    /// not a valid stem fails the whole batch.
    pub fn reverse_lookup<S: AsRef<str>>(&self, paths: &[S]) -> Result<Vec<Sample>> {
        paths.iter().map(|p| self.lookup_path(p.as_ref())).collect()
    }

    fn lookup_path(&self, path: &str) -> Result<Sample> {
        let mut rest = Path::new(path);
        if let Some(dir) = self.config.directory.as_deref().filter(|d| !d.is_empty()) {
            if let Ok(stripped) = rest.strip_prefix(dir) {
                rest = stripped;
            }
        }

        let rest = rest.to_string_lossy();
        let stem = match self.config.extension.as_deref().filter(|e| !e.is_empty()) {
            Some(ext) => rest.strip_suffix(ext).unwrap_or(&*rest),
            None => &*rest,
        };

        let (client_id, file_id) = parse_path_stem(stem)?;
        Sample::new(client_id, file_id)
    }
}
