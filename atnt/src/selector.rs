//! Group and purpose vocabularies, and the selector type that normalizes
//! "one value or a list of values" input.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AtntError, Result};

/// A closed set of labels a selector can pick from.
pub trait Vocabulary: Copy + Ord + FromStr<Err = AtntError> + fmt::Display + 'static {
    /// Name used in error messages ("group", "purpose").
    const KIND: &'static str;

    /// Every canonical value, in presentation order.
    const ALL: &'static [Self];

    fn valid_values() -> String {
        let names: Vec<String> = Self::ALL.iter().map(|v| v.to_string()).collect();
        format!("[{}]", names.join(", "))
    }
}

/// Partition of the clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    /// Clients used to train a model. Legacy name: `world`.
    #[serde(alias = "world")]
    Training,
    /// Clients used for enrollment and probing. Legacy name: `dev`.
    #[serde(alias = "dev")]
    Evaluation,
}

impl Group {
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Training => "training",
            Group::Evaluation => "evaluation",
        }
    }
}

impl Vocabulary for Group {
    const KIND: &'static str = "group";
    const ALL: &'static [Self] = &[Group::Training, Group::Evaluation];
}

impl FromStr for Group {
    type Err = AtntError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "training" | "world" => Ok(Group::Training),
            "evaluation" | "dev" => Ok(Group::Evaluation),
            _ => Err(AtntError::selector(Self::KIND, s, Self::valid_values())),
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of an evaluation sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    /// Reference samples a model is built from. Legacy name: `enrol`.
    #[serde(alias = "enrol")]
    Enroll,
    /// Samples compared against enrolled models.
    Probe,
}

impl Purpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Enroll => "enroll",
            Purpose::Probe => "probe",
        }
    }
}

impl Vocabulary for Purpose {
    const KIND: &'static str = "purpose";
    const ALL: &'static [Self] = &[Purpose::Enroll, Purpose::Probe];
}

impl FromStr for Purpose {
    type Err = AtntError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "enroll" | "enrol" => Ok(Purpose::Enroll),
            "probe" => Ok(Purpose::Probe),
            _ => Err(AtntError::selector(Self::KIND, s, Self::valid_values())),
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value or a list of values restricting a query.
///
/// An empty selector stands for the default, which is every valid value.
/// Values are only checked when a query resolves the selector, so a bad value
/// fails the whole call.
///
/// ```
/// use facedb_atnt::{Group, Selector};
///
/// let one: Selector<String> = "training".into();
/// let both: Selector<String> = [Group::Training, Group::Evaluation].into();
/// assert!(!one.is_all());
/// assert_eq!(both.values().len(), 2);
/// assert!(Selector::<u32>::all().is_all());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector<T>(Vec<T>);

impl<T> Selector<T> {
    /// The default selector, matching everything.
    pub fn all() -> Self {
        Self(Vec::new())
    }

    /// Returns true if no restriction was given.
    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[T] {
        &self.0
    }
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Self::all()
    }
}

impl Selector<String> {
    /// Validates every label and returns the deduplicated set, or every value
    /// of the vocabulary when the selector is empty.
    pub fn resolve<V: Vocabulary>(&self) -> Result<BTreeSet<V>> {
        if self.0.is_empty() {
            return Ok(V::ALL.iter().copied().collect());
        }
        self.0.iter().map(|s| s.parse::<V>()).collect()
    }
}

impl Selector<u32> {
    /// Validates every id against `valid` and returns the deduplicated set, or
    /// the whole range when the selector is empty.
    pub fn resolve_ids(&self, kind: &'static str, valid: RangeInclusive<u32>) -> Result<BTreeSet<u32>> {
        if self.0.is_empty() {
            return Ok(valid.collect());
        }
        self.0
            .iter()
            .map(|&id| {
                if valid.contains(&id) {
                    Ok(id)
                } else {
                    Err(AtntError::selector(
                        kind,
                        id,
                        format!("[{}..{}]", valid.start(), valid.end()),
                    ))
                }
            })
            .collect()
    }
}

impl From<&str> for Selector<String> {
    fn from(s: &str) -> Self {
        Self(vec![s.to_string()])
    }
}

impl From<String> for Selector<String> {
    fn from(s: String) -> Self {
        Self(vec![s])
    }
}

impl From<Vec<String>> for Selector<String> {
    fn from(v: Vec<String>) -> Self {
        Self(v)
    }
}

impl From<Vec<&str>> for Selector<String> {
    fn from(v: Vec<&str>) -> Self {
        Self(v.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for Selector<String> {
    fn from(v: &[&str]) -> Self {
        Self(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Selector<String> {
    fn from(v: [&str; N]) -> Self {
        Self(v.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Group> for Selector<String> {
    fn from(g: Group) -> Self {
        Self(vec![g.as_str().to_string()])
    }
}

impl<const N: usize> From<[Group; N]> for Selector<String> {
    fn from(v: [Group; N]) -> Self {
        Self(v.iter().map(|g| g.as_str().to_string()).collect())
    }
}

impl From<Purpose> for Selector<String> {
    fn from(p: Purpose) -> Self {
        Self(vec![p.as_str().to_string()])
    }
}

impl<const N: usize> From<[Purpose; N]> for Selector<String> {
    fn from(v: [Purpose; N]) -> Self {
        Self(v.iter().map(|p| p.as_str().to_string()).collect())
    }
}

impl From<u32> for Selector<u32> {
    fn from(id: u32) -> Self {
        Self(vec![id])
    }
}

impl From<Vec<u32>> for Selector<u32> {
    fn from(v: Vec<u32>) -> Self {
        Self(v)
    }
}

impl From<&[u32]> for Selector<u32> {
    fn from(v: &[u32]) -> Self {
        Self(v.to_vec())
    }
}

impl<const N: usize> From<[u32; N]> for Selector<u32> {
    fn from(v: [u32; N]) -> Self {
        Self(v.to_vec())
    }
}

impl From<RangeInclusive<u32>> for Selector<u32> {
    fn from(r: RangeInclusive<u32>) -> Self {
        Self(r.collect())
    }
}
