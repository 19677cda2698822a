//! Per-run state: the province page set and the issue log.
//!
//! A [`RunContext`] is created for every conversion and threaded through
//! classification and rendering. Nothing here outlives a single run.

use std::collections::HashSet;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::types::AffectedArea;

/// A non-fatal diagnostic recorded during a conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    /// The bulletin carried entries outside the landmass lists.
    ExtrasDetected { entry: serde_json::Value },

    /// No region lists the province of an area.
    RegionNotFound { entry: AffectedArea },

    /// Neither the province nor "<province> (province)" is a known page.
    PageNotFound { province: String },

    /// The bulletin has no active cyclone.
    NoActiveTyphoon,
}

impl Issue {
    /// Human-readable message for the issue.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::ExtrasDetected { .. } => "Extras detected.".to_string(),
            Self::RegionNotFound { entry } => format!("Region for {} not found.", entry.province),
            Self::PageNotFound { province } => format!("Page not found for province: {province}"),
            Self::NoActiveTyphoon => "There is no active typhoon bulletin.".to_string(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Serialized as `{"message": ..., <context>: ...}`, except
/// [`Issue::NoActiveTyphoon`] which is a bare message string.
impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let message = self.message();
        let mut map = match self {
            Self::NoActiveTyphoon => return serializer.serialize_str(&message),
            _ => serializer.serialize_map(Some(2))?,
        };

        map.serialize_entry("message", &message)?;
        match self {
            Self::ExtrasDetected { entry } => map.serialize_entry("entry", entry)?,
            Self::RegionNotFound { entry } => map.serialize_entry("entry", entry)?,
            Self::PageNotFound { province } => map.serialize_entry("province", province)?,
            Self::NoActiveTyphoon => {}
        }
        map.end()
    }
}

/// Titles of the province articles on Wikipedia.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvinceSet {
    titles: HashSet<String>,
}

impl ProvinceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, title: impl Into<String>) {
        self.titles.insert(title.into());
    }

    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ProvinceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            titles: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for ProvinceSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.titles.extend(iter.into_iter().map(Into::into));
    }
}

/// State of a single conversion run.
#[derive(Debug)]
pub struct RunContext<'a> {
    provinces: &'a ProvinceSet,
    issues: Vec<Issue>,
}

impl<'a> RunContext<'a> {
    #[must_use]
    pub fn new(provinces: &'a ProvinceSet) -> Self {
        Self {
            provinces,
            issues: Vec::new(),
        }
    }

    /// Province page titles known for this run.
    #[must_use]
    pub fn provinces(&self) -> &ProvinceSet {
        self.provinces
    }

    /// Append an issue to the log.
    pub fn record(&mut self, issue: Issue) {
        tracing::warn!(issue = %issue, "Conversion issue");
        self.issues.push(issue);
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consume the context, returning the issues in the order recorded.
    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}
