//! Core data types for the converter.
//!
//! Bulletin types mirror the JSON emitted by the PAGASA bulletin scraper.
//! Unknown fields are ignored so newer scraper output still deserializes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::context::Issue;
use crate::error::{Result, WikitextError};

/// A tropical cyclone wind signal level (1 to 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignalLevel(u8);

impl SignalLevel {
    /// All levels in ascending order.
    pub const ALL: [SignalLevel; 5] = [
        SignalLevel(1),
        SignalLevel(2),
        SignalLevel(3),
        SignalLevel(4),
        SignalLevel(5),
    ];

    /// Create a signal level, rejecting anything outside 1-5.
    pub fn new(level: u8) -> Result<Self> {
        if (1..=5).contains(&level) {
            Ok(Self(level))
        } else {
            Err(WikitextError::InvalidSignalLevel(level))
        }
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Key of this level in the bulletin's `storm_signals` map.
    #[must_use]
    pub fn key(self) -> String {
        self.0.to_string()
    }

    /// Levels in the order they appear in the table (most severe first).
    pub fn table_order() -> impl Iterator<Item = SignalLevel> {
        Self::ALL.into_iter().rev()
    }
}

impl TryFrom<u8> for SignalLevel {
    type Error = WikitextError;

    fn try_from(level: u8) -> Result<Self> {
        Self::new(level)
    }
}

impl fmt::Display for SignalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sub-area description of a partially affected province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaIncludes {
    /// Kind of sub-area: "mainland", "rest", or a descriptive term such as
    /// "portion".
    pub term: String,

    /// Qualifier placed before the term (e.g., "northern").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,

    /// Municipalities named by the bulletin, in bulletin order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipalities: Option<Vec<String>>,
}

/// One affected province (or part of one) under a signal level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedArea {
    pub province: String,

    /// Whether only part of the province is affected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes: Option<AreaIncludes>,
}

impl AffectedArea {
    /// Create an area covering a whole province.
    #[must_use]
    pub fn whole(province: impl Into<String>) -> Self {
        Self {
            province: province.into(),
            part: None,
            includes: None,
        }
    }

    /// Create an area covering part of a province.
    #[must_use]
    pub fn partial(province: impl Into<String>, includes: AreaIncludes) -> Self {
        Self {
            province: province.into(),
            part: Some(true),
            includes: Some(includes),
        }
    }

    /// Sub-area details, if the area covers only part of its province.
    #[must_use]
    pub fn partial_includes(&self) -> Option<&AreaIncludes> {
        if self.part.unwrap_or(false) {
            self.includes.as_ref()
        } else {
            None
        }
    }
}

/// Affected areas of one signal level, grouped by landmass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AffectedAreas {
    #[serde(default)]
    pub luzon: Option<Vec<AffectedArea>>,
    #[serde(default)]
    pub visayas: Option<Vec<AffectedArea>>,
    #[serde(default)]
    pub mindanao: Option<Vec<AffectedArea>>,

    /// Entries the scraper could not place on a landmass. Shape varies.
    #[serde(default)]
    pub extras: Option<serde_json::Value>,
}

impl AffectedAreas {
    /// Luzon, Visayas and Mindanao areas, in that order.
    pub fn landmass_areas(&self) -> impl Iterator<Item = &AffectedArea> {
        [&self.luzon, &self.visayas, &self.mindanao]
            .into_iter()
            .flat_map(|areas| areas.iter().flatten())
    }

    /// The `extras` value, if present and non-empty.
    #[must_use]
    pub fn non_empty_extras(&self) -> Option<&serde_json::Value> {
        use serde_json::Value;

        self.extras.as_ref().filter(|extras| match extras {
            Value::Null => false,
            Value::Array(items) => !items.is_empty(),
            Value::Object(fields) => !fields.is_empty(),
            Value::String(s) => !s.is_empty(),
            Value::Bool(flag) => *flag,
            Value::Number(_) => true,
        })
    }
}

/// One signal level's entry in the bulletin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StormSignal {
    #[serde(default)]
    pub affected_areas: AffectedAreas,
}

/// Bulletin header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletinInfo {
    /// ISO 8601 issue time.
    #[serde(default)]
    pub issued_timestamp: Option<String>,
}

/// A parsed severe weather bulletin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bulletin {
    /// Cyclone details; `null` (or absent) when no cyclone is active.
    #[serde(default)]
    pub typhoon: Option<serde_json::Value>,

    #[serde(default)]
    pub bulletin: Option<BulletinInfo>,

    /// Signal entries keyed "1" through "5". Inactive levels are absent or `null`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub storm_signals: BTreeMap<String, Option<StormSignal>>,
}

impl Bulletin {
    /// Parse a bulletin from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether the bulletin describes an active cyclone.
    #[must_use]
    pub fn has_active_typhoon(&self) -> bool {
        !matches!(self.typhoon, None | Some(serde_json::Value::Null))
    }

    /// The signal entry for a level, if that level is active.
    #[must_use]
    pub fn signal(&self, level: SignalLevel) -> Option<&StormSignal> {
        self.storm_signals.get(&level.key()).and_then(Option::as_ref)
    }

    /// The issue timestamp, or an error if the bulletin header lacks one.
    pub fn issued_timestamp(&self) -> Result<&str> {
        self.bulletin
            .as_ref()
            .and_then(|info| info.issued_timestamp.as_deref())
            .ok_or_else(|| {
                WikitextError::UnexpectedResponse("bulletin has no issued timestamp".to_string())
            })
    }
}

/// Deserialize `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Areas of one signal level grouped by region.
///
/// Areas whose province matched no region go to `unclassified`; the rest
/// are keyed by region index. Bucket contents keep bulletin order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedAreas {
    pub unclassified: Vec<AffectedArea>,
    pub regions: BTreeMap<usize, Vec<AffectedArea>>,
}

impl ClassifiedAreas {
    pub fn push_region(&mut self, region_index: usize, area: AffectedArea) {
        self.regions.entry(region_index).or_default().push(area);
    }

    pub fn push_unclassified(&mut self, area: AffectedArea) {
        self.unclassified.push(area);
    }

    /// Total number of areas across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.unclassified.len() + self.regions.values().map(Vec::len).sum::<usize>()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classified areas for every active signal level.
pub type SignalMap = BTreeMap<SignalLevel, ClassifiedAreas>;

/// Output of one conversion run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderResult {
    /// Diagnostics collected during the run. Serialized as `false` when empty.
    #[serde(serialize_with = "serialize_issues")]
    pub issues: Vec<Issue>,

    /// The generated wikitext.
    pub template: String,
}

impl RenderResult {
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

#[allow(clippy::ptr_arg)] // signature fixed by serde's serialize_with
fn serialize_issues<S: Serializer>(
    issues: &Vec<Issue>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    if issues.is_empty() {
        serializer.serialize_bool(false)
    } else {
        issues.serialize(serializer)
    }
}

/// A conversion result together with its HTML rendering from Wikipedia.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedTemplate {
    pub template: RenderResult,
    pub parsed: String,
}
