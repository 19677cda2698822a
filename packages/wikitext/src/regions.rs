//! Region reference table.
//!
//! Regions group provinces for presentation. The bundled table lists the
//! administrative regions of the Philippines; a custom table can be loaded
//! from any YAML file with the same shape.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WikitextError};

/// Region data shipped with the crate.
const BUNDLED_REGIONS: &str = include_str!("../data/regions.yaml");

/// Province names ending in "Island" or "Islands".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ISLAND_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Islands?$").expect("valid regex"));

/// Whether a province name denotes an island group (e.g., "Dinagat Islands").
///
/// Island groups often have no region and link to their own article, so they
/// get special treatment during classification and linking.
///
/// # Examples
/// ```
/// use pagasa_wikitext::regions::is_island_name;
///
/// assert!(is_island_name("Dinagat Islands"));
/// assert!(is_island_name("Polillo Island"));
/// assert!(!is_island_name("Isabela"));
/// ```
#[must_use]
pub fn is_island_name(province: &str) -> bool {
    ISLAND_PATTERN.is_match(province)
}

/// A region of the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Display name.
    pub name: String,

    /// Article title, when it differs from the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    /// Official designation (e.g., "Region III").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,

    /// Member provinces.
    #[serde(default)]
    pub provinces: Vec<String>,
}

impl Region {
    #[must_use]
    pub fn contains(&self, province: &str) -> bool {
        self.provinces.iter().any(|p| p == province)
    }
}

/// Ordered list of regions. A region's index is its position in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTable {
    regions: Vec<Region>,
}

impl RegionTable {
    /// Build a table from regions in order.
    pub fn new(regions: Vec<Region>) -> Result<Self> {
        if regions.is_empty() {
            return Err(WikitextError::EmptyRegionTable);
        }
        Ok(Self { regions })
    }

    /// The table bundled with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_yaml(BUNDLED_REGIONS)
    }

    /// Parse a table from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let regions: Vec<Region> = serde_yaml_ng::from_str(yaml)?;
        Self::new(regions)
    }

    /// Load a table from a YAML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        let table = Self::from_yaml(&yaml)?;
        tracing::debug!(path = %path.display(), regions = table.len(), "Loaded region table");
        Ok(table)
    }

    /// Index of the first region listing `province`, if any.
    #[must_use]
    pub fn region_of(&self, province: &str) -> Option<usize> {
        self.regions.iter().position(|region| region.contains(province))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Region)> {
        self.regions.iter().enumerate()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
