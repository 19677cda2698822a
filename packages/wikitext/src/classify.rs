//! Grouping of affected areas by region.

use crate::context::{Issue, RunContext};
use crate::regions::{is_island_name, RegionTable};
use crate::types::{AffectedAreas, Bulletin, ClassifiedAreas, SignalLevel, SignalMap};

/// Group the areas of one signal level by region.
///
/// Areas are taken from Luzon, Visayas and Mindanao in that order and placed
/// in the first region (by table order) listing their province. Areas with
/// no region go to the unclassified bucket; unless the province is an island
/// group, this is recorded as an issue. Non-empty `extras` are recorded as an
/// issue but not classified.
pub fn classify_areas(
    areas: &AffectedAreas,
    regions: &RegionTable,
    ctx: &mut RunContext<'_>,
) -> ClassifiedAreas {
    if let Some(extras) = areas.non_empty_extras() {
        ctx.record(Issue::ExtrasDetected {
            entry: extras.clone(),
        });
    }

    let mut classified = ClassifiedAreas::default();

    for area in areas.landmass_areas() {
        match regions.region_of(&area.province) {
            Some(index) => {
                tracing::debug!(province = %area.province, region = index, "Classified area");
                classified.push_region(index, area.clone());
            }
            None => {
                if !is_island_name(&area.province) {
                    ctx.record(Issue::RegionNotFound { entry: area.clone() });
                }
                classified.push_unclassified(area.clone());
            }
        }
    }

    classified
}

/// Classify every active signal level of a bulletin.
///
/// Levels absent from the bulletin are absent from the result.
pub fn classify_signals(
    bulletin: &Bulletin,
    regions: &RegionTable,
    ctx: &mut RunContext<'_>,
) -> SignalMap {
    SignalLevel::ALL
        .into_iter()
        .filter_map(|level| {
            let signal = bulletin.signal(level)?;
            Some((level, classify_areas(&signal.affected_areas, regions, ctx)))
        })
        .collect()
}
