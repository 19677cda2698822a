//! Bullet list rendering for classified areas.

use std::collections::BTreeMap;

use super::links::{municipality_list, province_link};
use crate::context::RunContext;
use crate::regions::{Region, RegionTable};
use crate::types::{AffectedArea, ClassifiedAreas, SignalLevel, SignalMap};

/// Bullet depth of an area line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bullet {
    /// Areas outside any region.
    TopLevel,
    /// Areas listed under a region header.
    Nested,
}

impl Bullet {
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::TopLevel => "*",
            Self::Nested => "**",
        }
    }

    fn for_region(region: Option<&Region>) -> Self {
        if region.is_some() {
            Self::Nested
        } else {
            Self::TopLevel
        }
    }
}

/// Header line for a region group, or a bare newline when there is no region.
///
/// # Examples
/// ```
/// use pagasa_wikitext::regions::Region;
/// use pagasa_wikitext::wikitext::region_header;
///
/// let region = Region {
///     name: "Central Luzon".to_string(),
///     page: None,
///     designation: Some("Region III".to_string()),
///     provinces: vec![],
/// };
/// assert_eq!(
///     region_header(Some(&region)),
///     "* '''[[Central Luzon]]''' {{small|(Region III)}}\n"
/// );
/// assert_eq!(region_header(None), "\n");
/// ```
#[must_use]
pub fn region_header(region: Option<&Region>) -> String {
    let Some(region) = region else {
        return "\n".to_string();
    };

    let page = region
        .page
        .as_deref()
        .map(|page| format!("{page}|"))
        .unwrap_or_default();
    let designation = region
        .designation
        .as_deref()
        .map(|d| format!("{{{{small|({d})}}}}"))
        .unwrap_or_default();

    format!("* '''[[{page}{}]]''' {designation}\n", region.name)
}

/// One bullet line for an affected area, ending in a newline.
pub fn area_bullet(area: &AffectedArea, bullet: Bullet, ctx: &mut RunContext<'_>) -> String {
    let link = province_link(&area.province, ctx);

    let text = match area.partial_includes() {
        None => link,
        Some(includes) => match includes.term.to_lowercase().as_str() {
            "mainland" => format!("Mainland {link}"),
            "rest" => format!("rest of {link}"),
            _ => {
                let mut text = match includes.part.as_deref() {
                    Some(part) => format!("{part} {} of {link}", includes.term),
                    None => format!("{} of {link}", includes.term),
                };
                text.push_str(&municipality_list(includes, &area.province));
                text
            }
        },
    };

    format!("{} {text}\n", bullet.marker())
}

/// Header followed by one bullet per area.
pub fn render_group(
    region: Option<&Region>,
    areas: &[AffectedArea],
    ctx: &mut RunContext<'_>,
) -> String {
    let bullet = Bullet::for_region(region);
    let mut out = region_header(region);
    for area in areas {
        out.push_str(&area_bullet(area, bullet, ctx));
    }
    out
}

/// Wikitext for one signal level: unclassified areas first, then each
/// region in table order.
pub fn render_signal(
    classified: &ClassifiedAreas,
    regions: &RegionTable,
    ctx: &mut RunContext<'_>,
) -> String {
    let mut out = String::from("\n");

    if !classified.unclassified.is_empty() {
        out.push_str(&render_group(None, &classified.unclassified, ctx));
    }

    for (&index, areas) in &classified.regions {
        let region = regions.get(index);
        if region.is_none() {
            tracing::debug!(region = index, "Region index outside table, rendering ungrouped");
        }
        out.push_str(&render_group(region, areas, ctx));
    }

    out
}

/// Render every classified level. Levels missing from `signals` render as
/// empty strings.
pub fn render_signals(
    signals: &SignalMap,
    regions: &RegionTable,
    ctx: &mut RunContext<'_>,
) -> BTreeMap<SignalLevel, String> {
    SignalLevel::ALL
        .into_iter()
        .map(|level| {
            let text = signals
                .get(&level)
                .map(|classified| render_signal(classified, regions, ctx))
                .unwrap_or_default();
            (level, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Issue, ProvinceSet};
    use crate::types::AreaIncludes;
    use pretty_assertions::assert_eq;

    fn region(name: &str, page: Option<&str>, designation: Option<&str>) -> Region {
        Region {
            name: name.to_string(),
            page: page.map(String::from),
            designation: designation.map(String::from),
            provinces: Vec::new(),
        }
    }

    fn partial(province: &str, term: &str, part: Option<&str>, municipalities: &[&str]) -> AffectedArea {
        AffectedArea::partial(
            province,
            AreaIncludes {
                term: term.to_string(),
                part: part.map(String::from),
                municipalities: if municipalities.is_empty() {
                    None
                } else {
                    Some(municipalities.iter().map(|m| m.to_string()).collect())
                },
            },
        )
    }

    fn known_provinces() -> ProvinceSet {
        ["Quezon", "Cagayan", "Samar", "Aurora", "Isabela"].into_iter().collect()
    }

    #[test]
    fn test_region_header_variants() {
        assert_eq!(
            region_header(Some(&region("Caraga", Some("Caraga (administrative region)"), None))),
            "* '''[[Caraga (administrative region)|Caraga]]''' \n"
        );
        assert_eq!(
            region_header(Some(&region(
                "Bangsamoro",
                Some("Bangsamoro Autonomous Region in Muslim Mindanao"),
                Some("BARMM")
            ))),
            "* '''[[Bangsamoro Autonomous Region in Muslim Mindanao|Bangsamoro]]''' {{small|(BARMM)}}\n"
        );
    }

    #[test]
    fn test_whole_province_bullet() {
        let provinces = known_provinces();
        let mut ctx = RunContext::new(&provinces);
        assert_eq!(
            area_bullet(&AffectedArea::whole("Aurora"), Bullet::Nested, &mut ctx),
            "** [[Aurora]]\n"
        );
        assert_eq!(
            area_bullet(&AffectedArea::whole("Aurora"), Bullet::TopLevel, &mut ctx),
            "* [[Aurora]]\n"
        );
    }

    #[test]
    fn test_mainland_bullet() {
        let provinces = known_provinces();
        let mut ctx = RunContext::new(&provinces);
        let area = partial("Quezon", "Mainland", None, &[]);
        assert_eq!(
            area_bullet(&area, Bullet::Nested, &mut ctx),
            "** Mainland [[Quezon]]\n"
        );
    }

    #[test]
    fn test_rest_bullet() {
        let provinces = known_provinces();
        let mut ctx = RunContext::new(&provinces);
        let area = partial("Isabela", "rest", None, &["Ilagan"]);
        assert_eq!(
            area_bullet(&area, Bullet::Nested, &mut ctx),
            "** rest of [[Isabela]]\n"
        );
    }

    #[test]
    fn test_portion_bullet_with_municipalities() {
        let provinces = known_provinces();
        let mut ctx = RunContext::new(&provinces);
        let area = partial("Cagayan", "portion", Some("northern"), &["Sta. Ana", "Gonzaga"]);
        assert_eq!(
            area_bullet(&area, Bullet::Nested, &mut ctx),
            "** northern portion of [[Cagayan]] {{small|([[Santa Ana, Cagayan|Sta. Ana]], [[Gonzaga, Cagayan|Gonzaga]])}}\n"
        );
    }

    #[test]
    fn test_portion_bullet_without_municipalities() {
        let provinces = known_provinces();
        let mut ctx = RunContext::new(&provinces);
        let area = partial("Samar", "portion", Some("western"), &[]);
        assert_eq!(
            area_bullet(&area, Bullet::Nested, &mut ctx),
            "** western portion of [[Samar]]\n"
        );
    }

    #[test]
    fn test_portion_bullet_without_part() {
        let provinces = known_provinces();
        let mut ctx = RunContext::new(&provinces);
        let area = partial("Samar", "portion", None, &[]);
        assert_eq!(
            area_bullet(&area, Bullet::Nested, &mut ctx),
            "** portion of [[Samar]]\n"
        );
    }

    #[test]
    fn test_partial_flag_without_includes_renders_whole_province() {
        let provinces = known_provinces();
        let mut ctx = RunContext::new(&provinces);
        let area = AffectedArea {
            province: "Samar".to_string(),
            part: Some(true),
            includes: None,
        };
        assert_eq!(area_bullet(&area, Bullet::Nested, &mut ctx), "** [[Samar]]\n");
    }

    #[test]
    fn test_render_signal_unclassified_before_regions() {
        let provinces = known_provinces();
        let mut ctx = RunContext::new(&provinces);
        let regions = RegionTable::new(vec![
            region("Cagayan Valley", None, Some("Region II")),
            region("Central Luzon", None, Some("Region III")),
        ])
        .unwrap();

        let mut classified = ClassifiedAreas::default();
        classified.push_region(1, AffectedArea::whole("Aurora"));
        classified.push_region(0, AffectedArea::whole("Cagayan"));
        classified.push_unclassified(AffectedArea::whole("Babuyan Islands"));

        assert_eq!(
            render_signal(&classified, &regions, &mut ctx),
            "\n\n* [[Babuyan Islands]]\n\
             * '''[[Cagayan Valley]]''' {{small|(Region II)}}\n\
             ** [[Cagayan]]\n\
             * '''[[Central Luzon]]''' {{small|(Region III)}}\n\
             ** [[Aurora]]\n"
        );
        assert!(ctx.issues().is_empty());
    }

    #[test]
    fn test_render_signal_continues_after_missing_page() {
        let provinces = known_provinces();
        let mut ctx = RunContext::new(&provinces);
        let regions = RegionTable::new(vec![region("Soccsksargen", None, None)]).unwrap();

        let mut classified = ClassifiedAreas::default();
        classified.push_region(0, AffectedArea::whole("Cotabato"));
        classified.push_region(0, AffectedArea::whole("Aurora"));

        assert_eq!(
            render_signal(&classified, &regions, &mut ctx),
            "\n* '''[[Soccsksargen]]''' \n** Cotabato\n** [[Aurora]]\n"
        );
        assert_eq!(
            ctx.issues(),
            &[Issue::PageNotFound {
                province: "Cotabato".to_string()
            }]
        );
    }

    #[test]
    fn test_render_signals_fills_missing_levels() {
        let provinces = known_provinces();
        let mut ctx = RunContext::new(&provinces);
        let regions = RegionTable::new(vec![region("Central Luzon", None, None)]).unwrap();

        let mut classified = ClassifiedAreas::default();
        classified.push_region(0, AffectedArea::whole("Aurora"));
        let mut signals = SignalMap::new();
        signals.insert(SignalLevel::new(2).unwrap(), classified);

        let rendered = render_signals(&signals, &regions, &mut ctx);

        assert_eq!(rendered.len(), 5);
        assert_eq!(rendered[&SignalLevel::new(1).unwrap()], "");
        assert_eq!(
            rendered[&SignalLevel::new(2).unwrap()],
            "\n* '''[[Central Luzon]]''' \n** [[Aurora]]\n"
        );
    }
}
