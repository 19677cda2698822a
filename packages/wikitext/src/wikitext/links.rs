//! Province and municipality links.

use crate::context::{Issue, RunContext};
use crate::normalize::municipality_link;
use crate::regions::is_island_name;
use crate::types::AreaIncludes;

/// Province that is linked even though it is not in the province category.
const METRO_MANILA: &str = "Metro Manila";

/// Link to a province article.
///
/// Provinces in the category, Metro Manila and island groups are linked
/// directly. Otherwise the disambiguated "<province> (province)" title is
/// tried. If neither exists, the name is returned unlinked and the miss is
/// recorded as an issue.
pub fn province_link(province: &str, ctx: &mut RunContext<'_>) -> String {
    if ctx.provinces().contains(province) || province == METRO_MANILA || is_island_name(province) {
        return format!("[[{province}]]");
    }

    let qualified = format!("{province} (province)");
    if ctx.provinces().contains(&qualified) {
        return format!("[[{qualified}|{province}]]");
    }

    ctx.record(Issue::PageNotFound {
        province: province.to_string(),
    });
    province.to_string()
}

/// Parenthetical list of municipality links in small text, with a leading
/// space. Empty when no municipalities are listed.
#[must_use]
pub fn municipality_list(includes: &AreaIncludes, province: &str) -> String {
    match includes.municipalities.as_deref() {
        Some(municipalities) if !municipalities.is_empty() => {
            let links: Vec<String> = municipalities
                .iter()
                .map(|m| municipality_link(m, province))
                .collect();
            format!(" {{{{small|({})}}}}", links.join(", "))
        }
        _ => String::new(),
    }
}
