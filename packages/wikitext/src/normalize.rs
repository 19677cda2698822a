//! Municipality name normalization for wiki links.
//!
//! Bulletins spell municipalities the way PAGASA writes them, which often
//! differs from the article title ("Sta. Ana" vs "Santa Ana", misspellings).
//! The link target is rewritten by an ordered list of steps and then
//! overridden by the alias table; the displayed text stays as written.

use std::sync::LazyLock;

use regex::Regex;

/// Known bulletin misspellings and their article names.
pub const MUNICIPALITY_ALIASES: &[(&str, &str)] = &[
    ("Albuena", "Albuera"),
    ("San Jose Del Monte", "San Jose del Monte"),
    ("Dinapugue", "Dinapigue"),
    ("Macallelon", "Macalelon"),
    ("Tagkayawan", "Tagkawayan"),
];

/// Leading compass-direction adjective followed by whitespace.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DIRECTIONAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[Ee]ast|[Nn]orth|[Ss]outh|[Ww]est)ern\s").expect("valid regex")
});

/// A single rewrite applied to a municipality name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteStep {
    /// "Sta." becomes "Santa".
    SantaAbbreviation,
    /// "Sto." becomes "Santo".
    SantoAbbreviation,
    /// "Northern ", "eastern ", etc. is stripped from the start.
    DirectionalPrefix,
}

impl RewriteStep {
    /// Steps in application order. Order matters.
    pub const PIPELINE: [RewriteStep; 3] = [
        Self::SantaAbbreviation,
        Self::SantoAbbreviation,
        Self::DirectionalPrefix,
    ];

    /// Apply this step to a name.
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::SantaAbbreviation => name.replace("Sta.", "Santa"),
            Self::SantoAbbreviation => name.replace("Sto.", "Santo"),
            Self::DirectionalPrefix => DIRECTIONAL_PREFIX.replace(name, "").into_owned(),
        }
    }
}

/// Article name for a misspelled municipality, if it is a known alias.
#[must_use]
pub fn alias_for(raw: &str) -> Option<&'static str> {
    MUNICIPALITY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == raw)
        .map(|(_, name)| *name)
}

/// Link target for a municipality as written in a bulletin.
///
/// # Examples
/// ```
/// use pagasa_wikitext::normalize::municipality_target;
///
/// assert_eq!(municipality_target("Sta. Ana"), "Santa Ana");
/// assert_eq!(municipality_target("Albuena"), "Albuera");
/// ```
#[must_use]
pub fn municipality_target(raw: &str) -> String {
    if let Some(name) = alias_for(raw) {
        return name.to_string();
    }

    RewriteStep::PIPELINE
        .iter()
        .fold(raw.to_string(), |name, step| step.apply(&name))
}

/// Wiki link to a municipality article, titled "<municipality>, <province>",
/// showing the name as written in the bulletin.
///
/// # Examples
/// ```
/// use pagasa_wikitext::normalize::municipality_link;
///
/// assert_eq!(
///     municipality_link("Sta. Ana", "Cagayan"),
///     "[[Santa Ana, Cagayan|Sta. Ana]]"
/// );
/// ```
#[must_use]
pub fn municipality_link(raw: &str, province: &str) -> String {
    format!("[[{}, {province}|{raw}]]", municipality_target(raw))
}
