//! Assembly of the `{{TyphoonWarningsTable}}` template.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

use crate::config::{PHT_OFFSET_SECS, SOURCE_LINK, TEMPLATE_NAME};
use crate::error::{Result, WikitextError};
use crate::types::SignalLevel;

/// Offset-less formats accepted for issue timestamps (read as UTC).
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a bulletin issue timestamp.
///
/// Accepts RFC 3339 timestamps, and ISO 8601 timestamps without an offset,
/// which are taken to be UTC.
///
/// # Examples
/// ```
/// use pagasa_wikitext::wikitext::parse_issued_timestamp;
///
/// let issued = parse_issued_timestamp("2020-11-01T05:00:00+08:00").unwrap();
/// assert_eq!(issued.to_rfc3339(), "2020-10-31T21:00:00+00:00");
/// assert!(parse_issued_timestamp("last Tuesday").is_err());
/// ```
pub fn parse_issued_timestamp(timestamp: &str) -> Result<DateTime<Utc>> {
    let trimmed = timestamp.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| WikitextError::InvalidTimestamp(timestamp.to_string()))
}

/// Issue time in UTC and Philippine Standard Time, as shown in `PHtime`.
///
/// # Examples
/// ```
/// use pagasa_wikitext::wikitext::{format_issue_time, parse_issued_timestamp};
///
/// let issued = parse_issued_timestamp("2020-11-01T21:30:00Z").unwrap();
/// assert_eq!(
///     format_issue_time(&issued),
///     "21:30 UTC (05:30 [[Philippine Standard Time|PHT]])"
/// );
/// ```
#[must_use]
pub fn format_issue_time(issued: &DateTime<Utc>) -> String {
    let local = *issued + TimeDelta::seconds(i64::from(PHT_OFFSET_SECS));
    format!(
        "{} UTC ({} [[Philippine Standard Time|PHT]])",
        issued.format("%H:%M"),
        local.format("%H:%M")
    )
}

/// Build the warning signals table.
///
/// Each `PH<n>` field holds the trimmed text of that level; levels missing
/// from `signals` are left empty.
#[must_use]
pub fn warning_signals_template(
    issued: &DateTime<Utc>,
    signals: &BTreeMap<SignalLevel, String>,
) -> String {
    let mut out = format!("{{{{{TEMPLATE_NAME}\n");
    out.push_str(&format!("| PHtime = {}\n", format_issue_time(issued)));

    for level in SignalLevel::table_order() {
        let text = signals.get(&level).map(|s| s.trim()).unwrap_or_default();
        out.push_str(&format!("| PH{level} = {text}\n"));
    }

    out.push_str(&format!("| PHsource = {SOURCE_LINK}\n"));
    out.push_str("}}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let issued = parse_issued_timestamp("2020-11-01T11:00:00+08:00").unwrap();
        assert_eq!(issued.format("%Y-%m-%d %H:%M").to_string(), "2020-11-01 03:00");
    }

    #[test]
    fn test_parse_naive_is_utc() {
        let issued = parse_issued_timestamp("2020-11-01T03:00:00.000").unwrap();
        assert_eq!(issued.format("%H:%M").to_string(), "03:00");

        let spaced = parse_issued_timestamp("2020-11-01 03:00:00").unwrap();
        assert_eq!(spaced, issued);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            parse_issued_timestamp("2020-13-01T00:00:00Z"),
            Err(WikitextError::InvalidTimestamp(_))
        ));
        assert!(parse_issued_timestamp("").is_err());
    }

    #[test]
    fn test_format_issue_time_crosses_midnight() {
        let issued = parse_issued_timestamp("2020-11-01T18:05:00Z").unwrap();
        assert_eq!(
            format_issue_time(&issued),
            "18:05 UTC (02:05 [[Philippine Standard Time|PHT]])"
        );
    }

    #[test]
    fn test_template_layout() {
        let issued = parse_issued_timestamp("2020-11-01T03:00:00Z").unwrap();
        let mut signals = BTreeMap::new();
        signals.insert(SignalLevel::new(4).unwrap(), "\n\n* [[Catanduanes]]\n".to_string());
        signals.insert(SignalLevel::new(1).unwrap(), String::new());

        assert_eq!(
            warning_signals_template(&issued, &signals),
            "{{TyphoonWarningsTable\n\
             | PHtime = 03:00 UTC (11:00 [[Philippine Standard Time|PHT]])\n\
             | PH5 = \n\
             | PH4 = * [[Catanduanes]]\n\
             | PH3 = \n\
             | PH2 = \n\
             | PH1 = \n\
             | PHsource = [http://bagong.pagasa.dost.gov.ph/tropical-cyclone/severe-weather-bulletin/2 PAGASA]\n\
             }}"
        );
    }
}
