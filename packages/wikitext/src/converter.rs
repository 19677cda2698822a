//! Main conversion service that ties all components together.

use crate::bulletin::{BulletinSource, HttpBulletinSource};
use crate::classify::classify_signals;
use crate::config::{ClientConfig, NO_ACTIVE_TYPHOON_TEMPLATE};
use crate::context::{Issue, ProvinceSet, RunContext};
use crate::error::{Result, WikitextError};
use crate::http::create_client;
use crate::regions::RegionTable;
use crate::types::{Bulletin, ParsedTemplate, RenderResult};
use crate::wikipedia::{PreviewRenderer, ProvinceDirectory, WikipediaClient};
use crate::wikitext::{parse_issued_timestamp, render_signals, warning_signals_template};

/// Result returned for a bulletin without an active cyclone.
#[must_use]
pub fn no_active_typhoon_result() -> RenderResult {
    RenderResult {
        issues: vec![Issue::NoActiveTyphoon],
        template: NO_ACTIVE_TYPHOON_TEMPLATE.to_string(),
    }
}

/// Convert a bulletin to the warning signals table, offline.
///
/// All levels are classified before any is rendered, so region issues come
/// before page issues in the result.
///
/// # Arguments
/// * `bulletin` - The bulletin to convert
/// * `regions` - Region reference table
/// * `provinces` - Province article titles used for link decisions
///
/// # Returns
/// The template and the issues collected while building it
pub fn render_bulletin(
    bulletin: &Bulletin,
    regions: &RegionTable,
    provinces: &ProvinceSet,
) -> Result<RenderResult> {
    if !bulletin.has_active_typhoon() {
        return Ok(no_active_typhoon_result());
    }

    let issued = parse_issued_timestamp(bulletin.issued_timestamp()?)?;

    let mut ctx = RunContext::new(provinces);
    let classified = classify_signals(bulletin, regions, &mut ctx);
    let rendered = render_signals(&classified, regions, &mut ctx);
    let template = warning_signals_template(&issued, &rendered);

    Ok(RenderResult {
        issues: ctx.into_issues(),
        template,
    })
}

/// Converter wired to its collaborators.
///
/// Every call is an independent run: the province list is fetched anew
/// and issues from one call never appear in another.
pub struct WarningSignalsConverter {
    regions: RegionTable,
    provinces: Box<dyn ProvinceDirectory>,
    bulletins: Option<Box<dyn BulletinSource>>,
    preview: Option<Box<dyn PreviewRenderer>>,
}

impl WarningSignalsConverter {
    /// Create a converter without a bulletin source or preview renderer.
    pub fn new(regions: RegionTable, provinces: impl ProvinceDirectory + 'static) -> Self {
        Self {
            regions,
            provinces: Box::new(provinces),
            bulletins: None,
            preview: None,
        }
    }

    /// Converter using the bundled region table and Wikipedia, plus the
    /// scraper endpoint when `config` names one.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let http = create_client(config)?;
        let mut converter = Self::new(
            RegionTable::bundled()?,
            WikipediaClient::with_client(http.clone(), &config.api_url),
        )
        .with_preview_renderer(WikipediaClient::with_client(http.clone(), &config.api_url));

        if let Some(url) = config.bulletin_url.as_deref() {
            converter = converter.with_bulletin_source(HttpBulletinSource::new(http, url));
        }
        Ok(converter)
    }

    /// Source used when no bulletin is passed in.
    #[must_use]
    pub fn with_bulletin_source(mut self, source: impl BulletinSource + 'static) -> Self {
        self.bulletins = Some(Box::new(source));
        self
    }

    /// Renderer used by [`Self::parsed_warning_signals_template`].
    #[must_use]
    pub fn with_preview_renderer(mut self, renderer: impl PreviewRenderer + 'static) -> Self {
        self.preview = Some(Box::new(renderer));
        self
    }

    #[must_use]
    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// Build the warning signals table.
    ///
    /// Without a `bulletin`, the latest one is pulled from the bulletin
    /// source. The province list is only fetched when a cyclone is active.
    pub fn warning_signals_template(&self, bulletin: Option<Bulletin>) -> Result<RenderResult> {
        let bulletin = match bulletin {
            Some(bulletin) => bulletin,
            None => self.pull_bulletin()?,
        };

        if !bulletin.has_active_typhoon() {
            tracing::info!("No active typhoon in bulletin");
            return Ok(no_active_typhoon_result());
        }

        let provinces = self.provinces.fetch_provinces()?;
        let result = render_bulletin(&bulletin, &self.regions, &provinces)?;
        tracing::info!(issues = result.issues.len(), "Generated warning signals template");
        Ok(result)
    }

    /// Build the warning signals table from bulletin JSON text.
    pub fn warning_signals_template_from_json(&self, json: &str) -> Result<RenderResult> {
        self.warning_signals_template(Some(Bulletin::from_json(json)?))
    }

    /// Build the table and render it to HTML through the preview renderer.
    pub fn parsed_warning_signals_template(
        &self,
        bulletin: Option<Bulletin>,
    ) -> Result<ParsedTemplate> {
        let renderer = self.preview.as_deref().ok_or_else(|| {
            WikitextError::Config("no preview renderer configured".to_string())
        })?;

        let template = self.warning_signals_template(bulletin)?;
        let parsed = renderer.parse_wikitext(&template.template)?;

        Ok(ParsedTemplate { template, parsed })
    }

    fn pull_bulletin(&self) -> Result<Bulletin> {
        let source = self.bulletins.as_deref().ok_or_else(|| {
            WikitextError::Config("no bulletin given and no bulletin source configured".to_string())
        })?;
        source.pull_bulletin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts how often the province list is requested.
    struct CountingDirectory {
        provinces: ProvinceSet,
        calls: Rc<Cell<usize>>,
    }

    impl ProvinceDirectory for CountingDirectory {
        fn fetch_provinces(&self) -> Result<ProvinceSet> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.provinces.clone())
        }
    }

    struct EchoRenderer;

    impl PreviewRenderer for EchoRenderer {
        fn parse_wikitext(&self, wikitext: &str) -> Result<String> {
            Ok(format!("<p>{wikitext}</p>"))
        }
    }

    struct BrokenRenderer;

    impl PreviewRenderer for BrokenRenderer {
        fn parse_wikitext(&self, _wikitext: &str) -> Result<String> {
            Err(WikitextError::UnexpectedResponse(
                "Response from Wikipedia cannot be processed.".to_string(),
            ))
        }
    }

    fn active_bulletin() -> Bulletin {
        Bulletin::from_json(
            r#"{
                "typhoon": {"name": "Quinta"},
                "bulletin": {"issued_timestamp": "2020-10-25T21:00:00Z"},
                "storm_signals": {
                    "2": {"affected_areas": {"luzon": [{"province": "Marinduque"}]}}
                }
            }"#,
        )
        .unwrap()
    }

    fn converter(calls: &Rc<Cell<usize>>) -> WarningSignalsConverter {
        WarningSignalsConverter::new(
            RegionTable::bundled().unwrap(),
            CountingDirectory {
                provinces: ["Marinduque"].into_iter().collect(),
                calls: Rc::clone(calls),
            },
        )
    }

    #[test]
    fn test_no_active_typhoon_skips_province_fetch() {
        let calls = Rc::new(Cell::new(0));
        let result = converter(&calls)
            .warning_signals_template_from_json(r#"{"typhoon": null}"#)
            .unwrap();

        assert_eq!(result, no_active_typhoon_result());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_active_bulletin_fetches_provinces_once_per_run() {
        let calls = Rc::new(Cell::new(0));
        let converter = converter(&calls);

        let first = converter.warning_signals_template(Some(active_bulletin())).unwrap();
        let second = converter.warning_signals_template(Some(active_bulletin())).unwrap();

        assert_eq!(calls.get(), 2);
        assert_eq!(first, second);
        assert!(first.template.contains("| PH2 = * '''[[Mimaropa]]''' {{small|(Region IV-B)}}\n** [[Marinduque]]\n"));
    }

    #[test]
    fn test_missing_bulletin_source() {
        let calls = Rc::new(Cell::new(0));
        let result = converter(&calls).warning_signals_template(None);
        assert!(matches!(result, Err(WikitextError::Config(_))));
    }

    #[test]
    fn test_bulletin_source_used_when_none_given() {
        let calls = Rc::new(Cell::new(0));
        let result = converter(&calls)
            .with_bulletin_source(active_bulletin())
            .warning_signals_template(None)
            .unwrap();
        assert!(result.template.contains("[[Marinduque]]"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_parsed_template() {
        let calls = Rc::new(Cell::new(0));
        let parsed = converter(&calls)
            .with_preview_renderer(EchoRenderer)
            .parsed_warning_signals_template(Some(active_bulletin()))
            .unwrap();

        assert_eq!(parsed.parsed, format!("<p>{}</p>", parsed.template.template));
    }

    #[test]
    fn test_parsed_template_failure_is_fatal() {
        let calls = Rc::new(Cell::new(0));
        let result = converter(&calls)
            .with_preview_renderer(BrokenRenderer)
            .parsed_warning_signals_template(Some(active_bulletin()));
        assert!(matches!(result, Err(WikitextError::UnexpectedResponse(_))));
    }

    #[test]
    fn test_invalid_timestamp_is_fatal() {
        let mut bulletin = active_bulletin();
        if let Some(info) = bulletin.bulletin.as_mut() {
            info.issued_timestamp = Some("soon".to_string());
        }
        let result = render_bulletin(&bulletin, &RegionTable::bundled().unwrap(), &ProvinceSet::new());
        assert!(matches!(result, Err(WikitextError::InvalidTimestamp(_))));
    }
}
