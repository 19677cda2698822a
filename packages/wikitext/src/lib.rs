//! PAGASA Wikitext - Convert PAGASA severe weather bulletins into Wikipedia
//! tropical cyclone warning signal tables.
//!
//! This crate takes a bulletin produced by the PAGASA bulletin scraper,
//! groups the affected provinces by region and renders a
//! `{{TyphoonWarningsTable}}` template ready to paste into an article.
//!
//! # Example
//!
//! ```
//! use pagasa_wikitext::{render_bulletin, Bulletin, ProvinceSet, RegionTable};
//!
//! let bulletin = Bulletin::from_json(r#"{
//!     "typhoon": {"name": "Rolly"},
//!     "bulletin": {"issued_timestamp": "2020-11-01T03:00:00Z"},
//!     "storm_signals": {
//!         "4": {"affected_areas": {"luzon": [{"province": "Catanduanes"}]}}
//!     }
//! }"#).unwrap();
//! let provinces: ProvinceSet = ["Catanduanes"].into_iter().collect();
//!
//! let result = render_bulletin(&bulletin, &RegionTable::bundled().unwrap(), &provinces).unwrap();
//! assert!(result.template.contains("| PH4 = * '''[[Bicol Region]]'''"));
//! assert!(result.issues.is_empty());
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and client settings
//! - [`types`]: Bulletin and result data types
//! - [`error`]: Error types and Result alias
//! - [`context`]: Per-run issue log and province set
//! - [`regions`]: Region reference table
//! - [`classify`]: Grouping of affected areas by region
//! - [`normalize`]: Municipality name normalization
//! - [`wikitext`]: Wikitext generation
//! - [`http`]: HTTP client for the remote collaborators
//! - [`wikipedia`]: MediaWiki API client
//! - [`bulletin`]: Bulletin sources
//! - [`converter`]: Main conversion service

pub mod bulletin;
pub mod classify;
pub mod config;
pub mod context;
pub mod converter;
pub mod error;
pub mod http;
pub mod normalize;
pub mod regions;
pub mod types;
pub mod wikipedia;
pub mod wikitext;

// Re-export main functions
pub use converter::{render_bulletin, WarningSignalsConverter};

// Re-export commonly used items
pub use config::ClientConfig;
pub use context::{Issue, ProvinceSet, RunContext};
pub use error::{Result, WikitextError};
pub use regions::{Region, RegionTable};
pub use types::{AffectedArea, AreaIncludes, Bulletin, ClassifiedAreas, ParsedTemplate, RenderResult, SignalLevel};
