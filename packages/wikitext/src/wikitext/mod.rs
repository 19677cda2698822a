//! Wikitext generation for classified bulletin areas.

mod links;
mod render;
mod template;

pub use links::{municipality_list, province_link};
pub use render::{area_bullet, region_header, render_group, render_signal, render_signals, Bullet};
pub use template::{format_issue_time, parse_issued_timestamp, warning_signals_template};
