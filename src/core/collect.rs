//! "collect" mode: calendar events → review rows.

use crate::catalog::TemplateCatalog;
use crate::core::matcher::Matcher;
use crate::core::synth::synthesize;
use crate::export::ShiftRow;
use crate::models::RawEvent;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectSummary {
    pub events: usize,
    /// Events that fell back to the `default` template.
    pub fallbacks: usize,
    pub shifts: usize,
    /// Need specs that produced no shift (non-positive duration).
    pub skipped: usize,
    /// Shifts with an empty need id, left for the reviewer to fill in.
    pub unmapped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub rows: Vec<ShiftRow>,
    pub summary: CollectSummary,
}

/// Match and synthesize every event against one calendar's catalog.
pub fn collect(events: &[RawEvent], catalog: &TemplateCatalog, threshold: u8) -> Collected {
    let matcher = Matcher::new(catalog, threshold);
    let mut out = Collected::default();

    for event in events {
        out.summary.events += 1;

        let matched = matcher.match_title(&event.title);
        if matched.fallback {
            out.summary.fallbacks += 1;
        }
        debug!(
            title = %event.title,
            keyword = matched.keyword,
            score = matched.score,
            "event matched"
        );

        let before = out.rows.len();
        for record in synthesize(event, matched.template) {
            if record.is_unmapped() {
                out.summary.unmapped += 1;
            }
            out.rows.push(ShiftRow::from_record(&event.title, &record));
        }

        let produced = out.rows.len() - before;
        out.summary.shifts += produced;
        out.summary.skipped += matched.template.need_ids.len() - produced;
    }

    out
}
