//! Exported-row view of instrument state.
//!
//! Rows are shaped the way a scraper sees samples: histograms expand into
//! `_bucket` rows (labelled `le`) plus `_count` and `_sum`, summaries into
//! quantile rows (labelled `quantile`) plus `_count` and `_sum`.

use serde::Serialize;

use crate::instrument::{format_bound, Counter, Gauge, Histogram, Summary};
use crate::naming::Labels;

/// One exported sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedRow {
    /// Sample name, kind suffix included.
    pub name: String,
    pub labels: Labels,
    /// Unix seconds of the last update of the instrument's kind.
    pub timestamp: f64,
    pub value: f64,
}

impl ExportedRow {
    fn new(name: impl Into<String>, labels: Labels, timestamp: f64, value: f64) -> Self {
        Self { name: name.into(), labels, timestamp, value }
    }
}

pub(crate) fn counter_rows(c: &Counter, ts: f64, out: &mut Vec<ExportedRow>) {
    let d = c.desc();
    out.push(ExportedRow::new(d.name.clone(), d.labels.clone(), ts, c.value()));
}

pub(crate) fn gauge_rows(g: &Gauge, ts: f64, out: &mut Vec<ExportedRow>) {
    let d = g.desc();
    out.push(ExportedRow::new(d.name.clone(), d.labels.clone(), ts, g.value()));
}

pub(crate) fn histogram_rows(h: &Histogram, ts: f64, out: &mut Vec<ExportedRow>) {
    let d = h.desc();
    for (le, count) in h.buckets() {
        let mut labels = d.labels.clone();
        labels.insert("le".into(), format_bound(le));
        out.push(ExportedRow::new(format!("{}_bucket", d.name), labels, ts, count as f64));
    }
    out.push(ExportedRow::new(format!("{}_count", d.name), d.labels.clone(), ts, h.count() as f64));
    out.push(ExportedRow::new(format!("{}_sum", d.name), d.labels.clone(), ts, h.sum()));
}

pub(crate) fn summary_rows(s: &Summary, ts: f64, out: &mut Vec<ExportedRow>) {
    let d = s.desc();
    for (q, estimate) in s.quantiles() {
        let mut labels = d.labels.clone();
        labels.insert("quantile".into(), format_bound(q));
        out.push(ExportedRow::new(d.name.clone(), labels, ts, estimate));
    }
    out.push(ExportedRow::new(format!("{}_count", d.name), d.labels.clone(), ts, s.count() as f64));
    out.push(ExportedRow::new(format!("{}_sum", d.name), d.labels.clone(), ts, s.sum()));
}
