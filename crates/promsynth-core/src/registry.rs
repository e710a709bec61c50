//! Instrument registry.
//!
//! Owns four ordered collections (one per kind) behind one coarse
//! `RwLock`: scheduler ticks take the write lock, snapshots and renders take
//! the read lock, so a reader never observes a half-applied tick.
//! Instruments are only ever appended.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;
use rand::Rng;

use crate::error::{Result, SynthError};
use crate::expo;
use crate::instrument::{Counter, Gauge, Histogram, Summary};
use crate::kind::MetricKind;
use crate::naming::{InstrumentDesc, Naming};
use crate::sample::{increment, Burst};
use crate::snapshot::{self, ExportedRow};

/// Outcome of one update pass over a kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub instruments: usize,
    pub observations: usize,
}

#[derive(Default)]
struct Collections {
    counters: Vec<Counter>,
    gauges: Vec<Gauge>,
    histograms: Vec<Histogram>,
    summaries: Vec<Summary>,
    names: HashSet<String>,
    /// Last update per kind, indexed by `slot`.
    updated_at: [f64; 4],
}

fn slot(kind: MetricKind) -> usize {
    match kind {
        MetricKind::Counter => 0,
        MetricKind::Gauge => 1,
        MetricKind::Histogram => 2,
        MetricKind::Summary => 3,
    }
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

pub struct Registry {
    inner: RwLock<Collections>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        let now = unix_now();
        Self {
            inner: RwLock::new(Collections {
                updated_at: [now; 4],
                ..Collections::default()
            }),
        }
    }

    /// Create `count` instruments of `kind` and append them in name order.
    ///
    /// The batch is all-or-nothing: a negative count, an invalid name or a
    /// name already present leaves the registry untouched.
    pub fn create_instruments(
        &self,
        kind: MetricKind,
        count: i64,
        naming: &Naming,
    ) -> Result<Vec<InstrumentDesc>> {
        let count = usize::try_from(count).map_err(|_| SynthError::NegativeCount(count))?;
        let descs = naming.describe(kind, count)?;

        let mut inner = self.inner.write();
        for d in &descs {
            if inner.names.contains(&d.name) {
                return Err(SynthError::DuplicateInstrument(d.name.clone()));
            }
        }

        for d in &descs {
            inner.names.insert(d.name.clone());
            match kind {
                MetricKind::Counter => inner.counters.push(Counter::new(d.clone())),
                MetricKind::Gauge => inner.gauges.push(Gauge::new(d.clone())),
                MetricKind::Histogram => inner.histograms.push(Histogram::new(d.clone())),
                MetricKind::Summary => inner.summaries.push(Summary::new(d.clone())),
            }
        }

        tracing::debug!(%kind, count, "instruments registered");
        Ok(descs)
    }

    pub fn len(&self, kind: MetricKind) -> usize {
        let inner = self.inner.read();
        match kind {
            MetricKind::Counter => inner.counters.len(),
            MetricKind::Gauge => inner.gauges.len(),
            MetricKind::Histogram => inner.histograms.len(),
            MetricKind::Summary => inner.summaries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().names.is_empty()
    }

    /// Descriptors of one kind, in insertion order.
    pub fn descs(&self, kind: MetricKind) -> Vec<InstrumentDesc> {
        let inner = self.inner.read();
        match kind {
            MetricKind::Counter => inner.counters.iter().map(|c| c.desc().clone()).collect(),
            MetricKind::Gauge => inner.gauges.iter().map(|g| g.desc().clone()).collect(),
            MetricKind::Histogram => inner.histograms.iter().map(|h| h.desc().clone()).collect(),
            MetricKind::Summary => inner.summaries.iter().map(|s| s.desc().clone()).collect(),
        }
    }

    /// Apply one tick to every instrument of `kind`.
    pub fn update<R: Rng + ?Sized>(&self, kind: MetricKind, rng: &mut R) -> TickReport {
        let mut inner = self.inner.write();
        let mut report = TickReport::default();

        match kind {
            MetricKind::Counter => {
                for c in inner.counters.iter_mut() {
                    c.add(increment(rng));
                    report.instruments += 1;
                }
            }
            MetricKind::Gauge => {
                // Always upward, like the counters.
                for g in inner.gauges.iter_mut() {
                    g.add(increment(rng));
                    report.instruments += 1;
                }
            }
            MetricKind::Histogram => {
                for h in inner.histograms.iter_mut() {
                    let burst = Burst::draw(rng);
                    for v in burst.observations() {
                        h.observe(v);
                        report.observations += 1;
                    }
                    report.instruments += 1;
                }
            }
            MetricKind::Summary => {
                for s in inner.summaries.iter_mut() {
                    let burst = Burst::draw(rng);
                    for v in burst.observations() {
                        s.observe(v);
                        report.observations += 1;
                    }
                    report.instruments += 1;
                }
            }
        }

        inner.updated_at[slot(kind)] = unix_now();
        report
    }

    /// Exported rows for every instrument, grouped by kind in registry order.
    pub fn snapshot(&self) -> Vec<ExportedRow> {
        let inner = self.inner.read();
        let ts = inner.updated_at;
        let mut out = Vec::new();

        for c in &inner.counters {
            snapshot::counter_rows(c, ts[slot(MetricKind::Counter)], &mut out);
        }
        for g in &inner.gauges {
            snapshot::gauge_rows(g, ts[slot(MetricKind::Gauge)], &mut out);
        }
        for h in &inner.histograms {
            snapshot::histogram_rows(h, ts[slot(MetricKind::Histogram)], &mut out);
        }
        for s in &inner.summaries {
            snapshot::summary_rows(s, ts[slot(MetricKind::Summary)], &mut out);
        }
        out
    }

    /// Full registry in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let inner = self.inner.read();
        let mut out = String::new();

        for c in &inner.counters {
            expo::render_counter(c, &mut out);
        }
        for g in &inner.gauges {
            expo::render_gauge(g, &mut out);
        }
        for h in &inner.histograms {
            expo::render_histogram(h, &mut out);
        }
        for s in &inner.summaries {
            expo::render_summary(s, &mut out);
        }
        out
    }
}
