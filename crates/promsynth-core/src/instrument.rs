//! Synthetic instruments.
//!
//! Plain data types; synchronization lives in the registry, which guards
//! all of them with a single lock.

use quantiles::ckms::CKMS;

use crate::naming::InstrumentDesc;

/// Starting value of every counter.
pub const COUNTER_SEED: f64 = 0.0;
/// Starting value of every gauge.
pub const GAUGE_SEED: f64 = 0.0;

/// Fixed histogram upper bounds (`+Inf` is implicit).
pub const HISTOGRAM_BUCKETS: [f64; 3] = [0.005, 0.1, 1.0];
/// Fixed summary targets.
pub const SUMMARY_QUANTILES: [f64; 3] = [0.1, 0.5, 0.99];
/// Rank error tolerated by the summary estimator.
pub const SUMMARY_ERROR: f64 = 0.001;

#[derive(Debug, Clone)]
pub struct Counter {
    desc: InstrumentDesc,
    value: f64,
}

impl Counter {
    pub fn new(desc: InstrumentDesc) -> Self {
        Self { desc, value: COUNTER_SEED }
    }

    pub fn desc(&self) -> &InstrumentDesc {
        &self.desc
    }

    /// Add a nonnegative delta. Negative or NaN deltas are ignored.
    pub fn add(&mut self, v: f64) {
        if v >= 0.0 && v.is_finite() {
            self.value += v;
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

#[derive(Debug, Clone)]
pub struct Gauge {
    desc: InstrumentDesc,
    value: f64,
}

impl Gauge {
    pub fn new(desc: InstrumentDesc) -> Self {
        Self { desc, value: GAUGE_SEED }
    }

    pub fn desc(&self) -> &InstrumentDesc {
        &self.desc
    }

    /// Add a signed delta. Non-finite deltas are ignored.
    pub fn add(&mut self, v: f64) {
        if v.is_finite() {
            self.value += v;
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

#[derive(Debug, Clone)]
pub struct Histogram {
    desc: InstrumentDesc,
    bounds: Vec<f64>,
    cumulative: Vec<u64>,
    sum: f64,
    count: u64,
}

impl Histogram {
    pub fn new(desc: InstrumentDesc) -> Self {
        Self::with_buckets(desc, &HISTOGRAM_BUCKETS)
    }

    /// `bounds` must be sorted ascending.
    pub fn with_buckets(desc: InstrumentDesc, bounds: &[f64]) -> Self {
        Self {
            desc,
            bounds: bounds.to_vec(),
            cumulative: vec![0; bounds.len()],
            sum: 0.0,
            count: 0,
        }
    }

    pub fn desc(&self) -> &InstrumentDesc {
        &self.desc
    }

    pub fn observe(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.count += 1;
        self.sum += v;
        // Cumulative buckets: every bucket whose bound is >= v.
        for (i, &le) in self.bounds.iter().enumerate() {
            if v <= le {
                self.cumulative[i] += 1;
            }
        }
    }

    /// `(upper_bound, cumulative_count)` pairs, ascending.
    pub fn buckets(&self) -> impl Iterator<Item = (f64, u64)> + '_ {
        self.bounds.iter().copied().zip(self.cumulative.iter().copied())
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

pub struct Summary {
    desc: InstrumentDesc,
    objectives: Vec<f64>,
    estimator: CKMS<f64>,
    sum: f64,
    count: u64,
}

impl Summary {
    pub fn new(desc: InstrumentDesc) -> Self {
        Self::with_objectives(desc, &SUMMARY_QUANTILES)
    }

    pub fn with_objectives(desc: InstrumentDesc, objectives: &[f64]) -> Self {
        Self {
            desc,
            objectives: objectives.to_vec(),
            estimator: CKMS::new(SUMMARY_ERROR),
            sum: 0.0,
            count: 0,
        }
    }

    pub fn desc(&self) -> &InstrumentDesc {
        &self.desc
    }

    pub fn observe(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.count += 1;
        self.sum += v;
        self.estimator.insert(v);
    }

    /// Estimate for `q`; NaN before the first observation.
    pub fn quantile(&self, q: f64) -> f64 {
        self.estimator.query(q).map(|(_, v)| v).unwrap_or(f64::NAN)
    }

    /// `(target, estimate)` pairs in configured order.
    pub fn quantiles(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.objectives.iter().map(|&q| (q, self.quantile(q)))
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Shortest decimal form used for `le` and `quantile` label values.
pub fn format_bound(v: f64) -> String {
    if v == f64::INFINITY {
        "+Inf".to_string()
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::MetricKind;
    use crate::naming::Labels;

    fn desc(kind: MetricKind) -> InstrumentDesc {
        InstrumentDesc {
            kind,
            name: kind.as_str().into(),
            help: String::new(),
            labels: Labels::new(),
        }
    }

    #[test]
    fn histogram_buckets_are_cumulative() {
        let mut h = Histogram::new(desc(MetricKind::Histogram));
        for v in [0.001, 0.05, 0.5, 2.0] {
            h.observe(v);
        }
        let b: Vec<_> = h.buckets().collect();
        assert_eq!(b, vec![(0.005, 1), (0.1, 2), (1.0, 3)]);
        assert_eq!(h.count(), 4);
        assert!((h.sum() - 2.551).abs() < 1e-9);
    }

    #[test]
    fn summary_is_nan_until_observed() {
        let mut s = Summary::new(desc(MetricKind::Summary));
        assert!(s.quantile(0.5).is_nan());
        for i in 0..100 {
            s.observe(i as f64 / 100.0);
        }
        let median = s.quantile(0.5);
        assert!((0.45..=0.55).contains(&median), "median={median}");
        assert_eq!(s.count(), 100);
    }

    #[test]
    fn counter_rejects_negative() {
        let mut c = Counter::new(desc(MetricKind::Counter));
        c.add(0.25);
        c.add(-1.0);
        c.add(f64::NAN);
        assert_eq!(c.value(), COUNTER_SEED + 0.25);
    }

    #[test]
    fn bound_formatting() {
        assert_eq!(format_bound(0.005), "0.005");
        assert_eq!(format_bound(1.0), "1");
        assert_eq!(format_bound(0.99), "0.99");
        assert_eq!(format_bound(f64::INFINITY), "+Inf");
    }
}
