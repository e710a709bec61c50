//! Instrument kinds and the `Type` selector accepted by configuration.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SynthError;

/// One of the four instrument kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
    Summary,
}

impl MetricKind {
    /// All kinds in registry order.
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Counter,
        MetricKind::Gauge,
        MetricKind::Histogram,
        MetricKind::Summary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
            MetricKind::Summary => "summary",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "counter" => Ok(MetricKind::Counter),
            "gauge" => Ok(MetricKind::Gauge),
            "histogram" => Ok(MetricKind::Histogram),
            "summary" => Ok(MetricKind::Summary),
            other => Err(SynthError::InvalidKind(other.to_string())),
        }
    }
}

/// Which kinds to create: a single kind or every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindSelection {
    One(MetricKind),
    All,
}

impl KindSelection {
    pub fn kinds(self) -> Vec<MetricKind> {
        match self {
            KindSelection::One(k) => vec![k],
            KindSelection::All => MetricKind::ALL.to_vec(),
        }
    }
}

impl fmt::Display for KindSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindSelection::One(k) => k.fmt(f),
            KindSelection::All => f.write_str("all"),
        }
    }
}

impl FromStr for KindSelection {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(KindSelection::All),
            other => other.parse().map(KindSelection::One),
        }
    }
}
