use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use promsynth_core::error::{Result, SynthError};
use promsynth_core::naming::{validate_label_name, validate_metric_name, DEFAULT_NAMESPACE};
use promsynth_core::{KindSelection, Labels, Naming};

pub const DEFAULT_TYPE: &str = "all";
pub const DEFAULT_COUNT: i64 = 1;
pub const DEFAULT_FREQUENCY_SECS: i64 = 15;
/// Longest accepted refresh interval (one day).
pub const MAX_FREQUENCY_SECS: i64 = 86_400;
pub const DEFAULT_RANDOM: bool = false;
pub const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";

/// `config.yaml` contents. Every key is optional; absent keys fall back to
/// the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct FileConfig {
    #[serde(default)]
    pub address: Option<String>,

    /// counter | gauge | histogram | summary | all
    #[serde(default, rename = "Type")]
    pub metric_type: Option<String>,

    #[serde(default)]
    pub count: Option<i64>,

    /// Refresh interval in seconds.
    #[serde(default)]
    pub frequency: Option<i64>,

    #[serde(default)]
    pub random: Option<bool>,

    #[serde(default)]
    pub namespace: Option<String>,

    /// Constant labels attached to every instrument.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

/// Values given on the command line (or their env vars). `None` = not given.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub metric_type: Option<String>,
    pub count: Option<i64>,
    pub frequency: Option<i64>,
    pub random: Option<bool>,
    pub address: Option<String>,
    pub namespace: Option<String>,
}

/// Resolved, validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub listen: String,
    pub selection: KindSelection,
    /// Instruments per selected kind (ignored in random mode).
    pub count: i64,
    pub interval: Duration,
    pub random: bool,
    pub namespace: String,
    pub labels: Labels,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen: DEFAULT_ADDRESS.into(),
            selection: KindSelection::All,
            count: DEFAULT_COUNT,
            interval: Duration::from_secs(DEFAULT_FREQUENCY_SECS as u64),
            random: DEFAULT_RANDOM,
            namespace: DEFAULT_NAMESPACE.into(),
            labels: Labels::new(),
        }
    }
}

impl Settings {
    /// Merge with precedence flags > file > defaults, then validate.
    pub fn resolve(cli: Overrides, file: FileConfig) -> Result<Self> {
        let metric_type = cli
            .metric_type
            .or(file.metric_type)
            .unwrap_or_else(|| DEFAULT_TYPE.into());
        let selection: KindSelection = metric_type.parse()?;

        let count = cli.count.or(file.count).unwrap_or(DEFAULT_COUNT);
        let frequency = cli.frequency.or(file.frequency).unwrap_or(DEFAULT_FREQUENCY_SECS);

        let settings = Self {
            listen: cli
                .address
                .or(file.address)
                .unwrap_or_else(|| DEFAULT_ADDRESS.into()),
            selection,
            count,
            interval: Duration::from_secs(frequency.clamp(0, MAX_FREQUENCY_SECS) as u64),
            random: cli.random.or(file.random).unwrap_or(DEFAULT_RANDOM),
            namespace: cli
                .namespace
                .or(file.namespace)
                .unwrap_or_else(|| DEFAULT_NAMESPACE.into()),
            labels: file.labels,
        };

        if !(1..=MAX_FREQUENCY_SECS).contains(&frequency) {
            return Err(SynthError::InvalidInterval(frequency));
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.count < 0 {
            return Err(SynthError::NegativeCount(self.count));
        }
        if self.interval.is_zero() {
            return Err(SynthError::InvalidInterval(0));
        }
        if self.interval > Duration::from_secs(MAX_FREQUENCY_SECS as u64) {
            let secs = i64::try_from(self.interval.as_secs()).unwrap_or(i64::MAX);
            return Err(SynthError::InvalidInterval(secs));
        }
        if self.listen.trim().is_empty() {
            return Err(SynthError::Config("listen address must not be empty".into()));
        }
        if !self.namespace.is_empty() {
            validate_metric_name(&self.namespace)?;
        }
        for key in self.labels.keys() {
            validate_label_name(key)?;
        }
        Ok(())
    }

    /// Naming scheme shared by every batch.
    pub fn naming(&self) -> Naming {
        Naming {
            namespace: Some(self.namespace.clone()),
            labels: self.labels.clone(),
        }
    }
}
