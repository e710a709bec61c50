//! Command-line surface.
//!
//! Flags are kebab-case; the older underscore spellings (`--metric_type`,
//! `--is_random`, ...) are accepted as aliases.

use std::path::PathBuf;

use clap::Parser;

use promsynth_core::error::Result;

use crate::config::{self, Overrides, Settings};
use crate::obs::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "promsynth", version, about = "Serve synthetic Prometheus metrics")]
pub struct Cli {
    /// Type of metric (counter, gauge, histogram, summary, all).
    #[arg(long = "metric-type", alias = "metric_type")]
    pub metric_type: Option<String>,

    /// Amount of metrics to create per type.
    #[arg(long = "metric-count", alias = "metric_count", allow_negative_numbers = true)]
    pub metric_count: Option<i64>,

    /// Refresh interval in seconds.
    #[arg(long = "metric-frequency", alias = "metric_frequency", allow_negative_numbers = true)]
    pub metric_frequency: Option<i64>,

    /// Create a random subset of types with random counts (type `all` only).
    #[arg(long = "is-random", alias = "is_random", num_args = 0..=1, default_missing_value = "true")]
    pub is_random: Option<bool>,

    /// Server listening address.
    #[arg(long = "listen-address", alias = "listen_address", env = "LISTEN_ADDRESS")]
    pub listen_address: Option<String>,

    /// Metric name prefix.
    #[arg(long, env = "INSTANCE_ID")]
    pub namespace: Option<String>,

    /// YAML config file (defaults to ./config.yaml when present).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            metric_type: self.metric_type.clone(),
            count: self.metric_count,
            frequency: self.metric_frequency,
            random: self.is_random,
            address: self.listen_address.clone(),
            namespace: self.namespace.clone(),
        }
    }

    /// Load the config file and merge this command line over it.
    pub fn settings(&self) -> Result<Settings> {
        let file = config::load(self.config.as_deref())?;
        Settings::resolve(self.overrides(), file)
    }
}
