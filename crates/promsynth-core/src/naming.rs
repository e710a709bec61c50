//! Instrument identity: naming scheme and exposition-grammar validation.
//!
//! Names are derived from the creation batch: a single instrument keeps the
//! bare base name (`counter`), a batch of `n` gets `counter0 .. counter{n-1}`.
//! The namespace, when set, is joined with `_` the way Prometheus clients do.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, SynthError};
use crate::kind::MetricKind;

/// Label set. Keys are unique and iterate in sorted order.
pub type Labels = BTreeMap<String, String>;

pub const DEFAULT_NAMESPACE: &str = "test";

/// Labels the exposition format reserves for derived rows.
const RESERVED_LABELS: [&str; 2] = ["le", "quantile"];

/// Stable identity of one instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentDesc {
    pub kind: MetricKind,
    /// Fully qualified name (namespace included).
    pub name: String,
    pub help: String,
    pub labels: Labels,
}

/// How a batch of instruments is named.
#[derive(Debug, Clone, Default)]
pub struct Naming {
    pub namespace: Option<String>,
    /// Constant labels attached to every instrument of the batch.
    pub labels: Labels,
}

impl Naming {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Fully qualified names for a batch of `count` instruments, in creation order.
    pub fn names(&self, kind: MetricKind, count: usize) -> Vec<String> {
        let base = kind.as_str();
        let prefix = match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{ns}_"),
            _ => String::new(),
        };

        if count == 1 {
            return vec![format!("{prefix}{base}")];
        }
        (0..count).map(|i| format!("{prefix}{base}{i}")).collect()
    }

    /// Build validated descriptors for a batch.
    pub fn describe(&self, kind: MetricKind, count: usize) -> Result<Vec<InstrumentDesc>> {
        for key in self.labels.keys() {
            validate_label_name(key)?;
        }

        let help = format!("This is my {kind}");

        self.names(kind, count)
            .into_iter()
            .map(|name| {
                validate_metric_name(&name)?;
                Ok(InstrumentDesc {
                    kind,
                    name,
                    help: help.clone(),
                    labels: self.labels.clone(),
                })
            })
            .collect()
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
pub fn validate_metric_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        }
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(SynthError::InvalidName(format!(
            "{name:?} must match [a-zA-Z_:][a-zA-Z0-9_:]*"
        )))
    }
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, not `__`-prefixed, not reserved.
pub fn validate_label_name(key: &str) -> Result<()> {
    let mut chars = key.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if !ok {
        return Err(SynthError::InvalidLabel(format!(
            "{key:?} must match [a-zA-Z_][a-zA-Z0-9_]*"
        )));
    }
    if key.starts_with("__") {
        return Err(SynthError::InvalidLabel(format!("{key:?} uses the reserved __ prefix")));
    }
    if RESERVED_LABELS.contains(&key) {
        return Err(SynthError::InvalidLabel(format!("{key:?} is reserved")));
    }
    Ok(())
}
