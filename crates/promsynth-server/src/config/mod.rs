//! Config file loader (strict parsing).
//!
//! The file is optional unless a path is given explicitly; CLI flags are
//! merged on top by [`schema::Settings::resolve`].

pub mod schema;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use promsynth_core::error::{Result, SynthError};

pub use schema::{FileConfig, Overrides, Settings};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub fn load_from_file(path: &Path) -> Result<FileConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| SynthError::Config(format!("read {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<FileConfig> {
    if s.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(s).map_err(|e| SynthError::Config(format!("invalid yaml: {e}")))
}

/// Load `explicit` (must exist) or the default path (may be absent).
pub fn load(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        return load_from_file(path);
    }

    let path = Path::new(DEFAULT_CONFIG_PATH);
    match fs::read_to_string(path) {
        Ok(s) => {
            tracing::info!(path = %path.display(), "config file loaded");
            load_from_str(&s)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(FileConfig::default())
        }
        Err(e) => Err(SynthError::Config(format!("read {} failed: {e}", path.display()))),
    }
}
