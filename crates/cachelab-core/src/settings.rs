//! Campaign-level settings recognised by the experiment tooling.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CachelabError, ErrorInfo};

/// Options shared by a whole experiment campaign.
///
/// The set of recognised option names is closed: unknown keys in a settings
/// document are rejected rather than silently ignored. Execution-side
/// options (`n_replications`, `data_collectors`, `results_format`) are
/// forwarded to the external runner; `plot_empty` steers chart building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Number of times the runner replicates each experiment point.
    #[serde(default = "Settings::default_replications")]
    pub n_replications: usize,
    /// Metric collectors the execution subsystem should enable.
    #[serde(default)]
    pub data_collectors: Vec<String>,
    /// Identifier of the result reader/writer pair used by the runner.
    #[serde(default = "Settings::default_results_format")]
    pub results_format: String,
    /// Keep series with missing points as gaps instead of dropping them.
    #[serde(default)]
    pub plot_empty: bool,
}

impl Settings {
    const fn default_replications() -> usize {
        1
    }

    fn default_results_format() -> String {
        "json".to_string()
    }

    /// Parses settings from a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, CachelabError> {
        serde_json::from_str(raw).map_err(|err| {
            CachelabError::Settings(
                ErrorInfo::new("settings-parse", "failed to parse settings document")
                    .with_hint(err.to_string()),
            )
        })
    }

    /// Reads settings from a JSON file on disk.
    pub fn read_from(path: &Path) -> Result<Self, CachelabError> {
        let raw = fs::read_to_string(path).map_err(|err| {
            CachelabError::Settings(
                ErrorInfo::new("settings-read", "failed to read settings file")
                    .with_context("path", path.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        Self::from_json_str(&raw)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            n_replications: Self::default_replications(),
            data_collectors: Vec::new(),
            results_format: Self::default_results_format(),
            plot_empty: false,
        }
    }
}
