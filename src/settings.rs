//! # Settings Module
//!
//! ## Purpose
//! Holds every tunable of a collection run: where and how politely the WebBook is
//! queried, which compounds are collected, the row thresholds of the synthetic top-up,
//! the random seed, and where the outputs land.
//!
//! ## Configuration File
//! Settings are read from a JSON file (`thermo_harvest_config.json` by default). A missing
//! file means defaults; keys missing from the file take their default values.
//! ```json
//! {
//!   "scraper": { "delay_secs": 0.5, "search_timeout_secs": 15.0 },
//!   "min_real_rows": 50,
//!   "target_rows": 100,
//!   "seed": 42,
//!   "output_dir": "data"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "thermo_harvest_config.json";
pub const DEFAULT_SEARCH_TIMEOUT_SECS: f64 = 15.0;
pub const DEFAULT_DATA_TIMEOUT_SECS: f64 = 10.0;

/// Formulas followed by their common names. Each entry is looked up on its own.
pub const DEFAULT_COMPOUNDS: [&str; 30] = [
    "H2O",
    "water",
    "CO2",
    "carbon dioxide",
    "CH4",
    "methane",
    "NH3",
    "ammonia",
    "C2H5OH",
    "ethanol",
    "N2",
    "nitrogen",
    "O2",
    "oxygen",
    "C6H6",
    "benzene",
    "C8H18",
    "octane",
    "NaCl",
    "sodium chloride",
    "H2",
    "hydrogen",
    "CO",
    "carbon monoxide",
    "C2H4",
    "ethylene",
    "C3H8",
    "propane",
    "C2H6",
    "ethane",
];

/// How the WebBook is queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperSettings {
    pub base_url: String,
    pub user_agent: String,
    /// pause between requests, s
    pub delay_secs: f64,
    /// timeout of one identification request, s
    pub search_timeout_secs: f64,
    /// timeout of one data page request, s
    pub data_timeout_secs: f64,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            base_url: "https://webbook.nist.gov/cgi/cbook.cgi".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            delay_secs: 0.5,
            search_timeout_secs: DEFAULT_SEARCH_TIMEOUT_SECS,
            data_timeout_secs: DEFAULT_DATA_TIMEOUT_SECS,
        }
    }
}

impl ScraperSettings {
    /// The delay as a `Duration`; negative or non-finite values mean no delay.
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_secs).unwrap_or(Duration::ZERO)
    }

    /// Timeout of one identification request; zero, negative, non-finite or
    /// overflowing values fall back to the default.
    pub fn search_timeout(&self) -> Duration {
        positive_secs(self.search_timeout_secs, DEFAULT_SEARCH_TIMEOUT_SECS)
    }

    /// Timeout of one data page request, with the same fallback as `search_timeout`.
    pub fn data_timeout(&self) -> Duration {
        positive_secs(self.data_timeout_secs, DEFAULT_DATA_TIMEOUT_SECS)
    }
}

fn positive_secs(secs: f64, default_secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|d| !d.is_zero())
        .unwrap_or(Duration::from_secs_f64(default_secs))
}

/// Settings of one collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub scraper: ScraperSettings,
    pub compounds: Vec<String>,
    /// below this many real rows the synthetic supplement is added
    pub min_real_rows: usize,
    /// total row count the synthetic supplement aims at
    pub target_rows: usize,
    /// write a progress snapshot after every n-th compound, 0 disables
    pub checkpoint_every: usize,
    /// seed of the synthetic generator
    pub seed: u64,
    pub output_dir: PathBuf,
    pub training_table: String,
    pub raw_results: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            scraper: ScraperSettings::default(),
            compounds: DEFAULT_COMPOUNDS.iter().map(|c| c.to_string()).collect(),
            min_real_rows: 50,
            target_rows: 100,
            checkpoint_every: 5,
            seed: 42,
            output_dir: PathBuf::from("."),
            training_table: "final_training_data.csv".to_string(),
            raw_results: "nist_raw_data.json".to_string(),
        }
    }
}

impl CollectorConfig {
    /// Loads settings from a JSON file; a missing file yields the defaults.
    pub fn load(config_file: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if config_file.exists() {
            let content = fs::read_to_string(config_file)?;
            let config: CollectorConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(CollectorConfig::default())
        }
    }

    pub fn save(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_file, content)?;
        Ok(())
    }

    pub fn training_table_path(&self) -> PathBuf {
        self.output_dir.join(&self.training_table)
    }

    pub fn raw_results_path(&self) -> PathBuf {
        self.output_dir.join(&self.raw_results)
    }

    /// progress snapshot written after `n` compounds
    pub fn checkpoint_path(&self, n: usize) -> PathBuf {
        self.output_dir.join(format!("nist_data_progress_{}.json", n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = CollectorConfig::default();
        assert_eq!(config.compounds.len(), 30);
        assert_eq!(config.compounds[0], "H2O");
        assert_eq!(config.compounds[1], "water");
        assert_eq!(config.min_real_rows, 50);
        assert_eq!(config.target_rows, 100);
        assert_eq!(config.checkpoint_every, 5);
        assert_eq!(config.scraper.delay(), Duration::from_millis(500));
        assert_eq!(
            config.training_table_path(),
            PathBuf::from("./final_training_data.csv")
        );
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CollectorConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, CollectorConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut temp_config = NamedTempFile::new().unwrap();
        write!(
            temp_config,
            r#"{{ "seed": 7, "scraper": {{ "delay_secs": 1.0 }}, "compounds": ["CO"] }}"#
        )
        .unwrap();

        let config = CollectorConfig::load(temp_config.path()).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.compounds, vec!["CO".to_string()]);
        assert_eq!(config.scraper.delay(), Duration::from_secs(1));
        assert_eq!(config.scraper.search_timeout_secs, 15.0);
        assert_eq!(config.target_rows, 100);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut temp_config = NamedTempFile::new().unwrap();
        write!(temp_config, "{{ not json").unwrap();
        assert!(CollectorConfig::load(temp_config.path()).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = CollectorConfig::default();
        config.output_dir = dir.path().to_path_buf();
        config.min_real_rows = 10;
        config.save(&path).unwrap();

        let loaded = CollectorConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.checkpoint_path(5),
            dir.path().join("nist_data_progress_5.json")
        );
    }

    #[test]
    fn test_invalid_timeouts_use_defaults() {
        for bad in [-1.0, 0.0, f64::NAN, f64::INFINITY, 1e30] {
            let settings = ScraperSettings {
                search_timeout_secs: bad,
                data_timeout_secs: bad,
                ..Default::default()
            };
            assert_eq!(settings.search_timeout(), Duration::from_secs(15));
            assert_eq!(settings.data_timeout(), Duration::from_secs(10));
        }
        let settings = ScraperSettings {
            search_timeout_secs: 2.5,
            ..Default::default()
        };
        assert_eq!(settings.search_timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn test_negative_delay_is_zero() {
        let settings = ScraperSettings {
            delay_secs: -1.0,
            ..Default::default()
        };
        assert_eq!(settings.delay(), Duration::ZERO);
    }
}
