use crate::DataCollection::collector::{
    CollectionOutcome, Collector, replay_from_snapshot, run_with_fallback, write_synthetic_only,
};
use crate::DataCollection::errors::CollectError;
use crate::DataCollection::summary::DatasetSummary;
use crate::Utils::logger::{init_logging, parse_level};
use crate::settings::{CollectorConfig, DEFAULT_CONFIG_FILE};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "thermo_harvest")]
#[command(about = "Collect NIST WebBook heat capacity data into a training table")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, help = "JSON settings file")]
    pub config: PathBuf,

    #[arg(short, long, help = "Directory for the table, snapshot and progress files")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, help = "Pause between WebBook requests, s")]
    pub delay: Option<f64>,

    #[arg(long, help = "Seed of the synthetic generator")]
    pub seed: Option<u64>,

    #[arg(long, help = "Rebuild the table from a raw-results snapshot instead of scraping")]
    pub replay: Option<PathBuf>,

    #[arg(long, help = "Skip scraping and write a purely synthetic table")]
    pub synthetic_only: bool,

    #[arg(long, help = "Write the effective settings to this file and exit")]
    pub write_config: Option<PathBuf>,

    #[arg(short, long, default_value = "INFO", help = "Logging level (DEBUG, INFO, WARN, ERROR)")]
    pub log_level: String,

    #[arg(long, help = "Also write a debug log to this file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// settings file values overridden by the flags given
    pub fn effective_config(&self) -> Result<CollectorConfig, Box<dyn std::error::Error>> {
        let mut config = CollectorConfig::load(&self.config)?;
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(delay) = self.delay {
            config.scraper.delay_secs = delay;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

fn collect(cli: &Cli, config: &CollectorConfig) -> Result<CollectionOutcome, CollectError> {
    if cli.synthetic_only {
        return write_synthetic_only(config);
    }
    run_with_fallback(config, || match &cli.replay {
        Some(snapshot) => replay_from_snapshot(snapshot, config),
        None => Collector::new(config.clone())?.collect_dataset(),
    })
}

pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(parse_level(&cli.log_level), cli.log_file.as_deref())?;

    let config = cli.effective_config()?;
    if let Some(path) = &cli.write_config {
        config.save(path)?;
        info!("Settings written to {}", path.display());
        return Ok(());
    }

    info!("Chemical Property Prediction - Data Collection");
    let outcome = collect(&cli, &config).inspect_err(|e| {
        error!("Synthetic fallback failed as well: {}", e);
    })?;

    if let Some(summary) = DatasetSummary::from_samples(&outcome.samples) {
        summary.pretty_print();
    }
    info!(
        "Data ready for model training: {}",
        outcome.table_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_flags_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "thermo_harvest",
            "--config",
            dir.path().join("none.json").to_str().unwrap(),
            "--output-dir",
            "out",
            "--delay",
            "1.5",
            "--seed",
            "9",
        ]);
        let config = cli.effective_config().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.scraper.delay(), Duration::from_millis(1500));
        assert_eq!(config.seed, 9);
        assert_eq!(config.min_real_rows, 50);
        assert!(!cli.synthetic_only);
    }

    #[test]
    fn test_replay_and_synthetic_flags() {
        let cli = Cli::parse_from([
            "thermo_harvest",
            "--replay",
            "raw.json",
            "--synthetic-only",
            "-l",
            "debug",
        ]);
        assert_eq!(cli.replay, Some(PathBuf::from("raw.json")));
        assert!(cli.synthetic_only);
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_synthetic_only_run() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(["thermo_harvest", "--synthetic-only"]);
        let mut config = CollectorConfig::default();
        config.output_dir = dir.path().to_path_buf();
        let outcome = collect(&cli, &config).unwrap();
        assert!(outcome.fell_back);
        assert!(config.training_table_path().exists());
    }
}
