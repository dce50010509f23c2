//! # Collection orchestrator
//!
//! ## Aim
//! Drives a whole collection run: every configured compound is scraped in turn, the
//! results are flattened into training rows, a synthetic supplement is added when fewer
//! than `min_real_rows` real rows were found, and the table plus a raw-results snapshot
//! are written to the output directory.
//!
//! ## Failure policy
//! - one compound failing (lookup, fetch, parse) costs only that compound's rows;
//! - too few real rows is not an error, the synthetic supplement fills the gap;
//! - an error escaping the run (I/O, unreachable WebBook, ...) reaches
//!   `run_with_fallback`, which writes a purely synthetic table instead.
//!
//! ## Usage
//! ```rust, ignore
//! let config = CollectorConfig::default();
//! let outcome = run_with_fallback(&config, || Collector::new(config.clone())?.collect_dataset())?;
//! println!("{} rows in {}", outcome.samples.len(), outcome.table_path.display());
//! ```

use super::errors::CollectError;
use super::storage::{load_raw_results, save_raw_results, write_training_table};
use super::synthetic::generate_synthetic_supplement;
use super::training_data::{RawResults, TrainingSample, process_for_training};
use crate::Thermodynamics::DBhandlers::NIST_parser::{HttpClient, NistScraper};
use crate::settings::CollectorConfig;
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::blocking::Client;
use std::fs;
use std::path::{Path, PathBuf};

/// what a finished run produced
#[derive(Debug, Clone)]
pub struct CollectionOutcome {
    pub samples: Vec<TrainingSample>,
    pub real_rows: usize,
    pub synthetic_rows: usize,
    /// compounds identified on the WebBook (or present in the replayed snapshot)
    pub compounds_found: usize,
    /// true when the table is the synthetic-only fallback
    pub fell_back: bool,
    pub table_path: PathBuf,
}

impl CollectionOutcome {
    fn new(
        samples: Vec<TrainingSample>,
        compounds_found: usize,
        fell_back: bool,
        table_path: PathBuf,
    ) -> Self {
        let synthetic_rows = samples.iter().filter(|s| s.is_synthetic).count();
        Self {
            real_rows: samples.len() - synthetic_rows,
            synthetic_rows,
            samples,
            compounds_found,
            fell_back,
            table_path,
        }
    }
}

/// Real rows of `raw`, topped up with synthetic rows if there are fewer than
/// `config.min_real_rows` of them.
pub fn build_training_table<R: Rng + ?Sized>(
    raw: &RawResults,
    config: &CollectorConfig,
    rng: &mut R,
) -> Result<Vec<TrainingSample>, CollectError> {
    let mut samples = process_for_training(raw);
    if samples.len() < config.min_real_rows {
        info!(
            "Only {} real rows (minimum {}), adding synthetic data",
            samples.len(),
            config.min_real_rows
        );
        let synthetic = generate_synthetic_supplement(samples.len(), config.target_rows, rng)?;
        samples.extend(synthetic);
    }
    Ok(samples)
}

/// Aggregates `raw` with a generator seeded from the config and writes the table.
/// Equal snapshots and seeds give byte-identical tables.
pub fn assemble_dataset(
    raw: &RawResults,
    config: &CollectorConfig,
) -> Result<CollectionOutcome, CollectError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let samples = build_training_table(raw, config, &mut rng)?;
    let table_path = config.training_table_path();
    write_training_table(&samples, &table_path)?;
    Ok(CollectionOutcome::new(samples, raw.len(), false, table_path))
}

/// Rebuilds the training table from a saved raw-results snapshot, without network access.
pub fn replay_from_snapshot(
    snapshot: &Path,
    config: &CollectorConfig,
) -> Result<CollectionOutcome, CollectError> {
    fs::create_dir_all(&config.output_dir)?;
    let raw = load_raw_results(snapshot)?;
    assemble_dataset(&raw, config)
}

/// The last-resort dataset: synthetic rows only, as if nothing had been collected.
pub fn write_synthetic_only(config: &CollectorConfig) -> Result<CollectionOutcome, CollectError> {
    fs::create_dir_all(&config.output_dir)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let samples = generate_synthetic_supplement(0, config.target_rows, &mut rng)?;
    let table_path = config.training_table_path();
    write_training_table(&samples, &table_path)?;
    info!("Emergency dataset created with {} samples", samples.len());
    Ok(CollectionOutcome::new(samples, 0, true, table_path))
}

/// Runs `collect`; if it fails, the failure is logged and the synthetic-only dataset
/// is written in its place. Only a failure of that fallback itself is returned.
pub fn run_with_fallback<F>(
    config: &CollectorConfig,
    collect: F,
) -> Result<CollectionOutcome, CollectError>
where
    F: FnOnce() -> Result<CollectionOutcome, CollectError>,
{
    match collect() {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            error!("Data collection failed: {}", e);
            error!("Creating minimal synthetic dataset...");
            write_synthetic_only(config)
        }
    }
}

pub struct Collector<C: HttpClient> {
    scraper: NistScraper<C>,
    config: CollectorConfig,
}

impl Collector<Client> {
    pub fn new(config: CollectorConfig) -> Result<Self, CollectError> {
        let scraper = NistScraper::new(&config.scraper)?;
        Ok(Self { scraper, config })
    }
}

impl<C: HttpClient> Collector<C> {
    pub fn with_scraper(scraper: NistScraper<C>, config: CollectorConfig) -> Self {
        Self { scraper, config }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Scrapes every configured compound in order. Per-compound failures are logged and
    /// skipped; only a WebBook that failed on the network for every compound is an error.
    pub fn scrape_compounds(&self) -> Result<RawResults, CollectError> {
        let compounds = &self.config.compounds;
        let total = compounds.len();
        info!("Starting NIST data collection, target compounds: {}", total);

        let mut results = RawResults::new();
        let mut network_failures = 0;
        for (i, compound) in compounds.iter().enumerate() {
            info!("Progress: {}/{}", i + 1, total);
            match self.scraper.scrape_compound_data(compound) {
                Ok(data) => {
                    if data.thermodynamic_data.is_some() {
                        info!(
                            "Successfully scraped {} ({} records)",
                            compound,
                            data.record_count()
                        );
                    } else {
                        warn!("No thermodynamic data found for {}", compound);
                    }
                    results.insert(compound.clone(), data);
                }
                Err(e) => {
                    if e.is_network() {
                        network_failures += 1;
                    }
                    warn!("Error scraping {}: {}", compound, e);
                }
            }

            let every = self.config.checkpoint_every;
            if every > 0 && (i + 1) % every == 0 {
                self.checkpoint(&results, i + 1);
            }
            self.scraper.pause();
        }

        if total > 0 && network_failures == total {
            return Err(CollectError::SourceUnreachable { attempted: total });
        }
        let with_data = results
            .values()
            .filter(|r| r.thermodynamic_data.is_some())
            .count();
        info!(
            "Successfully scraped {} compounds, {} identified",
            with_data,
            results.len()
        );
        Ok(results)
    }

    fn checkpoint(&self, results: &RawResults, processed: usize) {
        let path = self.config.checkpoint_path(processed);
        if let Err(e) = save_raw_results(results, &path) {
            warn!("Failed to write progress file {}: {}", path.display(), e);
        }
    }

    /// Full run: scrape, save the raw snapshot, aggregate, top up, write the table.
    pub fn collect_dataset(&self) -> Result<CollectionOutcome, CollectError> {
        fs::create_dir_all(&self.config.output_dir)?;
        let raw = self.scrape_compounds()?;
        if !raw.is_empty() {
            save_raw_results(&raw, &self.config.raw_results_path())?;
        }
        let outcome = assemble_dataset(&raw, &self.config)?;
        info!(
            "Collection complete! {} data points ({} real, {} synthetic)",
            outcome.samples.len(),
            outcome.real_rows,
            outcome.synthetic_rows
        );
        Ok(outcome)
    }
}
