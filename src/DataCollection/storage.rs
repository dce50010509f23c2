//! Raw-result snapshots (JSON) and the training table (CSV).

use super::errors::CollectError;
use super::training_data::{RawResults, TrainingSample};
use log::info;
use std::fs;
use std::path::Path;

pub fn save_raw_results(results: &RawResults, path: &Path) -> Result<(), CollectError> {
    let content = serde_json::to_string_pretty(results)?;
    fs::write(path, content)?;
    info!("Data saved to {}", path.display());
    Ok(())
}

/// Reloads a snapshot written by `save_raw_results` (or a progress checkpoint).
pub fn load_raw_results(path: &Path) -> Result<RawResults, CollectError> {
    let content = fs::read_to_string(path)?;
    let results: RawResults = serde_json::from_str(&content)?;
    info!(
        "Loaded {} compound(s) from {}",
        results.len(),
        path.display()
    );
    Ok(results)
}

/// CSV text of the training table, header included
pub fn training_table_to_bytes(samples: &[TrainingSample]) -> Result<Vec<u8>, CollectError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for sample in samples {
        writer.serialize(sample)?;
    }
    writer
        .into_inner()
        .map_err(|e| CollectError::Io(e.into_error()))
}

pub fn write_training_table(samples: &[TrainingSample], path: &Path) -> Result<(), CollectError> {
    let bytes = training_table_to_bytes(samples)?;
    fs::write(path, bytes)?;
    info!("{} rows written to {}", samples.len(), path.display());
    Ok(())
}

pub fn read_training_table(path: &Path) -> Result<Vec<TrainingSample>, CollectError> {
    let mut reader = csv::Reader::from_path(path)?;
    let samples = reader
        .deserialize()
        .collect::<Result<Vec<TrainingSample>, csv::Error>>()?;
    Ok(samples)
}
