//! Flattening of scraped compound data into training rows.

use super::molecular_properties::{MolecularProperties, compound_id, molecular_properties};
use crate::Thermodynamics::DBhandlers::NIST_parser::CompoundScrapeResult;
use crate::Thermodynamics::DBhandlers::NIST_tables::ThermodynamicRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// compound name -> what was scraped for it, ordered by name
pub type RawResults = BTreeMap<String, CompoundScrapeResult>;

/// Temperature window of the training set, K
pub const TRAIN_T_MIN: f64 = 200.0;
pub const TRAIN_T_MAX: f64 = 2000.0;

/// One row of the training table. Field order is the column order of the CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub compound: String,
    pub compound_id: u32,
    pub temperature: f64,
    pub heat_capacity: f64,
    pub entropy: Option<f64>,
    pub enthalpy_minus_h298: Option<f64>,
    pub molecular_weight: f64,
    pub n_atoms: u32,
    pub is_polar: u8,
    pub is_synthetic: bool,
}

impl TrainingSample {
    pub fn new(
        compound: &str,
        temperature: f64,
        heat_capacity: f64,
        entropy: Option<f64>,
        enthalpy_minus_h298: Option<f64>,
        is_synthetic: bool,
    ) -> Self {
        let MolecularProperties {
            molecular_weight,
            n_atoms,
            is_polar,
        } = molecular_properties(compound);
        Self {
            compound: compound.to_string(),
            compound_id: compound_id(compound),
            temperature,
            heat_capacity,
            entropy,
            enthalpy_minus_h298,
            molecular_weight,
            n_atoms,
            is_polar,
            is_synthetic,
        }
    }

    pub fn from_record(compound: &str, record: &ThermodynamicRecord) -> Self {
        Self::new(
            compound,
            record.temperature,
            record.heat_capacity,
            record.entropy,
            record.enthalpy_minus_h298,
            false,
        )
    }
}

pub fn in_training_range(temperature: f64) -> bool {
    (TRAIN_T_MIN..=TRAIN_T_MAX).contains(&temperature)
}

/// Turns every scraped record within the training temperature window into a row.
/// Compounds without thermodynamic data contribute nothing.
pub fn process_for_training(raw_data: &RawResults) -> Vec<TrainingSample> {
    raw_data
        .iter()
        .filter_map(|(compound, data)| {
            data.thermodynamic_data
                .as_ref()
                .map(|records| (compound, records))
        })
        .flat_map(|(compound, records)| {
            records
                .iter()
                .filter(|record| in_training_range(record.temperature))
                .map(move |record| TrainingSample::from_record(compound, record))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Thermodynamics::DBhandlers::NIST_tables::PhaseChangeProperties;

    fn record(temperature: f64, heat_capacity: f64) -> ThermodynamicRecord {
        ThermodynamicRecord {
            temperature,
            heat_capacity,
            entropy: Some(200.0),
            enthalpy_minus_h298: None,
            gibbs_free_energy: Some(-10.0),
        }
    }

    fn scraped(formula: &str, records: Option<Vec<ThermodynamicRecord>>) -> CompoundScrapeResult {
        CompoundScrapeResult {
            formula: formula.to_string(),
            compound_id: "C0000000".to_string(),
            phase_change_data: PhaseChangeProperties::default(),
            thermodynamic_data: records,
        }
    }

    #[test]
    fn test_temperature_window() {
        let mut raw = RawResults::new();
        raw.insert(
            "H2O".to_string(),
            scraped(
                "H2O",
                Some(vec![
                    record(100.0, 33.0),
                    record(200.0, 33.3),
                    record(1000.0, 41.3),
                    record(2000.0, 51.2),
                    record(3000.0, 55.7),
                ]),
            ),
        );
        let samples = process_for_training(&raw);
        let temperatures: Vec<f64> = samples.iter().map(|s| s.temperature).collect();
        assert_eq!(temperatures, vec![200.0, 1000.0, 2000.0]);
        assert!(samples.iter().all(|s| !s.is_synthetic));
        assert!(samples.iter().all(|s| s.molecular_weight == 18.015));
        assert_eq!(samples[0].entropy, Some(200.0));
        assert_eq!(samples[0].enthalpy_minus_h298, None);
    }

    #[test]
    fn test_compounds_without_data_are_skipped() {
        let mut raw = RawResults::new();
        raw.insert("CO".to_string(), scraped("CO", None));
        raw.insert("N2".to_string(), scraped("N2", Some(vec![record(300.0, 29.1)])));
        let samples = process_for_training(&raw);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].compound, "N2");
        assert_eq!(samples[0].compound_id, compound_id("N2"));
        assert_eq!(samples[0].n_atoms, 2);
    }

    #[test]
    fn test_alias_gets_default_properties() {
        let mut raw = RawResults::new();
        raw.insert(
            "water".to_string(),
            scraped("water", Some(vec![record(300.0, 75.3)])),
        );
        let samples = process_for_training(&raw);
        assert_eq!(samples[0].molecular_weight, 50.0);
        assert_eq!(samples[0].n_atoms, 5);
        assert_eq!(samples[0].is_polar, 0);
    }
}
