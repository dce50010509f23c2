//! Overview of a finished training table, printed at the end of a run.

use super::training_data::TrainingSample;
use log::warn;
use prettytable::{Cell, Row, Table};
use std::collections::BTreeSet;

/// fewer samples than this gets a warning in the summary
pub const SMALL_DATASET: usize = 20;

/// Overview of a finished training table.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub total: usize,
    pub compounds: usize,
    pub real: usize,
    pub synthetic: usize,
    pub temperature_range: (f64, f64),
    pub heat_capacity_range: (f64, f64),
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

impl DatasetSummary {
    /// `None` for an empty table
    pub fn from_samples(samples: &[TrainingSample]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let compounds: BTreeSet<&str> = samples.iter().map(|s| s.compound.as_str()).collect();
        let synthetic = samples.iter().filter(|s| s.is_synthetic).count();
        Some(Self {
            total: samples.len(),
            compounds: compounds.len(),
            real: samples.len() - synthetic,
            synthetic,
            temperature_range: min_max(samples.iter().map(|s| s.temperature)),
            heat_capacity_range: min_max(samples.iter().map(|s| s.heat_capacity)),
        })
    }

    pub fn is_small(&self) -> bool {
        self.total < SMALL_DATASET
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(Row::new(vec![Cell::new("Dataset"), Cell::new("")]));
        let rows = [
            ("Total samples", self.total.to_string()),
            ("Compounds", self.compounds.to_string()),
            ("Real / synthetic", format!("{} / {}", self.real, self.synthetic)),
            (
                "Temperature range, K",
                format!(
                    "{:.1} - {:.1}",
                    self.temperature_range.0, self.temperature_range.1
                ),
            ),
            (
                "Heat capacity range, J/(mol·K)",
                format!(
                    "{:.1} - {:.1}",
                    self.heat_capacity_range.0, self.heat_capacity_range.1
                ),
            ),
        ];
        for (name, value) in rows.iter() {
            table.add_row(Row::new(vec![Cell::new(name), Cell::new(value)]));
        }
        table
    }

    pub fn pretty_print(&self) {
        if self.is_small() {
            warn!("Limited data collected ({} samples), but proceeding...", self.total);
        }
        self.to_table().printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let samples = vec![
            TrainingSample::new("H2O", 300.0, 33.6, None, None, false),
            TrainingSample::new("H2O", 900.0, 41.0, None, None, false),
            TrainingSample::new("CO2", 250.0, 35.0, None, None, true),
        ];
        let summary = DatasetSummary::from_samples(&samples).unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.compounds, 2);
        assert_eq!(summary.real, 2);
        assert_eq!(summary.synthetic, 1);
        assert_eq!(summary.temperature_range, (250.0, 900.0));
        assert_eq!(summary.heat_capacity_range, (33.6, 41.0));
        assert!(summary.is_small());

        let rendered = summary.to_table().to_string();
        assert!(rendered.contains("Total samples"));
        assert!(rendered.contains("250.0 - 900.0"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(DatasetSummary::from_samples(&[]), None);
    }
}
