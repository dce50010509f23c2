//! # Synthetic supplement
//!
//! Closed-form stand-ins for real WebBook rows, used to pad a dataset that came out
//! too small. The generated rows carry the same molecular descriptors and compound ids
//! as real rows and are marked with `is_synthetic`.
//!
//! Models, T in K:
//! - Cp = 20 + 5·n_atoms + 0.01·T + 1e-6·T² + N(0, 2), at least 10
//! - S = 150 + 20·ln T + 10·n_atoms + N(0, 5), at least 0
//! - H - H298 = N(0, 1000), a placeholder without physical meaning

use super::errors::CollectError;
use super::molecular_properties::{MOLECULAR_PROPERTIES, MolecularProperties};
use super::training_data::{TRAIN_T_MAX, TRAIN_T_MIN, TrainingSample};
use log::info;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// fewest rows generated per compound, however close the dataset is to its target
pub const MIN_ROWS_PER_COMPOUND: usize = 5;
pub const MIN_HEAT_CAPACITY: f64 = 10.0;

/// `n` evenly spaced points from `start` to `stop`, both included
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// rows per compound for a dataset that already holds `existing_count` rows
pub fn rows_per_compound(existing_count: usize, target_total: usize) -> usize {
    let missing = target_total.saturating_sub(existing_count);
    (missing / MOLECULAR_PROPERTIES.len()).max(MIN_ROWS_PER_COMPOUND)
}

pub fn heat_capacity_model(props: &MolecularProperties, temperature: f64, noise: f64) -> f64 {
    let base = 20.0 + 5.0 * props.n_atoms as f64;
    let temp_term = 0.01 * temperature + 1e-6 * temperature.powi(2);
    (base + temp_term + noise).max(MIN_HEAT_CAPACITY)
}

pub fn entropy_model(props: &MolecularProperties, temperature: f64, noise: f64) -> f64 {
    (150.0 + 20.0 * temperature.ln() + 10.0 * props.n_atoms as f64 + noise).max(0.0)
}

/// Generates rows for every compound of the molecular-properties table so that,
/// together with `existing_count` rows, the dataset approaches `target_total`.
pub fn generate_synthetic_supplement<R: Rng + ?Sized>(
    existing_count: usize,
    target_total: usize,
    rng: &mut R,
) -> Result<Vec<TrainingSample>, CollectError> {
    info!(
        "Generating synthetic data (current count: {})...",
        existing_count
    );
    let cp_noise = Normal::new(0.0, 2.0)?;
    let entropy_noise = Normal::new(0.0, 5.0)?;
    let enthalpy_noise = Normal::new(0.0, 1000.0)?;

    let per_compound = rows_per_compound(existing_count, target_total);
    let temperatures = linspace(TRAIN_T_MIN, TRAIN_T_MAX, per_compound);
    let mut samples = Vec::with_capacity(per_compound * MOLECULAR_PROPERTIES.len());

    for (compound, props) in MOLECULAR_PROPERTIES.iter() {
        for &temperature in &temperatures {
            let cp = heat_capacity_model(props, temperature, cp_noise.sample(rng));
            let entropy = entropy_model(props, temperature, entropy_noise.sample(rng));
            let enthalpy = enthalpy_noise.sample(rng);
            samples.push(TrainingSample::new(
                compound,
                temperature,
                cp,
                Some(entropy),
                Some(enthalpy),
                true,
            ));
        }
    }
    info!("Generated {} synthetic samples", samples.len());
    Ok(samples)
}
