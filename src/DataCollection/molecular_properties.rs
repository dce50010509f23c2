/// Static molecular descriptors joined to every training row, and the numeric compound
/// encoding used as a categorical feature.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MolecularProperties {
    /// g/mol
    pub molecular_weight: f64,
    pub n_atoms: u32,
    /// 1 for polar molecules, 0 otherwise
    pub is_polar: u8,
}

/// properties given to compounds missing from the table
pub const DEFAULT_PROPERTIES: MolecularProperties = MolecularProperties {
    molecular_weight: 50.0,
    n_atoms: 5,
    is_polar: 0,
};

const fn props(molecular_weight: f64, n_atoms: u32, is_polar: u8) -> MolecularProperties {
    MolecularProperties {
        molecular_weight,
        n_atoms,
        is_polar,
    }
}

/// formula -> descriptors; also the compound set of the synthetic generator
pub const MOLECULAR_PROPERTIES: [(&str, MolecularProperties); 10] = [
    ("H2O", props(18.015, 3, 1)),
    ("CO2", props(44.01, 3, 0)),
    ("CH4", props(16.04, 5, 0)),
    ("NH3", props(17.03, 4, 1)),
    ("C2H5OH", props(46.07, 9, 1)),
    ("N2", props(28.01, 2, 0)),
    ("O2", props(32.00, 2, 0)),
    ("C6H6", props(78.11, 12, 0)),
    ("C8H18", props(114.23, 26, 0)),
    ("NaCl", props(58.44, 2, 1)),
];

/// Looks the compound up by exact key. Common names ("water") are not resolved to
/// formulas and receive `DEFAULT_PROPERTIES`.
pub fn molecular_properties(compound: &str) -> MolecularProperties {
    MOLECULAR_PROPERTIES
        .iter()
        .find(|(formula, _)| *formula == compound)
        .map_or(DEFAULT_PROPERTIES, |(_, properties)| *properties)
}

/// 64-bit FNV-1a over the UTF-8 bytes of the string
pub fn stable_hash(text: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    text.bytes().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

/// Numeric compound encoding in `0..1000`. Reproducible across runs, but distinct
/// names may share an id.
pub fn compound_id(compound: &str) -> u32 {
    (stable_hash(compound) % 1000) as u32
}
