//! # WebBook table parsing
//!
//! ## Aim
//! Turns the HTML tables of a WebBook data page into numeric records. Two passes run
//! over the same document:
//! - thermodynamic pass: tables whose header cells mention a thermodynamic keyword are
//!   read row by row into `ThermodynamicRecord`s (T, Cp, S, G, H-H298);
//! - phase-change pass: two-column "label | value" rows of any table are matched
//!   against boiling/melting keywords into `PhaseChangeProperties`.
//!
//! ## Column heuristic
//! Thermodynamic columns are mapped by position, not by header text:
//! column 0 is the temperature, then Cp, S, G and H-H298. Tables that reorder or drop
//! columns are read wrongly; every rejected row is logged at debug level with the
//! reason so that such pages can be audited.

use super::number_parsing::parse_number;
use log::debug;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("static selector"));
static HEADER_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th").expect("static selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("static selector"));
static DATA_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("static selector"));

/// A table qualifies as thermodynamic if its joined header text contains any of these.
pub const THERMO_KEYWORDS: [&str; 9] = [
    "temperature",
    "heat capacity",
    "entropy",
    "cp°",
    "cp",
    "enthalpy",
    "gibbs",
    "janaf",
    "thermodynamic",
];
/// Accepted temperature window at parse time, K
pub const PARSE_T_MIN: f64 = 50.0;
pub const PARSE_T_MAX: f64 = 5000.0;

/// one temperature-indexed row of a thermodynamic table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermodynamicRecord {
    /// K
    pub temperature: f64,
    /// J/(mol·K)
    pub heat_capacity: f64,
    pub entropy: Option<f64>,
    pub enthalpy_minus_h298: Option<f64>,
    pub gibbs_free_energy: Option<f64>,
}

/// Scalar phase transition data. Absent fields were not found on the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseChangeProperties {
    #[serde(rename = "boiling_point_K", default, skip_serializing_if = "Option::is_none")]
    pub boiling_point_k: Option<f64>,
    #[serde(rename = "melting_point_K", default, skip_serializing_if = "Option::is_none")]
    pub melting_point_k: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_of_vaporization: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_of_fusion: Option<f64>,
}

impl PhaseChangeProperties {
    pub fn is_empty(&self) -> bool {
        self.boiling_point_k.is_none()
            && self.melting_point_k.is_none()
            && self.heat_of_vaporization.is_none()
            && self.heat_of_fusion.is_none()
    }

    fn set(&mut self, property: PhaseProperty, value: f64) {
        match property {
            PhaseProperty::BoilingPoint => self.boiling_point_k = Some(value),
            PhaseProperty::HeatOfVaporization => self.heat_of_vaporization = Some(value),
            PhaseProperty::MeltingPoint => self.melting_point_k = Some(value),
            PhaseProperty::HeatOfFusion => self.heat_of_fusion = Some(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseProperty {
    BoilingPoint,
    HeatOfVaporization,
    MeltingPoint,
    HeatOfFusion,
}

/// Why a row of a thermodynamic table was not turned into a record.
#[derive(Debug, Clone, PartialEq)]
pub enum RowRejection {
    TooFewCells(usize),
    NoTemperature,
    TemperatureOutOfRange(f64),
    NoHeatCapacity,
    NonPositiveHeatCapacity(f64),
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RowRejection::TooFewCells(n) => write!(f, "only {} data cell(s)", n),
            RowRejection::NoTemperature => write!(f, "first column holds no temperature"),
            RowRejection::TemperatureOutOfRange(t) => write!(
                f,
                "temperature {} K outside [{}, {}] K",
                t, PARSE_T_MIN, PARSE_T_MAX
            ),
            RowRejection::NoHeatCapacity => write!(f, "second column holds no heat capacity"),
            RowRejection::NonPositiveHeatCapacity(cp) => {
                write!(f, "heat capacity {} is not positive", cp)
            }
        }
    }
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn row_cells(row: ElementRef) -> Vec<String> {
    row.select(&DATA_CELL).map(cell_text).collect()
}

/// true if the `<th>` text of the table names a thermodynamic quantity
pub fn is_thermodynamic_table(table: ElementRef) -> bool {
    let headers: Vec<String> = table.select(&HEADER_CELL).map(cell_text).collect();
    if headers.is_empty() {
        return false;
    }
    let header_text = headers.join(" ").to_lowercase();
    THERMO_KEYWORDS
        .iter()
        .any(|keyword| header_text.contains(keyword))
}

/// Converts the cell texts of one row into a record using the positional mapping
/// T | Cp | S | G | H-H298.
pub fn parse_thermo_row(cells: &[String]) -> Result<ThermodynamicRecord, RowRejection> {
    if cells.len() < 2 {
        return Err(RowRejection::TooFewCells(cells.len()));
    }
    let temperature = parse_number(&cells[0]).ok_or(RowRejection::NoTemperature)?;
    if !(PARSE_T_MIN..=PARSE_T_MAX).contains(&temperature) {
        return Err(RowRejection::TemperatureOutOfRange(temperature));
    }
    let column = |i: usize| cells.get(i).and_then(|text| parse_number(text));

    let heat_capacity = column(1).ok_or(RowRejection::NoHeatCapacity)?;
    if heat_capacity <= 0.0 {
        return Err(RowRejection::NonPositiveHeatCapacity(heat_capacity));
    }
    Ok(ThermodynamicRecord {
        temperature,
        heat_capacity,
        entropy: column(2),
        gibbs_free_energy: column(3),
        enthalpy_minus_h298: column(4),
    })
}

/// Reads every qualifying table of the page. Returns `None` when no row anywhere
/// produced a record.
pub fn parse_thermodynamic_tables(document: &Html) -> Option<Vec<ThermodynamicRecord>> {
    let mut records = Vec::new();
    for (table_index, table) in document.select(&TABLE).enumerate() {
        if !is_thermodynamic_table(table) {
            debug!("table {} skipped: no thermodynamic header", table_index);
            continue;
        }
        // first row is the header
        for (row_index, row) in table.select(&ROW).enumerate().skip(1) {
            let cells = row_cells(row);
            match parse_thermo_row(&cells) {
                Ok(record) => records.push(record),
                Err(reason) => debug!(
                    "table {} row {} skipped: {} {:?}",
                    table_index, row_index, reason, cells
                ),
            }
        }
    }
    if records.is_empty() {
        None
    } else {
        Some(records)
    }
}

/// Maps a lowercased row label to the phase property it names.
pub fn classify_phase_label(label: &str) -> Option<PhaseProperty> {
    let is_point = label.contains("temperature") || label.contains("point");
    let is_enthalpy = label.contains("enthalpy");
    if label.contains("boiling") || label.contains("vaporization") {
        if is_point {
            Some(PhaseProperty::BoilingPoint)
        } else if is_enthalpy {
            Some(PhaseProperty::HeatOfVaporization)
        } else {
            None
        }
    } else if label.contains("melting") || label.contains("fusion") {
        if is_point {
            Some(PhaseProperty::MeltingPoint)
        } else if is_enthalpy {
            Some(PhaseProperty::HeatOfFusion)
        } else {
            None
        }
    } else {
        None
    }
}

/// Scans all "label | value" rows of the page; a later row overwrites an earlier
/// one of the same kind.
pub fn parse_phase_change_data(document: &Html) -> PhaseChangeProperties {
    let mut phase_data = PhaseChangeProperties::default();
    for table in document.select(&TABLE) {
        for row in table.select(&ROW) {
            let cells = row_cells(row);
            if cells.len() < 2 {
                continue;
            }
            let Some(value) = parse_number(&cells[1]) else {
                continue;
            };
            if let Some(property) = classify_phase_label(&cells[0].to_lowercase()) {
                phase_data.set(property, value);
            }
        }
    }
    phase_data
}
