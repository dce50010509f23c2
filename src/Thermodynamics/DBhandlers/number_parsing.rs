//! # Cell value extraction
//!
//! WebBook tables mix plain numbers with uncertainties ("298 ± 2"), flattened
//! powers of ten ("1.2×10^-3"), units and footnote marks. `parse_number` turns such
//! a cell into a single `f64` or reports that the cell holds no value.

use regex::Regex;
use std::sync::LazyLock;

static FIRST_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?").expect("number pattern is valid")
});

/// Extracts a numerical value from free cell text.
///
/// Uncertainty after `±` is discarded, `×10^` is read as an exponent marker.
/// If the cleaned text does not parse, the first number embedded in the original
/// text is used instead. Returns `None` for empty cells, `"-"`, text without digits and
/// values that overflow `f64`.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || text == "-" {
        return None;
    }
    let head = text.split('±').next().unwrap_or(text);
    let normalized = head
        .replace("×10^", "e")
        .replace("×10", "e")
        .replace('×', "e")
        .replace('−', "-");
    let cleaned: String = normalized
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
        .collect();

    if let Ok(value) = cleaned.parse::<f64>() {
        return value.is_finite().then_some(value);
    }
    FIRST_NUMBER
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}
