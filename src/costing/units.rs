use std::fmt;

use crate::costing::constants::METRIC_FACTOR;
use crate::error::ConversionError;

/// A measurement unit after synonym normalization.
///
/// Anything that is not a known metric synonym becomes its own unit
/// (`Other("unidad")`), convertible only to itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CanonicalUnit {
    Kilogram,
    Gram,
    Liter,
    Milliliter,
    Other(String),
}

impl CanonicalUnit {
    pub fn as_str(&self) -> &str {
        match self {
            CanonicalUnit::Kilogram => "kg",
            CanonicalUnit::Gram => "g",
            CanonicalUnit::Liter => "L",
            CanonicalUnit::Milliliter => "ml",
            CanonicalUnit::Other(unit) => unit,
        }
    }
}

impl fmt::Display for CanonicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Map a free-text unit to its canonical form.
///
/// Case-insensitive and whitespace-trimmed. Unknown units are returned
/// lower-cased rather than rejected.
pub fn normalize_unit(unit: &str) -> CanonicalUnit {
    let u = unit.trim().to_lowercase();
    match u.as_str() {
        "kg" | "k" | "kilo" | "kilos" => CanonicalUnit::Kilogram,
        "g" | "gr" | "gramo" | "gramos" => CanonicalUnit::Gram,
        "l" | "litro" | "litros" => CanonicalUnit::Liter,
        "ml" | "mililitro" | "mililitros" => CanonicalUnit::Milliliter,
        _ => CanonicalUnit::Other(u),
    }
}

/// Convert a quantity between units.
///
/// Only identity, g <-> kg and ml <-> L are defined. Every other pair is
/// an error; no factor is guessed.
pub fn convert_units(
    quantity: f64,
    from_unit: &str,
    to_unit: &str,
) -> Result<f64, ConversionError> {
    use CanonicalUnit::*;

    let from = normalize_unit(from_unit);
    let to = normalize_unit(to_unit);

    if from == to {
        return Ok(quantity);
    }

    match (&from, &to) {
        (Gram, Kilogram) | (Milliliter, Liter) => Ok(quantity / METRIC_FACTOR),
        (Kilogram, Gram) | (Liter, Milliliter) => Ok(quantity * METRIC_FACTOR),
        _ => Err(ConversionError {
            quantity,
            from: from_unit.to_string(),
            to: to_unit.to_string(),
        }),
    }
}
