use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::parse_iso_date;
use crate::costing::constants::DEFAULT_CORRECTION_FACTOR;

/// A stock item and the authoritative unit cost for an ingredient.
///
/// Matched to recipe ingredients by case-insensitive name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub quantity: f64,

    pub unit: String,

    #[serde(default)]
    pub low_stock_threshold: f64,

    /// Cost of one `unit` of this item.
    #[serde(default)]
    pub cost_per_unit: f64,

    /// Usable-yield multiplier from a trim test. Absent means 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction_factor: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,

    #[serde(default)]
    pub purchase_date: String,

    #[serde(default)]
    pub expiry_date: String,
}

impl InventoryItem {
    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Correction factor, defaulting to 1.0 when absent or zero.
    #[inline]
    pub fn correction_factor(&self) -> f64 {
        match self.correction_factor {
            Some(f) if f != 0.0 => f,
            _ => DEFAULT_CORRECTION_FACTOR,
        }
    }

    /// Cost per unit after applying the correction factor.
    #[inline]
    pub fn real_cost_per_unit(&self) -> f64 {
        self.cost_per_unit * self.correction_factor()
    }

    /// A trim test can only lose mass, so a factor below 1.0 is suspect.
    pub fn has_suspect_correction(&self) -> bool {
        self.correction_factor() < 1.0
    }

    pub fn expiry(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.expiry_date)
    }
}
