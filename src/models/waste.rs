use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::parse_iso_date;

/// Why food was thrown away. Wire names match the values the kitchen logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WasteReason {
    #[serde(rename = "Expirado")]
    Expired,

    #[serde(rename = "Error de preparación")]
    PrepError,

    #[serde(rename = "Deterioro")]
    Spoilage,

    #[serde(rename = "Sobreproducción")]
    Overproduction,

    #[serde(rename = "Dañado en entrega")]
    DamagedInDelivery,
}

impl WasteReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteReason::Expired => "Expirado",
            WasteReason::PrepError => "Error de preparación",
            WasteReason::Spoilage => "Deterioro",
            WasteReason::Overproduction => "Sobreproducción",
            WasteReason::DamagedInDelivery => "Dañado en entrega",
        }
    }
}

impl fmt::Display for WasteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One logged disposal of an ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteLogEntry {
    pub id: String,

    pub date: String,

    #[serde(default)]
    pub dish: String,

    pub ingredient: String,

    pub quantity: f64,

    pub unit: String,

    pub reason: WasteReason,

    #[serde(default)]
    pub observations: String,
}

impl WasteLogEntry {
    pub fn logged_on(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.date)
    }
}
