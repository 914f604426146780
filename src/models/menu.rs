use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named set of recipes served together. Every guest gets one
/// serving of each listed recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedMenu {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub recipe_ids: Vec<String>,
}

impl SavedMenu {
    /// Matches either the id or the name (case-insensitive).
    pub fn matches(&self, id_or_name: &str) -> bool {
        self.id == id_or_name || self.name.to_lowercase() == id_or_name.to_lowercase()
    }
}

/// Menus planned for one calendar day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayPlan {
    /// SavedMenu id served at lunch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<String>,

    /// SavedMenu id served at dinner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<String>,

    #[serde(default)]
    pub guests: u32,
}

impl DayPlan {
    /// Menu ids planned for the day, lunch first.
    pub fn menu_ids(&self) -> impl Iterator<Item = &str> {
        self.lunch.iter().chain(self.dinner.iter()).map(String::as_str)
    }
}

/// Day plans keyed by date.
pub type WeeklyPlan = BTreeMap<NaiveDate, DayPlan>;

/// Spending targets per reporting period.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Budgets {
    #[serde(default)]
    pub daily: f64,

    #[serde(default)]
    pub weekly: f64,

    #[serde(default)]
    pub monthly: f64,
}
