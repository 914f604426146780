mod inventory;
mod menu;
mod recipe;
mod waste;

use chrono::NaiveDate;

pub use inventory::InventoryItem;
pub use menu::{Budgets, DayPlan, SavedMenu, WeeklyPlan};
pub use recipe::{Ingredient, Recipe};
pub use waste::{WasteLogEntry, WasteReason};
pub use yield_test::YieldTest;

/// Parse the calendar date out of an ISO string ("2024-05-01" or
/// "2024-05-01T10:00:00.000Z").
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
