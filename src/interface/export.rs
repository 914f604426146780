use std::path::Path;

use crate::costing::{CostBreakdown, WasteReport};
use crate::error::Result;

/// Round a cost to two decimals for export.
fn cents(value: f64) -> String {
    format!("{:.2}", value)
}

/// Write a recipe cost breakdown to a CSV file.
pub fn write_breakdown_csv(breakdown: &CostBreakdown, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["ingredient", "real_cost_per_unit", "unit", "cost", "percentage"])?;

    for share in &breakdown.items {
        let c = &share.cost;
        wtr.write_record([
            c.name.clone(),
            cents(c.real_cost_per_unit),
            c.unit.clone(),
            cents(c.cost),
            format!("{:.2}", share.percentage),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the costed entries of a waste report to a CSV file.
pub fn write_waste_csv(report: &WasteReport, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["date", "dish", "ingredient", "quantity", "unit", "reason", "cost"])?;

    for e in &report.entries {
        wtr.write_record([
            e.entry.date.clone(),
            e.entry.dish.clone(),
            e.entry.ingredient.clone(),
            e.entry.quantity.to_string(),
            e.entry.unit.clone(),
            e.entry.reason.to_string(),
            cents(e.cost.cost),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
