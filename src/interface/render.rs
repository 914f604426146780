use crate::costing::{
    cost_per_serving, BudgetReport, CostBreakdown, CostStatus, RecipeCostRow, RotationRow,
    StockValueReport, WasteReport, YieldInput, YieldMetrics,
};
use crate::models::{parse_iso_date, Recipe, SavedMenu, YieldTest};
use crate::state::{AlertKind, InventoryIndex, StockAlert};

/// Calendar date of an ISO timestamp, or the raw text when it has none.
fn day_of(value: &str) -> String {
    parse_iso_date(value)
        .map(|d| d.to_string())
        .unwrap_or_else(|| value.to_string())
}

fn status_note(status: CostStatus) -> &'static str {
    match status {
        CostStatus::Priced => "",
        CostStatus::NotInInventory => "not in inventory",
        CostStatus::Unpriced => "no cost set",
        CostStatus::Unconvertible => "units not convertible",
    }
}

/// Display all recipes with batch and per-serving cost.
pub fn display_recipe_costs(rows: &[RecipeCostRow], guests: u32) {
    if rows.is_empty() {
        println!("No recipes found.");
        return;
    }

    println!();
    println!("=== Recipe Costs ({} guests) ===", guests);
    println!();

    let max_name_len = rows.iter().map(|r| r.recipe.name.len()).max().unwrap_or(10);

    for row in rows {
        println!(
            "  {:<width$}  {:>3} serv | batch {:>12.2} | serving {:>10.2} | guests {:>12.2}",
            row.recipe.name,
            row.recipe.servings,
            row.cost.total_cost,
            row.cost.cost_per_serving,
            row.for_guests(guests),
            width = max_name_len
        );
    }

    println!();
}

/// Display what drives a recipe's cost.
pub fn display_breakdown(recipe: &Recipe, breakdown: &CostBreakdown, index: &InventoryIndex) {
    println!();
    println!("=== Cost Breakdown: {} ===", recipe.name);
    println!();

    if breakdown.is_incomplete() {
        println!("Incomplete cost data: none of the ingredients could be costed.");
        println!("Check that they exist in inventory with a cost per unit.");
        println!();
    }

    let max_name_len = breakdown
        .items
        .iter()
        .map(|s| s.cost.name.len())
        .max()
        .unwrap_or(10);

    for share in &breakdown.items {
        let c = &share.cost;
        let unit_cost = if c.real_cost_per_unit > 0.0 {
            format!("{:.2} / {}", c.real_cost_per_unit, c.unit)
        } else {
            "N/A".to_string()
        };

        let mut note = status_note(c.status).to_string();
        if c.status == CostStatus::NotInInventory {
            let suggestions = index.suggestions(&c.name);
            if !suggestions.is_empty() {
                note = format!("{} (did you mean: {}?)", note, suggestions.join(", "));
            }
        }

        println!(
            "  {:<width$}  {:>18} | {:>12.2} | {:>6.2}%  {}",
            c.name,
            unit_cost,
            c.cost,
            share.percentage,
            note,
            width = max_name_len
        );
    }

    println!();
    println!("--- Summary ---");
    println!("Total cost: {:.2}", breakdown.total_cost);
    println!(
        "Cost per serving: {:.2}",
        cost_per_serving(breakdown.total_cost, recipe.servings)
    );
    println!();
}

/// Display each menu's cost per guest.
pub fn display_menu_costs(rows: &[(&SavedMenu, f64)], guests: u32) {
    if rows.is_empty() {
        println!("No saved menus found.");
        return;
    }

    println!();
    println!("=== Menu Costs ===");
    println!();

    let max_name_len = rows.iter().map(|(m, _)| m.name.len()).max().unwrap_or(10);

    for (menu, per_guest) in rows {
        println!(
            "  {:<width$}  {:>2} dishes | per guest {:>10.2} | {} guests {:>12.2}",
            menu.name,
            menu.recipe_ids.len(),
            per_guest,
            guests,
            per_guest * guests as f64,
            width = max_name_len
        );
    }

    println!();
}

/// Display the derived figures of a trim test.
pub fn display_yield(input: &YieldInput, metrics: &YieldMetrics) {
    println!();
    println!("=== Yield Test ===");
    println!();
    for line in yield_lines(input, metrics) {
        println!("{}", line);
    }
    println!();
}

/// Lines of the yield test summary. The real net cost is shown with the
/// factor rounded to two decimals and, next to it, with the raw factor.
fn yield_lines(input: &YieldInput, metrics: &YieldMetrics) -> Vec<String> {
    vec![
        format!("Gross weight:          {:.3} kg", input.gross_weight_kg),
        format!("Net weight:            {:.3} kg", input.net_weight_kg),
        format!("Waste weight:          {:.3} kg", metrics.waste_weight_kg),
        format!("Yield:                 {:.2}%", metrics.yield_percentage),
        format!("Correction factor:     {:.4}", metrics.correction_factor),
        format!("Cost per kg (gross):   {:.2}", input.cost_per_kg_gross),
        format!("Real cost per kg net:  {:.2}", metrics.real_cost_per_kg_net),
        format!(
            "  (unrounded factor):  {:.2}",
            metrics.unrounded_real_cost_per_kg_net
        ),
    ]
}

/// Display stored trim tests with recomputed figures.
pub fn display_yield_tests(tests: &[YieldTest]) {
    if tests.is_empty() {
        println!("No yield tests recorded.");
        return;
    }

    println!();
    println!("=== Yield Tests ({} tests) ===", tests.len());
    println!();

    for test in tests {
        let m = test.metrics();
        println!(
            "  {:<10} {} - {:.2}% yield, factor {:.2}, gross {:.2}/kg => net {:.2}/kg",
            day_of(&test.date),
            test.ingredient_name,
            m.yield_percentage,
            m.correction_factor,
            test.cost_per_kg_gross,
            m.real_cost_per_kg_net
        );
    }

    println!();
}

/// Display the waste cost report.
pub fn display_waste_report(report: &WasteReport) {
    println!();
    println!("=== Waste Cost {} .. {} ===", report.start, report.end);
    println!();

    if report.entries.is_empty() {
        println!("No waste logged in this period.");
        println!();
        return;
    }

    for e in &report.entries {
        println!(
            "  {:<10} {:<20} {:>8} {:<8} {:<22} {:>12.2}",
            day_of(&e.entry.date),
            e.entry.ingredient,
            e.entry.quantity,
            e.entry.unit,
            e.entry.reason,
            e.cost.cost
        );
    }

    println!();
    println!("--- By reason ---");
    for (reason, cost) in &report.by_reason {
        println!("  {:<22} {:>12.2}", reason, cost);
    }

    println!();
    println!("--- Top ingredients ---");
    for (name, cost) in &report.by_ingredient {
        println!("  {:<22} {:>12.2}", name, cost);
    }

    println!();
    println!("Total waste cost: {:.2}", report.total_cost);
    println!();
}

/// Display planned spend against budget.
pub fn display_budget_report(report: &BudgetReport) {
    println!();
    println!("=== Budget {} .. {} ===", report.start, report.end);
    println!();

    for row in &report.rows {
        println!("  {:<16} {:>14.2}", row.label, row.cost);
    }

    println!();
    println!("--- Summary ---");
    println!("Actual cost: {:.2}", report.total_actual);
    println!("Budget:      {:.2}", report.budget);
    let sign = if report.variance >= 0.0 { "+" } else { "" };
    println!("Variance:    {}{:.2}", sign, report.variance);
    println!();
}

/// Display inventory items needing attention.
pub fn display_alerts(alerts: &[StockAlert]) {
    if alerts.is_empty() {
        println!("No inventory alerts.");
        return;
    }

    println!();
    println!("=== Inventory Alerts ({} items) ===", alerts.len());
    println!();

    for alert in alerts {
        let item = alert.item;
        let detail = match alert.kind {
            AlertKind::Expired => format!("expired {}", day_of(&item.expiry_date)),
            AlertKind::ExpiringSoon => format!("expires {}", day_of(&item.expiry_date)),
            AlertKind::LowStock => format!(
                "low stock {} / {} {}",
                item.quantity, item.low_stock_threshold, item.unit
            ),
        };
        let factor_note = if item.has_suspect_correction() {
            "  [correction factor < 1]"
        } else {
            ""
        };
        println!("  {} - {}{}", item.name, detail, factor_note);
    }

    println!();
}

/// Display stock value by category.
pub fn display_stock_value(report: &StockValueReport) {
    println!();
    println!("=== Stock Value ===");
    println!();

    if report.categories.is_empty() {
        println!("Inventory is empty.");
        println!();
        return;
    }

    for category in &report.categories {
        let name = if category.category.is_empty() {
            "(uncategorized)"
        } else {
            category.category.as_str()
        };
        println!(
            "  {:<24} {:>4} items | {:>14.2}",
            name, category.item_count, category.total_value
        );
    }

    println!();
    println!("Total stock value: {:.2}", report.total_value);
    println!();
}

/// Display days of stock at the planned pace, fastest movers first.
pub fn display_rotation(rows: &[RotationRow], window_days: i64) {
    println!();
    println!("=== Product Rotation (last {} days) ===", window_days);
    println!();

    if rows.is_empty() {
        println!("Inventory is empty.");
        println!();
        return;
    }

    let max_name_len = rows.iter().map(|r| r.item.name.len()).max().unwrap_or(10);

    for row in rows {
        let days = match row.days_of_stock {
            Some(days) => format!("{:.1} days", days),
            None => "-".to_string(),
        };
        println!(
            "  {:<width$}  stock {:>10.2} {:<6} | used {:>10.2} | {:>10} | {}",
            row.item.name,
            row.item.quantity,
            row.item.unit,
            row.consumption,
            days,
            row.rotation,
            width = max_name_len
        );
    }
    println!();
}
