//! Period rollups built on the cost engine: waste cost, planned menu
//! spend against budget, and stock value and rotation.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::costing::calculations::{menu_cost_per_guest, price_quantity, IngredientCost};
use crate::costing::constants::{
    HIGH_ROTATION_DAYS, MEDIUM_ROTATION_DAYS, ROTATION_WINDOW_DAYS, WASTE_TOP_INGREDIENTS,
};
use crate::costing::units::convert_units;
use crate::models::{
    Budgets, DayPlan, InventoryItem, Recipe, SavedMenu, WasteLogEntry, WasteReason, WeeklyPlan,
};
use crate::state::InventoryIndex;

/// Reporting window around an anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Daily,
    /// Monday through Sunday.
    Weekly,
    /// Calendar month.
    Monthly,
}

impl ReportPeriod {
    /// First and last day (inclusive) of the period containing `anchor`.
    pub fn range(&self, anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            ReportPeriod::Daily => (anchor, anchor),
            ReportPeriod::Weekly => {
                let start = anchor - Duration::days(anchor.weekday().num_days_from_monday() as i64);
                (start, start + Duration::days(6))
            }
            ReportPeriod::Monthly => {
                let start = anchor - Duration::days(anchor.day0() as i64);
                let next_month = if start.month() == 12 {
                    NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
                };
                let end = next_month
                    .map(|d| d - Duration::days(1))
                    .unwrap_or(start);
                (start, end)
            }
        }
    }

    pub fn budget(&self, budgets: &Budgets) -> f64 {
        match self {
            ReportPeriod::Daily => budgets.daily,
            ReportPeriod::Weekly => budgets.weekly,
            ReportPeriod::Monthly => budgets.monthly,
        }
    }
}

/// A waste log entry with its resolved cost.
#[derive(Debug, Clone)]
pub struct CostedWasteEntry<'a> {
    pub entry: &'a WasteLogEntry,
    pub cost: IngredientCost,
}

#[derive(Debug, Clone)]
pub struct WasteReport<'a> {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub entries: Vec<CostedWasteEntry<'a>>,
    pub total_cost: f64,
    /// Cost per reason, largest first.
    pub by_reason: Vec<(WasteReason, f64)>,
    /// Most costly ingredients, largest first.
    pub by_ingredient: Vec<(String, f64)>,
}

/// Cost of a waste log entry, priced like a recipe ingredient.
pub fn waste_entry_cost(entry: &WasteLogEntry, index: &InventoryIndex) -> IngredientCost {
    price_quantity(&entry.ingredient, entry.quantity, &entry.unit, index)
}

fn sort_desc<K>(totals: impl IntoIterator<Item = (K, f64)>) -> Vec<(K, f64)> {
    let mut rows: Vec<(K, f64)> = totals.into_iter().collect();
    rows.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    rows
}

/// Cost the waste logged during the period containing `anchor`.
///
/// Entries with an unreadable date are left out.
pub fn waste_cost_report<'a>(
    logs: &'a [WasteLogEntry],
    index: &InventoryIndex,
    period: ReportPeriod,
    anchor: NaiveDate,
) -> WasteReport<'a> {
    let (start, end) = period.range(anchor);

    let entries: Vec<CostedWasteEntry<'a>> = logs
        .iter()
        .filter(|entry| match entry.logged_on() {
            Some(date) => date >= start && date <= end,
            None => {
                debug!(id = %entry.id, date = %entry.date, "skipping waste entry without a date");
                false
            }
        })
        .map(|entry| CostedWasteEntry {
            entry,
            cost: waste_entry_cost(entry, index),
        })
        .collect();

    let total_cost = entries.iter().map(|e| e.cost.cost).sum();

    let mut reasons: HashMap<WasteReason, f64> = HashMap::new();
    let mut ingredients: HashMap<String, f64> = HashMap::new();
    for e in &entries {
        *reasons.entry(e.entry.reason).or_insert(0.0) += e.cost.cost;
        *ingredients.entry(e.entry.ingredient.clone()).or_insert(0.0) += e.cost.cost;
    }

    let by_reason = sort_desc(reasons);
    let mut by_ingredient = sort_desc(ingredients);
    by_ingredient.truncate(WASTE_TOP_INGREDIENTS);

    WasteReport {
        start,
        end,
        entries,
        total_cost,
        by_reason,
        by_ingredient,
    }
}

/// Menus keyed by id. On duplicate ids the last occurrence wins.
fn menu_map(menus: &[SavedMenu]) -> HashMap<&str, &SavedMenu> {
    menus.iter().map(|m| (m.id.as_str(), m)).collect()
}

fn planned_cost(
    plan: &DayPlan,
    menus: &HashMap<&str, &SavedMenu>,
    recipes: &[Recipe],
    index: &InventoryIndex,
) -> f64 {
    plan.menu_ids()
        .filter_map(|id| menus.get(id))
        .map(|menu| menu_cost_per_guest(menu, recipes, index) * plan.guests as f64)
        .sum()
}

/// Planned spend for one day: each planned menu costed per guest, times guests.
pub fn day_cost(
    plan: &DayPlan,
    menus: &[SavedMenu],
    recipes: &[Recipe],
    index: &InventoryIndex,
) -> f64 {
    planned_cost(plan, &menu_map(menus), recipes, index)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRow {
    pub label: String,
    pub cost: f64,
}

#[derive(Debug, Clone)]
pub struct BudgetReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub rows: Vec<BudgetRow>,
    pub total_actual: f64,
    pub budget: f64,
    /// Budget minus actual; negative means overspent.
    pub variance: f64,
}

/// Week of the month, counting weeks that start on Sunday.
fn week_of_month(date: NaiveDate) -> u32 {
    let first = date - Duration::days(date.day0() as i64);
    let offset = first.weekday().num_days_from_sunday();
    (date.day() + offset).div_ceil(7)
}

/// Planned spend for the period containing `anchor`, compared to budget.
///
/// Daily and weekly reports have one row per day; monthly reports have one
/// row per week of the month.
pub fn budget_report(
    weekly_plan: &WeeklyPlan,
    menus: &[SavedMenu],
    recipes: &[Recipe],
    index: &InventoryIndex,
    period: ReportPeriod,
    anchor: NaiveDate,
    budgets: &Budgets,
) -> BudgetReport {
    let (start, end) = period.range(anchor);
    let menus = menu_map(menus);

    let cost_on = |date: NaiveDate| -> f64 {
        weekly_plan
            .get(&date)
            .map(|plan| planned_cost(plan, &menus, recipes, index))
            .unwrap_or(0.0)
    };

    let days = start.iter_days().take_while(|d| *d <= end);

    let rows: Vec<BudgetRow> = match period {
        ReportPeriod::Daily | ReportPeriod::Weekly => days
            .map(|date| BudgetRow {
                label: date.format("%a %Y-%m-%d").to_string(),
                cost: cost_on(date),
            })
            .collect(),
        ReportPeriod::Monthly => {
            let mut weeks: BTreeMap<u32, f64> = BTreeMap::new();
            for date in days {
                *weeks.entry(week_of_month(date)).or_insert(0.0) += cost_on(date);
            }
            weeks
                .into_iter()
                .map(|(week, cost)| BudgetRow {
                    label: format!("Week {week}"),
                    cost,
                })
                .collect()
        }
    };

    let total_actual: f64 = rows.iter().map(|r| r.cost).sum();
    let budget = period.budget(budgets);

    BudgetReport {
        start,
        end,
        rows,
        total_actual,
        budget,
        variance: budget - total_actual,
    }
}

/// Stock value of one inventory category.
#[derive(Debug, Clone)]
pub struct CategoryValue {
    pub category: String,
    pub item_count: usize,
    pub total_value: f64,
}

#[derive(Debug, Clone)]
pub struct StockValueReport {
    /// Most valuable category first.
    pub categories: Vec<CategoryValue>,
    pub total_value: f64,
}

/// Value of the stock on hand at the corrected unit cost.
pub fn stock_value(item: &InventoryItem) -> f64 {
    item.quantity * item.real_cost_per_unit()
}

/// Value every inventory item and group the result by category.
pub fn stock_value_report(items: &[InventoryItem]) -> StockValueReport {
    let mut by_category: HashMap<&str, CategoryValue> = HashMap::new();
    for item in items {
        let entry = by_category
            .entry(item.category.as_str())
            .or_insert_with(|| CategoryValue {
                category: item.category.clone(),
                item_count: 0,
                total_value: 0.0,
            });
        entry.item_count += 1;
        entry.total_value += stock_value(item);
    }

    let mut categories: Vec<CategoryValue> = by_category.into_values().collect();
    categories.sort_by(|a, b| {
        b.total_value
            .total_cmp(&a.total_value)
            .then_with(|| a.category.cmp(&b.category))
    });
    let total_value = categories.iter().map(|c| c.total_value).sum();

    StockValueReport {
        categories,
        total_value,
    }
}

/// How quickly an item is being used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// Under a week of stock at the planned pace.
    High,
    Medium,
    /// A month or more of stock, or stock that nothing consumes.
    Low,
    /// Nothing planned and nothing on hand.
    NoMovement,
}

impl Rotation {
    pub fn as_str(&self) -> &str {
        match self {
            Rotation::High => "high",
            Rotation::Medium => "medium",
            Rotation::Low => "low",
            Rotation::NoMovement => "no movement",
        }
    }

    fn classify(quantity: f64, days_of_stock: Option<f64>) -> Self {
        match days_of_stock {
            Some(days) if days < HIGH_ROTATION_DAYS => Rotation::High,
            Some(days) if days < MEDIUM_ROTATION_DAYS => Rotation::Medium,
            Some(_) => Rotation::Low,
            None if quantity > 0.0 => Rotation::Low,
            None => Rotation::NoMovement,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RotationRow<'a> {
    pub item: &'a InventoryItem,
    /// Planned consumption over the window, in the item's unit.
    pub consumption: f64,
    pub average_daily: f64,
    /// None when nothing is consumed.
    pub days_of_stock: Option<f64>,
    pub rotation: Rotation,
}

/// Planned consumption per inventory key over the window ending on `today`,
/// expressed in each item's own unit.
///
/// Recipes with zero servings and lines whose unit cannot be converted to
/// the item's unit are skipped.
pub fn planned_consumption(
    weekly_plan: &WeeklyPlan,
    menus: &[SavedMenu],
    recipes: &[Recipe],
    index: &InventoryIndex,
    today: NaiveDate,
) -> HashMap<String, f64> {
    let menus = menu_map(menus);
    let recipes: HashMap<&str, &Recipe> = recipes.iter().map(|r| (r.id.as_str(), r)).collect();
    let mut consumption: HashMap<String, f64> = HashMap::new();

    for back in 0..ROTATION_WINDOW_DAYS {
        let date = today - Duration::days(back);
        let Some(plan) = weekly_plan.get(&date) else {
            continue;
        };

        let planned = plan
            .menu_ids()
            .filter_map(|id| menus.get(id).copied())
            .flat_map(|menu| menu.recipe_ids.iter())
            .filter_map(|id| recipes.get(id.as_str()).copied());

        for recipe in planned {
            if recipe.servings == 0 {
                continue;
            }
            let scale = plan.guests as f64 / recipe.servings as f64;
            for ingredient in &recipe.ingredients {
                let Some(item) = index.lookup(&ingredient.name).item() else {
                    continue;
                };
                match convert_units(ingredient.quantity, &ingredient.unit, &item.unit) {
                    Ok(quantity) => {
                        *consumption.entry(item.key()).or_insert(0.0) += quantity * scale;
                    }
                    Err(e) => debug!(recipe = %recipe.name, "skipping consumption: {}", e),
                }
            }
        }
    }

    consumption
}

/// Days of stock left for every item at the pace of the recent plan,
/// highest consumption first.
pub fn rotation_report<'a>(
    items: &'a [InventoryItem],
    weekly_plan: &WeeklyPlan,
    menus: &[SavedMenu],
    recipes: &[Recipe],
    today: NaiveDate,
) -> Vec<RotationRow<'a>> {
    let index = InventoryIndex::new(items);
    let consumption = planned_consumption(weekly_plan, menus, recipes, &index, today);

    let mut rows: Vec<RotationRow> = items
        .iter()
        .map(|item| {
            let consumed = consumption.get(&item.key()).copied().unwrap_or(0.0);
            let average_daily = consumed / ROTATION_WINDOW_DAYS as f64;
            let days_of_stock = (average_daily > 0.0).then(|| item.quantity / average_daily);
            RotationRow {
                item,
                consumption: consumed,
                average_daily,
                days_of_stock,
                rotation: Rotation::classify(item.quantity, days_of_stock),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.consumption.total_cmp(&a.consumption));
    rows
}
