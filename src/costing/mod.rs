pub mod calculations;
pub mod constants;
pub mod reports;
pub mod units;
pub mod yields;

pub use calculations::{
    cost_per_serving, ingredient_cost, ingredient_cost_breakdown, menu_cost_per_guest,
    price_quantity, recipe_cost, recipe_cost_table, CostBreakdown, CostStatus, IngredientCost,
    IngredientCostShare, RecipeCost, RecipeCostRow,
};
pub use constants::*;
pub use reports::{
    budget_report, day_cost, planned_consumption, rotation_report, stock_value,
    stock_value_report, waste_cost_report, waste_entry_cost, BudgetReport, BudgetRow,
    CategoryValue, CostedWasteEntry, ReportPeriod, Rotation, RotationRow, StockValueReport,
    WasteReport,
};
pub use units::{convert_units, normalize_unit, CanonicalUnit};
pub use yields::{calculate_yield, cost_per_kg_from_inventory, YieldInput, YieldMetrics};
