use std::collections::HashMap;

use tracing::{debug, warn};

use crate::costing::units::convert_units;
use crate::models::{Ingredient, Recipe, SavedMenu};
use crate::state::{InventoryIndex, MatchResult};

/// How an ingredient's cost was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostStatus {
    /// Matched, priced, and converted.
    Priced,
    /// No inventory item with this name.
    NotInInventory,
    /// Inventory item has no positive cost.
    Unpriced,
    /// Units cannot be converted into the inventory unit.
    Unconvertible,
}

/// Cost contribution of one ingredient line.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientCost {
    pub name: String,
    pub cost: f64,
    pub real_cost_per_unit: f64,
    /// Inventory unit `real_cost_per_unit` refers to. Empty when unmatched.
    pub unit: String,
    pub status: CostStatus,
}

impl IngredientCost {
    fn zero(name: &str, status: CostStatus) -> Self {
        Self {
            name: name.to_string(),
            cost: 0.0,
            real_cost_per_unit: 0.0,
            unit: String::new(),
            status,
        }
    }

    pub fn is_priced(&self) -> bool {
        self.status == CostStatus::Priced
    }
}

/// Totals for one recipe batch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecipeCost {
    pub total_cost: f64,
    pub cost_per_serving: f64,
}

/// One row of a recipe cost breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientCostShare {
    pub cost: IngredientCost,
    /// Share of the recipe total, 0-100.
    pub percentage: f64,
}

/// Per-ingredient costs, largest contributors first.
#[derive(Debug, Clone, Default)]
pub struct CostBreakdown {
    pub items: Vec<IngredientCostShare>,
    pub total_cost: f64,
}

impl CostBreakdown {
    /// Ingredients are listed but none of them could be costed.
    pub fn is_incomplete(&self) -> bool {
        self.total_cost == 0.0 && !self.items.is_empty()
    }

    /// Ingredients that contributed nothing, with the reason.
    pub fn unresolved(&self) -> impl Iterator<Item = &IngredientCost> {
        self.items.iter().map(|s| &s.cost).filter(|c| !c.is_priced())
    }
}

/// Price a quantity of a named ingredient against the inventory.
///
/// Shared by recipe lines and waste log entries. Never fails: a miss,
/// a non-positive cost, or an unconvertible unit yields zero cost and
/// the matching [`CostStatus`].
pub fn price_quantity(
    name: &str,
    quantity: f64,
    unit: &str,
    index: &InventoryIndex,
) -> IngredientCost {
    let item = match index.lookup(name) {
        MatchResult::Found(item) => item,
        MatchResult::NotFound => return IngredientCost::zero(name, CostStatus::NotInInventory),
    };

    if item.cost_per_unit <= 0.0 {
        return IngredientCost::zero(name, CostStatus::Unpriced);
    }

    if item.has_suspect_correction() {
        warn!(
            item = %item.name,
            factor = item.correction_factor(),
            "correction factor below 1.0"
        );
    }

    let real_cost_per_unit = item.real_cost_per_unit();

    let (cost, status) = match convert_units(quantity, unit, &item.unit) {
        Ok(converted) => (converted * real_cost_per_unit, CostStatus::Priced),
        Err(e) => {
            warn!(ingredient = %name, from = %e.from, to = %e.to, "could not convert units");
            (0.0, CostStatus::Unconvertible)
        }
    };

    IngredientCost {
        name: name.to_string(),
        cost,
        real_cost_per_unit,
        unit: item.unit.clone(),
        status,
    }
}

/// Cost of one recipe ingredient line.
pub fn ingredient_cost(ingredient: &Ingredient, index: &InventoryIndex) -> IngredientCost {
    price_quantity(&ingredient.name, ingredient.quantity, &ingredient.unit, index)
}

/// Divide a batch cost by its servings. Zero servings costs zero per serving.
#[inline]
pub fn cost_per_serving(total_cost: f64, servings: u32) -> f64 {
    if servings > 0 {
        total_cost / servings as f64
    } else {
        0.0
    }
}

/// Total batch cost and cost per serving of a recipe.
///
/// Ingredients that cannot be costed contribute zero; the rest are still summed.
pub fn recipe_cost(recipe: &Recipe, index: &InventoryIndex) -> RecipeCost {
    let total_cost: f64 = recipe
        .ingredients
        .iter()
        .map(|ing| ingredient_cost(ing, index).cost)
        .sum();

    RecipeCost {
        total_cost,
        cost_per_serving: cost_per_serving(total_cost, recipe.servings),
    }
}

/// Per-ingredient cost shares of a recipe, sorted by cost descending.
pub fn ingredient_cost_breakdown(recipe: &Recipe, index: &InventoryIndex) -> CostBreakdown {
    let costs: Vec<IngredientCost> = recipe
        .ingredients
        .iter()
        .map(|ing| ingredient_cost(ing, index))
        .collect();

    let total_cost: f64 = costs.iter().map(|c| c.cost).sum();

    let mut items: Vec<IngredientCostShare> = costs
        .into_iter()
        .map(|cost| {
            let percentage = if total_cost > 0.0 {
                cost.cost / total_cost * 100.0
            } else {
                0.0
            };
            IngredientCostShare { cost, percentage }
        })
        .collect();

    items.sort_by(|a, b| {
        b.cost
            .cost
            .partial_cmp(&a.cost.cost)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    CostBreakdown { items, total_cost }
}

/// Cost to serve one guest every recipe in the menu.
///
/// This is a sum over dishes, not an average. Recipe ids that no longer
/// exist are skipped.
pub fn menu_cost_per_guest(menu: &SavedMenu, recipes: &[Recipe], index: &InventoryIndex) -> f64 {
    let recipe_map: HashMap<&str, &Recipe> =
        recipes.iter().map(|r| (r.id.as_str(), r)).collect();

    menu.recipe_ids
        .iter()
        .filter_map(|id| {
            let recipe = recipe_map.get(id.as_str());
            if recipe.is_none() {
                debug!(menu = %menu.name, recipe_id = %id, "skipping missing recipe");
            }
            recipe
        })
        .map(|recipe| recipe_cost(recipe, index).cost_per_serving)
        .sum()
}

/// A recipe with its costs, as listed in the recipe cost table.
#[derive(Debug, Clone)]
pub struct RecipeCostRow<'a> {
    pub recipe: &'a Recipe,
    pub cost: RecipeCost,
}

impl RecipeCostRow<'_> {
    /// Projected cost of serving `guests` portions.
    pub fn for_guests(&self, guests: u32) -> f64 {
        self.cost.cost_per_serving * guests as f64
    }
}

/// Costs of all recipes, most expensive batch first.
pub fn recipe_cost_table<'a>(
    recipes: &'a [Recipe],
    index: &InventoryIndex,
) -> Vec<RecipeCostRow<'a>> {
    let mut rows: Vec<RecipeCostRow<'a>> = recipes
        .iter()
        .map(|recipe| RecipeCostRow {
            recipe,
            cost: recipe_cost(recipe, index),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.cost
            .total_cost
            .partial_cmp(&a.cost.total_cost)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InventoryItem;

    fn stock(name: &str, unit: &str, cost: f64, factor: Option<f64>) -> InventoryItem {
        InventoryItem {
            id: name.to_lowercase(),
            name: name.to_string(),
            category: String::new(),
            quantity: 10.0,
            unit: unit.to_string(),
            low_stock_threshold: 1.0,
            cost_per_unit: cost,
            correction_factor: factor,
            supplier_id: None,
            purchase_date: String::new(),
            expiry_date: String::new(),
        }
    }

    fn recipe(id: &str, servings: u32, ingredients: Vec<Ingredient>) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: format!("Receta {id}"),
            description: String::new(),
            servings,
            prep_time_minutes: 0,
            cook_time_minutes: 0,
            ingredients,
            tags: vec![],
        }
    }

    fn inventory() -> Vec<InventoryItem> {
        vec![
            stock("Harina", "kg", 2000.0, None),
            stock("Leche", "L", 3800.0, None),
            stock("Cebolla", "kg", 2500.0, Some(1.2)),
            stock("Huevo", "unidad", 600.0, None),
            stock("Sal", "kg", 0.0, None),
        ]
    }

    #[test]
    fn test_ingredient_cost_converts_into_inventory_unit() {
        let inv = inventory();
        let index = InventoryIndex::new(&inv);

        let cost = ingredient_cost(&Ingredient::new("harina", 250.0, "gr"), &index);
        assert_eq!(cost.status, CostStatus::Priced);
        assert!((cost.cost - 500.0).abs() < 1e-9);
        assert_eq!(cost.real_cost_per_unit, 2000.0);
        assert_eq!(cost.unit, "kg");
    }

    #[test]
    fn test_ingredient_cost_applies_correction_factor() {
        let inv = inventory();
        let index = InventoryIndex::new(&inv);

        let cost = ingredient_cost(&Ingredient::new("Cebolla", 1.0, "kilo"), &index);
        assert!((cost.real_cost_per_unit - 3000.0).abs() < 1e-9);
        assert!((cost.cost - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn test_ingredient_cost_zero_outcomes() {
        let inv = inventory();
        let index = InventoryIndex::new(&inv);

        let missing = ingredient_cost(&Ingredient::new("Azafrán", 1.0, "g"), &index);
        assert_eq!(missing.status, CostStatus::NotInInventory);
        assert_eq!(missing.cost, 0.0);
        assert_eq!(missing.real_cost_per_unit, 0.0);
        assert!(missing.unit.is_empty());

        let unpriced = ingredient_cost(&Ingredient::new("Sal", 10.0, "g"), &index);
        assert_eq!(unpriced.status, CostStatus::Unpriced);
        assert_eq!(unpriced.cost, 0.0);
        assert!(unpriced.unit.is_empty());

        let cross = ingredient_cost(&Ingredient::new("Huevo", 100.0, "g"), &index);
        assert_eq!(cross.status, CostStatus::Unconvertible);
        assert_eq!(cross.cost, 0.0);
        assert_eq!(cross.real_cost_per_unit, 600.0);
        assert_eq!(cross.unit, "unidad");
    }

    #[test]
    fn test_recipe_cost_zero_servings() {
        let inv = inventory();
        let index = InventoryIndex::new(&inv);
        let r = recipe("r", 0, vec![Ingredient::new("Harina", 1.0, "kg")]);

        let cost = recipe_cost(&r, &index);
        assert_eq!(cost.total_cost, 2000.0);
        assert_eq!(cost.cost_per_serving, 0.0);
    }

    #[test]
    fn test_recipe_cost_skips_unconvertible_ingredient() {
        let inv = inventory();
        let index = InventoryIndex::new(&inv);
        let r = recipe(
            "r",
            2,
            vec![
                Ingredient::new("Harina", 500.0, "g"),
                Ingredient::new("Leche", 250.0, "ml"),
                Ingredient::new("Huevo", 2.0, "kg"),
            ],
        );

        let cost = recipe_cost(&r, &index);
        assert!((cost.total_cost - (1000.0 + 950.0)).abs() < 1e-9);
        assert!((cost.cost_per_serving - 975.0).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_sorted_with_percentages() {
        let inv = inventory();
        let index = InventoryIndex::new(&inv);
        let r = recipe(
            "r",
            4,
            vec![
                Ingredient::new("Leche", 0.5, "L"),
                Ingredient::new("Huevo", 3.0, "unidad"),
                Ingredient::new("Harina", 1.0, "kg"),
                Ingredient::new("Pimienta", 1.0, "g"),
            ],
        );

        let breakdown = ingredient_cost_breakdown(&r, &index);
        assert!((breakdown.total_cost - 5700.0).abs() < 1e-9);

        let names: Vec<&str> = breakdown.items.iter().map(|s| s.cost.name.as_str()).collect();
        assert_eq!(names, vec!["Harina", "Leche", "Huevo", "Pimienta"]);

        let pct: f64 = breakdown.items.iter().map(|s| s.percentage).sum();
        assert!((pct - 100.0).abs() < 1e-9);
        assert!((breakdown.items[0].percentage - 2000.0 / 5700.0 * 100.0).abs() < 1e-9);
        assert_eq!(breakdown.items[3].percentage, 0.0);
        assert_eq!(breakdown.unresolved().count(), 1);
        assert!(!breakdown.is_incomplete());
    }

    #[test]
    fn test_breakdown_incomplete_when_nothing_priced() {
        let inv = inventory();
        let index = InventoryIndex::new(&inv);
        let r = recipe("r", 2, vec![Ingredient::new("Trufa", 10.0, "g")]);

        let breakdown = ingredient_cost_breakdown(&r, &index);
        assert!(breakdown.is_incomplete());
        assert_eq!(breakdown.items[0].percentage, 0.0);

        let empty = ingredient_cost_breakdown(&recipe("e", 2, vec![]), &index);
        assert!(!empty.is_incomplete());
    }

    #[test]
    fn test_menu_cost_skips_dangling_recipe() {
        let inv = inventory();
        let index = InventoryIndex::new(&inv);
        let recipes = vec![recipe("a", 4, vec![Ingredient::new("Harina", 0.5, "kg")])];
        let menu = SavedMenu {
            id: "m".to_string(),
            name: "Almuerzo".to_string(),
            date: String::new(),
            recipe_ids: vec!["a".to_string(), "borrada".to_string()],
        };

        assert!((menu_cost_per_guest(&menu, &recipes, &index) - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_recipe_cost_table_sorted_by_total() {
        let inv = inventory();
        let index = InventoryIndex::new(&inv);
        let recipes = vec![
            recipe("small", 1, vec![Ingredient::new("Harina", 0.1, "kg")]),
            recipe("big", 10, vec![Ingredient::new("Harina", 3.0, "kg")]),
        ];

        let rows = recipe_cost_table(&recipes, &index);
        assert_eq!(rows[0].recipe.id, "big");
        assert!((rows[0].for_guests(25) - 15000.0).abs() < 1e-9);
    }
}
