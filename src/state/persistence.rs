use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{
    Budgets, InventoryItem, Recipe, SavedMenu, WasteLogEntry, WeeklyPlan, YieldTest,
};

/// Everything the kitchen has recorded, as exported by the data layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenState {
    #[serde(default)]
    pub recipes: Vec<Recipe>,

    #[serde(default)]
    pub inventory: Vec<InventoryItem>,

    #[serde(default)]
    pub saved_menus: Vec<SavedMenu>,

    #[serde(default)]
    pub weekly_plan: WeeklyPlan,

    #[serde(default)]
    pub budgets: Budgets,

    #[serde(default)]
    pub waste_logs: Vec<WasteLogEntry>,

    #[serde(default)]
    pub yield_tests: Vec<YieldTest>,
}

/// Load kitchen state from a JSON file.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<KitchenState> {
    let content = fs::read_to_string(path)?;
    let state: KitchenState = serde_json::from_str(&content)?;
    Ok(state)
}

/// Save kitchen state to a JSON file.
pub fn save_state<P: AsRef<Path>>(path: P, state: &KitchenState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}

/// Record a yield test in the state file.
///
/// The file is re-read so only the new test is written; anything the caller
/// substituted in memory (such as a CSV inventory) never reaches disk. An
/// empty id is assigned `yt-<n>`.
pub fn append_yield_test<P: AsRef<Path>>(path: P, mut test: YieldTest) -> Result<()> {
    let path = path.as_ref();
    let mut state = load_state(path)?;
    if test.id.is_empty() {
        test.id = format!("yt-{}", state.yield_tests.len() + 1);
    }
    state.yield_tests.push(test);
    save_state(path, &state)
}

/// Load inventory items from a CSV export.
///
/// Expects the header `id,name,category,quantity,unit,lowStockThreshold,
/// costPerUnit,supplierId,purchaseDate,expiryDate,correctionFactor`; empty
/// optional cells are read as absent.
pub fn load_inventory_csv<P: AsRef<Path>>(path: P) -> Result<Vec<InventoryItem>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut items = Vec::new();
    for record in rdr.deserialize() {
        let item: InventoryItem = record?;
        items.push(item);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_and_save_roundtrip() {
        let json = r#"{
            "recipes": [
                {"id": "r1", "name": "Arepa", "servings": 4,
                 "ingredients": [{"name": "Harina", "quantity": 500, "unit": "gr"}]}
            ],
            "inventory": [
                {"id": "i1", "name": "Harina", "unit": "kg", "costPerUnit": 2000}
            ],
            "savedMenus": [{"id": "m1", "name": "Desayuno", "recipeIds": ["r1"]}],
            "weeklyPlan": {"2024-06-03": {"lunch": "m1", "guests": 10}},
            "budgets": {"weekly": 500000}
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let state = load_state(file.path()).unwrap();
        assert_eq!(state.recipes.len(), 1);
        assert_eq!(state.inventory[0].cost_per_unit, 2000.0);
        assert_eq!(state.saved_menus[0].recipe_ids, vec!["r1".to_string()]);
        assert_eq!(state.budgets.weekly, 500000.0);
        assert!(state.waste_logs.is_empty());

        let out_file = NamedTempFile::new().unwrap();
        save_state(out_file.path(), &state).unwrap();

        let reloaded = load_state(out_file.path()).unwrap();
        assert_eq!(reloaded.recipes[0].name, "Arepa");
        assert_eq!(reloaded.weekly_plan.len(), 1);
    }

    #[test]
    fn test_load_inventory_csv() {
        let csv_data = "id,name,category,quantity,unit,lowStockThreshold,costPerUnit,supplierId,purchaseDate,expiryDate,correctionFactor\n\
                        i1,Cebolla,Verduras,8,kg,2,2500,s1,2024-05-01,2024-05-15,1.15\n\
                        i2,Leche,Lácteos,12,L,4,3800,,2024-05-02,2024-05-09,\n";

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(csv_data.as_bytes()).unwrap();

        let items = load_inventory_csv(file.path()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].correction_factor, Some(1.15));
        assert_eq!(items[0].supplier_id.as_deref(), Some("s1"));
        assert_eq!(items[1].correction_factor, None);
        assert_eq!(items[1].supplier_id, None);
        assert_eq!(items[1].unit, "L");
    }

    #[test]
    fn test_append_yield_test_keeps_stored_inventory() {
        let json = r#"{
            "inventory": [
                {"id": "i1", "name": "Pollo", "unit": "kg", "costPerUnit": 9000, "quantity": 5}
            ],
            "yieldTests": [
                {"id": "yt-1", "ingredientName": "Pollo", "grossWeightKg": 2,
                 "netWeightKg": 1.5, "costPerKgGross": 9000}
            ]
        }"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        // Session state with an inventory loaded from elsewhere
        let mut session = load_state(file.path()).unwrap();
        session.inventory.clear();

        let test = YieldTest {
            id: String::new(),
            date: "2024-06-05".to_string(),
            ingredient_name: "Pollo".to_string(),
            supplier_name: String::new(),
            purchase_specification: String::new(),
            gross_weight_kg: 4.3,
            net_weight_kg: 4.0,
            cost_per_kg_gross: 9000.0,
            performed_by: "Ana".to_string(),
            observations: String::new(),
        };
        append_yield_test(file.path(), test).unwrap();

        let reloaded = load_state(file.path()).unwrap();
        assert_eq!(reloaded.inventory.len(), 1);
        assert_eq!(reloaded.inventory[0].name, "Pollo");
        assert_eq!(reloaded.inventory[0].cost_per_unit, 9000.0);
        assert_eq!(reloaded.yield_tests.len(), 2);
        assert_eq!(reloaded.yield_tests[1].id, "yt-2");
        assert_eq!(reloaded.yield_tests[1].performed_by, "Ana");
    }
}
