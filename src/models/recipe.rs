use serde::{Deserialize, Serialize};

/// A single line of a recipe: how much of which ingredient.
///
/// `unit` is free text typed by kitchen staff ("kg", "gramos", "unidad", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: &str, quantity: f64, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
        }
    }
}

/// A recipe as stored by the kitchen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Portions produced by one batch. Zero means "not set yet".
    #[serde(default)]
    pub servings: u32,

    #[serde(default)]
    pub prep_time_minutes: u32,

    #[serde(default)]
    pub cook_time_minutes: u32,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl Recipe {
    /// Matches either the id or the name (case-insensitive).
    pub fn matches(&self, id_or_name: &str) -> bool {
        self.id == id_or_name || self.name.to_lowercase() == id_or_name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_deserializes_camel_case() {
        let json = r#"{
            "id": "r1",
            "name": "Arepas",
            "servings": 4,
            "prepTimeMinutes": 15,
            "ingredients": [{"name": "Harina", "quantity": 0.5, "unit": "kg"}],
            "imageUrl": "ignored"
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.prep_time_minutes, 15);
        assert_eq!(recipe.ingredients[0], Ingredient::new("Harina", 0.5, "kg"));
        assert!(recipe.tags.is_empty());
    }

    #[test]
    fn test_matches_id_or_name() {
        let recipe = Recipe {
            id: "r1".to_string(),
            name: "Sancocho".to_string(),
            description: String::new(),
            servings: 6,
            prep_time_minutes: 0,
            cook_time_minutes: 0,
            ingredients: vec![],
            tags: vec![],
        };
        assert!(recipe.matches("r1"));
        assert!(recipe.matches("SANCOCHO"));
        assert!(!recipe.matches("ajiaco"));
    }
}
