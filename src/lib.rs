pub mod cli;
pub mod costing;
pub mod error;
pub mod interface;
pub mod models;
pub mod state;

pub use error::{ConversionError, KitchenError, Result};
pub use models::{Ingredient, InventoryItem, Recipe, SavedMenu, YieldTest};
