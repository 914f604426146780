mod manager;
mod persistence;

pub use manager::{AlertKind, InventoryIndex, MatchResult, StockAlert};
pub use persistence::{
    append_yield_test, load_inventory_csv, load_state, save_state, KitchenState,
};
