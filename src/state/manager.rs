use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use strsim::jaro_winkler;

use crate::costing::constants::{EXPIRY_WARNING_DAYS, SUGGESTION_THRESHOLD};
use crate::models::InventoryItem;

/// Outcome of looking an ingredient up in the inventory.
#[derive(Debug, Clone, Copy)]
pub enum MatchResult<'a> {
    Found(&'a InventoryItem),
    NotFound,
}

impl<'a> MatchResult<'a> {
    pub fn item(self) -> Option<&'a InventoryItem> {
        match self {
            MatchResult::Found(item) => Some(item),
            MatchResult::NotFound => None,
        }
    }
}

/// Why an inventory item needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Expired,
    ExpiringSoon,
    LowStock,
}

#[derive(Debug, Clone)]
pub struct StockAlert<'a> {
    pub item: &'a InventoryItem,
    pub kind: AlertKind,
}

/// Inventory items keyed by lowercase name.
///
/// Matching is exact after lower-casing: a typo in a recipe is a miss,
/// never a guess.
pub struct InventoryIndex<'a> {
    items: HashMap<String, &'a InventoryItem>,
}

impl<'a> InventoryIndex<'a> {
    /// Build the index. On duplicate names the last occurrence wins.
    pub fn new(inventory: &'a [InventoryItem]) -> Self {
        let mut items = HashMap::new();
        for item in inventory {
            items.insert(item.key(), item);
        }
        Self { items }
    }

    /// Look an item up by name (case-insensitive).
    pub fn lookup(&self, name: &str) -> MatchResult<'a> {
        match self.items.get(&name.to_lowercase()).copied() {
            Some(item) => MatchResult::Found(item),
            None => MatchResult::NotFound,
        }
    }

    /// Inventory names that look like `name`, best first.
    ///
    /// For diagnostics only; costing never uses these.
    pub fn suggestions(&self, name: &str) -> Vec<&'a str> {
        let needle = name.to_lowercase();
        let mut candidates: Vec<(&'a InventoryItem, f64)> = self
            .items
            .iter()
            .map(|(key, item)| (*item, jaro_winkler(key, &needle)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates.into_iter().take(3).map(|(item, _)| item.name.as_str()).collect()
    }

    /// Items that are expired, close to expiry, or at/below their low-stock
    /// threshold. An item can raise more than one alert.
    pub fn alerts(&self, today: NaiveDate) -> Vec<StockAlert<'a>> {
        let warning_limit = today + Duration::days(EXPIRY_WARNING_DAYS);
        let mut alerts = Vec::new();

        for &item in self.items.values() {
            if let Some(expiry) = item.expiry() {
                if expiry < today {
                    alerts.push(StockAlert { item, kind: AlertKind::Expired });
                } else if expiry <= warning_limit {
                    alerts.push(StockAlert { item, kind: AlertKind::ExpiringSoon });
                }
            }
            if item.quantity <= item.low_stock_threshold {
                alerts.push(StockAlert { item, kind: AlertKind::LowStock });
            }
        }

        alerts.sort_by(|a, b| a.item.name.cmp(&b.item.name));
        alerts
    }

    /// Count of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the index has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
