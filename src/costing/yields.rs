use rust_decimal::{Decimal, RoundingStrategy};

use crate::costing::constants::{METRIC_FACTOR, YIELD_FACTOR_DECIMALS};
use crate::costing::units::{normalize_unit, CanonicalUnit};
use crate::models::InventoryItem;

/// Measured inputs of a trim test.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YieldInput {
    pub gross_weight_kg: f64,
    pub net_weight_kg: f64,
    pub cost_per_kg_gross: f64,
}

/// Figures derived from a trim test. Always recomputed from [`YieldInput`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YieldMetrics {
    pub waste_weight_kg: f64,
    pub yield_percentage: f64,
    /// Raw gross/net ratio.
    pub correction_factor: f64,
    /// Gross cost times the correction factor rounded to two decimals.
    pub real_cost_per_kg_net: f64,
    /// Gross cost times the raw correction factor.
    pub unrounded_real_cost_per_kg_net: f64,
}

/// Round the exact binary value of `value` to a number of decimal places,
/// ties away from zero. A stored 1.07499999... rounds to 1.07.
fn round_to(value: f64, decimals: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_string().parse().ok())
        .unwrap_or(value)
}

/// Derive waste, yield, and real net cost from a trim test.
///
/// Zero or negative weights give all-zero metrics. The correction factor is
/// rounded before it is multiplied into the cost, so 10 kg gross, 7.5 kg net
/// at 4000/kg projects 4000 * 1.33 = 5320.
pub fn calculate_yield(input: &YieldInput) -> YieldMetrics {
    let YieldInput {
        gross_weight_kg: gross,
        net_weight_kg: net,
        cost_per_kg_gross: cost,
    } = *input;

    if gross <= 0.0 || net <= 0.0 {
        return YieldMetrics::default();
    }

    let correction_factor = gross / net;
    let rounded_factor = round_to(correction_factor, YIELD_FACTOR_DECIMALS);

    let (real_cost_per_kg_net, unrounded_real_cost_per_kg_net) = if cost > 0.0 {
        (cost * rounded_factor, cost * correction_factor)
    } else {
        (0.0, 0.0)
    };

    YieldMetrics {
        waste_weight_kg: (gross - net).max(0.0),
        yield_percentage: net / gross * 100.0,
        correction_factor,
        real_cost_per_kg_net,
        unrounded_real_cost_per_kg_net,
    }
}

/// Gross cost per kilogram for an inventory item, when its unit allows it.
///
/// Items stocked in anything but grams or kilograms have no reliable
/// per-kilogram price and return `None`.
pub fn cost_per_kg_from_inventory(item: &InventoryItem) -> Option<f64> {
    match normalize_unit(&item.unit) {
        CanonicalUnit::Gram => Some(item.cost_per_unit * METRIC_FACTOR),
        CanonicalUnit::Kilogram => Some(item.cost_per_unit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(gross: f64, net: f64, cost: f64) -> YieldInput {
        YieldInput {
            gross_weight_kg: gross,
            net_weight_kg: net,
            cost_per_kg_gross: cost,
        }
    }

    #[test]
    fn test_rounds_factor_before_multiplying() {
        let m = calculate_yield(&input(10.0, 7.5, 4000.0));
        assert!((m.waste_weight_kg - 2.5).abs() < 1e-9);
        assert!((m.yield_percentage - 75.0).abs() < 1e-9);
        assert!((m.correction_factor - 10.0 / 7.5).abs() < 1e-12);
        assert!((m.real_cost_per_kg_net - 5320.0).abs() < 1e-6);
        assert!((m.unrounded_real_cost_per_kg_net - 5333.333).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_weights_are_zero() {
        assert_eq!(calculate_yield(&input(0.0, 5.0, 1000.0)), YieldMetrics::default());
        assert_eq!(calculate_yield(&input(5.0, 0.0, 1000.0)), YieldMetrics::default());
    }

    #[test]
    fn test_net_above_gross_has_no_waste() {
        let m = calculate_yield(&input(4.0, 5.0, 1000.0));
        assert_eq!(m.waste_weight_kg, 0.0);
        assert!((m.yield_percentage - 125.0).abs() < 1e-9);
        assert!((m.real_cost_per_kg_net - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_cost_projects_zero() {
        let m = calculate_yield(&input(10.0, 8.0, 0.0));
        assert!((m.correction_factor - 1.25).abs() < 1e-12);
        assert_eq!(m.real_cost_per_kg_net, 0.0);
    }

    #[test]
    fn test_cost_per_kg_from_inventory() {
        let mut item = InventoryItem {
            id: "i1".to_string(),
            name: "Pechuga".to_string(),
            category: String::new(),
            quantity: 5.0,
            unit: "gramos".to_string(),
            low_stock_threshold: 1.0,
            cost_per_unit: 18.5,
            correction_factor: None,
            supplier_id: None,
            purchase_date: String::new(),
            expiry_date: String::new(),
        };
        assert_eq!(cost_per_kg_from_inventory(&item), Some(18500.0));

        item.unit = "Kilo".to_string();
        assert_eq!(cost_per_kg_from_inventory(&item), Some(18.5));

        item.unit = "unidad".to_string();
        assert_eq!(cost_per_kg_from_inventory(&item), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.3333, 2), 1.33);
        assert_eq!(round_to(1.666, 2), 1.67);
        assert_eq!(round_to(2.0, 2), 2.0);
    }

    #[test]
    fn test_round_to_binary_near_ties_round_down() {
        // 4.3 / 4.0 is stored as 1.07499999999999995...
        assert_eq!(round_to(4.3 / 4.0, 2), 1.07);
        // 0.61 / 0.4 is stored just below 1.525
        assert_eq!(round_to(0.61 / 0.4, 2), 1.52);
        assert_eq!(round_to(1.005, 2), 1.0);
    }

    #[test]
    fn test_round_to_exact_ties_round_up() {
        assert_eq!(round_to(9.0 / 8.0, 2), 1.13);
        assert_eq!(round_to(1.375, 2), 1.38);
        assert_eq!(round_to(0.625, 2), 0.63);
    }

    #[test]
    fn test_real_cost_uses_correctly_rounded_factor() {
        let m = calculate_yield(&input(4.3, 4.0, 1000.0));
        assert!((m.real_cost_per_kg_net - 1070.0).abs() < 1e-6);

        let m = calculate_yield(&input(0.61, 0.4, 1000.0));
        assert!((m.real_cost_per_kg_net - 1520.0).abs() < 1e-6);

        let m = calculate_yield(&input(9.0, 8.0, 1000.0));
        assert!((m.real_cost_per_kg_net - 1130.0).abs() < 1e-6);
    }
}
