use dialoguer::{Confirm, Input};

use crate::costing::YieldInput;
use crate::error::{KitchenError, Result};

/// Prompt for a non-negative number.
pub fn prompt_number(prompt: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    let value: f64 = input
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| KitchenError::InvalidInput(format!("Invalid number: {}", input)))?;

    if value < 0.0 {
        return Err(KitchenError::InvalidInput(
            "Weights and costs must be >= 0".to_string(),
        ));
    }

    Ok(value)
}

/// Fill in whichever trim-test inputs were not given on the command line.
pub fn prompt_yield_input(
    gross: Option<f64>,
    net: Option<f64>,
    cost: Option<f64>,
) -> Result<YieldInput> {
    let gross_weight_kg = match gross {
        Some(v) => v,
        None => prompt_number("Gross weight (kg)", 0.0)?,
    };
    let net_weight_kg = match net {
        Some(v) => v,
        None => prompt_number("Net weight after trimming (kg)", 0.0)?,
    };
    let cost_per_kg_gross = match cost {
        Some(v) => v,
        None => prompt_number("Cost per kg (gross)", 0.0)?,
    };

    Ok(YieldInput {
        gross_weight_kg,
        net_weight_kg,
        cost_per_kg_gross,
    })
}

/// Prompt for free text, allowing an empty answer.
pub fn prompt_text(prompt: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(input.trim().to_string())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
