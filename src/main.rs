use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kitchen_cost_rs::cli::{Cli, Command};
use kitchen_cost_rs::costing::{
    budget_report, calculate_yield, convert_units, cost_per_kg_from_inventory,
    ingredient_cost_breakdown, menu_cost_per_guest, normalize_unit, recipe_cost_table,
    rotation_report, stock_value_report, waste_cost_report, ReportPeriod, ROTATION_WINDOW_DAYS,
};
use kitchen_cost_rs::error::{KitchenError, Result};
use kitchen_cost_rs::interface::{
    display_alerts, display_breakdown, display_budget_report, display_menu_costs,
    display_recipe_costs, display_rotation, display_stock_value, display_waste_report,
    display_yield, display_yield_tests,
    prompt_text, prompt_yes_no, prompt_yield_input, write_breakdown_csv, write_waste_csv,
};
use kitchen_cost_rs::models::YieldTest;
use kitchen_cost_rs::state::{
    append_yield_test, load_inventory_csv, load_state, InventoryIndex, KitchenState,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    if let Command::Convert { quantity, from, to } = &command {
        return cmd_convert(*quantity, from, to);
    }

    let Some(mut state) = open_state(&cli.file)? else {
        return Ok(());
    };
    // The CSV inventory only lives for this session; writes go through
    // append_yield_test, which re-reads the stored file.
    if let Some(csv_path) = &cli.inventory_csv {
        state.inventory = load_inventory_csv(csv_path)?;
        tracing::info!(items = state.inventory.len(), "loaded inventory from CSV");
    }

    let today = Local::now().date_naive();

    match command {
        Command::Recipes { guests } => cmd_recipes(&state, guests),
        Command::Breakdown { recipe, csv } => cmd_breakdown(&state, &recipe, csv.as_deref()),
        Command::Menus { guests } => cmd_menus(&state, guests),
        Command::Yield {
            ingredient,
            gross,
            net,
            cost,
            save,
        } => cmd_yield(&cli.file, &state, ingredient, gross, net, cost, save, today),
        Command::Yields => {
            display_yield_tests(&state.yield_tests);
            Ok(())
        }
        Command::Waste { period, date, csv } => {
            cmd_waste(&state, period.into(), date.unwrap_or(today), csv.as_deref())
        }
        Command::Budget { period, date } => {
            cmd_budget(&state, period.into(), date.unwrap_or(today))
        }
        Command::Alerts { date } => {
            let index = InventoryIndex::new(&state.inventory);
            display_alerts(&index.alerts(date.unwrap_or(today)));
            Ok(())
        }
        Command::Stock => {
            display_stock_value(&stock_value_report(&state.inventory));
            Ok(())
        }
        Command::Rotation { date } => {
            let rows = rotation_report(
                &state.inventory,
                &state.weekly_plan,
                &state.saved_menus,
                &state.recipes,
                date.unwrap_or(today),
            );
            display_rotation(&rows, ROTATION_WINDOW_DAYS);
            Ok(())
        }
        Command::Convert { .. } => Ok(()),
    }
}

/// Load the state file, or explain that it is missing.
fn open_state(path: &Path) -> Result<Option<KitchenState>> {
    if !path.exists() {
        eprintln!("Kitchen state file not found: {}", path.display());
        eprintln!("Export the kitchen data to JSON or pass --file.");
        return Ok(None);
    }
    Ok(Some(load_state(path)?))
}

/// List all recipe costs.
fn cmd_recipes(state: &KitchenState, guests: u32) -> Result<()> {
    let index = InventoryIndex::new(&state.inventory);
    println!("Loaded {} recipes, {} inventory items", state.recipes.len(), index.len());

    let rows = recipe_cost_table(&state.recipes, &index);
    display_recipe_costs(&rows, guests);
    Ok(())
}

/// Show the cost breakdown of one recipe.
fn cmd_breakdown(state: &KitchenState, recipe: &str, csv: Option<&Path>) -> Result<()> {
    let recipe = state
        .recipes
        .iter()
        .find(|r| r.matches(recipe))
        .ok_or_else(|| KitchenError::RecipeNotFound(recipe.to_string()))?;

    let index = InventoryIndex::new(&state.inventory);
    let breakdown = ingredient_cost_breakdown(recipe, &index);
    display_breakdown(recipe, &breakdown, &index);

    if let Some(path) = csv {
        write_breakdown_csv(&breakdown, path)?;
        println!("Breakdown written to {}", path.display());
    }
    Ok(())
}

/// List saved menus with cost per guest.
fn cmd_menus(state: &KitchenState, guests: u32) -> Result<()> {
    let index = InventoryIndex::new(&state.inventory);
    let rows: Vec<_> = state
        .saved_menus
        .iter()
        .map(|menu| (menu, menu_cost_per_guest(menu, &state.recipes, &index)))
        .collect();

    display_menu_costs(&rows, guests);
    Ok(())
}

/// Compute a trim test, optionally recording it.
#[allow(clippy::too_many_arguments)]
fn cmd_yield(
    file: &Path,
    state: &KitchenState,
    ingredient: Option<String>,
    gross: Option<f64>,
    net: Option<f64>,
    cost: Option<f64>,
    save: bool,
    today: NaiveDate,
) -> Result<()> {
    let mut cost = cost;

    if let Some(name) = &ingredient {
        let index = InventoryIndex::new(&state.inventory);
        match index.lookup(name).item() {
            Some(item) => match cost_per_kg_from_inventory(item) {
                Some(per_kg) if cost.is_none() => {
                    println!("Using inventory cost for {}: {:.2} per kg", item.name, per_kg);
                    cost = Some(per_kg);
                }
                Some(_) => {}
                None => println!(
                    "{} is stocked in '{}', enter the cost per kg manually.",
                    item.name,
                    normalize_unit(&item.unit)
                ),
            },
            None => println!("{} is not in inventory.", name),
        }
    }

    let input = prompt_yield_input(gross, net, cost)?;
    let metrics = calculate_yield(&input);
    display_yield(&input, &metrics);

    if !save {
        return Ok(());
    }

    if input.gross_weight_kg <= 0.0 || input.net_weight_kg <= 0.0 {
        return Err(KitchenError::InvalidInput(
            "Gross and net weight are required to record a yield test".to_string(),
        ));
    }

    let ingredient_name = match ingredient {
        Some(name) => name,
        None => prompt_text("Ingredient")?,
    };
    if ingredient_name.is_empty() {
        return Err(KitchenError::InvalidInput("Ingredient is required".to_string()));
    }

    let performed_by = prompt_text("Performed by")?;
    let observations = prompt_text("Observations")?;

    let test = YieldTest {
        id: String::new(),
        date: today.to_string(),
        ingredient_name,
        supplier_name: String::new(),
        purchase_specification: String::new(),
        gross_weight_kg: input.gross_weight_kg,
        net_weight_kg: input.net_weight_kg,
        cost_per_kg_gross: input.cost_per_kg_gross,
        performed_by,
        observations,
    };

    if prompt_yes_no("Save yield test to the state file?", true)? {
        append_yield_test(file, test)?;
        println!("Yield test saved.");
    }
    Ok(())
}

/// Report waste cost for a period.
fn cmd_waste(
    state: &KitchenState,
    period: ReportPeriod,
    anchor: NaiveDate,
    csv: Option<&Path>,
) -> Result<()> {
    let index = InventoryIndex::new(&state.inventory);
    let report = waste_cost_report(&state.waste_logs, &index, period, anchor);
    display_waste_report(&report);

    if let Some(path) = csv {
        write_waste_csv(&report, path)?;
        println!("Waste entries written to {}", path.display());
    }
    Ok(())
}

/// Compare planned spend with the budget.
fn cmd_budget(state: &KitchenState, period: ReportPeriod, anchor: NaiveDate) -> Result<()> {
    let index = InventoryIndex::new(&state.inventory);
    let report = budget_report(
        &state.weekly_plan,
        &state.saved_menus,
        &state.recipes,
        &index,
        period,
        anchor,
        &state.budgets,
    );
    display_budget_report(&report);
    Ok(())
}

/// Convert a quantity between units.
fn cmd_convert(quantity: f64, from: &str, to: &str) -> Result<()> {
    let converted = convert_units(quantity, from, to)?;
    println!(
        "{} {} = {} {}",
        quantity,
        normalize_unit(from),
        converted,
        normalize_unit(to)
    );
    Ok(())
}
