pub mod export;
pub mod prompts;
pub mod render;

pub use export::{write_breakdown_csv, write_waste_csv};
pub use prompts::{prompt_number, prompt_text, prompt_yes_no, prompt_yield_input};
pub use render::{
    display_alerts, display_breakdown, display_budget_report, display_menu_costs,
    display_recipe_costs, display_rotation, display_stock_value, display_waste_report,
    display_yield, display_yield_tests,
};
