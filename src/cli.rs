use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::costing::ReportPeriod;

/// KitchenCost — recipe, menu, yield, and waste costing for a kitchen.
#[derive(Parser, Debug)]
#[command(name = "kitchen-cost")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the kitchen state JSON file.
    #[arg(short, long, env = "KITCHEN_STATE", default_value = "kitchen_state.json")]
    pub file: PathBuf,

    /// Inventory CSV export to use instead of the inventory in the state file.
    #[arg(long)]
    pub inventory_csv: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List recipe costs, most expensive first.
    Recipes {
        /// Guests to project the cost for.
        #[arg(long, default_value = "1")]
        guests: u32,
    },

    /// Show which ingredients drive a recipe's cost.
    Breakdown {
        /// Recipe id or name.
        recipe: String,

        /// Also write the breakdown to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List saved menus with their cost per guest.
    Menus {
        /// Guests to project the cost for.
        #[arg(long, default_value = "1")]
        guests: u32,
    },

    /// Run a yield (trim) test calculation.
    Yield {
        /// Inventory ingredient; fills in the gross cost per kg when possible.
        #[arg(long)]
        ingredient: Option<String>,

        /// Gross weight in kg.
        #[arg(long)]
        gross: Option<f64>,

        /// Net weight after trimming in kg.
        #[arg(long)]
        net: Option<f64>,

        /// Cost per gross kg.
        #[arg(long)]
        cost: Option<f64>,

        /// Record the test in the state file.
        #[arg(long)]
        save: bool,
    },

    /// List recorded yield tests.
    Yields,

    /// Report the cost of logged waste.
    Waste {
        #[arg(long, value_enum, default_value_t = PeriodArg::Weekly)]
        period: PeriodArg,

        /// Any date inside the period (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Also write the costed entries to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Compare planned menu spend with the budget.
    Budget {
        #[arg(long, value_enum, default_value_t = PeriodArg::Weekly)]
        period: PeriodArg,

        /// Any date inside the period (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List expired, expiring, and low-stock inventory.
    Alerts {
        /// Date to check against (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Value the stock on hand by category.
    Stock,

    /// Days of stock left at the pace of the recent menu plan.
    Rotation {
        /// Last day of the lookback window (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Convert a quantity between units.
    Convert {
        quantity: f64,
        from: String,
        to: String,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Recipes { guests: 1 }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PeriodArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<PeriodArg> for ReportPeriod {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Daily => ReportPeriod::Daily,
            PeriodArg::Weekly => ReportPeriod::Weekly,
            PeriodArg::Monthly => ReportPeriod::Monthly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_waste_command() {
        let cli = Cli::try_parse_from([
            "kitchen-cost",
            "--file",
            "state.json",
            "waste",
            "--period",
            "monthly",
            "--date",
            "2024-06-05",
        ])
        .unwrap();

        assert_eq!(cli.file, PathBuf::from("state.json"));
        match cli.command {
            Some(Command::Waste { period, date, csv }) => {
                assert_eq!(ReportPeriod::from(period), ReportPeriod::Monthly);
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 5));
                assert!(csv.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_convert_command() {
        let cli = Cli::try_parse_from(["kitchen-cost", "convert", "250", "g", "kg"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Convert { quantity, .. }) if quantity == 250.0
        ));
    }

    #[test]
    fn test_parse_inventory_report_commands() {
        let cli = Cli::try_parse_from(["kitchen-cost", "stock"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Stock)));

        let cli =
            Cli::try_parse_from(["kitchen-cost", "rotation", "--date", "2024-06-28"]).unwrap();
        match cli.command {
            Some(Command::Rotation { date }) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 28));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
