use thiserror::Error;

/// A quantity that has no conversion rule between its unit and the target unit.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot convert {quantity} from '{from}' to '{to}'")]
pub struct ConversionError {
    pub quantity: f64,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Error)]
pub enum KitchenError {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Menu not found: {0}")]
    MenuNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, KitchenError>;
