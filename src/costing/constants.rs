/// Grams per kilogram and millilitres per litre.
pub const METRIC_FACTOR: f64 = 1000.0;

/// Correction factor used when an inventory item has none.
pub const DEFAULT_CORRECTION_FACTOR: f64 = 1.0;

/// Decimal places the yield correction factor is rounded to before it is
/// used to project the real cost per net kilogram.
pub const YIELD_FACTOR_DECIMALS: u32 = 2;

/// Days ahead of expiry at which an item is flagged as expiring soon.
pub const EXPIRY_WARNING_DAYS: i64 = 7;

/// Number of ingredients listed in the waste report ranking.
pub const WASTE_TOP_INGREDIENTS: usize = 10;

/// Similarity above which an inventory name is offered as a suggestion
/// for an ingredient that has no exact match.
pub const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Days of planned consumption the rotation report looks back over.
pub const ROTATION_WINDOW_DAYS: i64 = 28;

/// Days of stock below which an item rotates fast.
pub const HIGH_ROTATION_DAYS: f64 = 7.0;

/// Days of stock below which an item rotates at a normal pace.
pub const MEDIUM_ROTATION_DAYS: f64 = 30.0;
