use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages as plain numbers (12 = 12%). Never as fractions.
pub type Percent = Decimal;

/// Monthly rates as decimals (0.01 = 1% per month).
pub type Rate = Decimal;

/// Month or year counts. Signed so that non-positive values can be rejected
/// at the validation boundary rather than at deserialization.
pub type Months = i32;

/// Round a currency amount to the nearest whole unit, halves toward +∞.
///
/// Amounts at the edge of Decimal range carry no fractional digits and are
/// returned as is.
pub fn round_currency(amount: Money) -> Money {
    amount
        .checked_add(dec!(0.5))
        .map_or(amount, |shifted| shifted.floor())
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
