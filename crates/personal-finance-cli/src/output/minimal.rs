use serde_json::Value;

use super::{result_of, scalar_text};

/// Headline field for each command, in priority order.
const PRIORITY_KEYS: [&str; 11] = [
    "emi",
    "maturity_amount",
    "progress_percent",
    "months_to_goal",
    "is_achievable",
    "monthly_surplus",
    "advice",
    "usage_percent",
    "net_worth",
    "total_annual_income",
    "projection",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    if let Value::Object(map) = result {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                println!("{}", render(val));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, render(val));
            return;
        }
    }

    println!("{}", render(result));
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        // Unreachable goals serialise as a bare string, reachable ones as {"months": n}
        Value::Object(map) if map.len() == 1 => map.values().next().map(render).unwrap_or_default(),
        _ => scalar_text(value),
    }
}
