pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` object of a computation envelope, or the value itself for
/// bare results.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Scalar rendering shared by the table, CSV and minimal formatters.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Split an object into scalar fields and array-of-object fields (schedules,
/// yearly rows, categories) so the latter can be rendered as their own rows.
pub(crate) fn split_rows(
    map: &serde_json::Map<String, Value>,
) -> (Vec<(&String, &Value)>, Vec<(&String, &Vec<Value>)>) {
    let mut scalars = Vec::new();
    let mut tables = Vec::new();
    for (key, val) in map {
        match val {
            Value::Array(items) if items.first().is_some_and(Value::is_object) => {
                tables.push((key, items))
            }
            _ => scalars.push((key, val)),
        }
    }
    (scalars, tables)
}
