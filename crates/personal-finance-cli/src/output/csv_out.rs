use serde_json::{Map, Value};
use std::io;

use super::{result_of, scalar_text, split_rows};

type StdoutWriter = csv::Writer<io::StdoutLock<'static>>;

/// Write output as CSV to stdout.
///
/// Results carrying a row collection (schedule, yearly rows, categories) are
/// written as that collection; everything else as two-column field/value rows.
pub fn print_csv(value: &Value) {
    let mut wtr = csv::Writer::from_writer(io::stdout().lock());

    match result_of(value) {
        Value::Object(map) => write_object(&mut wtr, map),
        Value::Array(arr) => write_rows(&mut wtr, arr),
        other => {
            let _ = wtr.write_record([scalar_text(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_object(wtr: &mut StdoutWriter, map: &Map<String, Value>) {
    let (scalars, tables) = split_rows(map);
    if let Some((_, rows)) = tables.first() {
        write_rows(wtr, rows);
        return;
    }

    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in scalars {
        let _ = wtr.write_record([key.as_str(), &scalar_text(val)]);
    }
}

fn write_rows(wtr: &mut StdoutWriter, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            let _ = wtr.write_record([scalar_text(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = wtr.write_record(&headers);
    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(scalar_text).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&row);
    }
}
