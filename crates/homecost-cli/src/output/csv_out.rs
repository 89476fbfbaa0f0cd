use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// Sweep results and schedule rows become one record per row; scalar results
/// become field,value pairs. Values are written unrounded.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Array(rows)) => write_rows_csv(&mut wtr, rows),
            Some(Value::Object(result)) => {
                // A schedule-like result: emit its row array if present,
                // otherwise the scalar fields
                if let Some(Value::Array(rows)) = result.get("rows") {
                    write_rows_csv(&mut wtr, rows);
                } else {
                    write_fields_csv(&mut wtr, result);
                }
            }
            _ => write_fields_csv(&mut wtr, map),
        },
        Value::Array(rows) => write_rows_csv(&mut wtr, rows),
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    if rows.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for row in rows {
            if let Value::Object(map) = row {
                let record: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&record);
            }
        }
    } else {
        for row in rows {
            let _ = wtr.write_record([&format_csv_value(row)]);
        }
    }
}

fn write_fields_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, map: &serde_json::Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
