use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// The table view is the presentation boundary: monetary-sized decimals are
/// rounded to two places here, never in the core.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result);
                print_envelope_trailer(map);
            } else {
                print_object_table(value);
            }
        }
        Value::Array(arr) => print_row_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value) {
    match result {
        // Sweep results: an array of uniform row objects
        Value::Array(arr) => print_row_table(arr),
        Value::Object(map) => {
            // Scalar fields first, nested row arrays as their own tables
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            let mut row_arrays: Vec<(&str, &Vec<Value>)> = Vec::new();

            for (key, val) in map {
                match val {
                    Value::Array(arr) if arr.first().is_some_and(Value::is_object) => {
                        row_arrays.push((key.as_str(), arr));
                    }
                    _ => builder.push_record([key.as_str(), &format_value(val)]),
                }
            }
            println!("{}", Table::from(builder));

            for (key, arr) in row_arrays {
                println!("\n{}:", key);
                print_row_table(arr);
            }
        }
        _ => println!("{}", format_value(result)),
    }
}

fn print_object_table(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_row_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn print_envelope_trailer(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => round_for_display(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Round decimal strings of monetary size to two places for display.
/// Small values (rates, per-kWh prices) are left untouched.
fn round_for_display(s: &str) -> String {
    match s.parse::<Decimal>() {
        Ok(d) if d.abs() >= dec!(1) && d.scale() > 2 => d.round_dp(2).to_string(),
        _ => s.to_string(),
    }
}
