use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::currency;

/// Format output as tables: scalar result fields as field/value rows, and
/// each nested list of records (e.g. schedule rows) as its own table.
pub fn print_table(value: &Value, symbol: &str) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map, symbol);
            } else {
                print_flat_object(map, symbol);
            }
        }
        Value::Array(arr) => print_array_table(arr, symbol),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>, symbol: &str) {
    if let Value::Object(res_map) = result {
        let (records, scalars): (Vec<_>, Vec<_>) = res_map
            .iter()
            .partition(|(_, v)| is_record_list(v));

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in scalars {
            builder.push_record([key.as_str(), &format_value(key, val, symbol)]);
        }
        println!("{}", Table::from(builder));

        for (key, val) in records {
            if let Value::Array(arr) = val {
                println!("\n{}:", key);
                print_array_table(arr, symbol);
            }
        }
    } else {
        print_flat_object(envelope, symbol);
    }

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

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn is_record_list(value: &Value) -> bool {
    matches!(value, Value::Array(arr) if arr.first().is_some_and(Value::is_object))
}

fn print_flat_object(map: &Map<String, Value>, symbol: &str) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(key, val, symbol)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value], symbol: &str) {
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
                    .map(|h| {
                        map.get(h.as_str())
                            .map(|v| format_value(h, v, symbol))
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value("", item, symbol));
        }
    }
}

fn format_value(key: &str, value: &Value, symbol: &str) -> String {
    if let Some(formatted) = currency::format_field(key, value, symbol) {
        return formatted;
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(|v| format_value("", v, symbol)).collect();
            items.join("; ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
