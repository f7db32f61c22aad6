use serde_json::{Map, Value};
use std::io;

/// Write output as CSV to stdout.
///
/// List results (sensitivity rows, alternatives, compared plots) become one
/// CSV row per item. Object results become `field,value` pairs with nested
/// cost records flattened to dotted field names.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Array(rows) => write_rows(&mut wtr, rows),
        Value::Object(map) => {
            let _ = wtr.write_record(["field", "value"]);
            let mut pairs = Vec::new();
            collect_pairs("", map, &mut pairs);
            for (field, val) in pairs {
                let _ = wtr.write_record([field.as_str(), val.as_str()]);
            }
        }
        other => {
            let _ = wtr.write_record([format_csv_value(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let objects: Vec<Vec<(String, String)>> = rows
        .iter()
        .filter_map(Value::as_object)
        .map(|m| {
            let mut pairs = Vec::new();
            collect_pairs("", m, &mut pairs);
            pairs
        })
        .collect();

    if objects.is_empty() {
        for item in rows {
            let _ = wtr.write_record([format_csv_value(item)]);
        }
        return;
    }

    let mut headers: Vec<String> = Vec::new();
    for pairs in &objects {
        for (field, _) in pairs {
            if !headers.contains(field) {
                headers.push(field.clone());
            }
        }
    }
    let _ = wtr.write_record(&headers);

    for pairs in &objects {
        let row: Vec<&str> = headers
            .iter()
            .map(|h| {
                pairs
                    .iter()
                    .find(|(field, _)| field == h)
                    .map(|(_, v)| v.as_str())
                    .unwrap_or("")
            })
            .collect();
        let _ = wtr.write_record(&row);
    }
}

/// Depth-first `prefix.key -> value`, skipping nested lists.
fn collect_pairs(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, val) in map {
        let field = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(inner) => collect_pairs(&field, inner, out),
            Value::Array(_) => {}
            _ => out.push((field, format_csv_value(val))),
        }
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
