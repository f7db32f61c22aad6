use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Scalar result fields go in one Field/Value table; each nested cost record
/// and each list (sensitivity rows, alternatives, compared plots, schedule)
/// gets its own titled table underneath.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_envelope(result, map),
            None => print_sections("", map),
        },
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", format_value(value)),
    }
}

fn print_envelope(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_sections("", res_map),
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", format_value(other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_sections(title: &str, map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut scalars = 0;
    for (key, val) in map {
        if !is_nested(val) {
            builder.push_record([key.as_str(), &format_value(val)]);
            scalars += 1;
        }
    }
    if scalars > 0 {
        if !title.is_empty() {
            println!("\n{}", title);
        }
        println!("{}", Table::from(builder));
    }

    for (key, val) in map {
        let heading = if title.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", title, key)
        };
        match val {
            Value::Object(inner) => print_sections(&heading, inner),
            Value::Array(rows) if rows.iter().any(Value::is_object) => {
                println!("\n{}", heading);
                print_rows(rows);
            }
            _ => {}
        }
    }
}

fn print_rows(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let flattened: Vec<Map<String, Value>> = arr
        .iter()
        .filter_map(Value::as_object)
        .map(flatten_one_level)
        .collect();

    if flattened.is_empty() {
        for item in arr {
            println!("{}", format_value(item));
        }
        return;
    }

    // Union of columns in first-seen order; optional fields may be missing from early rows
    let mut headers: Vec<String> = Vec::new();
    for row in &flattened {
        for key in row.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in &flattened {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(h).map(format_value).unwrap_or_default())
            .collect();
        builder.push_record(cells);
    }
    println!("{}", Table::from(builder));
}

/// Scalars of a row plus the scalars of its directly nested objects as `parent.child`.
fn flatten_one_level(map: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                for (k, v) in inner {
                    if !is_nested(v) {
                        out.insert(format!("{}.{}", key, k), v.clone());
                    }
                }
            }
            Value::Array(_) => {}
            _ => {
                out.insert(key.clone(), val.clone());
            }
        }
    }
    out
}

fn is_nested(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => group_thousands(s),
        Value::Number(n) => group_thousands(&n.to_string()),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// "2500000.5" -> "2,500,000.5". Anything that is not a plain decimal is returned unchanged.
fn group_thousands(s: &str) -> String {
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    let is_plain = !int_part.is_empty()
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.is_none_or(|f| f.bytes().all(|b| b.is_ascii_digit()));
    if !is_plain || int_part.len() <= 3 {
        return s.to_string();
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("2500000"), "2,500,000");
        assert_eq!(group_thousands("-1097187.5"), "-1,097,187.5");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("agricultural"), "agricultural");
        assert_eq!(group_thousands("1-3"), "1-3");
    }

    #[test]
    fn test_flatten_one_level() {
        let row = json!({
            "index": 0,
            "analysis": { "score": "2.8", "sensitivity": [] },
            "tags": ["a"]
        });
        let flat = flatten_one_level(row.as_object().unwrap());
        assert_eq!(flat.get("index"), Some(&json!(0)));
        assert_eq!(flat.get("analysis.score"), Some(&json!("2.8")));
        assert!(!flat.contains_key("analysis.sensitivity"));
        assert!(!flat.contains_key("tags"));
    }
}
