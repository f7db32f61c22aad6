use serde_json::Value;

/// Headline figure of each command, most specific first.
const HEADLINE_KEYS: [&str; 7] = [
    "break_even_price",
    "monthly_payment",
    "total_net_profit",
    "score",
    "best_score",
    "total",
    "net_profit",
];

/// Print just the headline number of the output.
///
/// Looks for a headline key in the result, then one level down (e.g.
/// `summary.monthly_payment`), then falls back to the first field. List
/// results print one line per item.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Array(rows) => {
            for row in rows {
                println!("{}", headline(row).unwrap_or_else(|| format_minimal(row)));
            }
        }
        Value::Object(map) => match headline(result) {
            Some(line) => println!("{}", line),
            None => match map.iter().next() {
                Some((key, val)) => println!("{}: {}", key, format_minimal(val)),
                None => println!("{{}}"),
            },
        },
        other => println!("{}", format_minimal(other)),
    }
}

fn headline(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    for key in HEADLINE_KEYS {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            return Some(format_minimal(val));
        }
    }
    map.values()
        .filter(|v| v.is_object())
        .find_map(|nested| {
            let inner = nested.as_object()?;
            HEADLINE_KEYS
                .iter()
                .find_map(|key| inner.get(*key).filter(|v| !v.is_null()))
                .map(format_minimal)
        })
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
