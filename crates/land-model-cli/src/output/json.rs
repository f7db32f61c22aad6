use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print the full envelope (result, methodology, warnings) to stdout.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let written = serde_json::to_writer_pretty(&mut handle, value)
        .map_err(|e| e.to_string())
        .and_then(|_| writeln!(handle).map_err(|e| e.to_string()));
    if let Err(e) = written {
        eprintln!("JSON serialization error: {}", e);
    }
}
