use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a plot input file and deserialise it into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let (canonical, contents) = read_input_file(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Invalid plot input in '{}': {}", canonical.display(), e).into())
}

/// Read an input file whose shape is decided by the caller (e.g. compare accepts
/// both a bare array and a `{"plots": [...]}` object).
pub fn read_json_value(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let (canonical, contents) = read_input_file(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Malformed JSON in '{}': {}", canonical.display(), e).into())
}

fn read_input_file(path: &str) -> Result<(PathBuf, String), Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.is_file() {
        return Err(format!("Input file not found: {}", canonical.display()).into());
    }

    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    Ok((canonical, contents))
}
