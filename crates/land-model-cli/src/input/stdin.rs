use serde_json::Value;
use std::io::{self, Read};

/// JSON piped on stdin, e.g. `cat plot.json | landcalc analyze`.
///
/// `None` when stdin is an interactive terminal or the pipe is empty, so the
/// command falls back to its flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| format!("Malformed JSON on stdin: {e}").into())
}
