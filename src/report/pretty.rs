// file: src/report/pretty.rs
// description: generic json pretty-printer for backend replies

use crate::client::ApiResponse;
use std::io::Write;

/// Re-indents a JSON body. Anything that does not parse is returned trimmed
/// and otherwise untouched.
pub fn pretty_json(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.trim().to_string(),
    }
}

pub fn write_pretty<W: Write>(out: &mut W, response: &ApiResponse) -> std::io::Result<()> {
    writeln!(out, "{}", pretty_json(&response.body))
}
