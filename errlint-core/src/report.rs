//! Output formatting - plaintext and JSON.

use serde_json::json;

use crate::diagnostics::Diagnostic;

/// Prints diagnostics in plain text format.
pub fn print_plain(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        println!("No error code violations found.");
    } else {
        println!("ERROR CODE VIOLATIONS ({}):", diagnostics.len());
        for d in diagnostics {
            println!("- {}: {}", d.location(), d.message);
        }
    }
}

/// Prints diagnostics in JSON format.
///
/// Falls back to a plain count if serialization fails (should never happen
/// with these types, but all cases are handled).
pub fn print_json(diagnostics: &[Diagnostic]) {
    match serde_json::to_string_pretty(&json!({ "diagnostics": diagnostics })) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            println!("{{\"diagnostic_count\": {}}}", diagnostics.len());
        }
    }
}
