// src/llm/parse.rs
// Labeled-field extraction from free-text model replies.
//
// Replies are expected to carry `LABEL: value` lines, but the model is
// probabilistic: labels may change case, gain stray whitespace, or arrive
// wrapped in markdown code fences. Extraction is therefore case-insensitive
// and first-match-wins, and every caller supplies its own defaults for
// fields that never show up.

use regex::Regex;
use std::collections::HashMap;

/// Strip surrounding markdown code fences, if any
pub fn strip_code_fences(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Extract the value of `LABEL: value` for one label. Case-insensitive,
/// first match wins; the value runs to the end of the line and is trimmed
/// of whitespace and surrounding quotes.
pub fn extract_field(text: &str, label: &str) -> Option<String> {
    let pattern = format!(r"(?i){}[:\s]*([^\n]+)", regex::escape(label));
    let re = Regex::new(&pattern).ok()?;
    let captured = re.captures(text)?.get(1)?.as_str();
    let value = captured.trim().trim_matches('"').trim_matches('\'').trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Extract the first integer following a label, e.g. `CONFIDENCE: 85%` -> 85
pub fn extract_number(text: &str, label: &str) -> Option<u8> {
    let pattern = format!(r"(?i){}[:\s]*([0-9]+)", regex::escape(label));
    let re = Regex::new(&pattern).ok()?;
    let digits = re.captures(text)?.get(1)?.as_str();
    digits.parse::<u64>().ok().map(|n| n.min(100) as u8)
}

/// Extract every requested label into a map, skipping absent ones.
/// Callers supply defaults for whatever is missing.
pub fn parse_labeled_fields(text: &str, labels: &[&str]) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for label in labels {
        if let Some(value) = extract_field(text, label) {
            fields.insert(label.to_string(), value);
        }
    }
    fields
}
