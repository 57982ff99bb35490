//! Best-effort numeric parsing of QA answer spans.

use once_cell::sync::Lazy;
use regex::Regex;

// Integers or decimals, including a bare fractional form like ".5".
static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d+\.?\d*\b|\b\.\d+\b").expect("static regex"));

/// Extract a numeric value from a QA answer span.
///
/// Strips `$`, `,`, `%` and surrounding whitespace, then searches for the
/// first integer-or-decimal substring. Returns `None` when no such
/// substring exists or conversion fails. This is span extraction, not
/// number-word parsing: "five" is not recognized.
pub fn parse_numeric(answer_text: &str) -> Option<f64> {
    let cleaned: String = answer_text
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%'))
        .collect();
    let cleaned = cleaned.trim();

    let found = NUMBER_RE.find(cleaned)?;
    match found.as_str().parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!(answer = %answer_text, "matched substring failed to parse as f64");
            None
        }
    }
}
