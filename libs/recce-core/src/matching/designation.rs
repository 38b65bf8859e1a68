//! Base-model extraction for alphanumeric designations.
//!
//! Military-style designations encode a variant as a trailing suffix on the
//! base model: "t72bm" is a variant of "t72", "bmp1ksh" of "bmp1", "m1a2" of
//! "m1". The rules here are heuristic and deliberately conservative: when no
//! rule applies the input comes back unchanged. Returning the input (a false
//! negative) is acceptable; stripping part of the base itself is not.

use regex::Regex;

/// Strip a variant suffix from an already-normalized designation.
///
/// Rules are tried in order; the first match wins.
pub fn extract_base_model(text: &str) -> String {
    // Too short to decompose safely.
    if text.chars().count() < 3 {
        return text.to_string();
    }

    // Optional letters, a digit run, then a letter suffix with optional
    // trailing digits: "m1a2" -> "m1", "t72bm" -> "t72".
    let re = Regex::new(r"^([a-z]*[0-9]+)[a-z]+[0-9]*$").unwrap();
    if let Some(caps) = re.captures(text) {
        return caps[1].to_string();
    }

    // Letters, digits, then a bare letter suffix. Ordered after the rule
    // above to keep its first-match precedence for mixed suffixes.
    let re = Regex::new(r"^([a-z]+[0-9]+)[a-z]+$").unwrap();
    if let Some(caps) = re.captures(text) {
        return caps[1].to_string();
    }

    // Multi-word designations: decompose the first word only, and only if
    // that actually shortened it ("t72bm obr 1989" -> "t72").
    if let Some((first, _)) = text.split_once(' ') {
        let base = extract_base_model(first);
        if base.len() < first.len() {
            return base;
        }
    }

    text.to_string()
}
