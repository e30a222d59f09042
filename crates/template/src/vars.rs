//! Variable token extraction and substitution
//!
//! Tokens look like `{NOMBRE}` or `{NOMBRE_COMPLETO}`: uppercase ASCII
//! letters and underscores inside braces. Anything else (lowercase,
//! digits, empty braces, nesting) is plain text.

use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([A-Z_]+)\}").unwrap())
}

/// Extract the unique token names from a text, sorted
pub fn extract_tokens(text: &str) -> BTreeSet<String> {
    token_re()
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// Whether the text contains at least one token
pub fn contains_token(text: &str) -> bool {
    token_re().is_match(text)
}

/// Replace bound tokens with their values.
///
/// Unbound tokens stay in the text literally, so a half-filled binding
/// set still produces readable output.
pub fn substitute(text: &str, bindings: &HashMap<String, String>) -> String {
    token_re()
        .replace_all(text, |caps: &regex::Captures| {
            match bindings.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
