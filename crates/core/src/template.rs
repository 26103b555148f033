//! Naive template rendering
//!
//! Prompt text may contain `{name}` placeholders. Rendering is plain
//! string substitution: no escaping, no conditionals, no loops.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid placeholder regex"));

/// Distinct placeholder names, in order of first appearance
pub fn variables(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(text) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Substitute every placeholder that has a value; leave the rest as-is
pub fn render(text: &str, values: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_variables_in_order_without_duplicates() {
        let text = "Translate {text} into {language}. Keep {text} short.";
        assert_eq!(variables(text), vec!["text", "language"]);
    }

    #[test]
    fn test_variables_ignores_non_identifiers() {
        assert!(variables("{} { spaced } {1abc} {a-b}").is_empty());
        assert_eq!(variables("{{double}}"), vec!["double"]);
    }

    #[test]
    fn test_render_substitutes_all_occurrences() {
        let out = render("{who} meets {who}", &values(&[("who", "Ada")]));
        assert_eq!(out, "Ada meets Ada");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let out = render("Hi {name}, see {link}", &values(&[("name", "Bo")]));
        assert_eq!(out, "Hi Bo, see {link}");
    }

    #[test]
    fn test_render_does_not_expand_values() {
        let out = render("{a}", &values(&[("a", "{b}"), ("b", "x")]));
        assert_eq!(out, "{b}");
    }

    #[test]
    fn test_render_without_placeholders() {
        assert_eq!(render("plain text", &HashMap::new()), "plain text");
    }
}
