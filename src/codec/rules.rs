//! Substitution rule construction and application.
//!
//! The escape direction is expressed as an enumerated, ordered set of
//! literal rules rather than a single pattern: the separator may reach the
//! interceptor literally, single-encoded, or double-encoded depending on
//! how many encoding layers were applied upstream. Case variants of the
//! percent-encoded forms are enumerated explicitly so matching stays a
//! plain substring scan.

/// One literal substitution, applied globally (every occurrence).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    /// Literal substring to search for.
    pub pattern: String,

    /// Literal replacement text.
    pub replacement: String,
}

impl RewriteRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Build the ordered escape rules for a namespace/marker pair.
///
/// The namespace is matched case-sensitively in all forms; only the
/// percent-encoding hex varies. Order mirrors decreasing likelihood:
/// literal separator first, then single-encoded, then double-encoded.
pub fn encode_rules(namespace: &str, marker: &str) -> Vec<RewriteRule> {
    let stem = namespace.strip_suffix('/').unwrap_or(namespace);
    let marker_form = format!("{stem}{marker}");

    vec![
        RewriteRule::new(format!("{stem}/"), marker_form.clone()),
        RewriteRule::new(format!("{stem}%2F"), marker_form.clone()),
        RewriteRule::new(format!("{stem}%2f"), marker_form.clone()),
        RewriteRule::new(format!("{stem}%252F"), marker_form.clone()),
        RewriteRule::new(format!("{stem}%252f"), marker_form),
    ]
}

/// Apply every rule in order, each as a global replacement.
///
/// Returns the input verbatim when nothing matches.
pub fn apply(rules: &[RewriteRule], input: &str) -> String {
    let mut path = input.to_string();
    for rule in rules {
        if path.contains(&rule.pattern) {
            path = path.replace(&rule.pattern, &rule.replacement);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_order_is_literal_then_encoded() {
        let rules = encode_rules("workflows/", "__SLASH__");
        let patterns: Vec<&str> = rules.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(
            patterns,
            vec![
                "workflows/",
                "workflows%2F",
                "workflows%2f",
                "workflows%252F",
                "workflows%252f",
            ]
        );
        assert!(rules.iter().all(|r| r.replacement == "workflows__SLASH__"));
    }

    #[test]
    fn namespace_without_trailing_separator_is_accepted() {
        let rules = encode_rules("workflows", "__SLASH__");
        assert_eq!(rules[0].pattern, "workflows/");
    }

    #[test]
    fn apply_rewrites_every_occurrence() {
        let rules = encode_rules("workflows/", "__SLASH__");
        assert_eq!(
            apply(&rules, "a/workflows/x/workflows/y"),
            "a/workflows__SLASH__x/workflows__SLASH__y"
        );
    }

    #[test]
    fn apply_is_identity_on_unmatched_input() {
        let rules = encode_rules("workflows/", "__SLASH__");
        assert_eq!(apply(&rules, "/api/other/file.json"), "/api/other/file.json");
    }

    #[test]
    fn double_encoded_form_is_not_corrupted_by_single_rule() {
        let rules = encode_rules("workflows/", "__SLASH__");
        assert_eq!(
            apply(&rules, "workflows%252Fa.json"),
            "workflows__SLASH__a.json"
        );
    }
}
