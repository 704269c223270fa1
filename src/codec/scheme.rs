//! Bidirectional escape scheme.

use crate::codec::rules::{self, RewriteRule};

/// Stateless transform between the literal and marker forms of a reserved
/// namespace path.
///
/// `encode` protects the separator that trails the namespace by replacing
/// it with the marker token; `decode` restores it. Both are total: input
/// that matches nothing is returned unchanged, and neither can fail.
#[derive(Debug, Clone)]
pub struct EscapeScheme {
    /// Namespace with its trailing separator, e.g. `workflows/`.
    literal_form: String,

    /// Namespace with the marker substituted, e.g. `workflows__SLASH__`.
    marker_form: String,

    encode_rules: Vec<RewriteRule>,
}

impl EscapeScheme {
    /// Build a scheme for a namespace/marker pair.
    ///
    /// The namespace may be given with or without its trailing separator.
    pub fn new(namespace: &str, marker: &str) -> Self {
        let stem = namespace.strip_suffix('/').unwrap_or(namespace);
        Self {
            literal_form: format!("{stem}/"),
            marker_form: format!("{stem}{marker}"),
            encode_rules: rules::encode_rules(namespace, marker),
        }
    }

    /// Replace every namespace+separator occurrence with the marker form.
    ///
    /// All three separator representations are matched; occurrences are
    /// rewritten wherever they appear in the string, not just at the path
    /// start.
    pub fn encode(&self, path: &str) -> String {
        rules::apply(&self.encode_rules, path)
    }

    /// Replace every namespace+marker occurrence with the literal form.
    ///
    /// Only the marker form is matched, so decoding an already-decoded
    /// path is a no-op.
    pub fn decode(&self, path: &str) -> String {
        if self.is_encoded(path) {
            path.replace(&self.marker_form, &self.literal_form)
        } else {
            path.to_string()
        }
    }

    /// Whether the path carries the marker form anywhere.
    pub fn is_encoded(&self, path: &str) -> bool {
        path.contains(&self.marker_form)
    }

    /// The active escape rules, in application order.
    pub fn rules(&self) -> &[RewriteRule] {
        &self.encode_rules
    }

    /// Namespace with its trailing separator.
    pub fn literal_form(&self) -> &str {
        &self.literal_form
    }

    /// Namespace with the marker substituted.
    pub fn marker_form(&self) -> &str {
        &self.marker_form
    }
}
